// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Menu Button: headless interaction state for disclosure-style menus.
//!
//! A menu button is a trigger that reveals a list of selectable items. This
//! crate owns the part of that widget with real ordering concerns:
//!
//! - **Open/closed state** ([`MenuManager::open_menu`], [`MenuManager::close_menu`],
//!   [`MenuManager::toggle_menu`]). Redundant calls are no-ops, and each real
//!   transition notifies both bindings and [`MenuOptions::on_menu_toggle`] exactly once.
//! - **Deferred focus**. Opening focuses the first item on the *next* turn of the
//!   event loop, because the menu may not be focusable until the host has reacted
//!   to the state change.
//! - **Blur-driven close**. [`MenuManager::handle_blur`] waits one turn for the new
//!   focus target to settle, then closes the menu only if focus left both the
//!   trigger and the menu.
//! - **Keyboard policy**. Escape, Home and End inside the menu
//!   ([`MenuManager::handle_menu_key`]); non-arrow keys on the trigger are forwarded
//!   for typeahead ([`MenuManager::handle_button_non_arrow_key`]).
//!
//! It does not render anything and does not do item traversal itself. The host
//! provides:
//!
//! - [`Trigger`] and [`Menu`] bindings for the two widgets,
//! - a [`FocusCoordinator`] for arrow/wrap/typeahead traversal over items,
//! - a [`Scheduler`] for next-turn work ([`TurnQueue`] is a ready-made one),
//! - optionally a [`ManagerDirectory`] so other code can reach a menu by id.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//! use understory_menu_button::{
//!     CloseOptions, FocusCoordinator, FocusGroupOptions, Key, KeyEvent, Menu, MenuManager,
//!     MenuOptions, MenuState, OpenOptions, Trigger, TriggerState, TurnQueue,
//! };
//!
//! // Node ids: 1 is the button, 10 the menu, 11 and 12 its items, 0 the body.
//! struct Button { focused: Rc<Cell<u32>> }
//! impl Trigger<u32> for Button {
//!     fn set_state(&self, _: TriggerState) {}
//!     fn node(&self) -> Option<u32> { Some(1) }
//!     fn active_element(&self) -> Option<u32> { Some(self.focused.get()) }
//!     fn focus(&self) { self.focused.set(1) }
//! }
//!
//! struct List;
//! impl Menu<u32> for List {
//!     fn set_state(&self, _: MenuState) {}
//!     fn node(&self) -> Option<u32> { Some(10) }
//!     fn contains(&self, node: u32) -> bool { (10..=12).contains(&node) }
//! }
//!
//! struct Items { focused: Rc<Cell<u32>>, members: RefCell<Vec<u32>> }
//! impl FocusCoordinator for Items {
//!     type Item = u32;
//!     fn with_options(options: FocusGroupOptions) -> Self {
//!         assert!(options.wrap && options.string_search);
//!         Items { focused: Rc::new(Cell::new(0)), members: RefCell::new(Vec::new()) }
//!     }
//!     fn add_member(&self, item: u32) { self.members.borrow_mut().push(item) }
//!     fn clear_members(&self) { self.members.borrow_mut().clear() }
//!     fn focus_node_at_index(&self, i: usize) {
//!         let target = self.members.borrow().get(i).copied();
//!         if let Some(n) = target { self.focused.set(n) }
//!     }
//!     fn move_focus_to_first(&self) { self.focus_node_at_index(0) }
//!     fn move_focus_to_last(&self) {
//!         let last = self.members.borrow().len().saturating_sub(1);
//!         self.focus_node_at_index(last)
//!     }
//!     fn activate(&self) {}
//!     fn deactivate(&self) {}
//!     fn handle_unbound_key(&self, _: &KeyEvent) {}
//! }
//!
//! let queue = Rc::new(TurnQueue::new());
//! let manager: MenuManager<u32, Items, &str> =
//!     MenuManager::new(queue.clone(), None, MenuOptions::default());
//! let focused = manager.coordinator().focused.clone();
//! let button = Rc::new(Button { focused: focused.clone() });
//! let list = Rc::new(List);
//! manager.attach_trigger(&button);
//! manager.attach_menu(&list);
//! manager.add_item(11);
//! manager.add_item(12);
//!
//! manager.open_menu(OpenOptions::default());
//! assert!(manager.is_open());
//! assert_eq!(focused.get(), 0); // not yet
//! queue.run_turn();
//! assert_eq!(focused.get(), 11);
//!
//! let mut end = KeyEvent::new(Key::End);
//! manager.handle_menu_key(&mut end);
//! assert!(end.default_prevented());
//! assert_eq!(focused.get(), 12);
//!
//! // Focus wanders off to the page body; the menu closes on the next turn.
//! manager.handle_blur();
//! focused.set(0);
//! queue.run_turn();
//! assert!(!manager.is_open());
//!
//! manager.destroy();
//! ```
//!
//! ## Bound handlers
//!
//! Bindings usually want plain callbacks rather than a manager handle.
//! [`MenuManager::blur_handler`], [`MenuManager::selection_handler`] and
//! [`MenuManager::menu_key_handler`] return closures bound to their manager
//! through a weak reference, so a binding holding them neither keeps the
//! manager alive nor breaks when it goes away.
//!
//! ## Re-entrancy
//!
//! Moving platform focus often fires blur synchronously. The manager never
//! holds its internal state borrowed while calling into a binding, a callback,
//! or the coordinator, and [`FocusCoordinator`] methods take `&self`, so all
//! of them may call back into the manager freely. A coordinator only has to
//! release its own interior borrows before it moves focus.
//!
//! ## Logging
//!
//! Transitions and registrations are reported through the [`log`] facade at
//! `debug`, deferred scheduling and blur decisions at `trace`. Install any
//! logger to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod coordinator;
mod directory;
mod key;
mod manager;
mod options;
mod schedule;

#[cfg(test)]
mod testing;

pub use binding::{Menu, MenuState, Trigger, TriggerState};
pub use coordinator::{FocusCoordinator, FocusGroupOptions, MENU_FOCUS_GROUP};
pub use directory::{DirectoryError, ManagerDirectory};
pub use key::{ActivationEvent, Key, KeyEvent, Modifiers};
pub use manager::MenuManager;
pub use options::{
    CloseOptions, MenuOptions, MenuToggle, OpenOptions, SelectionCallback, ToggleCallback,
};
pub use schedule::{Scheduler, Task, TimerHandle, TurnQueue};
