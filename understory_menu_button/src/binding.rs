// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the two UI components a manager coordinates.
//!
//! A binding is whatever owns the actual widget (a DOM element, a retained
//! widget, a terminal cell range). It mounts, attaches itself to the manager,
//! and gets its visual state pushed back through `set_state`.
//!
//! Both traits take `&self`: the manager only holds a [`Weak`](alloc::rc::Weak)
//! handle and may call into a binding while the binding is itself inside an
//! event callback, so implementations use interior mutability for their state.
//!
//! Node identifiers are the host's own small copyable handle `K`, the same way
//! `understory_focus` and `understory_event_state` stay generic over node ids.

/// Visual state pushed to the trigger binding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerState {
    /// Whether the menu controlled by this trigger is currently open.
    pub menu_open: bool,
}

/// Visual state pushed to the menu binding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    /// Whether the menu is currently open.
    pub is_open: bool,
}

/// The button that opens and closes the menu.
pub trait Trigger<K> {
    /// Replace the trigger's visual state.
    fn set_state(&self, state: TriggerState);

    /// The trigger's focusable node, or `None` if it is not mounted.
    fn node(&self) -> Option<K>;

    /// The node that currently holds focus in the trigger's document.
    ///
    /// `None` means nothing focusable is focused (for example, the document body).
    fn active_element(&self) -> Option<K>;

    /// Move focus to the trigger's node.
    ///
    /// Must take effect before returning.
    fn focus(&self);
}

/// The container presenting the selectable items.
pub trait Menu<K> {
    /// Replace the menu's visual state.
    fn set_state(&self, state: MenuState);

    /// The menu's own node, or `None` if it is not mounted.
    fn node(&self) -> Option<K>;

    /// Whether `node` is the menu node or one of its descendants.
    fn contains(&self, node: K) -> bool;
}
