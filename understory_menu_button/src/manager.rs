// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction manager: open/close state, deferred focus, and key policy.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use crate::binding::{Menu, MenuState, Trigger, TriggerState};
use crate::coordinator::{FocusCoordinator, MENU_FOCUS_GROUP};
use crate::directory::{Entries, ManagerDirectory};
use crate::key::{ActivationEvent, Key, KeyEvent};
use crate::options::{CloseOptions, MenuOptions, MenuToggle, OpenOptions};
use crate::schedule::{Scheduler, TimerHandle};

/// Shared handle to one menu's interaction state.
///
/// Cloning is cheap and every clone refers to the same menu. Event handlers
/// handed to bindings ([`MenuManager::blur_handler`] and friends) hold only a
/// weak reference, so they turn into no-ops once every handle is dropped.
///
/// Type parameters:
/// - `K`: host node identifier used by the bindings.
/// - `C`: the [`FocusCoordinator`] implementation.
/// - `V`: the value type carried by item selection.
pub struct MenuManager<K, C, V> {
    pub(crate) inner: Rc<Inner<K, C, V>>,
}

pub(crate) struct Inner<K, C, V> {
    options: MenuOptions<V>,
    scheduler: Rc<dyn Scheduler>,
    coordinator: C,
    state: RefCell<State<K>>,
    registration: RefCell<Option<Registration<K, C, V>>>,
}

struct State<K> {
    is_open: bool,
    trigger: Option<Weak<dyn Trigger<K>>>,
    menu: Option<Weak<dyn Menu<K>>>,
    focus_timer: Option<TimerHandle>,
    blur_timer: Option<TimerHandle>,
}

struct Registration<K, C, V> {
    id: String,
    entries: Weak<Entries<K, C, V>>,
}

impl<K, C, V> Clone for MenuManager<K, C, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, C, V> MenuManager<K, C, V>
where
    K: Copy + Eq + 'static,
    C: FocusCoordinator + 'static,
    V: 'static,
{
    /// Create a closed manager.
    ///
    /// Deferred work goes through `scheduler`. If `options.id` is set and a
    /// `directory` is given, the manager registers itself there under that id,
    /// replacing any previous registrant.
    #[must_use]
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        directory: Option<&ManagerDirectory<K, C, V>>,
        options: MenuOptions<V>,
    ) -> Self {
        let manager = Self {
            inner: Rc::new(Inner {
                options,
                scheduler,
                coordinator: C::with_options(MENU_FOCUS_GROUP),
                state: RefCell::new(State {
                    is_open: false,
                    trigger: None,
                    menu: None,
                    focus_timer: None,
                    blur_timer: None,
                }),
                registration: RefCell::new(None),
            }),
        };
        if let Some(id) = manager.inner.options.id.clone() {
            match directory {
                Some(directory) => {
                    directory.register(id.clone(), &manager);
                    *manager.inner.registration.borrow_mut() = Some(Registration {
                        id,
                        entries: Rc::downgrade(&directory.entries),
                    });
                }
                None => log::warn!("menu id {id:?} configured without a directory; not registered"),
            }
        }
        manager
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open
    }

    /// The configuration this manager was built with.
    #[must_use]
    pub fn options(&self) -> &MenuOptions<V> {
        &self.inner.options
    }

    /// The focus coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &C {
        &self.inner.coordinator
    }

    /// Whether `self` and `other` are handles to the same menu.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Attach the trigger binding; called when the trigger mounts.
    pub fn attach_trigger<T: Trigger<K> + 'static>(&self, trigger: &Rc<T>) {
        let weak = Rc::downgrade(trigger);
        let weak: Weak<dyn Trigger<K>> = weak;
        self.inner.state.borrow_mut().trigger = Some(weak);
    }

    /// Attach the menu binding; called when the menu mounts.
    pub fn attach_menu<M: Menu<K> + 'static>(&self, menu: &Rc<M>) {
        let weak = Rc::downgrade(menu);
        let weak: Weak<dyn Menu<K>> = weak;
        self.inner.state.borrow_mut().menu = Some(weak);
    }

    /// Forget the trigger binding; called when the trigger unmounts.
    pub fn detach_trigger(&self) {
        self.inner.state.borrow_mut().trigger = None;
    }

    /// Forget the menu binding; called when the menu unmounts.
    pub fn detach_menu(&self) {
        self.inner.state.borrow_mut().menu = None;
    }

    fn trigger(&self) -> Option<Rc<dyn Trigger<K>>> {
        self.inner.state.borrow().trigger.as_ref()?.upgrade()
    }

    fn menu(&self) -> Option<Rc<dyn Menu<K>>> {
        self.inner.state.borrow().menu.as_ref()?.upgrade()
    }

    /// Focus the item at `index` through the coordinator.
    pub fn focus_item(&self, index: usize) {
        self.inner.coordinator.focus_node_at_index(index);
    }

    /// Append an item to the coordinator's traversal order.
    pub fn add_item(&self, item: C::Item) {
        self.inner.coordinator.add_member(item);
    }

    /// Remove every item from the coordinator.
    pub fn clear_items(&self) {
        self.inner.coordinator.clear_members();
    }

    /// Forward a non-arrow key pressed on the trigger to the coordinator.
    ///
    /// This lets typeahead work from the trigger before the menu opens.
    /// Arrow keys are left to the trigger's own open/close handling.
    pub fn handle_button_non_arrow_key(&self, event: &KeyEvent) {
        if event.key.is_arrow() {
            return;
        }
        self.inner.coordinator.handle_unbound_key(event);
    }

    /// Push the current open state to both bindings and the toggle callback.
    ///
    /// Every transition goes through here exactly once.
    pub fn update(&self) {
        let is_open = self.is_open();
        if let Some(menu) = self.menu() {
            menu.set_state(MenuState { is_open });
        }
        if let Some(trigger) = self.trigger() {
            trigger.set_state(TriggerState { menu_open: is_open });
        }
        if let Some(on_toggle) = &self.inner.options.on_menu_toggle {
            on_toggle(MenuToggle { is_open });
        }
    }

    /// Open the menu. No-op if it is already open.
    ///
    /// With [`OpenOptions::focus_menu`], the first item is focused on the next
    /// turn, once the menu has had a chance to become focusable.
    pub fn open_menu(&self, open: OpenOptions) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.is_open {
                return;
            }
            state.is_open = true;
        }
        log::debug!("menu {:?} opened", self.inner.options.id);
        self.update();
        self.inner.coordinator.activate();
        if open.focus_menu {
            let handle = self.defer(|manager| manager.focus_item(0));
            self.inner.state.borrow_mut().focus_timer = Some(handle);
        }
    }

    /// Close the menu. No-op if it is already closed.
    ///
    /// With [`CloseOptions::focus_button`], the trigger is focused before this returns.
    pub fn close_menu(&self, close: CloseOptions) {
        {
            let mut state = self.inner.state.borrow_mut();
            if !state.is_open {
                return;
            }
            state.is_open = false;
        }
        log::debug!("menu {:?} closed", self.inner.options.id);
        self.update();
        self.inner.coordinator.deactivate();
        if close.focus_button {
            if let Some(trigger) = self.trigger() {
                trigger.focus();
            }
        }
    }

    /// Close if open, open if closed.
    pub fn toggle_menu(&self, close: CloseOptions, open: OpenOptions) {
        if self.is_open() {
            self.close_menu(close);
        } else {
            self.open_menu(open);
        }
    }

    /// React to an item being chosen.
    ///
    /// The menu closes (returning focus to the trigger) first when
    /// [`MenuOptions::close_on_selection`] is set; the selection callback runs after.
    pub fn handle_selection(&self, value: &V, event: &ActivationEvent) {
        if self.inner.options.close_on_selection {
            self.close_menu(CloseOptions::FOCUS_BUTTON);
        }
        if let Some(on_selection) = &self.inner.options.on_selection {
            on_selection(value, event);
        }
    }

    /// React to the trigger or the menu losing focus.
    ///
    /// The decision is deferred to the next turn, when the newly focused
    /// element is known.
    pub fn handle_blur(&self) {
        let handle = self.defer(|manager| manager.check_focus_after_blur());
        self.inner.state.borrow_mut().blur_timer = Some(handle);
    }

    fn check_focus_after_blur(&self) {
        let Some(trigger) = self.trigger() else {
            return;
        };
        let Some(trigger_node) = trigger.node() else {
            return;
        };
        let active = trigger.active_element();
        if active == Some(trigger_node) {
            return;
        }
        // An unmounted menu node counts as "not inside".
        if let Some(active) = active
            && let Some(menu) = self.menu()
            && let Some(menu_node) = menu.node()
        {
            if menu_node == active {
                log::trace!("focus landed on the menu container; rerouting to first item");
                self.focus_item(0);
                return;
            }
            if menu.contains(active) {
                return;
            }
        }
        if !self.inner.options.close_on_blur {
            return;
        }
        if self.is_open() {
            log::trace!("focus left the menu button; closing");
            self.close_menu(CloseOptions { focus_button: false });
        }
    }

    /// Handle a key pressed while focus is inside the menu.
    ///
    /// Only acts while open: Escape closes and refocuses the trigger, Home and
    /// End jump to the first and last item. Handled keys have their default
    /// prevented; everything else is left untouched for other handlers.
    pub fn handle_menu_key(&self, event: &mut KeyEvent) {
        if !self.is_open() {
            return;
        }
        match event.key {
            Key::Escape => {
                event.prevent_default();
                self.close_menu(CloseOptions::FOCUS_BUTTON);
            }
            Key::Home => {
                event.prevent_default();
                self.inner.coordinator.move_focus_to_first();
            }
            Key::End => {
                event.prevent_default();
                self.inner.coordinator.move_focus_to_last();
            }
            _ => {}
        }
    }

    /// A blur handler bound to this manager, for wiring into bindings.
    #[must_use]
    pub fn blur_handler(&self) -> impl Fn() + use<K, C, V> {
        let weak = Rc::downgrade(&self.inner);
        move || {
            if let Some(inner) = weak.upgrade() {
                Self { inner }.handle_blur();
            }
        }
    }

    /// A selection handler bound to this manager, for wiring into bindings.
    #[must_use]
    pub fn selection_handler(&self) -> impl Fn(&V, &ActivationEvent) + use<K, C, V> {
        let weak = Rc::downgrade(&self.inner);
        move |value, event| {
            if let Some(inner) = weak.upgrade() {
                Self { inner }.handle_selection(value, event);
            }
        }
    }

    /// A menu key handler bound to this manager, for wiring into bindings.
    #[must_use]
    pub fn menu_key_handler(&self) -> impl Fn(&mut KeyEvent) + use<K, C, V> {
        let weak = Rc::downgrade(&self.inner);
        move |event| {
            if let Some(inner) = weak.upgrade() {
                Self { inner }.handle_menu_key(event);
            }
        }
    }

    /// Tear down: forget both bindings, deactivate the coordinator, cancel
    /// pending deferred work, and leave the directory.
    ///
    /// Safe to call more than once. The manager stays usable afterwards, but
    /// with no bindings attached blur checks and notifications do nothing.
    pub fn destroy(&self) {
        let (blur_timer, focus_timer) = {
            let mut state = self.inner.state.borrow_mut();
            state.trigger = None;
            state.menu = None;
            (state.blur_timer.take(), state.focus_timer.take())
        };
        self.inner.coordinator.deactivate();
        for handle in [blur_timer, focus_timer].into_iter().flatten() {
            self.inner.scheduler.cancel(handle);
        }
        let registration = self.inner.registration.borrow_mut().take();
        if let Some(Registration { id, entries }) = registration {
            if let Some(entries) = entries.upgrade() {
                let mut entries = entries.borrow_mut();
                let ours = entries
                    .get(&id)
                    .is_some_and(|w| Weak::ptr_eq(w, &Rc::downgrade(&self.inner)));
                if ours {
                    entries.remove(&id);
                    log::debug!("menu {id:?} unregistered");
                }
            }
        }
    }

    fn defer(&self, f: impl FnOnce(&Self) + 'static) -> TimerHandle {
        let weak = Rc::downgrade(&self.inner);
        log::trace!("deferring menu work to the next turn");
        self.inner.scheduler.defer(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                f(&Self { inner });
            }
        }))
    }
}

impl<K, C, V> fmt::Debug for MenuManager<K, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("MenuManager")
            .field("id", &self.inner.options.id)
            .field("is_open", &state.is_open)
            .field("trigger", &state.trigger.is_some())
            .field("menu", &state.menu.is_some())
            .finish_non_exhaustive()
    }
}
