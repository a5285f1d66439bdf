// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording fakes shared by the unit tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::binding::{Menu, MenuState, Trigger, TriggerState};
use crate::coordinator::{FocusCoordinator, FocusGroupOptions};
use crate::key::{Key, KeyEvent};

/// One call made on a [`RecordingGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Add(u32),
    Clear,
    FocusAt(usize),
    First,
    Last,
    Activate,
    Deactivate,
    Unbound(Key),
}

pub(crate) struct RecordingGroup {
    pub(crate) options: FocusGroupOptions,
    members: RefCell<Vec<u32>>,
    calls: RefCell<Vec<Call>>,
    on_focus: RefCell<Option<Box<dyn Fn()>>>,
}

impl RecordingGroup {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn members(&self) -> Vec<u32> {
        self.members.borrow().clone()
    }

    /// Run `f` whenever the group moves focus to an item, the way a focus
    /// change reaches host listeners.
    pub(crate) fn set_on_focus(&self, f: impl Fn() + 'static) {
        *self.on_focus.borrow_mut() = Some(Box::new(f));
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn moved_focus(&self) {
        if let Some(f) = self.on_focus.borrow().as_ref() {
            f();
        }
    }
}

impl FocusCoordinator for RecordingGroup {
    type Item = u32;

    fn with_options(options: FocusGroupOptions) -> Self {
        Self {
            options,
            members: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            on_focus: RefCell::new(None),
        }
    }

    fn add_member(&self, item: u32) {
        self.members.borrow_mut().push(item);
        self.record(Call::Add(item));
    }

    fn clear_members(&self) {
        self.members.borrow_mut().clear();
        self.record(Call::Clear);
    }

    fn focus_node_at_index(&self, index: usize) {
        self.record(Call::FocusAt(index));
        self.moved_focus();
    }

    fn move_focus_to_first(&self) {
        self.record(Call::First);
        self.moved_focus();
    }

    fn move_focus_to_last(&self) {
        self.record(Call::Last);
        self.moved_focus();
    }

    fn activate(&self) {
        self.record(Call::Activate);
    }

    fn deactivate(&self) {
        self.record(Call::Deactivate);
    }

    fn handle_unbound_key(&self, event: &KeyEvent) {
        self.record(Call::Unbound(event.key));
    }
}

/// Stand-in for a document's focus state.
#[derive(Debug, Default)]
pub(crate) struct Doc {
    pub(crate) active: Cell<Option<u32>>,
}

pub(crate) struct FakeTrigger {
    pub(crate) node: Cell<Option<u32>>,
    pub(crate) states: RefCell<Vec<TriggerState>>,
    pub(crate) focus_count: Cell<usize>,
    doc: Rc<Doc>,
    on_focus: RefCell<Option<Box<dyn Fn()>>>,
}

impl FakeTrigger {
    pub(crate) fn new(node: u32, doc: &Rc<Doc>) -> Self {
        Self {
            node: Cell::new(Some(node)),
            states: RefCell::new(Vec::new()),
            focus_count: Cell::new(0),
            doc: doc.clone(),
            on_focus: RefCell::new(None),
        }
    }

    /// Run `f` whenever focus moves onto the trigger, like a blur listener on
    /// the element that loses focus.
    pub(crate) fn set_on_focus(&self, f: impl Fn() + 'static) {
        *self.on_focus.borrow_mut() = Some(Box::new(f));
    }
}

impl Trigger<u32> for FakeTrigger {
    fn set_state(&self, state: TriggerState) {
        self.states.borrow_mut().push(state);
    }

    fn node(&self) -> Option<u32> {
        self.node.get()
    }

    fn active_element(&self) -> Option<u32> {
        self.doc.active.get()
    }

    fn focus(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
        self.doc.active.set(self.node.get());
        if let Some(f) = self.on_focus.borrow().as_ref() {
            f();
        }
    }
}

pub(crate) struct FakeMenu {
    pub(crate) node: Cell<Option<u32>>,
    children: Vec<u32>,
    pub(crate) states: RefCell<Vec<MenuState>>,
}

impl FakeMenu {
    pub(crate) fn new(node: u32, children: Vec<u32>) -> Self {
        Self {
            node: Cell::new(Some(node)),
            children,
            states: RefCell::new(Vec::new()),
        }
    }
}

impl Menu<u32> for FakeMenu {
    fn set_state(&self, state: MenuState) {
        self.states.borrow_mut().push(state);
    }

    fn node(&self) -> Option<u32> {
        self.node.get()
    }

    fn contains(&self, node: u32) -> bool {
        self.node.get() == Some(node) || self.children.contains(&node)
    }
}
