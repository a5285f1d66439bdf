// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for the item-level focus coordinator.
//!
//! The coordinator owns the ordered list of focusable items and all of the
//! traversal math: arrow movement, wrap-around, and letter typeahead. The
//! manager only tells it when to start and stop listening and where to jump.

use crate::key::KeyEvent;

/// Behavioral flags a coordinator is constructed with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FocusGroupOptions {
    /// Moving past the last item lands on the first, and vice versa.
    pub wrap: bool,
    /// Typing a printable character moves focus to the next item whose label
    /// starts with it.
    pub string_search: bool,
}

/// The fixed configuration every menu manager uses for its coordinator.
///
/// Menu items wrap at the top and bottom, and typing a letter jumps to the
/// next item starting with that letter.
pub const MENU_FOCUS_GROUP: FocusGroupOptions = FocusGroupOptions {
    wrap: true,
    string_search: true,
};

/// Item-level focus traversal over the menu's members.
///
/// Methods take `&self`, so implementations keep their member list and
/// active flag behind interior mutability. They may move platform focus
/// synchronously, and host code reached that way may call back into the
/// manager, including the item operations that land on this coordinator
/// again. An implementation must release its own borrows before moving focus.
pub trait FocusCoordinator {
    /// Host handle for a focusable member.
    type Item;

    /// Build a coordinator with the given behavior.
    fn with_options(options: FocusGroupOptions) -> Self
    where
        Self: Sized;

    /// Append a member to the traversal order.
    fn add_member(&self, item: Self::Item);

    /// Remove every member.
    fn clear_members(&self);

    /// Focus the member at `index`; out-of-range indices are ignored.
    fn focus_node_at_index(&self, index: usize);

    /// Focus the first member.
    fn move_focus_to_first(&self);

    /// Focus the last member.
    fn move_focus_to_last(&self);

    /// Start reacting to navigation keys.
    fn activate(&self);

    /// Stop reacting to navigation keys.
    fn deactivate(&self);

    /// Handle a key that no other handler routed, such as a typeahead letter.
    fn handle_unbound_key(&self, event: &KeyEvent);
}
