// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration records for a manager and for individual open/close calls.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::key::ActivationEvent;

/// Payload of the menu-toggle callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuToggle {
    /// The state the menu just transitioned into.
    pub is_open: bool,
}

/// Callback fired on every open/close transition.
pub type ToggleCallback = Rc<dyn Fn(MenuToggle)>;

/// Callback fired when an item is chosen.
pub type SelectionCallback<V> = Rc<dyn Fn(&V, &ActivationEvent)>;

/// Manager configuration, fixed at construction.
///
/// ```
/// use understory_menu_button::MenuOptions;
///
/// let options: MenuOptions<&str> = MenuOptions::default()
///     .with_id("file-menu")
///     .with_close_on_selection(false)
///     .with_on_selection(|value, _event| assert_eq!(*value, "save"));
/// assert!(options.close_on_blur);
/// assert_eq!(options.id.as_deref(), Some("file-menu"));
/// ```
pub struct MenuOptions<V> {
    /// Close the menu and refocus the trigger after an item is chosen.
    pub close_on_selection: bool,
    /// Close the menu when focus leaves both the trigger and the menu.
    pub close_on_blur: bool,
    /// Register the manager in a [`ManagerDirectory`](crate::ManagerDirectory) under this id.
    pub id: Option<String>,
    /// Invoked after every open/close transition.
    pub on_menu_toggle: Option<ToggleCallback>,
    /// Invoked when an item is chosen, after any close caused by the selection.
    pub on_selection: Option<SelectionCallback<V>>,
}

impl<V> Default for MenuOptions<V> {
    fn default() -> Self {
        Self {
            close_on_selection: true,
            close_on_blur: true,
            id: None,
            on_menu_toggle: None,
            on_selection: None,
        }
    }
}

impl<V> MenuOptions<V> {
    /// Set [`MenuOptions::close_on_selection`].
    #[must_use]
    pub fn with_close_on_selection(mut self, close: bool) -> Self {
        self.close_on_selection = close;
        self
    }

    /// Set [`MenuOptions::close_on_blur`].
    #[must_use]
    pub fn with_close_on_blur(mut self, close: bool) -> Self {
        self.close_on_blur = close;
        self
    }

    /// Set [`MenuOptions::id`].
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set [`MenuOptions::on_menu_toggle`].
    #[must_use]
    pub fn with_on_menu_toggle(mut self, callback: impl Fn(MenuToggle) + 'static) -> Self {
        self.on_menu_toggle = Some(Rc::new(callback));
        self
    }

    /// Set [`MenuOptions::on_selection`].
    #[must_use]
    pub fn with_on_selection(mut self, callback: impl Fn(&V, &ActivationEvent) + 'static) -> Self {
        self.on_selection = Some(Rc::new(callback));
        self
    }
}

impl<V> fmt::Debug for MenuOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("close_on_selection", &self.close_on_selection)
            .field("close_on_blur", &self.close_on_blur)
            .field("id", &self.id)
            .field("on_menu_toggle", &self.on_menu_toggle.is_some())
            .field("on_selection", &self.on_selection.is_some())
            .finish()
    }
}

/// Options for [`MenuManager::open_menu`](crate::MenuManager::open_menu).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenOptions {
    /// Move focus to the first item on the next turn.
    pub focus_menu: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self { focus_menu: true }
    }
}

/// Options for [`MenuManager::close_menu`](crate::MenuManager::close_menu).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CloseOptions {
    /// Move focus back to the trigger before returning.
    pub focus_button: bool,
}

impl CloseOptions {
    /// Close and return focus to the trigger.
    pub const FOCUS_BUTTON: Self = Self { focus_button: true };
}
