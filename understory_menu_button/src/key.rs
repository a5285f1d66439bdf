// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard and activation event payloads.
//!
//! These are deliberately small: the host translates its platform events into
//! a [`KeyEvent`] before handing them to the manager, and reads
//! [`KeyEvent::default_prevented`] afterwards to decide whether to run the
//! platform default action.

use bitflags::bitflags;

/// Logical key carried by a [`KeyEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// The Home key.
    Home,
    /// The End key.
    End,
    /// The Enter/Return key.
    Enter,
    /// The space bar.
    Space,
    /// The Tab key.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// A printable character, as produced by the active keyboard layout.
    Character(char),
    /// Anything the host could not map.
    Unidentified,
}

impl Key {
    /// Returns `true` for the four arrow keys.
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }
}

bitflags! {
    /// Modifier keys held while a [`KeyEvent`] was produced.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

/// A key press routed to the manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    /// Creates an unmodified key event.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    /// Returns this event with `modifiers` set.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the platform default action for this event as suppressed.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler asked to suppress the platform default action.
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The input that chose a menu item.
///
/// The manager never inspects it; it is handed to the selection callback as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivationEvent {
    /// A pointer click or tap.
    Pointer,
    /// A key press (typically Enter or Space).
    Keyboard(KeyEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_arrows_are_arrows() {
        assert!(Key::ArrowUp.is_arrow());
        assert!(Key::ArrowLeft.is_arrow());
        assert!(!Key::Home.is_arrow());
        assert!(!Key::Character('a').is_arrow());
    }

    #[test]
    fn prevent_default_sticks() {
        let mut ev = KeyEvent::new(Key::Escape).with_modifiers(Modifiers::SHIFT);
        assert!(!ev.default_prevented());
        ev.prevent_default();
        ev.prevent_default();
        assert!(ev.default_prevented());
        assert_eq!(ev.modifiers, Modifiers::SHIFT);
    }
}
