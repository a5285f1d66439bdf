// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup of managers by an external id.
//!
//! A [`ManagerDirectory`] lets code that holds no reference to a menu still
//! open or close it, for example a global shortcut or a test harness. The
//! directory is an explicit object: create one per application (or per test)
//! and hand it to every [`MenuManager::new`] that should be reachable by id.
//!
//! Managers never read from the directory. Entries do not keep a manager
//! alive, and [`MenuManager::destroy`] removes the manager's own entry.
//!
//! ```
//! use std::rc::Rc;
//! use understory_menu_button::{
//!     CloseOptions, FocusCoordinator, FocusGroupOptions, KeyEvent, ManagerDirectory,
//!     MenuManager, MenuOptions, OpenOptions, TurnQueue,
//! };
//!
//! // A coordinator that ignores everything, enough for this example.
//! struct Inert;
//! impl FocusCoordinator for Inert {
//!     type Item = u32;
//!     fn with_options(_: FocusGroupOptions) -> Self { Inert }
//!     fn add_member(&self, _: u32) {}
//!     fn clear_members(&self) {}
//!     fn focus_node_at_index(&self, _: usize) {}
//!     fn move_focus_to_first(&self) {}
//!     fn move_focus_to_last(&self) {}
//!     fn activate(&self) {}
//!     fn deactivate(&self) {}
//!     fn handle_unbound_key(&self, _: &KeyEvent) {}
//! }
//!
//! let directory: ManagerDirectory<u32, Inert, ()> = ManagerDirectory::new();
//! let manager = MenuManager::new(
//!     Rc::new(TurnQueue::new()),
//!     Some(&directory),
//!     MenuOptions::default().with_id("edit"),
//! );
//!
//! directory.open_menu("edit", OpenOptions { focus_menu: false }).unwrap();
//! assert!(manager.is_open());
//! assert!(directory.close_menu("view", CloseOptions::default()).is_err());
//! ```

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::coordinator::FocusCoordinator;
use crate::manager::{Inner, MenuManager};
use crate::options::{CloseOptions, OpenOptions};

pub(crate) type Entries<K, C, V> = RefCell<HashMap<String, Weak<Inner<K, C, V>>>>;

/// Error returned when driving a menu by id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No live manager is registered under this id.
    #[error("no menu registered under id {0:?}")]
    UnknownMenu(String),
}

/// Registry mapping external ids to managers.
///
/// Cloning yields another handle to the same registry.
pub struct ManagerDirectory<K, C, V> {
    pub(crate) entries: Rc<Entries<K, C, V>>,
}

impl<K, C, V> Clone for ManagerDirectory<K, C, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K, C, V> Default for ManagerDirectory<K, C, V> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<K, C, V> ManagerDirectory<K, C, V>
where
    K: Copy + Eq + 'static,
    C: FocusCoordinator + 'static,
    V: 'static,
{
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `manager` under `id`, replacing any previous registrant.
    pub fn register(&self, id: impl Into<String>, manager: &MenuManager<K, C, V>) {
        let id = id.into();
        let previous = {
            let mut entries = self.entries.borrow_mut();
            // Managers dropped without `destroy` leave dead entries behind.
            entries.retain(|_, w| w.strong_count() > 0);
            entries.insert(id.clone(), Rc::downgrade(&manager.inner))
        };
        if previous.is_some_and(|w| w.strong_count() > 0) {
            log::debug!("menu {id:?} re-registered; previous manager replaced");
        } else {
            log::debug!("menu {id:?} registered");
        }
    }

    /// Remove the entry for `id`. Returns whether one existed.
    pub fn unregister(&self, id: &str) -> bool {
        self.entries.borrow_mut().remove(id).is_some()
    }

    /// The live manager registered under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<MenuManager<K, C, V>> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(id)?.upgrade() {
            Some(inner) => Some(MenuManager { inner }),
            None => {
                entries.remove(id);
                None
            }
        }
    }

    /// Whether a live manager is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Whether there are no live registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Open the menu registered under `id`.
    pub fn open_menu(&self, id: &str, open: OpenOptions) -> Result<(), DirectoryError> {
        self.lookup(id)?.open_menu(open);
        Ok(())
    }

    /// Close the menu registered under `id`.
    pub fn close_menu(&self, id: &str, close: CloseOptions) -> Result<(), DirectoryError> {
        self.lookup(id)?.close_menu(close);
        Ok(())
    }

    fn lookup(&self, id: &str) -> Result<MenuManager<K, C, V>, DirectoryError> {
        self.get(id)
            .ok_or_else(|| DirectoryError::UnknownMenu(id.to_string()))
    }
}

impl<K, C, V> fmt::Debug for ManagerDirectory<K, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerDirectory")
            .field("entries", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MenuOptions;
    use crate::schedule::TurnQueue;
    use crate::testing::RecordingGroup;

    type Manager = MenuManager<u32, RecordingGroup, ()>;
    type Directory = ManagerDirectory<u32, RecordingGroup, ()>;

    fn manager_with_id(directory: &Directory, id: &str) -> Manager {
        Manager::new(
            Rc::new(TurnQueue::new()),
            Some(directory),
            MenuOptions::default().with_id(id),
        )
    }

    #[test]
    fn construction_registers_under_the_configured_id() {
        let directory = Directory::new();
        let manager = manager_with_id(&directory, "file");
        let found = directory.get("file").expect("registered at construction");
        assert!(found.ptr_eq(&manager));
        assert_eq!(directory.len(), 1);
        assert!(directory.get("edit").is_none());
    }

    #[test]
    fn without_an_id_nothing_is_registered() {
        let directory = Directory::new();
        let _manager = Manager::new(
            Rc::new(TurnQueue::new()),
            Some(&directory),
            MenuOptions::default(),
        );
        assert!(directory.is_empty());
    }

    #[test]
    fn last_registrant_wins() {
        let directory = Directory::new();
        let first = manager_with_id(&directory, "file");
        let second = manager_with_id(&directory, "file");
        let found = directory.get("file").expect("registered");
        assert!(found.ptr_eq(&second));
        assert!(!found.ptr_eq(&first));
    }

    #[test]
    fn destroy_removes_only_its_own_entry() {
        let directory = Directory::new();
        let first = manager_with_id(&directory, "file");
        let second = manager_with_id(&directory, "file");

        // The entry now belongs to `second`; destroying `first` leaves it alone.
        first.destroy();
        assert!(directory.get("file").is_some_and(|m| m.ptr_eq(&second)));

        second.destroy();
        assert!(!directory.contains("file"));
        second.destroy();
    }

    #[test]
    fn dropped_managers_are_not_returned() {
        let directory = Directory::new();
        drop(manager_with_id(&directory, "file"));
        assert!(directory.get("file").is_none());
        assert!(directory.is_empty());
    }

    #[test]
    fn dead_entries_are_pruned() {
        let directory = Directory::new();
        let file = manager_with_id(&directory, "file");
        let edit = manager_with_id(&directory, "edit");
        drop(file);
        drop(edit);
        assert_eq!(directory.entries.borrow().len(), 2);
        assert!(directory.is_empty());

        // A lookup drops the dead entry it lands on.
        assert!(directory.get("file").is_none());
        assert_eq!(directory.entries.borrow().len(), 1);

        // Registering sweeps every dead entry.
        let view = manager_with_id(&directory, "view");
        assert_eq!(directory.entries.borrow().len(), 1);
        assert!(directory.get("view").is_some_and(|m| m.ptr_eq(&view)));
    }

    #[test]
    fn open_and_close_by_id() {
        let directory = Directory::new();
        let manager = manager_with_id(&directory, "file");

        directory
            .open_menu("file", OpenOptions { focus_menu: false })
            .expect("known id");
        assert!(manager.is_open());
        directory
            .close_menu("file", CloseOptions::default())
            .expect("known id");
        assert!(!manager.is_open());
    }

    #[test]
    fn unknown_ids_are_errors() {
        let directory = Directory::new();
        let err = directory
            .open_menu("nope", OpenOptions::default())
            .unwrap_err();
        assert_eq!(err, DirectoryError::UnknownMenu("nope".into()));
        assert_eq!(
            alloc::format!("{err}"),
            "no menu registered under id \"nope\""
        );
        let _: &dyn core::error::Error = &err;

        let manager = manager_with_id(&directory, "file");
        assert!(directory.unregister("file"));
        assert!(!directory.unregister("file"));
        assert!(
            directory
                .close_menu("file", CloseOptions::default())
                .is_err()
        );
        drop(manager);
    }

    #[test]
    fn clear_empties_the_directory_and_clones_share_it() {
        let directory = Directory::new();
        let view = directory.clone();
        let _manager = manager_with_id(&directory, "file");
        assert!(view.contains("file"));
        view.clear();
        assert!(directory.is_empty());
    }
}
