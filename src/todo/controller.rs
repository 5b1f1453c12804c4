use super::models::{EditSession, Item};
use super::persistence::PersistenceGateway;
use super::storage::KeyValueStore;
use super::store::{Change, ListStore, StoreError};
use anyhow::Result;
use thiserror::Error;
use tracing::warn;

/// Receives every change the controller applies, after it has been applied.
pub trait ChangeListener {
    fn on_change(&mut self, change: Change, items: &[Item]) -> Result<()>;
}

impl<S: KeyValueStore> ChangeListener for PersistenceGateway<S> {
    fn on_change(&mut self, change: Change, items: &[Item]) -> Result<()> {
        if change.mutates_items() {
            self.save(items)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Change applied but a listener failed: {error:#}")]
    Listener { change: Change, error: anyhow::Error },
}

impl EventError {
    /// The change that reached the store despite the error, if any.
    pub fn applied_change(&self) -> Option<Change> {
        match self {
            EventError::Store(_) => None,
            EventError::Listener { change, .. } => Some(*change),
        }
    }
}

/// Turns UI events into store operations and fans the resulting changes out.
pub struct TodoController {
    store: ListStore,
    listeners: Vec<Box<dyn ChangeListener>>,
    load_warning: Option<String>,
}

impl TodoController {
    /// Loads the persisted list and keeps the gateway subscribed for write-through.
    pub fn open<S: KeyValueStore + 'static>(mut gateway: PersistenceGateway<S>) -> Self {
        let loaded = gateway.load();
        let mut controller = Self::new(ListStore::new(loaded.items));
        controller.load_warning = loaded.warning;
        controller.subscribe(Box::new(gateway));
        controller
    }

    pub fn new(store: ListStore) -> Self {
        Self {
            store,
            listeners: Vec::new(),
            load_warning: None,
        }
    }

    /// Set when the persisted list could not be read and an empty one was used.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    pub fn session(&self) -> EditSession {
        self.store.session()
    }

    pub fn on_title_input(&mut self, text: impl Into<String>) -> Result<Change, EventError> {
        let change = self.store.set_draft_title(text);
        self.notify(change)
    }

    pub fn on_submit_pressed(&mut self) -> Result<Change, EventError> {
        let change = if self.store.session().is_editing() {
            self.store.commit_edit()?
        } else {
            self.store.add_item()?
        };
        self.notify(change)
    }

    /// Keyboard form of [`on_submit_pressed`](Self::on_submit_pressed).
    pub fn on_enter_key_pressed(&mut self) -> Result<Change, EventError> {
        self.on_submit_pressed()
    }

    pub fn on_checkbox_toggled(&mut self, index: usize) -> Result<Change, EventError> {
        let change = self.store.toggle_checked(index)?;
        self.notify(change)
    }

    pub fn on_edit_requested(&mut self, index: usize) -> Result<Change, EventError> {
        let change = self.store.begin_edit(index)?;
        self.notify(change)
    }

    pub fn on_delete_requested(&mut self, index: usize) -> Result<Change, EventError> {
        let change = self.store.remove_item(index)?;
        self.notify(change)
    }

    pub fn on_cancel_requested(&mut self) -> Result<Change, EventError> {
        let change = self.store.cancel_edit()?;
        self.notify(change)
    }

    fn notify(&mut self, change: Change) -> Result<Change, EventError> {
        let mut failure = None;
        for listener in &mut self.listeners {
            if let Err(e) = listener.on_change(change, self.store.items()) {
                warn!(?change, error = %format!("{e:#}"), "change listener failed");
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }

        match failure {
            Some(error) => Err(EventError::Listener { change, error }),
            None => Ok(change),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::storage::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Recorder(Rc<RefCell<Vec<Change>>>);

    impl ChangeListener for Recorder {
        fn on_change(&mut self, change: Change, _items: &[Item]) -> Result<()> {
            self.0.borrow_mut().push(change);
            Ok(())
        }
    }

    /// Counts writes to the slot.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: Rc<RefCell<usize>>,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> io::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
            *self.writes.borrow_mut() += 1;
            self.inner.set(key, value)
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn reload(dir: &TempDir) -> Vec<Item> {
        PersistenceGateway::new(FileStore::new(dir.path())).load().items
    }

    fn open_in(dir: &TempDir) -> TodoController {
        TodoController::open(PersistenceGateway::new(FileStore::new(dir.path())))
    }

    #[test]
    fn test_add_is_written_through() {
        let dir = TempDir::new().unwrap();
        let mut controller = open_in(&dir);

        controller.on_title_input("Buy milk").unwrap();
        controller.on_submit_pressed().unwrap();

        assert_eq!(reload(&dir), vec![Item::new("Buy milk", false)]);
    }

    #[test]
    fn test_open_restores_previous_session() {
        let dir = TempDir::new().unwrap();
        {
            let mut controller = open_in(&dir);
            for title in ["first", "second"] {
                controller.on_title_input(title).unwrap();
                controller.on_enter_key_pressed().unwrap();
            }
            controller.on_checkbox_toggled(1).unwrap();
        }

        let controller = open_in(&dir);
        assert_eq!(
            controller.items(),
            &[Item::new("second", false), Item::new("first", true)]
        );
    }

    #[test]
    fn test_submit_dispatches_to_commit_when_editing() {
        let dir = TempDir::new().unwrap();
        let mut controller = open_in(&dir);
        controller.on_title_input("A").unwrap();
        controller.on_submit_pressed().unwrap();

        controller.on_edit_requested(0).unwrap();
        controller.on_title_input("A-updated").unwrap();
        assert_eq!(controller.on_submit_pressed().unwrap(), Change::ItemUpdated(0));

        assert_eq!(controller.items().len(), 1);
        assert_eq!(reload(&dir), vec![Item::new("A-updated", false)]);
        assert_eq!(controller.session(), EditSession::Idle);
    }

    #[test]
    fn test_only_mutations_write_the_slot() {
        let store = CountingStore::default();
        let writes = Rc::clone(&store.writes);
        let mut controller = TodoController::open(PersistenceGateway::new(store));

        controller.on_title_input("A").unwrap();
        assert_eq!(*writes.borrow(), 0);
        controller.on_submit_pressed().unwrap();
        assert_eq!(*writes.borrow(), 1);

        controller.on_edit_requested(0).unwrap();
        controller.on_cancel_requested().unwrap();
        assert_eq!(*writes.borrow(), 1);

        controller.on_checkbox_toggled(0).unwrap();
        controller.on_delete_requested(0).unwrap();
        assert_eq!(*writes.borrow(), 3);
    }

    #[test]
    fn test_rejected_event_does_not_notify() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut controller = TodoController::new(ListStore::default());
        controller.subscribe(Box::new(Recorder(Rc::clone(&changes))));

        let err = controller.on_delete_requested(0).unwrap_err();
        assert!(matches!(
            err,
            EventError::Store(StoreError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_listeners_see_changes_in_event_order() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut controller = TodoController::new(ListStore::default());
        controller.subscribe(Box::new(Recorder(Rc::clone(&changes))));

        controller.on_title_input("A").unwrap();
        controller.on_submit_pressed().unwrap();
        controller.on_title_input("B").unwrap();
        controller.on_submit_pressed().unwrap();
        controller.on_delete_requested(1).unwrap();

        assert_eq!(
            *changes.borrow(),
            vec![
                Change::DraftEdited,
                Change::ItemAdded,
                Change::DraftEdited,
                Change::ItemAdded,
                Change::ItemRemoved(1),
            ]
        );
        assert_eq!(controller.items(), &[Item::new("B", false)]);
    }

    #[test]
    fn test_failed_save_is_reported_but_state_kept() {
        let mut controller = TodoController::open(PersistenceGateway::new(ReadOnlyStore));

        controller.on_title_input("A").unwrap();
        let err = controller.on_submit_pressed().unwrap_err();

        assert!(matches!(err, EventError::Listener { .. }));
        assert_eq!(err.applied_change(), Some(Change::ItemAdded));
        assert_eq!(controller.items(), &[Item::new("A", false)]);
    }

    #[test]
    fn test_corrupt_slot_opens_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("TodoList.json"), "{oops").unwrap();

        let mut controller = open_in(&dir);

        assert!(controller.items().is_empty());
        assert!(controller.load_warning().unwrap().contains("corrupt"));

        controller.on_title_input("new").unwrap();
        controller.on_submit_pressed().unwrap();
        let backup = std::fs::read_to_string(dir.path().join("TodoList.corrupt.json")).unwrap();
        assert_eq!(backup, "{oops");
        assert_eq!(reload(&dir), vec![Item::new("new", false)]);
    }

    #[test]
    fn test_clean_open_has_no_warning() {
        let dir = TempDir::new().unwrap();
        assert_eq!(open_in(&dir).load_warning(), None);
    }
}
