use super::models::{EditSession, Item, ItemList};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No item at position {index} (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("No edit is in progress")]
    CommitWithoutActiveEdit,
    #[error("An edit is already in progress")]
    EditAlreadyInProgress,
}

/// What a successful store operation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    DraftEdited,
    ItemAdded,
    EditStarted(usize),
    ItemUpdated(usize),
    ItemToggled(usize),
    ItemRemoved(usize),
    EditCancelled,
}

impl Change {
    pub fn mutates_items(&self) -> bool {
        matches!(
            self,
            Change::ItemAdded
                | Change::ItemUpdated(_)
                | Change::ItemToggled(_)
                | Change::ItemRemoved(_)
        )
    }
}

/// Owns the items plus the draft form and its edit session.
#[derive(Debug, Clone, Default)]
pub struct ListStore {
    items: ItemList,
    draft: Item,
    session: EditSession,
}

impl ListStore {
    pub fn new(items: ItemList) -> Self {
        Self {
            items,
            draft: Item::default(),
            session: EditSession::Idle,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn draft(&self) -> &Item {
        &self.draft
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_draft_title(&mut self, text: impl Into<String>) -> Change {
        self.draft.title = text.into();
        Change::DraftEdited
    }

    pub fn add_item(&mut self) -> Result<Change, StoreError> {
        if self.session.is_editing() {
            return Err(StoreError::EditAlreadyInProgress);
        }

        let item = std::mem::take(&mut self.draft);
        debug!(title = %item.title, "adding item");
        self.items.insert(0, item);
        Ok(Change::ItemAdded)
    }

    pub fn begin_edit(&mut self, index: usize) -> Result<Change, StoreError> {
        if self.session.is_editing() {
            return Err(StoreError::EditAlreadyInProgress);
        }
        let item = self.item_at(index)?.clone();

        debug!(index, "beginning edit");
        self.draft = item;
        self.session = EditSession::Editing(index);
        Ok(Change::EditStarted(index))
    }

    pub fn commit_edit(&mut self) -> Result<Change, StoreError> {
        let EditSession::Editing(index) = self.session else {
            return Err(StoreError::CommitWithoutActiveEdit);
        };
        // Removals keep the session index in range, so this only fires if that breaks.
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;

        *slot = std::mem::take(&mut self.draft);
        self.session = EditSession::Idle;
        debug!(index, "committed edit");
        Ok(Change::ItemUpdated(index))
    }

    pub fn cancel_edit(&mut self) -> Result<Change, StoreError> {
        if !self.session.is_editing() {
            return Err(StoreError::CommitWithoutActiveEdit);
        }

        self.draft = Item::default();
        self.session = EditSession::Idle;
        Ok(Change::EditCancelled)
    }

    /// Flips the checkbox at `index`. The draft and any edit in progress are left alone.
    pub fn toggle_checked(&mut self, index: usize) -> Result<Change, StoreError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;

        item.is_checked = !item.is_checked;
        debug!(index, checked = item.is_checked, "toggled item");
        Ok(Change::ItemToggled(index))
    }

    pub fn remove_item(&mut self, index: usize) -> Result<Change, StoreError> {
        self.item_at(index)?;
        self.items.remove(index);

        match self.session {
            EditSession::Editing(editing) if editing == index => {
                debug!(index, "removed the item being edited, abandoning edit");
                self.draft = Item::default();
                self.session = EditSession::Idle;
            }
            EditSession::Editing(editing) if editing > index => {
                self.session = EditSession::Editing(editing - 1);
            }
            _ => {}
        }

        debug!(index, remaining = self.items.len(), "removed item");
        Ok(Change::ItemRemoved(index))
    }

    fn item_at(&self, index: usize) -> Result<&Item, StoreError> {
        self.items.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }
}
