use serde::{Deserialize, Serialize};

/// A single to-do entry. Identity is its position in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    #[serde(rename = "isChecked")]
    pub is_checked: bool,
}

#[cfg(test)]
impl Item {
    pub fn new(title: impl Into<String>, is_checked: bool) -> Self {
        Self {
            title: title.into(),
            is_checked,
        }
    }
}

/// Ordered items, newest first.
pub type ItemList = Vec<Item>;

/// Whether the form is composing a new item or rewriting an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(usize),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Editing(index) => Some(*index),
            Self::Idle => None,
        }
    }
}

pub fn completed_items(items: &[Item]) -> usize {
    items.iter().filter(|item| item.is_checked).count()
}
