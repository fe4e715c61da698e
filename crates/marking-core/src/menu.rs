use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemLabel(String);

crate::impl_string_newtype!(ItemLabel);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("A menu needs at least one item")]
    Empty,
    #[error("Duplicate menu item '{0}'")]
    DuplicateLabel(ItemLabel),
}

/// Ordered, non-empty list of unique item labels. The position of a label is
/// its logical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItems(Vec<ItemLabel>);

impl MenuItems {
    pub fn new<I>(labels: I) -> Result<Self, MenuError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let labels: Vec<ItemLabel> = labels.into_iter().map(ItemLabel::new).collect();
        if labels.is_empty() {
            return Err(MenuError::Empty);
        }

        let mut seen = HashSet::new();
        if let Some(dup) = labels.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(MenuError::DuplicateLabel(dup.clone()));
        }

        Ok(Self(labels))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ItemLabel> {
        self.0.get(index)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|l| l.as_str() == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemLabel> {
        self.0.iter()
    }
}
