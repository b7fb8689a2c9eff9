//! Live content list for a page container.

use serde::{Deserialize, Serialize};

use super::item::ContentItem;

/// Items shown most-recent-first, with an optional placeholder notice that is
/// displayed until the first item is posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentList {
    items: Vec<ContentItem>,
    placeholder: Option<String>,
}

impl ContentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(notice: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            placeholder: Some(notice.into()),
        }
    }

    /// Inserts `item` at the top of the list.
    pub fn prepend(&mut self, item: ContentItem) {
        self.items.insert(0, item);
    }

    /// Drops the placeholder. Returns true only on the call that removed it.
    pub fn remove_placeholder(&mut self) -> bool {
        self.placeholder.take().is_some()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
