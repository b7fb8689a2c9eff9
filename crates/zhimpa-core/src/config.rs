//! Site configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section is
//! optional; missing sections and fields take the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::page::RecipeCard;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub session: SessionSettings,
    pub storage: StorageSettings,
    pub content: ContentSettings,
    pub logging: LoggingSettings,
    #[serde(rename = "recipes")]
    pub catalog: CatalogSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SessionSettings {
    /// Clear the persisted session whenever a page loads.
    ///
    /// On by default: a login never survives navigation to another page.
    pub clear_on_load: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            clear_on_load: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// JSON file used by the `file` backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContentSettings {
    /// Title given to reviews submitted with a blank title
    pub default_review_title: String,
    /// Notice shown in an empty discussion container
    pub empty_discussion_notice: String,
    /// Timestamp label on new discussion messages
    pub just_now_label: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            default_review_title: "Great recipe!".to_string(),
            empty_discussion_notice: "No messages yet. Start the conversation!".to_string(),
            just_now_label: "Just now".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One recipe card of the catalog.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecipeEntry {
    pub title: String,
    pub category: String,
}

/// Recipe cards rendered on grid pages, in display order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct CatalogSettings(pub Vec<RecipeEntry>);

impl CatalogSettings {
    pub fn cards(&self) -> impl Iterator<Item = RecipeCard> + '_ {
        self.0
            .iter()
            .map(|entry| RecipeCard::new(&entry.title, &entry.category))
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let entry = |title: &str, category: &str| RecipeEntry {
            title: title.to_string(),
            category: category.to_string(),
        };
        Self(vec![
            entry("Chocolate Lava Cake", "dessert"),
            entry("Jollof Rice", "main"),
            entry("Banana Pancakes", "breakfast"),
            entry("Puff Puff", "dessert"),
            entry("Vegetable Stew", "vegetarian"),
            entry("Grilled Tilapia", "main"),
        ])
    }
}
