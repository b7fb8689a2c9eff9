//! Recipe card filtering. Not session-gated.

use zhimpa_core::error::{Result, ZhimpaError};
use zhimpa_core::page::{FilterKey, PageView};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeFilter;

impl RecipeFilter {
    pub fn new() -> Self {
        Self
    }

    /// Shows the cards matching `key` and hides the rest, making the button
    /// for `key` the only active one.
    ///
    /// Returns the number of visible cards. A key without a button is
    /// rejected and leaves the view untouched.
    pub fn apply(&self, view: &mut PageView, key: &str) -> Result<usize> {
        let key = FilterKey::parse(key);
        if !view.filter_buttons.iter().any(|button| button.key == key) {
            return Err(ZhimpaError::not_found("filter", key.as_str()));
        }

        for button in &mut view.filter_buttons {
            button.active = button.key == key;
        }

        let mut visible = 0;
        for card in &mut view.recipe_cards {
            card.visible = key.matches(&card.category);
            if card.visible {
                visible += 1;
            }
        }

        tracing::debug!("[RecipeFilter] filter={} visible={}", key, visible);
        Ok(visible)
    }
}
