//! Gated content actions.
//!
//! Every handler re-checks the session gate at submission time and only then
//! performs its single local mutation. A failed guard leaves the page
//! untouched.

use std::sync::Arc;

use zhimpa_core::clock::Clock;
use zhimpa_core::config::ContentSettings;
use zhimpa_core::content::{ContentItem, Rating};
use zhimpa_core::error::{Result, ZhimpaError};
use zhimpa_core::form::{MessageForm, RecipeForm, ReviewForm};
use zhimpa_core::notice::{Notice, Notifier};
use zhimpa_core::page::PageView;

use crate::session_gate::SessionGate;

pub struct ContentActions {
    gate: SessionGate,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: ContentSettings,
}

impl ContentActions {
    pub fn new(
        gate: SessionGate,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: ContentSettings,
    ) -> Self {
        Self {
            gate,
            notifier,
            clock,
            settings,
        }
    }

    /// Passes only when the visitor is authenticated on the current page.
    fn guard(&self, view: &PageView) -> Result<()> {
        if self.gate.enforce_page_access(&view.page) {
            Ok(())
        } else {
            tracing::debug!("[ContentActions] Guard failed on {}", view.page);
            Err(ZhimpaError::authorization(view.page.file_name()))
        }
    }

    /// Adds a review to the top of the reviews list.
    pub fn submit_review(&self, view: &mut PageView, form: &ReviewForm) -> Result<ContentItem> {
        self.guard(view)?;

        let rating = match form.rating {
            Some(value) => Rating::new(value)?,
            None => return Err(ZhimpaError::MissingRating),
        };
        let reviews = view
            .reviews
            .as_mut()
            .ok_or_else(|| ZhimpaError::not_found("container", "reviews"))?;

        let title = if form.title.trim().is_empty() {
            self.settings.default_review_title.clone()
        } else {
            form.title.clone()
        };

        let item = ContentItem::review(
            &form.name,
            title,
            rating,
            &form.text,
            self.clock.today(),
        );
        reviews.prepend(item.clone());
        tracing::info!(
            "[ContentActions] Review by {} ({}) added",
            item.author,
            rating.value()
        );

        self.notifier.notify(Notice::info("Thank you for your review!"));
        Ok(item)
    }

    /// Adds a message to the top of the discussion list.
    pub fn post_message(&self, view: &mut PageView, form: &MessageForm) -> Result<ContentItem> {
        self.guard(view)?;

        if form.name.is_empty() || form.message.is_empty() {
            return Err(ZhimpaError::validation("Please fill in all fields"));
        }
        let discussion = view
            .discussion
            .as_mut()
            .ok_or_else(|| ZhimpaError::not_found("container", "discussion"))?;

        let item = ContentItem::message(&form.name, &form.message, &self.settings.just_now_label);
        discussion.prepend(item.clone());
        if discussion.remove_placeholder() {
            tracing::debug!("[ContentActions] Removed empty-discussion placeholder");
        }
        tracing::info!("[ContentActions] Message by {} posted", item.author);

        Ok(item)
    }

    /// Acknowledges a shared recipe. Nothing is stored.
    pub fn share_recipe(&self, view: &PageView, form: &RecipeForm) -> Result<()> {
        self.guard(view)?;

        tracing::info!("[ContentActions] Recipe shared: {}", form.title);
        self.notifier.notify(Notice::info(format!(
            "Recipe \"{}\" submitted successfully!",
            form.title
        )));
        Ok(())
    }

    /// Acknowledges saving a recipe to favorites. Nothing is stored.
    pub fn save_recipe(&self, view: &PageView) -> Result<()> {
        self.guard(view)?;

        self.notifier
            .notify(Notice::info("Recipe saved to your favorites!"));
        Ok(())
    }
}
