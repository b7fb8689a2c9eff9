//! Newsletter and contact forms. Not session-gated; acknowledgement only.

use std::sync::Arc;

use zhimpa_core::error::{Result, ZhimpaError};
use zhimpa_core::form::{ContactForm, NewsletterForm};
use zhimpa_core::notice::{Notice, Notifier};

pub struct UtilityForms {
    notifier: Arc<dyn Notifier>,
}

impl UtilityForms {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Thanks the visitor for subscribing.
    ///
    /// Returns false, without a notice, when the email is empty.
    pub fn subscribe(&self, form: &NewsletterForm) -> bool {
        if form.email.is_empty() {
            return false;
        }

        tracing::info!("[UtilityForms] Newsletter subscription");
        self.notifier.notify(Notice::info(format!(
            "Thank you for subscribing with {}!",
            form.email
        )));
        true
    }

    /// Thanks the visitor for their message. Subject is optional.
    pub fn contact(&self, form: &ContactForm) -> Result<()> {
        if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
            return Err(ZhimpaError::validation("Please fill in all fields"));
        }

        tracing::info!("[UtilityForms] Contact message received");
        self.notifier.notify(Notice::info(format!(
            "Thank you for your message, {}! We'll get back to you soon.",
            form.name
        )));
        Ok(())
    }
}
