//! Form payloads.
//!
//! Field values as read from a submitted form. Every field defaults to empty
//! so a payload with missing keys behaves like a form left blank.

mod model;

pub use model::{
    ContactForm, Credentials, MessageForm, NewsletterForm, RecipeForm, Registration, ReviewForm,
};
