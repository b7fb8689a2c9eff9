//! Domain layer for ZHIMPA.
//!
//! Session state, page model, content items and the collaborator traits the
//! application layer is written against.

pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod form;
pub mod navigation;
pub mod notice;
pub mod page;
pub mod session;

// Re-export common error type
pub use error::{Result, ZhimpaError};
