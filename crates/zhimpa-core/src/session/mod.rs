//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session` and `User`
//! - `store`: `KeyValueStore` trait and the `SessionStore` built on top of it
//!
//! # Usage
//!
//! ```ignore
//! use zhimpa_core::session::{KeyValueStore, Session, SessionStore, User};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{Session, User};
pub use store::{CURRENT_USER_KEY, IS_LOGGED_IN_KEY, KeyValueStore, SessionStore};
