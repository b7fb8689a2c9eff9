//! Content domain module.
//!
//! Reviews and discussion messages created by gated actions. They exist only
//! in the live page and are never persisted.

mod item;
mod list;
mod rating;

pub use item::{ContentItem, Timestamp};
pub use list::ContentList;
pub use rating::Rating;
