//! Page domain module.
//!
//! # Module Structure
//!
//! - `model`: page identifiers, access classification and per-page layout
//! - `view`: the live, in-memory state of one loaded page

mod model;
mod view;

pub use model::{FormId, Layout, Page};
pub use view::{FilterButton, FilterKey, PageView, RecipeCard};
