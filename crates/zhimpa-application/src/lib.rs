//! Application layer for Zhimpa.
//!
//! Session gating and the page handlers built on it, wired together by the
//! [`Dispatcher`].

pub mod command;
pub mod content_actions;
pub mod dispatcher;
pub mod recipe_filter;
pub mod session_gate;
pub mod utility_forms;

pub use command::{Command, Outcome, Status};
pub use content_actions::ContentActions;
pub use dispatcher::{Activation, Collaborators, Dispatcher};
pub use recipe_filter::RecipeFilter;
pub use session_gate::{AccessDecision, SessionGate};
pub use utility_forms::UtilityForms;
