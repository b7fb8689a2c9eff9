//! Commands and their outcomes.
//!
//! A command is one UI event: a page load, a form submission or a click.
//! Commands are tagged JSON objects, e.g.
//!
//! ```json
//! {"action": "login", "email": "a@b.com", "password": "pw"}
//! {"action": "submit_review", "name": "Ama", "rating": 4, "text": "Lovely"}
//! {"action": "filter_recipes", "key": "dessert"}
//! ```

use serde::{Deserialize, Serialize};
use zhimpa_core::error::ZhimpaError;
use zhimpa_core::form::{
    ContactForm, Credentials, MessageForm, NewsletterForm, RecipeForm, Registration, ReviewForm,
};
use zhimpa_core::page::Page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Load a page: a fresh document with its own session initialization
    Open { page: Page },
    /// Re-run activation of the current page
    Activate,
    Login(Credentials),
    Signup(Registration),
    Logout,
    SubmitReview(ReviewForm),
    PostMessage(MessageForm),
    ShareRecipe(RecipeForm),
    /// Click on a "Save" control
    SaveRecipe,
    FilterRecipes { key: String },
    Subscribe(NewsletterForm),
    Contact(ContactForm),
}

impl Command {
    /// Every `action` tag, as accepted in JSON.
    pub const ACTIONS: [&'static str; 12] = [
        "open",
        "activate",
        "login",
        "signup",
        "logout",
        "submit_review",
        "post_message",
        "share_recipe",
        "save_recipe",
        "filter_recipes",
        "subscribe",
        "contact",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Activate => "activate",
            Self::Login(_) => "login",
            Self::Signup(_) => "signup",
            Self::Logout => "logout",
            Self::SubmitReview(_) => "submit_review",
            Self::PostMessage(_) => "post_message",
            Self::ShareRecipe(_) => "share_recipe",
            Self::SaveRecipe => "save_recipe",
            Self::FilterRecipes { .. } => "filter_recipes",
            Self::Subscribe(_) => "subscribe",
            Self::Contact(_) => "contact",
        }
    }

    /// Whether a handled event suppresses the browser's default behaviour
    /// (a native form submission or link follow).
    pub fn prevents_default(&self) -> bool {
        !matches!(
            self,
            Self::Open { .. } | Self::Activate | Self::Logout | Self::FilterRecipes { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum Status {
    /// The handler ran and its effect is visible
    Applied,
    /// The handler ran and refused; nothing changed
    Rejected(ZhimpaError),
    /// No handler is attached on the current page
    Ignored,
}

/// What dispatching one command did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub command: &'static str,
    #[serde(flatten)]
    pub status: Status,
    pub default_prevented: bool,
    pub form_reset: bool,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, Status::Applied)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self.status, Status::Ignored)
    }

    pub fn error(&self) -> Option<&ZhimpaError> {
        match &self.status {
            Status::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let command: Command =
            serde_json::from_str(r#"{"action":"login","email":"a@b.com","password":"pw"}"#)
                .unwrap();
        assert_eq!(
            command,
            Command::Login(Credentials {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_review_without_rating() {
        let command: Command =
            serde_json::from_str(r#"{"action":"submit_review","name":"Ama","text":"ok"}"#).unwrap();
        let Command::SubmitReview(form) = command else {
            panic!("expected submit_review");
        };
        assert_eq!(form.rating, None);
        assert!(form.title.is_empty());
    }

    #[test]
    fn test_parse_unit_and_struct_variants() {
        let open: Command = serde_json::from_str(r#"{"action":"open","page":"recipe.html"}"#).unwrap();
        assert_eq!(open, Command::Open { page: Page::Recipe });

        let save: Command = serde_json::from_str(r#"{"action":"save_recipe"}"#).unwrap();
        assert_eq!(save, Command::SaveRecipe);
        assert_eq!(save.name(), "save_recipe");
    }

    #[test]
    fn test_actions_parse_as_their_own_name() {
        for action in Command::ACTIONS {
            // Actions with required fields do not parse from the tag alone
            if let Ok(command) = serde_json::from_str::<Command>(&format!(r#"{{"action":"{action}"}}"#)) {
                assert_eq!(command.name(), action);
            }
        }
        assert!(Command::ACTIONS.contains(&Command::Logout.name()));
        assert!(Command::ACTIONS.contains(&Command::Contact(ContactForm::default()).name()));
    }

    #[test]
    fn test_unknown_action_fails() {
        assert!(serde_json::from_str::<Command>(r#"{"action":"delete_everything"}"#).is_err());
    }

    #[test]
    fn test_prevents_default() {
        assert!(Command::SaveRecipe.prevents_default());
        assert!(Command::Subscribe(NewsletterForm::default()).prevents_default());
        assert!(!Command::Logout.prevents_default());
    }
}
