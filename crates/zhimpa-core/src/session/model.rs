//! Session domain model.
//!
//! A visitor is either anonymous or authenticated with a user record. The
//! enum makes "user present iff authenticated" hold by construction.

use serde::{Deserialize, Serialize};

/// Identity of an authenticated visitor.
///
/// The default value (empty name and email) stands in for "no user" wherever
/// a user record is read without an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Email address as entered at login or signup
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Builds a user from a login email, naming it after the email's local part.
    ///
    /// `"a@b.com"` becomes `a`; an address without `@` is used whole.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default();
        Self::new(name, email)
    }

    /// Name shown in the header user menu.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "User"
        } else {
            &self.name
        }
    }
}

/// Authentication state of the current visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// No one is logged in. Every page load starts here.
    #[default]
    Anonymous,
    /// Logged in via login or signup.
    Authenticated(User),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}
