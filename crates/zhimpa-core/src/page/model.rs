//! Page identifiers and layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A page of the site, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Page {
    Index,
    Recipes,
    Recipe,
    Share,
    Discussion,
    Contact,
    About,
    Login,
    Signup,
    /// Any page name outside the known set. Classified as protected.
    Other(String),
}

impl Page {
    /// The page reached on a successful login or signup.
    pub const HOME: Page = Page::Index;
    /// Where unauthenticated visitors are sent.
    pub const LOGIN: Page = Page::Login;

    /// Every page the site ships, in navigation order.
    pub const KNOWN: [Page; 9] = [
        Page::Index,
        Page::Recipes,
        Page::Recipe,
        Page::Share,
        Page::Discussion,
        Page::Contact,
        Page::About,
        Page::Login,
        Page::Signup,
    ];

    /// Resolves a location path (`/site/recipes.html`) to a page.
    ///
    /// Only the last path segment counts; an empty segment is the home page.
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or_default();
        match name {
            "" | "index.html" => Self::Index,
            "recipes.html" => Self::Recipes,
            "recipe.html" => Self::Recipe,
            "share.html" => Self::Share,
            "discussion.html" => Self::Discussion,
            "contact.html" => Self::Contact,
            "about.html" => Self::About,
            "login.html" => Self::Login,
            "signup.html" => Self::Signup,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Index => "index.html",
            Self::Recipes => "recipes.html",
            Self::Recipe => "recipe.html",
            Self::Share => "share.html",
            Self::Discussion => "discussion.html",
            Self::Contact => "contact.html",
            Self::About => "about.html",
            Self::Login => "login.html",
            Self::Signup => "signup.html",
            Self::Other(name) => name,
        }
    }

    /// Public pages are reachable without a session: login and signup only.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    pub fn is_protected(&self) -> bool {
        !self.is_public()
    }

    /// Slots present on this page.
    pub fn layout(&self) -> Layout {
        let base = Layout::default();
        match self {
            Self::Index | Self::Recipes => Layout {
                recipe_grid: true,
                ..base
            },
            Self::Recipe => Layout {
                reviews: true,
                forms: vec![FormId::Review],
                ..base
            },
            Self::Share => Layout {
                forms: vec![FormId::ShareRecipe],
                ..base
            },
            Self::Discussion => Layout {
                discussion: true,
                forms: vec![FormId::Discussion],
                ..base
            },
            Self::Contact => Layout {
                forms: vec![FormId::Contact],
                ..base
            },
            Self::Login => Layout {
                forms: vec![FormId::Login],
                ..base
            },
            Self::Signup => Layout {
                forms: vec![FormId::Signup],
                ..base
            },
            Self::About | Self::Other(_) => base,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for Page {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_path(s))
    }
}

impl From<String> for Page {
    fn from(value: String) -> Self {
        Self::from_path(&value)
    }
}

impl From<Page> for String {
    fn from(page: Page) -> Self {
        page.file_name().to_string()
    }
}

/// Forms that can appear on a page.
///
/// The newsletter form sits in the footer of every page and is not listed in
/// [`Layout::forms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormId {
    Review,
    Discussion,
    ShareRecipe,
    Login,
    Signup,
    Contact,
    Newsletter,
}

/// Which content slots and forms a page carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Recipe cards with filter buttons
    pub recipe_grid: bool,
    /// Reviews container
    pub reviews: bool,
    /// Discussion container
    pub discussion: bool,
    /// Page-specific forms
    pub forms: Vec<FormId>,
}

impl Layout {
    pub fn has_form(&self, form: FormId) -> bool {
        form == FormId::Newsletter || self.forms.contains(&form)
    }
}
