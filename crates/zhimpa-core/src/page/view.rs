//! Live state of a loaded page.
//!
//! A `PageView` stands in for the rendered document: the recipe grid, the
//! review and discussion containers and the header user menu. It is rebuilt on
//! every page load, so nothing in it outlives navigation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::ContentList;

use super::model::{Layout, Page};

/// Selection key carried by a filter button.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterKey {
    /// The `all` sentinel: every card is shown
    All,
    /// A single recipe category
    Category(String),
}

impl FilterKey {
    pub const ALL: &'static str = "all";

    pub fn parse(key: &str) -> Self {
        if key == Self::ALL {
            Self::All
        } else {
            Self::Category(key.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Category(category) => category,
        }
    }

    /// Whether a card of `category` is shown under this key.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(key) => key == category,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FilterKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FilterKey> for String {
    fn from(key: FilterKey) -> Self {
        key.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCard {
    pub title: String,
    pub category: String,
    pub visible: bool,
}

impl RecipeCard {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterButton {
    pub key: FilterKey,
    pub active: bool,
}

/// The live page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub recipe_cards: Vec<RecipeCard>,
    pub filter_buttons: Vec<FilterButton>,
    pub reviews: Option<ContentList>,
    pub discussion: Option<ContentList>,
    /// Name shown in the header once the authenticated view is applied
    pub user_menu: Option<String>,
    /// Whether the login/signup buttons are shown in the header
    pub auth_buttons_visible: bool,
    pub footer_year: Option<i32>,
    #[serde(skip)]
    layout: Layout,
}

impl PageView {
    /// An empty view carrying only the slots `page` declares.
    pub fn new(page: Page) -> Self {
        let layout = page.layout();
        Self {
            recipe_cards: Vec::new(),
            filter_buttons: Vec::new(),
            reviews: layout.reviews.then(ContentList::new),
            discussion: layout.discussion.then(ContentList::new),
            user_menu: None,
            auth_buttons_visible: true,
            footer_year: None,
            layout,
            page,
        }
    }

    /// Fills the recipe grid, when the page has one.
    ///
    /// Buttons are `all` followed by each distinct category in card order,
    /// with `all` active.
    pub fn with_recipes(mut self, cards: impl IntoIterator<Item = RecipeCard>) -> Self {
        if !self.layout.recipe_grid {
            return self;
        }
        self.recipe_cards = cards.into_iter().collect();

        let mut buttons = vec![FilterButton {
            key: FilterKey::All,
            active: true,
        }];
        for card in &self.recipe_cards {
            let key = FilterKey::parse(&card.category);
            if !buttons.iter().any(|b| b.key == key) {
                buttons.push(FilterButton { key, active: false });
            }
        }
        self.filter_buttons = buttons;
        self
    }

    /// Shows `notice` in an empty discussion container.
    pub fn with_discussion_placeholder(mut self, notice: impl Into<String>) -> Self {
        if self.discussion.is_some() {
            self.discussion = Some(ContentList::with_placeholder(notice));
        }
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &RecipeCard> {
        self.recipe_cards.iter().filter(|card| card.visible)
    }

    pub fn active_filters(&self) -> impl Iterator<Item = &FilterButton> {
        self.filter_buttons.iter().filter(|button| button.active)
    }
}
