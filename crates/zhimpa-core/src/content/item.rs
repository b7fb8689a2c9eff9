//! Content items rendered into review and discussion lists.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rating::Rating;

/// When a content item was posted, as shown in its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// A calendar date, rendered `YYYY-MM-DD`
    Date(NaiveDate),
    /// A relative label such as "Just now"
    Label(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// A review or discussion message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique node identifier (UUID format)
    pub id: String,
    pub author: String,
    pub timestamp: Timestamp,
    /// Heading line; reviews only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    /// Star rating; reviews only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl ContentItem {
    pub fn review(
        author: impl Into<String>,
        title: impl Into<String>,
        rating: Rating,
        body: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: author.into(),
            timestamp: Timestamp::Date(date),
            title: Some(title.into()),
            body: body.into(),
            rating: Some(rating),
        }
    }

    pub fn message(
        author: impl Into<String>,
        body: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: author.into(),
            timestamp: Timestamp::Label(label.into()),
            title: None,
            body: body.into(),
            rating: None,
        }
    }

    /// Star glyphs for reviews, `None` for messages.
    pub fn stars(&self) -> Option<String> {
        self.rating.map(Rating::stars)
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} · {}", self.author, self.timestamp)?;
        if let Some(stars) = self.stars() {
            writeln!(f, "{stars}")?;
        }
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        write!(f, "{}", self.body)
    }
}
