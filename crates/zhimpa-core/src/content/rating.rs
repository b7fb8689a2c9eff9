//! Star rating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZhimpaError};

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// A review rating between 1 and 5 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ZhimpaError::validation(format!(
                "Rating must be between 1 and {}, got {value}",
                Self::MAX
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `value` filled stars followed by `5 - value` empty stars.
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX - self.0);
        std::iter::repeat_n(FILLED_STAR, filled)
            .chain(std::iter::repeat_n(EMPTY_STAR, empty))
            .collect()
    }
}

impl TryFrom<u8> for Rating {
    type Error = ZhimpaError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stars())
    }
}
