//! Cuisine tags shared by dishes and user preferences.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known cuisine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown cuisine: {0}")]
pub struct CuisineParseError(pub String);

/// A cuisine a dish belongs to, or a user can prefer.
///
/// These are the eight choices offered during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Japanese,
    Chinese,
    Italian,
    Mexican,
    American,
    Indian,
    Russian,
    Healthy,
}

impl Cuisine {
    /// All cuisines in the order they are offered.
    pub const ALL: [Self; 8] = [
        Self::Japanese,
        Self::Chinese,
        Self::Italian,
        Self::Mexican,
        Self::American,
        Self::Indian,
        Self::Russian,
        Self::Healthy,
    ];

    /// Stable identifier used in catalog files and commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
            Self::Italian => "italian",
            Self::Mexican => "mexican",
            Self::American => "american",
            Self::Indian => "indian",
            Self::Russian => "russian",
            Self::Healthy => "healthy",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Japanese => "Japanese",
            Self::Chinese => "Chinese",
            Self::Italian => "Italian",
            Self::Mexican => "Mexican",
            Self::American => "American",
            Self::Indian => "Indian",
            Self::Russian => "Russian",
            Self::Healthy => "Healthy",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Cuisine {
    type Err = CuisineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|cuisine| cuisine.as_str() == needle)
            .ok_or_else(|| CuisineParseError(s.to_owned()))
    }
}
