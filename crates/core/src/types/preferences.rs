//! User preferences collected during onboarding.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Cuisine, PhoneNumber};

/// How often the user orders food, on a 0-100 scale.
///
/// Deserializing clamps the same way [`Frequency::new`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", from = "i64")]
pub struct Frequency(u8);

impl From<i64> for Frequency {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Frequency> for u8 {
    fn from(frequency: Frequency) -> Self {
        frequency.0
    }
}

impl Frequency {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    /// Create a frequency, clamping the value into `0..=100`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MAX))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Bucket label shown next to the slider.
    #[must_use]
    pub const fn label(self) -> FrequencyLabel {
        if self.0 < 33 {
            FrequencyLabel::Rarely
        } else if self.0 < 66 {
            FrequencyLabel::Often
        } else {
            FrequencyLabel::VeryOften
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self(50)
    }
}

/// Coarse bucket of a [`Frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyLabel {
    Rarely,
    Often,
    VeryOften,
}

impl std::fmt::Display for FrequencyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rarely => write!(f, "rarely"),
            Self::Often => write!(f, "often"),
            Self::VeryOften => write!(f, "very often"),
        }
    }
}

/// A closed budget interval in whole rubles.
///
/// Always satisfies `min <= max`: [`BudgetRange::new`] orders its bounds,
/// and deserialization goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BudgetBounds")]
pub struct BudgetRange {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct BudgetBounds {
    min: u32,
    max: u32,
}

impl From<BudgetBounds> for BudgetRange {
    fn from(bounds: BudgetBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}

impl BudgetRange {
    /// Lowest value a budget slider can take.
    pub const SLIDER_MIN: u32 = 100;
    /// Highest value a budget slider can take.
    pub const SLIDER_MAX: u32 = 5000;

    /// Create a range from two bounds in either order.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Clamp a raw slider value into the slider's range.
    #[must_use]
    pub fn clamp_slider(value: i64) -> u32 {
        let clamped = value.clamp(i64::from(Self::SLIDER_MIN), i64::from(Self::SLIDER_MAX));
        u32::try_from(clamped).unwrap_or(Self::SLIDER_MAX)
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Midpoint of the range, rounded half up.
    #[must_use]
    pub const fn average_check(&self) -> u32 {
        // Halve first so the sum cannot overflow.
        self.min / 2 + self.max / 2 + (self.min % 2 + self.max % 2).div_ceil(2)
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self::new(500, 2000)
    }
}

/// Everything the user told us during onboarding.
///
/// Created once when onboarding completes and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub cuisines: BTreeSet<Cuisine>,
    pub frequency: Frequency,
    pub budget: BudgetRange,
    pub phone: PhoneNumber,
    pub name: String,
}
