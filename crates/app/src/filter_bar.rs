//! Filter bar state.
//!
//! Filters are toggled on tap and displayed. They do not narrow the dish
//! sequence.

use std::collections::BTreeMap;

use serde::Serialize;
use u_cook_core::FilterId;

/// Filter ids offered in the bar, in display order.
pub const FILTER_IDS: [&str; 6] = ["quick", "hearty", "healthy", "seafood", "homemade", "hot"];

/// Toggling a filter the bar does not offer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(pub String);

/// Active/inactive state of every offered filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterBar {
    state: BTreeMap<FilterId, bool>,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self {
            state: FILTER_IDS
                .iter()
                .map(|id| (FilterId::from(*id), false))
                .collect(),
        }
    }
}

impl FilterBar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a filter. Returns whether it is active afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFilter`] if the id is not offered.
    pub fn toggle(&mut self, id: &str) -> Result<bool, UnknownFilter> {
        let key = FilterId::new(id.trim().to_ascii_lowercase());
        let active = self
            .state
            .get_mut(&key)
            .ok_or_else(|| UnknownFilter(id.to_owned()))?;
        *active = !*active;
        Ok(*active)
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.state
            .get(&FilterId::new(id))
            .copied()
            .unwrap_or(false)
    }

    /// Active filters in display order.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        FILTER_IDS
            .into_iter()
            .filter(|id| self.is_active(id))
            .collect()
    }
}
