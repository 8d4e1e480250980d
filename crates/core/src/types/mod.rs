//! Core types for U-COOK.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cuisine;
pub mod dish;
pub mod id;
pub mod phone;
pub mod preferences;
pub mod price;
pub mod screen;

pub use cuisine::{Cuisine, CuisineParseError};
pub use dish::{Chef, Dish};
pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use preferences::{BudgetRange, Frequency, FrequencyLabel, UserPreferences};
pub use price::{CurrencyCode, Price};
pub use screen::{Screen, SwipeDirection};
