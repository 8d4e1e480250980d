//! U-COOK Core - Shared types library.
//!
//! This crate provides the domain types used across all U-COOK components:
//! - `app` - Session state machine, terminal front-end and the `u-cook` binary
//! - `cli` - Command-line tools for catalog files and scripted sessions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no timers, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, phone numbers, preferences,
//!   dishes and screen tags
//! - [`catalog`] - The read-only dish source injected into a session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::DishCatalog;
pub use types::*;
