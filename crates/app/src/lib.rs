//! U-COOK application library.
//!
//! Session state machine (navigator, onboarding wizard, swipe engine), the
//! async state wrapper that runs settle timers, and the terminal front-end.
//! The `u-cook` binary and the `ucook-cli` tooling are thin wrappers around
//! this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod filter_bar;
pub mod filters;
pub mod navigator;
pub mod onboarding;
pub mod screens;
pub mod session;
pub mod state;
pub mod swipe;
pub mod terminal;

pub use catalog::Catalog;
pub use command::Command;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use session::{Session, Snapshot};
pub use state::AppState;
