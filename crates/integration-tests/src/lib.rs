//! Integration tests for U-COOK.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p u-cook-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Full user journeys through `AppState`
//! - `catalog_files` - Loading catalogs from YAML files on disk
//!
//! Helpers shared by the test files live here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use u_cook_app::{AppConfig, AppState, Catalog, Command};
use u_cook_core::{Dish, DishCatalog};

/// Settle delay used by tests that do not pause time.
pub const TEST_SETTLE_DELAY: Duration = Duration::from_millis(5);

/// App state over the built-in catalog.
///
/// # Panics
///
/// Panics if the built-in catalog is malformed.
#[allow(clippy::expect_used)]
#[must_use]
pub fn app_state(settle_delay: Duration) -> AppState {
    let catalog = Catalog::builtin().expect("built-in catalog");
    app_state_with(settle_delay, catalog)
}

/// App state over a given catalog.
///
/// # Panics
///
/// Panics if the catalog is empty.
#[allow(clippy::expect_used)]
#[must_use]
pub fn app_state_with(settle_delay: Duration, catalog: Catalog) -> AppState {
    let config = AppConfig {
        settle_delay,
        ..AppConfig::default()
    };
    AppState::new(config, Arc::new(catalog)).expect("app state")
}

/// Dispatch command lines in order, waiting for every settle.
///
/// # Panics
///
/// Panics on the first line that fails to parse or dispatch.
#[allow(clippy::expect_used)]
pub async fn run_commands(state: &AppState, lines: &[&str]) {
    for line in lines {
        let command = Command::parse(line).expect("command parses");
        state
            .handle(command)
            .await
            .unwrap_or_else(|e| panic!("'{line}' failed: {e}"))
            .settled()
            .await;
    }
}

/// Complete onboarding with a valid identity and default answers.
pub async fn onboard(state: &AppState) {
    run_commands(
        state,
        &["name Anna", "phone 89991234567", "next", "next", "next", "next"],
    )
    .await;
}

/// A catalog dish with the given ids, for building custom catalogs.
///
/// # Panics
///
/// Panics if the built-in catalog is malformed.
#[allow(clippy::expect_used)]
#[must_use]
pub fn dish(id: &str, chef_id: &str) -> Dish {
    let catalog = Catalog::builtin().expect("built-in catalog");
    let mut dish = catalog
        .dishes()
        .first()
        .cloned()
        .expect("built-in catalog has dishes");
    dish.id = id.into();
    dish.name = format!("Dish {id}");
    dish.chef.id = chef_id.into();
    dish
}

/// A unique path in the system temp directory.
#[must_use]
pub fn temp_path(extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!("u-cook-{}.{extension}", uuid::Uuid::new_v4()))
}
