//! Run a command script through a session.
//!
//! Each non-blank line that does not start with `#` is parsed and dispatched
//! exactly as the terminal would. Swipes wait for their settle delay before
//! the next line runs. The final snapshot is printed as JSON.
//!
//! # Usage
//!
//! ```bash
//! ucook-cli replay session.txt --catalog dishes.yaml --settle-ms 0
//! ```

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use u_cook_app::config::ConfigError;
use u_cook_app::state::Reply;
use u_cook_app::{AppConfig, AppError, AppState, Catalog, Command, Snapshot};

/// Errors from replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Line {line}: {source}")]
    Line { line: usize, source: AppError },

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Replay `script` and print the final snapshot.
///
/// # Errors
///
/// Returns an error if the script cannot be read, the catalog cannot be
/// loaded, or any line fails to parse or dispatch.
pub async fn run(
    script: &Path,
    catalog: Option<PathBuf>,
    settle_ms: Option<u64>,
) -> Result<(), ReplayError> {
    let mut config = AppConfig::from_env()?;
    if catalog.is_some() {
        config.catalog_path = catalog;
    }
    if let Some(ms) = settle_ms {
        config.settle_delay = Duration::from_millis(ms);
    }

    let content = tokio::fs::read_to_string(script)
        .await
        .map_err(|source| ReplayError::Read {
            path: script.display().to_string(),
            source,
        })?;

    let catalog = Catalog::load_or_builtin(config.catalog_path.as_deref())
        .await
        .map_err(AppError::from)?;
    let state = AppState::new(config, Arc::new(catalog))?;

    let snapshot = replay(&state, &content).await?;
    let json = serde_json::to_string_pretty(&snapshot).map_err(AppError::from)?;
    writeln!(std::io::stdout(), "{json}")?;
    Ok(())
}

/// Dispatch every command in `script` and return the final snapshot.
///
/// # Errors
///
/// Returns the first line that fails to parse or dispatch.
pub async fn replay(state: &AppState, script: &str) -> Result<Snapshot, ReplayError> {
    let mut count = 0_usize;

    for (index, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let at = |source: AppError| ReplayError::Line {
            line: index + 1,
            source,
        };

        let command = Command::parse(line).map_err(|e| at(e.into()))?;
        let reply = state.handle(command).await.map_err(at)?.settled().await;
        count += 1;

        if reply == Reply::Quit {
            debug!(line = index + 1, "Script quit");
            break;
        }
    }

    info!(commands = count, "Replay complete");
    Ok(state.snapshot().await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use u_cook_core::Screen;

    use super::*;

    fn state() -> AppState {
        let config = AppConfig {
            settle_delay: Duration::ZERO,
            ..AppConfig::default()
        };
        AppState::new(config, Arc::new(Catalog::builtin().unwrap())).unwrap()
    }

    #[tokio::test]
    async fn test_replay_full_flow() {
        let script = "\
# onboarding
name Anna
phone 8 999 123 45 67
next
cuisine russian
next
next
next

right
left
right
cart
";
        let snapshot = replay(&state(), script).await.unwrap();

        assert_eq!(snapshot.screen, Screen::Cart);
        assert_eq!(snapshot.cart_count, 2);
        assert_eq!(snapshot.cart.total().to_string(), "₽1270");
        assert_eq!(
            snapshot.preferences.unwrap().phone.as_str(),
            "+79991234567"
        );
    }

    #[tokio::test]
    async fn test_replay_stops_at_quit() {
        let snapshot = replay(&state(), "name Anna\nquit\nphone 9991234567\n")
            .await
            .unwrap();
        assert_eq!(snapshot.screen, Screen::Onboarding);
    }

    #[tokio::test]
    async fn test_replay_reports_line() {
        let err = replay(&state(), "name Anna\n\nleft\n").await.unwrap_err();
        assert!(matches!(err, ReplayError::Line { line: 3, .. }));
        assert_eq!(
            err.to_string(),
            "Line 3: not available on the onboarding screen"
        );
    }
}
