//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type. Operator-facing failures are captured
//! to Sentry before being reported; user-input failures are only shown on
//! screen. Sentry calls are no-ops when no client is initialized.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::command::CommandError;
use crate::config::ConfigError;
use crate::session::SessionError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dish catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An operation was rejected by the session.
    #[error("{0}")]
    Session(#[from] SessionError),

    /// A command line could not be understood.
    #[error("{0}")]
    Command(#[from] CommandError),

    /// A screen template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Whether the error was caused by user input and can be shown inline.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Command(_)
                | Self::Session(
                    SessionError::WrongScreen { .. }
                        | SessionError::NoSuchItem(_)
                        | SessionError::NoChefSelected
                        | SessionError::Validation(_)
                        | SessionError::UnknownFilter(_)
                )
        )
    }

    /// Log the error and, for operator-facing errors, capture it to Sentry.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::debug!(error = %self, "Input rejected");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Application error"
        );
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Tag Sentry events with the current session.
pub fn set_sentry_session(session_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_tag("session_id", session_id.to_string());
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "Opened chef", Some(&[("chef_id", "2")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
