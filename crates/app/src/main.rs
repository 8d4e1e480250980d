//! U-COOK terminal app.
//!
//! Runs one session against stdin/stdout: onboarding, then swiping through
//! the dish catalog, with menu, chef and cart screens. Logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sentry::integrations::tracing as sentry_tracing;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use u_cook_app::{AppConfig, AppError, AppState, Catalog, terminal};
use u_cook_core::DishCatalog;

#[derive(Parser)]
#[command(name = "u-cook")]
#[command(about = "Swipe through home-cooked dishes from the terminal")]
#[command(version)]
struct Args {
    /// YAML dish catalog (overrides UCOOK_CATALOG_PATH)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Settle delay in milliseconds (overrides UCOOK_SETTLE_DELAY_MS)
    #[arg(long)]
    settle_ms: Option<u64>,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AppConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = AppConfig::from_env().expect("Failed to load configuration");
    if let Some(path) = args.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(ms) = args.settle_ms {
        config.settle_delay = Duration::from_millis(ms);
    }

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // stdout is the screen, so logs go to stderr
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "u_cook_app=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let catalog = match Catalog::load_or_builtin(config.catalog_path.as_deref()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            AppError::from(e).report();
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        dishes = catalog.len(),
        settle_ms = config.settle_delay.as_millis(),
        "Catalog loaded"
    );

    let state =
        AppState::new(config, Arc::new(catalog)).expect("Failed to initialize application state");

    let stdin = BufReader::new(tokio::io::stdin());
    match terminal::run(state, stdin, tokio::io::stdout(), shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            ExitCode::FAILURE
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
