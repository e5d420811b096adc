//! fdctl
//!
//! Terminal front end for the FD backend.
//!
//! # Configuration
//!
//! See `fdctl init-config`. Environment variables:
//! - `FD_API_URL`: Backend base URL (default: http://localhost:8000)
//! - `FD_API_TIMEOUT_SECS`: Request timeout (default: 30)
//! - `FD_SESSION_FILE`: Where the session token is kept
//! - `FD_LOG_LEVEL`, `FD_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter, overrides `FD_LOG_LEVEL`

use clap::Parser;
use fd_manager::api::RequestScope;
use fd_manager::cli::{self, Cli};
use fd_manager::config::{Config, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;
    init_logging(&config.logging);

    tracing::debug!(
        "fdctl v{} using {}",
        env!("CARGO_PKG_VERSION"),
        cli.api_url.as_deref().unwrap_or(&config.api.base_url)
    );

    // Ctrl-C aborts whatever request is in flight
    let scope = RequestScope::new();
    let interrupt = scope.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling requests");
            interrupt.cancel_all();
        }
    });

    let result = cli::run(cli, config, scope).await;
    ctrl_c.abort();
    result
}

/// Logs go to stderr so command output stays pipeable
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fd_manager={}", logging.level)));

    let (json, pretty) = if logging.format == "json" {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}
