//! Oddsdesk - a terminal dashboard for sports-betting odds.
//!
//! Shows upcoming matches, per-market bookmaker prices next to reference
//! no-vig prices, and the backend's EV and arbitrage feeds.

use anyhow::Context;
use oddsdesk::{App, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to a daily file; the terminal belongs to the UI.
fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = oddsdesk::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "oddsdesk.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oddsdesk=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_logging().context("failed to initialize logging")?;

    // Load configuration
    let config = Config::load_or_default().context("failed to load configuration")?;
    tracing::info!(base_url = %config.api.base_url, "starting oddsdesk");

    // Run the application
    let mut app = App::new(config)
        .await
        .context("failed to start the terminal UI")?;
    app.run().await.context("application error")?;

    Ok(())
}
