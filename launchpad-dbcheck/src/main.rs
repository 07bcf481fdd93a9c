//! # Launchpad Database Check
//!
//! Verifies the database is reachable: one direct connection runs
//! `SELECT NOW()`, one pooled connection lists the public tables. Failures
//! are logged; the process still exits normally once every connection has
//! been released.
//!
//! ## Usage
//!
//! ```bash
//! DB_HOST=localhost DB_USER=postgres DB_NAME=launchpad cargo run -p launchpad-dbcheck
//! ```

use launchpad_dbcheck::{config::ProbeConfig, probes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "launchpad_dbcheck=info,launchpad_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Launchpad dbcheck v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = ProbeConfig::from_env()?;
    tracing::debug!(?config, "Loaded probe configuration");

    let report = probes::run(&config).await;

    if report.all_succeeded() {
        tracing::info!("All database probes passed");
    } else {
        tracing::warn!(
            server_time = ?report.server_time,
            tables = ?report.tables,
            "Some database probes failed"
        );
    }

    Ok(())
}
