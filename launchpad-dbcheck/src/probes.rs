/// Database connectivity probes
///
/// Two probes run one after the other:
///
/// 1. **Server time**: a dedicated connection runs `SELECT NOW()`
/// 2. **Tables**: a pooled connection lists the tables in the `public` schema
///
/// Both go through [`with_session`], so the connection is released whatever
/// the query did. A failed probe is logged and reported; it never aborts the
/// run, and the pool behind the second probe is closed in every case.

use launchpad_shared::db::{
    pool::{close_pool, create_lazy_pool_with_options},
    session::{with_session, Connector, DirectConnector, PooledConnector, Session},
};
use sqlx::PgPool;
use tracing::{error, info};

use crate::config::ProbeConfig;

/// Result of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probe ran; carries a one-line summary
    Succeeded(String),

    /// The probe failed; carries the error message
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Succeeded(_))
    }
}

/// Outcomes of a full run
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub server_time: ProbeOutcome,
    pub tables: ProbeOutcome,
}

impl ProbeReport {
    pub fn all_succeeded(&self) -> bool {
        self.server_time.is_success() && self.tables.is_success()
    }
}

/// Connects, asks the server for the current time and logs it
pub async fn server_time_probe<C>(connector: &C) -> ProbeOutcome
where
    C: Connector + ?Sized,
{
    match with_session(connector, |session| session.server_time()).await {
        Ok(now) => {
            info!(server_time = %now.to_rfc3339(), "Connected successfully");
            ProbeOutcome::Succeeded(format!("server time {}", now.to_rfc3339()))
        }
        Err(e) => {
            error!(error = %e, "Server time probe failed");
            ProbeOutcome::Failed(e.to_string())
        }
    }
}

/// Connects, lists the public tables and logs each one
pub async fn table_listing_probe<C>(connector: &C) -> ProbeOutcome
where
    C: Connector + ?Sized,
{
    match with_session(connector, |session| session.table_names()).await {
        Ok(tables) => {
            info!(count = tables.len(), "Listed public tables");
            for table in &tables {
                info!(table = %table, "Found table");
            }
            ProbeOutcome::Succeeded(format!("{} tables", tables.len()))
        }
        Err(e) => {
            error!(error = %e, "Table listing probe failed");
            ProbeOutcome::Failed(e.to_string())
        }
    }
}

/// Lists the public tables through `pool`, then closes the pool
///
/// The pool is closed whether or not the listing succeeded.
pub async fn pooled_table_listing(pool: &PgPool) -> ProbeOutcome {
    let outcome = table_listing_probe(&PooledConnector::new(pool.clone())).await;
    close_pool(pool.clone()).await;
    outcome
}

/// Runs both probes against the configured database
pub async fn run(config: &ProbeConfig) -> ProbeReport {
    info!(target_db = %config.target(), "Probing direct connection");
    let direct = DirectConnector::new(config.connect_options());
    let server_time = server_time_probe(&direct).await;

    let tables = match config.pool_connect_options() {
        Ok(options) => {
            info!("Probing pooled connection");
            let pool = create_lazy_pool_with_options(&config.pool_config(), options);
            pooled_table_listing(&pool).await
        }
        Err(e) => {
            error!(error = %e, "Invalid DATABASE_URL, skipping pooled probe");
            ProbeOutcome::Failed(format!("Invalid DATABASE_URL: {}", e))
        }
    };

    ProbeReport {
        server_time,
        tables,
    }
}
