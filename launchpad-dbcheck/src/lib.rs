//! # Launchpad Database Check
//!
//! Connectivity probes for the Launchpad database. Each probe connects,
//! runs one fixed query, logs what came back and releases the connection.
//!
//! ## Modules
//!
//! - `config`: Connection settings from the environment
//! - `probes`: The server-time and table-listing probes
//!
//! ## Example
//!
//! ```no_run
//! use launchpad_dbcheck::{config::ProbeConfig, probes};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ProbeConfig::from_env()?;
//! let report = probes::run(&config).await;
//! println!("all probes passed: {}", report.all_succeeded());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod probes;
