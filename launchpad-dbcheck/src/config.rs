/// Connection settings for the database probes
///
/// # Environment Variables
///
/// - `DB_HOST`: Database host (default: localhost)
/// - `DB_PORT`: Database port (default: 5432)
/// - `DB_USER`: Role to connect as (default: postgres)
/// - `DB_PASSWORD`: Password (default: empty)
/// - `DB_NAME`: Database name (default: postgres)
/// - `DATABASE_URL`: Connection string for the pooled probe; falls back to the `DB_*` settings
/// - `DB_CONNECT_TIMEOUT_SECONDS`: Pool acquire timeout (default: 10)
/// - `RUST_LOG`: Log level (default: launchpad_dbcheck=info)

use launchpad_shared::db::pool::DatabaseConfig;
use sqlx::postgres::PgConnectOptions;
use std::{env, fmt, str::FromStr};

/// Probe configuration
#[derive(Clone)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    /// Connection string for the pooled probe
    pub database_url: Option<String>,

    /// Seconds to wait for a pooled connection
    pub connect_timeout_seconds: u64,
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            database_url: None,
            connect_timeout_seconds: 10,
        }
    }
}

impl ProbeConfig {
    /// Loads configuration from environment variables (and `.env` if present)
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match lookup("DB_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("DB_PORT is invalid: {}", e))?,
            None => defaults.port,
        };

        let connect_timeout_seconds = match lookup("DB_CONNECT_TIMEOUT_SECONDS") {
            Some(timeout) => timeout
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("DB_CONNECT_TIMEOUT_SECONDS is invalid: {}", e))?,
            None => defaults.connect_timeout_seconds,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            connect_timeout_seconds,
        })
    }

    /// Options for the direct connection, built from the discrete settings
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    /// Options for the pooled client
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is set but cannot be parsed.
    pub fn pool_connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.database_url {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(self.connect_options()),
        }
    }

    /// Pool settings for the pooled probe: a single connection, no warm spares
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: self.connect_timeout_seconds,
            ..Default::default()
        }
    }

    /// `host:port/database`, for log lines
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}
