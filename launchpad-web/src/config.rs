/// Configuration management for the web front end
///
/// Configuration comes from environment variables (a `.env` file is loaded
/// first when present).
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_PRODUCTION`: Enables HSTS (default: false)
/// - `CORS_ORIGINS`: Comma separated allowed origins (default: `*`)
/// - `DATABASE_URL`: PostgreSQL connection string (optional, only used by `/health`)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET`: Secret the session tokens are signed with (required, 32+ chars)
/// - `JWT_ISSUER`: Expected token issuer (default: launchpad)
/// - `SESSION_COOKIE`: Cookie carrying the session token (default: session_token)
/// - `RUST_LOG`: Log level (default: launchpad_web=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use launchpad_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use launchpad_shared::auth::{identity::DEFAULT_SESSION_COOKIE, jwt::DEFAULT_ISSUER};
use serde::{Deserialize, Serialize};
use std::{env, fmt};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Database configuration, absent when `DATABASE_URL` is unset
    pub database: Option<DatabaseConfig>,

    /// Session token configuration
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode (HTTPS only, HSTS enabled)
    pub production: bool,

    /// Allowed CORS origins, `*` for any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key session tokens are signed with
    ///
    /// Must match the identity provider's signing key and be at least 32 bytes.
    pub jwt_secret: String,

    /// Expected `iss` claim
    pub issuer: String,

    /// Cookie name carrying the session token
    pub session_cookie: String,
}

// The URL may carry a password
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("session_cookie", &self.session_cookie)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing or shorter than 32 characters
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is invalid: {}", e))?;

        let production = lookup("API_PRODUCTION")
            .map(|v| parse_bool(&v))
            .transpose()
            .map_err(|e| anyhow::anyhow!("API_PRODUCTION is invalid: {}", e))?
            .unwrap_or(false);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => {
                let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse::<u32>()
                    .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is invalid: {}", e))?;
                Some(DatabaseConfig { url, max_connections })
            }
            None => None,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                production,
                cors_origins,
            },
            database,
            auth: AuthConfig {
                jwt_secret,
                issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
                session_cookie: lookup("SESSION_COOKIE")
                    .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got {:?}", other)),
    }
}
