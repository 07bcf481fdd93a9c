/// Scoped connection sessions
///
/// A session is one database connection held for the length of a single
/// unit of work. [`with_session`] acquires it, runs the work and releases it
/// again whether the work succeeded or not. Two connectors are provided:
///
/// - [`DirectConnector`]: opens a dedicated `PgConnection` and terminates it on release
/// - [`PooledConnector`]: checks a connection out of a `PgPool` and hands it back on release
///
/// # Example
///
/// ```no_run
/// use launchpad_shared::db::session::{with_session, DirectConnector, Session};
/// use sqlx::postgres::PgConnectOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = PgConnectOptions::new()
///     .host("localhost")
///     .port(5432)
///     .username("postgres")
///     .database("postgres");
///
/// let connector = DirectConnector::new(options);
/// let now = with_session(&connector, |session| session.server_time()).await?;
/// println!("database time: {now}");
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use sqlx::{
    pool::PoolConnection,
    postgres::{PgConnectOptions, PgConnection, PgPool},
    Connection, PgExecutor, Postgres, Row,
};
use tracing::{debug, warn};

/// Error raised by a scoped session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The connection could not be established; no work was attempted
    #[error("Failed to connect: {0}")]
    Connect(#[source] sqlx::Error),

    /// The work failed; the connection was still released
    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The work succeeded but releasing the connection failed
    #[error("Failed to release connection: {0}")]
    Close(#[source] sqlx::Error),
}

/// An acquired database connection
#[async_trait]
pub trait Session: Send {
    /// Runs `SELECT NOW()` and returns the single timestamp it yields
    async fn server_time(&mut self) -> Result<DateTime<Utc>, sqlx::Error>;

    /// Lists tables in the `public` schema, ordered by name
    async fn table_names(&mut self) -> Result<Vec<String>, sqlx::Error>;

    /// Releases the connection
    async fn close(self) -> Result<(), sqlx::Error>;
}

/// Something that can hand out sessions
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: Session;

    /// Acquires a fresh session
    async fn connect(&self) -> Result<Self::Session, sqlx::Error>;
}

/// Runs `work` on a freshly acquired session and always releases it
///
/// The session is closed after `work` finishes, successful or not. A close
/// failure is only reported when the work itself succeeded; otherwise the
/// work's error wins and the close failure is logged.
///
/// # Errors
///
/// - [`SessionError::Connect`] when no session could be acquired (`work` never runs)
/// - [`SessionError::Query`] when `work` fails
/// - [`SessionError::Close`] when `work` succeeds but the release fails
pub async fn with_session<C, T, F>(connector: &C, work: F) -> Result<T, SessionError>
where
    C: Connector + ?Sized,
    F: for<'s> FnOnce(&'s mut C::Session) -> BoxFuture<'s, Result<T, sqlx::Error>>,
{
    let mut session = connector.connect().await.map_err(SessionError::Connect)?;
    debug!("Session acquired");

    let outcome = work(&mut session).await;
    let released = session.close().await;
    debug!(released = released.is_ok(), "Session released");

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(SessionError::Close(close_err)),
        (Err(err), Ok(())) => Err(SessionError::Query(err)),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "Failed to release connection after failed query");
            Err(SessionError::Query(err))
        }
    }
}

async fn fetch_server_time<'e, E>(executor: E) -> Result<DateTime<Utc>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query("SELECT NOW()").fetch_all(executor).await?;

    let [row] = rows.as_slice() else {
        return Err(sqlx::Error::Protocol(format!(
            "SELECT NOW() returned {} rows, expected 1",
            rows.len()
        )));
    };

    if row.len() != 1 {
        return Err(sqlx::Error::Protocol(format!(
            "SELECT NOW() returned {} columns, expected 1",
            row.len()
        )));
    }

    row.try_get::<DateTime<Utc>, _>(0)
}

async fn fetch_table_names<'e, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, String>(
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = 'public' ORDER BY table_name",
    )
    .fetch_all(executor)
    .await
}

/// Connector opening one dedicated connection per session
#[derive(Debug, Clone)]
pub struct DirectConnector {
    options: PgConnectOptions,
}

impl DirectConnector {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Connector for DirectConnector {
    type Session = DirectSession;

    async fn connect(&self) -> Result<DirectSession, sqlx::Error> {
        let conn = PgConnection::connect_with(&self.options).await?;
        Ok(DirectSession { conn })
    }
}

/// Session over a dedicated connection
pub struct DirectSession {
    conn: PgConnection,
}

#[async_trait]
impl Session for DirectSession {
    async fn server_time(&mut self) -> Result<DateTime<Utc>, sqlx::Error> {
        fetch_server_time(&mut self.conn).await
    }

    async fn table_names(&mut self) -> Result<Vec<String>, sqlx::Error> {
        fetch_table_names(&mut self.conn).await
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}

/// Connector checking sessions out of a pool
#[derive(Debug, Clone)]
pub struct PooledConnector {
    pool: PgPool,
}

impl PooledConnector {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Connector for PooledConnector {
    type Session = PooledSession;

    async fn connect(&self) -> Result<PooledSession, sqlx::Error> {
        let conn = self.pool.acquire().await?;
        Ok(PooledSession { conn })
    }
}

/// Session over a pooled connection
pub struct PooledSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl Session for PooledSession {
    async fn server_time(&mut self) -> Result<DateTime<Utc>, sqlx::Error> {
        fetch_server_time(&mut *self.conn).await
    }

    async fn table_names(&mut self) -> Result<Vec<String>, sqlx::Error> {
        fetch_table_names(&mut *self.conn).await
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        // Dropping hands the connection back to the pool.
        drop(self.conn);
        Ok(())
    }
}
