/// Database layer for Launchpad
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `session`: Scoped connection sessions that are always released
///
/// # Example
///
/// ```no_run
/// use launchpad_shared::db::pool::{create_pool, DatabaseConfig};
/// use launchpad_shared::db::session::{with_session, PooledConnector, Session};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     let connector = PooledConnector::new(pool);
///     let tables = with_session(&connector, |session| session.table_names()).await?;
///     println!("{} tables", tables.len());
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod session;
