use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Database connection pool type
pub type DbPool = sqlx::PgPool;

/// Database connection type - supports both pool connections and transactions
/// Use `conn.as_mut()` for pool connections, `tx.as_mut()` for transactions
pub type DbConn = sqlx::PgConnection;

/// Connects a pool using the configured credentials and sizing.
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.connection_string().expose_secret())
        .await?;

    Ok(pool)
}
