//! Database connection management and schema bootstrap.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// SQLite connection pool.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new connection pool for `url` (e.g. `sqlite://gateway.db`).
    ///
    /// Foreign key enforcement is switched on per connection; order rows
    /// rely on it for cascading account deletes.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        tracing::info!("SQLite connection pool established");
        Ok(Self { pool })
    }

    /// In-memory database on a single connection, for tests.
    pub async fn connect_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the accounts and orders tables if they do not exist yet.
    pub async fn create_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS accounts (
                   id          INTEGER PRIMARY KEY AUTOINCREMENT,
                   username    TEXT NOT NULL UNIQUE,
                   api_public  TEXT NOT NULL UNIQUE,
                   api_secret  TEXT NOT NULL
               )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS orders (
                   id          INTEGER PRIMARY KEY AUTOINCREMENT,
                   order_id    TEXT NOT NULL UNIQUE,
                   symbol      TEXT NOT NULL,
                   size        INTEGER NOT NULL,
                   price       REAL NOT NULL,
                   side        TEXT NOT NULL,
                   account_id  INTEGER NOT NULL
                               REFERENCES accounts(id) ON DELETE CASCADE
               )"#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Whether `err` is a uniqueness-constraint violation, the store-level
/// signal behind every 409.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_bootstrap_is_idempotent() {
        let db = Database::connect_in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        db.create_schema().await.unwrap();
        db.health_check().await.unwrap();
    }
}
