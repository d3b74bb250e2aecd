//! OpenMusic Storage
//!
//! `SQLite` database layer for the OpenMusic catalog and its durable export
//! queue.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table family owns its own queries
//! - **Constraints over locks**: uniqueness and cascades are enforced by the
//!   schema, never by application-level mutual exclusion
//! - **Explicit pool**: one `SqlitePool` is created by the caller and handed to
//!   `SqliteCatalog` and `SqliteQueue`
//!
//! # Example
//!
//! ```rust,no_run
//! use openmusic_storage::{create_pool, run_migrations, SqliteCatalog};
//! use openmusic_core::CatalogStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://openmusic.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = SqliteCatalog::new(pool);
//! let users = catalog.list_users().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod activities;
pub mod albums;
pub mod collaborations;
pub mod likes;
pub mod playlists;
pub mod songs;
pub mod users;

// Durable queue
pub mod queue;

pub use context::SqliteCatalog;
pub use error::StorageError;
pub use queue::{SqliteQueue, SqliteQueueConnector};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Safe to call from every process sharing the database; applied
/// migrations are skipped.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://openmusic.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}

/// Current time as unix milliseconds, the storage format for timestamps
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
