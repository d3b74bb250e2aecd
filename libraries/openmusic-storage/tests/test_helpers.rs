//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and indexes.

use openmusic_core::types::*;
use openmusic_storage::SqliteCatalog;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    pub url: String,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let url = format!("sqlite://{}", db_path.display());

        let pool = openmusic_storage::create_pool(&url)
            .await
            .expect("Failed to create pool");

        openmusic_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            url,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Catalog store over this database
    pub fn catalog(&self) -> SqliteCatalog {
        SqliteCatalog::new(self.pool.clone())
    }
}

/// Test fixture: Create a test user
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> UserId {
    openmusic_storage::users::create(
        pool,
        CreateUser {
            username: username.to_string(),
            fullname: format!("{username} Test"),
        },
    )
    .await
    .expect("Failed to create test user")
    .id
}

/// Test fixture: Create a test song
pub async fn create_test_song(pool: &SqlitePool, title: &str, performer: &str) -> SongId {
    openmusic_storage::songs::create(pool, CreateSong::new(title, performer))
        .await
        .expect("Failed to create test song")
        .id
}

/// Test fixture: Create a test album
pub async fn create_test_album(pool: &SqlitePool, name: &str) -> AlbumId {
    openmusic_storage::albums::create(
        pool,
        CreateAlbum {
            name: name.to_string(),
            year: 1971,
        },
    )
    .await
    .expect("Failed to create test album")
    .id
}

/// Test fixture: Create a test playlist
pub async fn create_test_playlist(pool: &SqlitePool, name: &str, owner: UserId) -> PlaylistId {
    openmusic_storage::playlists::create(
        pool,
        CreatePlaylist {
            name: name.to_string(),
            owner,
        },
    )
    .await
    .expect("Failed to create test playlist")
    .id
}
