//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use openmusic_core::{
    error::Result as CatalogResult,
    mail::{MailSender, OutgoingMail},
    queue::QueueConnector,
    types::*,
    CatalogError, CatalogStore, CountCache,
};
use openmusic_server::{config::ServerConfig, create_router, AppState};
use openmusic_storage::{SqliteCatalog, SqliteQueue};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";

/// Full application over a REAL SQLite file in a temp dir
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub pool: SqlitePool,
    pub catalog: Arc<SqliteCatalog>,
    pub config: ServerConfig,
    pub url: String,
    _temp_dir: TempDir,
}

impl TestApp {
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

        let mut config = ServerConfig::default();
        config.auth.jwt_secret = JWT_SECRET.to_string();
        config.storage.database_url = url.clone();

        let state = AppState::with_sqlite(pool.clone(), &config);
        let router = create_router(state.clone());

        Self {
            state,
            router,
            catalog: Arc::new(SqliteCatalog::new(pool.clone())),
            pool,
            config,
            url,
            _temp_dir: temp_dir,
        }
    }

    /// Queue channel over the app database
    pub fn queue(&self) -> SqliteQueue {
        SqliteQueue::new(self.pool.clone(), Duration::from_secs(60))
    }

    pub fn token_for(&self, user: &UserId) -> String {
        self.state
            .auth_service
            .create_access_token(user)
            .expect("Failed to create token")
    }

    pub async fn user(&self, username: &str) -> UserId {
        self.catalog
            .create_user(CreateUser {
                username: username.to_string(),
                fullname: format!("{username} Test"),
            })
            .await
            .expect("Failed to create user")
            .id
    }

    pub async fn song(&self, title: &str, performer: &str) -> SongId {
        self.catalog
            .create_song(CreateSong::new(title, performer))
            .await
            .expect("Failed to create song")
            .id
    }

    pub async fn album(&self, name: &str) -> AlbumId {
        self.catalog
            .create_album(CreateAlbum {
                name: name.to_string(),
                year: 1971,
            })
            .await
            .expect("Failed to create album")
            .id
    }

    pub async fn playlist(&self, name: &str, owner: &UserId) -> PlaylistId {
        self.catalog
            .create_playlist(CreatePlaylist {
                name: name.to_string(),
                owner: owner.clone(),
            })
            .await
            .expect("Failed to create playlist")
            .id
    }

    /// Send a request through the router; returns status, headers and JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };

        (status, headers, json)
    }
}

/// The fixed catalog used by the end-to-end export scenario:
/// `playlist-abc` owned by `user-1` with `song-1` and `song-2`
pub async fn seed_playlist_abc(pool: &SqlitePool) {
    sqlx::query("INSERT INTO users (id, username, fullname) VALUES ('user-1', 'john', 'John Doe')")
        .execute(pool)
        .await
        .unwrap();

    for (id, title, performer) in [
        ("song-1", "Imagine", "John Lennon"),
        ("song-2", "Hey Jude", "The Beatles"),
    ] {
        sqlx::query(
            "INSERT INTO songs (id, title, year, performer, genre) VALUES (?, ?, 1970, ?, 'Rock')",
        )
        .bind(id)
        .bind(title)
        .bind(performer)
        .execute(pool)
        .await
        .unwrap();
    }

    sqlx::query("INSERT INTO playlists (id, name, owner) VALUES ('playlist-abc', 'Classics', 'user-1')")
        .execute(pool)
        .await
        .unwrap();

    for song in ["song-1", "song-2"] {
        sqlx::query("INSERT INTO playlist_songs (playlist_id, song_id) VALUES ('playlist-abc', ?)")
            .bind(song)
            .execute(pool)
            .await
            .unwrap();
    }
}

/// Mailer that records every mail; fails the first `failures` sends
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    failures: AtomicUsize,
}

impl RecordingMailer {
    pub fn failing(failures: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failures: AtomicUsize::new(failures),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> CatalogResult<()> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(CatalogError::unavailable("mail relay down"));
        }

        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Cache whose backend is always unreachable
pub struct UnreachableCache;

#[async_trait]
impl CountCache for UnreachableCache {
    async fn get(&self, _key: &str) -> CatalogResult<Option<String>> {
        Err(CatalogError::unavailable("cache down"))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> CatalogResult<()> {
        Err(CatalogError::unavailable("cache down"))
    }

    async fn delete(&self, _key: &str) -> CatalogResult<()> {
        Err(CatalogError::unavailable("cache down"))
    }
}

/// Connector that is unreachable for the first `failures` attempts
pub struct FlakyConnector {
    pool: SqlitePool,
    failures: usize,
    pub attempts: AtomicUsize,
}

impl FlakyConnector {
    pub fn new(pool: SqlitePool, failures: usize) -> Self {
        Self {
            pool,
            failures,
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QueueConnector for FlakyConnector {
    type Channel = SqliteQueue;

    async fn connect(&self) -> CatalogResult<SqliteQueue> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(CatalogError::unavailable("broker down"));
        }
        Ok(SqliteQueue::new(self.pool.clone(), Duration::from_secs(60)))
    }
}
