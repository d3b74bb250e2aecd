//! Cache-aside aggregate counters

use crate::error::Result;
use crate::types::{AlbumId, UserId};
use async_trait::async_trait;
use std::time::Duration;

/// Time-to-live of a cached like count
pub const LIKE_COUNT_TTL: Duration = Duration::from_secs(1800);

/// Cache key for an album's like count
pub fn album_likes_key(album_id: &AlbumId) -> String {
    format!("album-likes:{album_id}")
}

/// String key/value cache with per-entry TTL.
///
/// Errors mean the backend is unreachable; callers decide whether to degrade.
#[async_trait]
pub trait CountCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}

/// A counter value and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedCount {
    pub value: u64,
    pub served_from_cache: bool,
}

/// Write against the authoritative like rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeWrite {
    Like(UserId),
    Unlike(UserId),
}

/// Cache-aside counter for the per-album like count
#[async_trait]
pub trait AggregateCache: Send + Sync {
    /// Cached value if present, otherwise recompute and repopulate
    async fn get_count(&self, album_id: &AlbumId) -> Result<CachedCount>;

    /// Drop the cached value; backend failures are swallowed
    async fn invalidate(&self, album_id: &AlbumId);

    /// Apply the write to the store, then invalidate the key
    async fn record_and_invalidate(&self, write: LikeWrite, album_id: &AlbumId) -> Result<()>;
}
