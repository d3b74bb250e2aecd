/// Cache-aside like counter for albums
use async_trait::async_trait;
use openmusic_core::{
    cache::{album_likes_key, AggregateCache, CachedCount, CountCache, LikeWrite},
    error::Result,
    storage::CatalogStore,
    types::{AlbumId, UserId},
    CatalogError,
};
use std::sync::Arc;
use std::time::Duration;

/// Reads through the count cache, writes to the store then invalidates.
///
/// Cache failures never reach the caller: reads fall through to the store and
/// failed invalidations are left to expire with the TTL.
#[derive(Clone)]
pub struct LikeCounter {
    store: Arc<dyn CatalogStore>,
    cache: Arc<dyn CountCache>,
    ttl: Duration,
}

impl LikeCounter {
    pub fn new(store: Arc<dyn CatalogStore>, cache: Arc<dyn CountCache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// Like an existing album
    pub async fn like(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
        self.ensure_album(album_id).await?;
        self.record_and_invalidate(LikeWrite::Like(user_id.clone()), album_id)
            .await
    }

    /// Remove a like from an existing album
    pub async fn unlike(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
        self.ensure_album(album_id).await?;
        self.record_and_invalidate(LikeWrite::Unlike(user_id.clone()), album_id)
            .await
    }

    async fn ensure_album(&self, album_id: &AlbumId) -> Result<()> {
        match self.store.get_album(album_id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::not_found("Album", album_id.as_str())),
        }
    }

    async fn cached(&self, key: &str) -> Option<u64> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(key = %key, value = %raw, "Discarding unparseable cached count");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Count cache unavailable, reading store");
                None
            }
        }
    }
}

#[async_trait]
impl AggregateCache for LikeCounter {
    async fn get_count(&self, album_id: &AlbumId) -> Result<CachedCount> {
        let key = album_likes_key(album_id);

        if let Some(value) = self.cached(&key).await {
            return Ok(CachedCount {
                value,
                served_from_cache: true,
            });
        }

        let value = self.store.count_likes(album_id).await?;

        if let Err(e) = self.cache.set(&key, value.to_string(), self.ttl).await {
            tracing::warn!(key = %key, error = %e, "Failed to populate count cache");
        }

        Ok(CachedCount {
            value,
            served_from_cache: false,
        })
    }

    async fn invalidate(&self, album_id: &AlbumId) {
        let key = album_likes_key(album_id);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(key = %key, error = %e, "Failed to invalidate count cache");
        }
    }

    async fn record_and_invalidate(&self, write: LikeWrite, album_id: &AlbumId) -> Result<()> {
        // Invalidate only once the store has acknowledged the write
        match &write {
            LikeWrite::Like(user_id) => self.store.add_like(user_id, album_id).await?,
            LikeWrite::Unlike(user_id) => self.store.remove_like(user_id, album_id).await?,
        }

        self.invalidate(album_id).await;
        Ok(())
    }
}
