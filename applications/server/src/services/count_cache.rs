/// In-process TTL cache for counters, backed by moka
use async_trait::async_trait;
use moka::{future::Cache as MokaCache, Expiry};
use openmusic_core::{cache::CountCache, error::Result};
use std::time::{Duration, Instant};

/// Each entry carries its own time-to-live
struct PerEntryTtl;

impl Expiry<String, (String, Duration)> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &(String, Duration),
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.1)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &(String, Duration),
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.1)
    }
}

/// String cache keyed like the external cache (`album-likes:{id}`)
#[derive(Clone)]
pub struct MokaCountCache {
    entries: MokaCache<String, (String, Duration)>,
}

impl MokaCountCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            entries: MokaCache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

#[async_trait]
impl CountCache for MokaCountCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).await.map(|(value, _)| value))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.entries.insert(key.to_string(), (value, ttl)).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }
}
