/// Shared application state
use crate::{
    config::ServerConfig,
    services::{
        AuthService, ExportProducer, LikeCounter, MokaCountCache, PlaylistService,
        StoreAccessResolver,
    },
};
use openmusic_core::{
    cache::CountCache,
    export::Exporter,
    storage::{ActivityLog, CatalogStore},
};
use openmusic_storage::{SqliteCatalog, SqliteQueue};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub auth_service: Arc<AuthService>,
    pub playlists: PlaylistService,
    pub likes: LikeCounter,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        activities: Arc<dyn ActivityLog>,
        cache: Arc<dyn CountCache>,
        exporter: Arc<dyn Exporter>,
        auth_service: Arc<AuthService>,
        like_count_ttl: Duration,
    ) -> Self {
        let access = Arc::new(StoreAccessResolver::new(Arc::clone(&store)));
        let playlists = PlaylistService::new(Arc::clone(&store), activities, access, exporter);
        let likes = LikeCounter::new(Arc::clone(&store), cache, like_count_ttl);

        Self {
            store,
            auth_service,
            playlists,
            likes,
        }
    }

    /// Wire every component onto one `SQLite` pool. The export queue lives in
    /// the same database.
    pub fn with_sqlite(pool: SqlitePool, config: &ServerConfig) -> Self {
        let catalog = Arc::new(SqliteCatalog::new(pool.clone()));
        let queue = Arc::new(SqliteQueue::new(pool, config.lease()));
        let exporter = Arc::new(ExportProducer::new(queue, config.queue.export_queue.clone()));
        let cache = Arc::new(MokaCountCache::new(config.cache.max_capacity));
        let auth_service = Arc::new(AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.access_token_age_secs,
        ));

        Self::new(
            catalog.clone(),
            catalog,
            cache,
            exporter,
            auth_service,
            config.like_count_ttl(),
        )
    }
}
