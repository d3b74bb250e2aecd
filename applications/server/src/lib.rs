//! OpenMusic Server Library
//!
//! Music catalog API: playlist authorization with collaborators, cached album
//! like counts, and playlist export through a durable queue drained by a
//! separate consumer process.
//!
//! This library exposes the core components for the binaries and for testing.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use jobs::export_consumer::{ConsumerSettings, ExportConsumer, Outcome};
pub use router::create_router;
pub use services::{
    access::StoreAccessResolver, auth::AuthService, count_cache::MokaCountCache,
    export_producer::ExportProducer, like_counter::LikeCounter, playlists::PlaylistService,
};
pub use state::AppState;
