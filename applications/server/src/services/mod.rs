/// Server services
pub mod access;
pub mod auth;
pub mod count_cache;
pub mod export_producer;
pub mod like_counter;
pub mod mail;
pub mod playlists;

pub use access::StoreAccessResolver;
pub use auth::AuthService;
pub use count_cache::MokaCountCache;
pub use export_producer::ExportProducer;
pub use like_counter::LikeCounter;
pub use mail::{OutboxMailer, RelayMailer};
pub use playlists::PlaylistService;
