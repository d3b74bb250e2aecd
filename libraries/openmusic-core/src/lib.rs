//! OpenMusic Core
//!
//! Domain types, traits, and error handling shared by the OpenMusic store,
//! API server, and export consumer.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `Song`, `Album`, `ActivityEntry`, `ExportJob`, etc.
//! - **Component Traits**: `AccessResolver`, `AggregateCache`, `Exporter`, `ActivityLog`
//! - **Boundary Traits**: `CatalogStore`, `CountCache`, `QueueChannel`, `MailSender`
//! - **Error Handling**: Unified `CatalogError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use openmusic_core::access::AccessDecision;
//! use openmusic_core::types::UserId;
//!
//! let owner = UserId::new("user-1");
//! let decision = AccessDecision::evaluate(Some(&owner), &owner, false);
//! assert_eq!(decision, AccessDecision::Owner);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod cache;
pub mod error;
pub mod export;
pub mod mail;
pub mod queue;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use access::{authenticated, AccessDecision, AccessGrant, AccessResolver};
pub use cache::{AggregateCache, CachedCount, CountCache, LikeWrite};
pub use error::{CatalogError, Result};
pub use export::{Exporter, PlaylistExport};
pub use mail::{Attachment, MailSender, OutgoingMail};
pub use queue::{Delivery, QueueChannel, QueueConnector};
pub use storage::{ActivityLog, CatalogStore};

pub use types::{
    ActivityAction, ActivityEntry, ActivityView, Album, AlbumId, Collaboration, CreateAlbum,
    CreatePlaylist, CreateSong, CreateUser, ExportJob, Playlist, PlaylistId, PlaylistSongs,
    PlaylistSummary, Song, SongId, SongSummary, User, UserId,
};
