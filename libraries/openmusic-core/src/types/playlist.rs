/// Playlist domain types
use crate::types::{PlaylistId, SongSummary, UserId};
use serde::{Deserialize, Serialize};

/// Playlist, owned exclusively by its creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Owner user ID
    pub owner: UserId,
}

/// Data for creating a new playlist
#[derive(Debug, Clone)]
pub struct CreatePlaylist {
    pub name: String,
    pub owner: UserId,
}

/// Playlist as listed for a principal: owner resolved to a username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
}

/// Snapshot of a playlist and its member songs, read from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSongs {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

/// Grant of read/append rights on a playlist to a non-owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: String,
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}

impl Collaboration {
    /// Generate a collaboration id
    pub fn generate_id() -> String {
        format!("collab-{}", &uuid::Uuid::new_v4().simple().to_string()[..16])
    }
}
