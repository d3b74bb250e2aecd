/// Song domain types
use crate::types::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

/// Song in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

/// The projection of a song used in playlist listings and exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

/// Data for creating a new song
#[derive(Debug, Clone)]
pub struct CreateSong {
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

impl CreateSong {
    /// Minimal song with just the fields shown in playlists
    pub fn new(title: impl Into<String>, performer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: 1970,
            performer: performer.into(),
            genre: "Unknown".to_string(),
            duration: None,
            album_id: None,
        }
    }
}
