//! Playlist export payloads and the producer seam

use crate::error::Result;
use crate::types::{ExportJob, PlaylistSongs, SongSummary};
use async_trait::async_trait;
use serde::Serialize;

/// Fixed subject line of export mails
pub const EXPORT_SUBJECT: &str = "Playlist Export";

/// Fixed body text of export mails
pub const EXPORT_TEXT: &str = "Attached is the export of your playlist.";

/// Attachment file name
pub const EXPORT_FILENAME: &str = "playlist.json";

/// Attachment MIME type
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Publishes export jobs for asynchronous delivery.
///
/// Callers must have verified playlist ownership before submitting.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn submit(&self, job: &ExportJob) -> Result<()>;
}

/// `{ "playlist": { id, name, songs } }` document mailed as the attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistExport {
    pub playlist: ExportedPlaylist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedPlaylist {
    pub id: String,
    pub name: String,
    pub songs: Vec<SongSummary>,
}

impl PlaylistExport {
    pub fn from_snapshot(snapshot: PlaylistSongs) -> Self {
        Self {
            playlist: ExportedPlaylist {
                id: snapshot.id.to_string(),
                name: snapshot.name,
                songs: snapshot.songs,
            },
        }
    }

    /// Pretty-printed JSON body of the attachment
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
