/// Export job message carried on the durable queue
use crate::error::Result;
use crate::types::PlaylistId;
use serde::{Deserialize, Serialize};

/// Durable queue the export pipeline publishes to and consumes from
pub const EXPORT_QUEUE: &str = "export:playlists";

/// Request to mail a playlist's content to an address.
///
/// Carries no authorization: ownership is checked before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub playlist_id: PlaylistId,
    pub target_email: String,
}

impl ExportJob {
    pub fn new(playlist_id: PlaylistId, target_email: impl Into<String>) -> Self {
        Self {
            playlist_id,
            target_email: target_email.into(),
        }
    }

    /// Serialize to the UTF-8 JSON wire body
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a wire body
    pub fn from_body(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}
