//! Outgoing mail boundary

use crate::error::Result;
use crate::export::{
    PlaylistExport, EXPORT_CONTENT_TYPE, EXPORT_FILENAME, EXPORT_SUBJECT, EXPORT_TEXT,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A file attached to a mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

/// A mail ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl OutgoingMail {
    /// Build the export mail carrying `playlist.json`
    pub fn playlist_export(
        from: impl Into<String>,
        to: impl Into<String>,
        export: &PlaylistExport,
    ) -> Result<Self> {
        Ok(Self {
            from: from.into(),
            to: to.into(),
            subject: EXPORT_SUBJECT.to_string(),
            text: EXPORT_TEXT.to_string(),
            attachments: vec![Attachment {
                filename: EXPORT_FILENAME.to_string(),
                content_type: EXPORT_CONTENT_TYPE.to_string(),
                content: export.to_pretty_json()?,
            }],
        })
    }
}

/// External mail-sending collaborator
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}
