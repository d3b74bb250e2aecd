/// Mail transports for export delivery
use async_trait::async_trait;
use openmusic_core::{
    error::Result,
    mail::{MailSender, OutgoingMail},
    CatalogError,
};
use std::path::PathBuf;
use uuid::Uuid;

/// Writes each mail as a JSON document into a directory, for a local relay
/// or inspection
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    dir: PathBuf,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl MailSender for OutboxMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = format!(
            "{}-{}.json",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f"),
            Uuid::new_v4().simple()
        );
        let path = self.dir.join(name);

        tokio::fs::write(&path, serde_json::to_vec_pretty(mail)?).await?;

        tracing::info!(to = %mail.to, path = %path.display(), "Mail written to outbox");
        Ok(())
    }
}

/// POSTs each mail as JSON to an HTTP mail relay
#[derive(Debug, Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    url: String,
}

impl RelayMailer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl MailSender for RelayMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(mail)
            .send()
            .await
            .map_err(|e| CatalogError::unavailable(format!("mail relay unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::unavailable(format!(
                "mail relay rejected message: {status}"
            )));
        }

        tracing::info!(to = %mail.to, "Mail handed to relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmusic_core::export::PlaylistExport;
    use openmusic_core::types::{PlaylistId, PlaylistSongs};

    #[tokio::test]
    async fn outbox_writes_one_document_per_mail() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = OutboxMailer::new(dir.path().join("outbox"));

        let export = PlaylistExport::from_snapshot(PlaylistSongs {
            id: PlaylistId::new("playlist-1"),
            name: "Empty".to_string(),
            username: "owner".to_string(),
            songs: vec![],
        });
        let mail = OutgoingMail::playlist_export("OpenMusic API", "x@example.com", &export).unwrap();

        mailer.send(&mail).await.unwrap();
        mailer.send(&mail).await.unwrap();

        let mut entries = std::fs::read_dir(dir.path().join("outbox")).unwrap();
        let first = entries.next().unwrap().unwrap().path();
        assert!(entries.next().is_some());

        let written: OutgoingMail =
            serde_json::from_slice(&std::fs::read(first).unwrap()).unwrap();
        assert_eq!(written, mail);
        assert_eq!(written.attachments[0].filename, "playlist.json");
    }

    #[tokio::test]
    async fn unreachable_relay_is_unavailable() {
        let mailer = RelayMailer::new("http://127.0.0.1:9/send");
        let mail = OutgoingMail {
            from: "a".to_string(),
            to: "b@example.com".to_string(),
            subject: "s".to_string(),
            text: "t".to_string(),
            attachments: vec![],
        };

        let err = mailer.send(&mail).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
        assert!(err.is_retryable());
    }
}
