/// Export consumer: drains the export queue and mails playlist snapshots
///
/// Runs as its own long-lived process. Messages are pulled one at a time with
/// manual acknowledgment; the ack (or requeue) happens only after the mail
/// attempt, so a crash mid-processing leaves the message for redelivery.
use openmusic_core::{
    error::Result,
    export::PlaylistExport,
    mail::{MailSender, OutgoingMail},
    queue::{Delivery, QueueChannel, QueueConnector},
    storage::CatalogStore,
    types::ExportJob,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct ConsumerSettings {
    pub queue: String,
    pub from: String,
    pub poll_interval: Duration,
    pub reconnect_backoff: Duration,
    pub max_deliveries: u32,
}

impl Default for ConsumerSettings {
    fn default() -> Self {
        Self {
            queue: openmusic_core::types::EXPORT_QUEUE.to_string(),
            from: "OpenMusic API".to_string(),
            poll_interval: Duration::from_millis(500),
            reconnect_backoff: Duration::from_secs(5),
            max_deliveries: 1,
        }
    }
}

/// What happened to one delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Mailed and acked
    Completed,
    /// Acked without mailing
    Dropped,
    /// Handed back to the queue for another attempt
    Requeued,
}

pub struct ExportConsumer<C: QueueConnector> {
    connector: C,
    store: Arc<dyn CatalogStore>,
    mailer: Arc<dyn MailSender>,
    settings: ConsumerSettings,
}

impl<C: QueueConnector> ExportConsumer<C> {
    pub fn new(
        connector: C,
        store: Arc<dyn CatalogStore>,
        mailer: Arc<dyn MailSender>,
        settings: ConsumerSettings,
    ) -> Self {
        Self {
            connector,
            store,
            mailer,
            settings,
        }
    }

    /// Consume until cancelled, reconnecting whenever the channel fails
    pub async fn run(&self, shutdown: CancellationToken) {
        tracing::info!(queue = %self.settings.queue, "Export consumer started");

        while let Some(channel) = self.connect(&shutdown).await {
            match self.consume(&channel, &shutdown).await {
                Ok(()) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Queue channel failed, reconnecting");
                    if !self.backoff(&shutdown).await {
                        break;
                    }
                }
            }
        }

        tracing::info!("Export consumer stopped");
    }

    /// Process everything currently available, then return
    pub async fn drain(&self) -> Result<Vec<Outcome>> {
        let channel = self.connector.connect().await?;
        channel.declare_queue(&self.settings.queue).await?;

        let mut outcomes = Vec::new();
        while let Some(delivery) = channel.next_delivery(&self.settings.queue).await? {
            outcomes.push(self.handle(&channel, delivery).await?);
        }
        Ok(outcomes)
    }

    /// Connect with a fixed backoff, indefinitely. `None` once cancelled.
    async fn connect(&self, shutdown: &CancellationToken) -> Option<C::Channel> {
        loop {
            match self.connector.connect().await {
                Ok(channel) => {
                    tracing::info!("Connected to queue broker");
                    return Some(channel);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        retry_in = ?self.settings.reconnect_backoff,
                        "Queue broker unreachable"
                    );
                    if !self.backoff(shutdown).await {
                        return None;
                    }
                }
            }
        }
    }

    /// Sleep for the backoff; false when cancelled first
    async fn backoff(&self, shutdown: &CancellationToken) -> bool {
        tokio::select! {
            () = shutdown.cancelled() => false,
            () = tokio::time::sleep(self.settings.reconnect_backoff) => true,
        }
    }

    async fn consume(&self, channel: &C::Channel, shutdown: &CancellationToken) -> Result<()> {
        channel.declare_queue(&self.settings.queue).await?;

        loop {
            if shutdown.is_cancelled() {
                return Ok(());
            }

            match channel.next_delivery(&self.settings.queue).await? {
                Some(delivery) => {
                    self.handle(channel, delivery).await?;
                }
                None => {
                    tokio::select! {
                        () = shutdown.cancelled() => return Ok(()),
                        () = tokio::time::sleep(self.settings.poll_interval) => {}
                    }
                }
            }
        }
    }

    /// Process one delivery and settle it. Errors here are channel errors
    /// from ack/nack only.
    pub async fn handle(&self, channel: &C::Channel, delivery: Delivery) -> Result<Outcome> {
        let job = match ExportJob::from_body(&delivery.body) {
            Ok(job) => job,
            Err(e) => {
                tracing::error!(delivery = delivery.id, error = %e, "Dropping malformed export message");
                channel.ack(&delivery).await?;
                return Ok(Outcome::Dropped);
            }
        };

        match self.export(&job).await {
            Ok(()) => {
                channel.ack(&delivery).await?;
                tracing::info!(
                    playlist_id = %job.playlist_id,
                    delivery = delivery.id,
                    "Export completed"
                );
                Ok(Outcome::Completed)
            }
            Err(e) if e.is_retryable() && delivery.delivery_count < self.settings.max_deliveries => {
                channel.nack(&delivery, true).await?;
                tracing::warn!(
                    playlist_id = %job.playlist_id,
                    attempt = delivery.delivery_count,
                    error = %e,
                    "Export failed, requeued"
                );
                Ok(Outcome::Requeued)
            }
            Err(e) => {
                channel.ack(&delivery).await?;
                tracing::error!(
                    playlist_id = %job.playlist_id,
                    attempt = delivery.delivery_count,
                    error = %e,
                    "Export failed, dropped"
                );
                Ok(Outcome::Dropped)
            }
        }
    }

    async fn export(&self, job: &ExportJob) -> Result<()> {
        let snapshot = self.store.playlist_songs(&job.playlist_id).await?;
        let export = PlaylistExport::from_snapshot(snapshot);
        let mail = OutgoingMail::playlist_export(&self.settings.from, &job.target_email, &export)?;

        self.mailer.send(&mail).await
    }
}
