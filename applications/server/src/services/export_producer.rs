/// Publishes playlist export jobs onto the durable queue
use async_trait::async_trait;
use openmusic_core::{
    error::Result, export::Exporter, queue::QueueChannel, types::ExportJob,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ExportProducer {
    channel: Arc<dyn QueueChannel>,
    queue: String,
}

impl ExportProducer {
    pub fn new(channel: Arc<dyn QueueChannel>, queue: impl Into<String>) -> Self {
        Self {
            channel,
            queue: queue.into(),
        }
    }
}

#[async_trait]
impl Exporter for ExportProducer {
    async fn submit(&self, job: &ExportJob) -> Result<()> {
        let body = job.to_body()?;

        self.channel.declare_queue(&self.queue).await?;
        self.channel.publish(&self.queue, &body).await?;

        tracing::info!(
            playlist_id = %job.playlist_id,
            queue = %self.queue,
            "Export job submitted"
        );
        Ok(())
    }
}
