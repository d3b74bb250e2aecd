/// OpenMusic export consumer - drains the playlist export queue
use clap::Parser;
use openmusic_core::MailSender;
use openmusic_server::{
    config::{MailTransport, ServerConfig},
    services::{OutboxMailer, RelayMailer},
    ConsumerSettings, ExportConsumer,
};
use openmusic_storage::{SqliteCatalog, SqliteQueueConnector};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "export-consumer")]
#[command(about = "Mails exported playlists queued by the OpenMusic API", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process what is queued now, then exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openmusic_server=info,export_consumer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate_worker()?;

    let pool = openmusic_storage::create_pool(&config.storage.database_url).await?;
    openmusic_storage::run_migrations(&pool).await?;
    let store = Arc::new(SqliteCatalog::new(pool));

    let mailer: Arc<dyn MailSender> = match config.mail.transport {
        MailTransport::Outbox => Arc::new(OutboxMailer::new(config.mail.outbox_dir.clone())),
        MailTransport::Relay => {
            let url = config
                .mail
                .relay_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("mail.relay_url is required"))?;
            Arc::new(RelayMailer::new(url))
        }
    };

    let connector = SqliteQueueConnector::new(config.queue_url(), config.lease());
    let settings = ConsumerSettings {
        queue: config.queue.export_queue.clone(),
        from: config.mail.from.clone(),
        poll_interval: Duration::from_millis(config.queue.poll_interval_ms),
        reconnect_backoff: Duration::from_secs(config.queue.reconnect_backoff_secs),
        max_deliveries: config.queue.max_deliveries,
    };
    let consumer = ExportConsumer::new(connector, store, mailer, settings);

    if cli.once {
        let outcomes = consumer.drain().await?;
        tracing::info!(processed = outcomes.len(), "Queue drained");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        signal.cancel();
    });

    consumer.run(shutdown).await;
    Ok(())
}
