/// Export pipeline tests
/// Producer publishes, consumer mails with manual ack, retries and shutdown
mod common;

use common::{seed_playlist_abc, FlakyConnector, RecordingMailer, TestApp};
use openmusic_core::{
    export::{EXPORT_CONTENT_TYPE, EXPORT_FILENAME},
    types::EXPORT_QUEUE,
    CatalogStore, ExportJob, Exporter, PlaylistId, QueueChannel,
};
use openmusic_server::{ConsumerSettings, ExportConsumer, ExportProducer, Outcome};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn settings(max_deliveries: u32) -> ConsumerSettings {
    ConsumerSettings {
        poll_interval: Duration::from_millis(10),
        reconnect_backoff: Duration::from_millis(10),
        max_deliveries,
        ..ConsumerSettings::default()
    }
}

fn consumer(
    app: &TestApp,
    mailer: Arc<RecordingMailer>,
    max_deliveries: u32,
) -> ExportConsumer<FlakyConnector> {
    ExportConsumer::new(
        FlakyConnector::new(app.pool.clone(), 0),
        app.catalog.clone(),
        mailer,
        settings(max_deliveries),
    )
}

fn producer(app: &TestApp) -> ExportProducer {
    ExportProducer::new(Arc::new(app.queue()), EXPORT_QUEUE)
}

fn abc_job() -> ExportJob {
    ExportJob::new(PlaylistId::new("playlist-abc"), "x@example.com")
}

#[tokio::test]
async fn test_end_to_end_export_of_playlist_abc() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::default());

    producer(&app).submit(&abc_job()).await.unwrap();

    let outcomes = consumer(&app, mailer.clone(), 1).drain().await.unwrap();
    assert_eq!(outcomes, vec![Outcome::Completed]);
    assert_eq!(app.queue().depth(EXPORT_QUEUE).await.unwrap(), 0);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "x@example.com");
    assert_eq!(sent[0].attachments.len(), 1);

    let attachment = &sent[0].attachments[0];
    assert_eq!(attachment.filename, EXPORT_FILENAME);
    assert_eq!(attachment.content_type, EXPORT_CONTENT_TYPE);

    let expected = serde_json::json!({
        "playlist": {
            "id": "playlist-abc",
            "name": "Classics",
            "songs": [
                {"id": "song-1", "title": "Imagine", "performer": "John Lennon"},
                {"id": "song-2", "title": "Hey Jude", "performer": "The Beatles"}
            ]
        }
    });
    assert_eq!(
        attachment.content,
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[tokio::test]
async fn test_redelivery_sends_identical_export_and_leaves_data_intact() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::default());
    let playlist = PlaylistId::new("playlist-abc");

    let before = app.catalog.playlist_songs(&playlist).await.unwrap();

    // Same message delivered twice
    let producer = producer(&app);
    producer.submit(&abc_job()).await.unwrap();
    producer.submit(&abc_job()).await.unwrap();

    let outcomes = consumer(&app, mailer.clone(), 1).drain().await.unwrap();
    assert_eq!(outcomes, vec![Outcome::Completed, Outcome::Completed]);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].attachments, sent[1].attachments);
    assert_eq!(app.catalog.playlist_songs(&playlist).await.unwrap(), before);
}

#[tokio::test]
async fn test_ack_happens_after_mail_attempt() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::default());
    let channel = app.queue();

    producer(&app).submit(&abc_job()).await.unwrap();

    // Pulled but unsettled: still on the queue
    let delivery = channel.next_delivery(EXPORT_QUEUE).await.unwrap().unwrap();
    assert_eq!(channel.depth(EXPORT_QUEUE).await.unwrap(), 1);

    let outcome = consumer(&app, mailer.clone(), 1)
        .handle(&channel, delivery)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(mailer.sent().len(), 1);
    assert_eq!(channel.depth(EXPORT_QUEUE).await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_message_is_dropped() {
    let app = TestApp::new().await;
    let channel = app.queue();
    let mailer = Arc::new(RecordingMailer::default());

    channel.declare_queue(EXPORT_QUEUE).await.unwrap();
    channel
        .publish(EXPORT_QUEUE, b"{\"playlistId\": 42}")
        .await
        .unwrap();

    let outcomes = consumer(&app, mailer.clone(), 3).drain().await.unwrap();
    assert_eq!(outcomes, vec![Outcome::Dropped]);
    assert!(mailer.sent().is_empty());
    assert_eq!(channel.depth(EXPORT_QUEUE).await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_playlist_is_dropped_without_retry() {
    let app = TestApp::new().await;
    let mailer = Arc::new(RecordingMailer::default());

    producer(&app)
        .submit(&ExportJob::new(PlaylistId::new("playlist-gone"), "x@example.com"))
        .await
        .unwrap();

    let outcomes = consumer(&app, mailer.clone(), 3).drain().await.unwrap();
    assert_eq!(outcomes, vec![Outcome::Dropped]);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_mail_failure_is_acked_with_single_delivery() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::failing(1));

    producer(&app).submit(&abc_job()).await.unwrap();

    let outcomes = consumer(&app, mailer.clone(), 1).drain().await.unwrap();
    assert_eq!(outcomes, vec![Outcome::Dropped]);
    assert!(mailer.sent().is_empty());
    assert_eq!(app.queue().depth(EXPORT_QUEUE).await.unwrap(), 0);
}

#[tokio::test]
async fn test_mail_failure_is_retried_within_delivery_budget() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::failing(1));

    producer(&app).submit(&abc_job()).await.unwrap();

    let outcomes = consumer(&app, mailer.clone(), 2).drain().await.unwrap();
    assert_eq!(outcomes, vec![Outcome::Requeued, Outcome::Completed]);
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_retries_stop_at_delivery_budget() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::failing(10));

    producer(&app).submit(&abc_job()).await.unwrap();

    let outcomes = consumer(&app, mailer.clone(), 3).drain().await.unwrap();
    assert_eq!(
        outcomes,
        vec![Outcome::Requeued, Outcome::Requeued, Outcome::Dropped]
    );
    assert_eq!(app.queue().depth(EXPORT_QUEUE).await.unwrap(), 0);
}

#[tokio::test]
async fn test_consumer_reconnects_after_broker_outage_then_stops_on_shutdown() {
    let app = TestApp::new().await;
    seed_playlist_abc(&app.pool).await;
    let mailer = Arc::new(RecordingMailer::default());

    producer(&app).submit(&abc_job()).await.unwrap();

    let consumer = Arc::new(ExportConsumer::new(
        FlakyConnector::new(app.pool.clone(), 3),
        app.catalog.clone(),
        mailer.clone(),
        settings(1),
    ));

    let shutdown = CancellationToken::new();
    let worker = {
        let consumer = Arc::clone(&consumer);
        let shutdown = shutdown.clone();
        tokio::spawn(async move { consumer.run(shutdown).await })
    };

    tokio::time::timeout(Duration::from_secs(5), async {
        while mailer.sent().is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("consumer never delivered the export");

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("consumer did not stop")
        .unwrap();

    assert_eq!(mailer.sent().len(), 1);
    assert_eq!(app.queue().depth(EXPORT_QUEUE).await.unwrap(), 0);
}

#[tokio::test]
async fn test_shutdown_while_broker_unreachable() {
    let app = TestApp::new().await;
    let consumer = ExportConsumer::new(
        FlakyConnector::new(app.pool.clone(), usize::MAX),
        app.catalog.clone(),
        Arc::new(RecordingMailer::default()),
        settings(1),
    );

    let shutdown = CancellationToken::new();
    shutdown.cancel();

    tokio::time::timeout(Duration::from_secs(5), consumer.run(shutdown))
        .await
        .expect("consumer kept retrying after shutdown");
}
