//! Durable queue kept in the relational store
//!
//! A pulled message is leased rather than removed. Ack deletes it; a nack with
//! requeue or an expired lease (consumer died mid-processing) makes it
//! available again, so delivery is at-least-once.

use crate::{create_pool, now_millis, run_migrations};
use async_trait::async_trait;
use openmusic_core::{
    error::Result,
    queue::{Delivery, QueueChannel, QueueConnector},
    CatalogError,
};
use sqlx::{Row, SqlitePool};
use std::time::Duration;

/// Default time a delivery stays invisible to other consumers
pub const DEFAULT_LEASE: Duration = Duration::from_secs(300);

/// Queue channel over a `SQLite` pool
#[derive(Clone)]
pub struct SqliteQueue {
    pool: SqlitePool,
    lease: Duration,
}

impl SqliteQueue {
    pub fn new(pool: SqlitePool, lease: Duration) -> Self {
        Self { pool, lease }
    }

    /// Messages on a queue, leased or not
    pub async fn depth(&self, queue: &str) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS depth FROM queue_messages WHERE queue = ?")
            .bind(queue)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("depth") as u64)
    }

    fn lease_millis(&self) -> i64 {
        i64::try_from(self.lease.as_millis()).unwrap_or(i64::MAX)
    }
}

#[async_trait]
impl QueueChannel for SqliteQueue {
    async fn declare_queue(&self, queue: &str) -> Result<()> {
        sqlx::query("INSERT INTO queues (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(queue)
            .bind(now_millis())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn publish(&self, queue: &str, body: &[u8]) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO queue_messages (queue, body, enqueued_at)
            SELECT name, ?, ? FROM queues WHERE name = ?
            "#,
        )
        .bind(body)
        .bind(now_millis())
        .bind(queue)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Queue", queue));
        }

        tracing::debug!(queue = %queue, bytes = body.len(), "Message published");

        Ok(())
    }

    async fn next_delivery(&self, queue: &str) -> Result<Option<Delivery>> {
        let now = now_millis();

        // Single statement: the claim is atomic under SQLite's write lock
        let row = sqlx::query(
            r#"
            UPDATE queue_messages
            SET delivery_count = delivery_count + 1,
                leased_until = ?
            WHERE id = (
                SELECT id FROM queue_messages
                WHERE queue = ? AND (leased_until IS NULL OR leased_until <= ?)
                ORDER BY id
                LIMIT 1
            )
            RETURNING id, queue, body, delivery_count
            "#,
        )
        .bind(now.saturating_add(self.lease_millis()))
        .bind(queue)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Delivery {
            id: row.get("id"),
            queue: row.get("queue"),
            body: row.get("body"),
            delivery_count: row.get::<i64, _>("delivery_count") as u32,
        }))
    }

    async fn ack(&self, delivery: &Delivery) -> Result<()> {
        let result = sqlx::query("DELETE FROM queue_messages WHERE id = ?")
            .bind(delivery.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::invariant(format!(
                "unknown delivery tag {}",
                delivery.id
            )));
        }

        Ok(())
    }

    async fn nack(&self, delivery: &Delivery, requeue: bool) -> Result<()> {
        if !requeue {
            return self.ack(delivery).await;
        }

        let result = sqlx::query("UPDATE queue_messages SET leased_until = NULL WHERE id = ?")
            .bind(delivery.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::invariant(format!(
                "unknown delivery tag {}",
                delivery.id
            )));
        }

        Ok(())
    }
}

/// Opens a [`SqliteQueue`] on its own pool, for processes that only consume
pub struct SqliteQueueConnector {
    database_url: String,
    lease: Duration,
}

impl SqliteQueueConnector {
    pub fn new(database_url: impl Into<String>, lease: Duration) -> Self {
        Self {
            database_url: database_url.into(),
            lease,
        }
    }
}

#[async_trait]
impl QueueConnector for SqliteQueueConnector {
    type Channel = SqliteQueue;

    async fn connect(&self) -> Result<SqliteQueue> {
        let pool = create_pool(&self.database_url)
            .await
            .map_err(|e| CatalogError::unavailable(e.to_string()))?;
        run_migrations(&pool).await?;

        Ok(SqliteQueue::new(pool, self.lease))
    }
}
