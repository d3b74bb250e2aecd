//! Durable queue boundary
//!
//! Delivery is at-least-once: a message stays on the queue until acked, and a
//! redelivered message is indistinguishable from a first delivery apart from
//! its `delivery_count`.

use crate::error::Result;
use async_trait::async_trait;

/// A message pulled from a queue, owed an ack or nack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Broker-assigned delivery tag
    pub id: i64,
    pub queue: String,
    pub body: Vec<u8>,
    /// 1 on first delivery
    pub delivery_count: u32,
}

/// A channel to the queue broker
#[async_trait]
pub trait QueueChannel: Send + Sync {
    /// Declare a durable named queue; idempotent
    async fn declare_queue(&self, queue: &str) -> Result<()>;

    /// Publish a message durably
    async fn publish(&self, queue: &str, body: &[u8]) -> Result<()>;

    /// Pull the next available message, if any (manual ack mode)
    async fn next_delivery(&self, queue: &str) -> Result<Option<Delivery>>;

    /// Acknowledge, removing the message for good
    async fn ack(&self, delivery: &Delivery) -> Result<()>;

    /// Reject; with `requeue` the message becomes available again
    async fn nack(&self, delivery: &Delivery, requeue: bool) -> Result<()>;
}

/// Opens channels to the queue broker
#[async_trait]
pub trait QueueConnector: Send + Sync {
    type Channel: QueueChannel;

    /// Fails with `Unavailable` when the broker cannot be reached
    async fn connect(&self) -> Result<Self::Channel>;
}
