// src/rabbitmq/broker.rs

use async_trait::async_trait;

use super::errors::Result;
use crate::message::Incoming;

/// Callback invoked once per delivery. Returning an error stops consumption.
pub type Handler<'a> = &'a (dyn Fn(Incoming) -> Result<()> + Send + Sync);

/// What the broker reported back for a declared queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueInfo {
    pub name: String,
    pub message_count: u32,
    pub consumer_count: u32,
}

#[async_trait]
pub trait Broker: Send + Sync {
    async fn declare_queue(&self, queue: &str) -> Result<QueueInfo>;

    /// Publishes to the default exchange using the queue name as routing key.
    async fn publish(&self, queue: &str, body: &[u8]) -> Result<()>;

    /// Runs until the consumer stream ends or the handler fails.
    async fn consume(&self, queue: &str, handler: Handler<'_>) -> Result<()>;

    async fn close(&self) -> Result<()>;
}
