// src/app.rs
// The two things the watcher binary does once it has a broker: watch or publish.

use serde_json::Value;
use std::future::Future;
use tracing::info;

use crate::message::{encode_body, Incoming};
use crate::rabbitmq::{Broker, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published,
    Interrupted,
    StreamEnded,
}

/// Declares `queue`, then hands every decoded delivery to `sink` until the
/// consumer stream ends or `shutdown` resolves.
pub async fn watch<B, F, S>(broker: &B, queue: &str, sink: F, shutdown: S) -> Result<Outcome>
where
    B: Broker + ?Sized,
    F: Fn(Value) + Send + Sync,
    S: Future<Output = ()>,
{
    let declared = broker.declare_queue(queue).await?;
    info!(
        queue = %declared.name,
        messages = declared.message_count,
        "[Watcher] Queue declared, now waiting for messages..."
    );

    let handler = move |incoming: Incoming| -> Result<()> {
        sink(incoming.decode()?);
        Ok(())
    };

    tokio::select! {
        result = broker.consume(queue, &handler) => {
            result?;
            Ok(Outcome::StreamEnded)
        }
        _ = shutdown => {
            info!(queue, "Interrupt received, stopping consumer");
            Ok(Outcome::Interrupted)
        }
    }
}

/// Declares `queue` and publishes one JSON body to it.
pub async fn publish<B>(broker: &B, queue: &str, raw_body: &str) -> Result<Outcome>
where
    B: Broker + ?Sized,
{
    let body = encode_body(raw_body)?;
    broker.declare_queue(queue).await?;
    broker.publish(queue, &body).await?;
    info!(queue, bytes = body.len(), "[Watcher] Published message");
    Ok(Outcome::Published)
}
