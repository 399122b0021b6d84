// src/rabbitmq/watcher.rs

use async_trait::async_trait;
use futures_lite::stream::StreamExt;
use lapin::{options::*, types::FieldTable, BasicProperties, Channel, Connection};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::broker::{Broker, Handler, QueueInfo};
use super::connection;
use super::errors::{Result, WatcherError};
use crate::config::{ConnectionConfig, ConsumerConfig};
use crate::message::Incoming;

pub const CLOSE_REPLY_CODE: u16 = 418;
pub const CLOSE_REPLY_TEXT: &str = "Watcher has closed";

/// Owns one connection and one channel from `connect` until `close`.
pub struct Watcher {
    connection: Connection,
    channel: Channel,
    consumer: ConsumerConfig,
}

impl Watcher {
    pub async fn connect(config: &ConnectionConfig, consumer: &ConsumerConfig) -> Result<Self> {
        let connection = connection::connect(config).await?;
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| WatcherError::Channel(format!("Failed to create channel: {}", e)))?;

        info!(channel_id = channel.id(), "Opened channel");

        Ok(Self {
            connection,
            channel,
            consumer: consumer.clone(),
        })
    }

    pub fn channel_id(&self) -> u16 {
        self.channel.id()
    }

    fn consumer_tag(&self) -> String {
        format!(
            "{}-{}",
            self.consumer.consumer_tag_prefix,
            &Uuid::new_v4().simple().to_string()[..8]
        )
    }
}

#[async_trait]
impl Broker for Watcher {
    #[instrument(skip(self))]
    async fn declare_queue(&self, queue: &str) -> Result<QueueInfo> {
        let declared = self
            .channel
            .queue_declare(queue, QueueDeclareOptions::default(), FieldTable::default())
            .await
            .map_err(|e| WatcherError::declare(queue, e))?;

        let info = QueueInfo {
            name: declared.name().as_str().to_string(),
            message_count: declared.message_count(),
            consumer_count: declared.consumer_count(),
        };
        debug!(
            messages = info.message_count,
            consumers = info.consumer_count,
            "Queue declared"
        );
        Ok(info)
    }

    #[instrument(skip(self, body), fields(bytes = body.len()))]
    async fn publish(&self, queue: &str, body: &[u8]) -> Result<()> {
        let properties = BasicProperties::default()
            .with_message_id(Uuid::new_v4().to_string().into())
            .with_content_type("application/json".into())
            .with_timestamp(chrono::Utc::now().timestamp() as u64);

        self.channel
            .basic_publish("", queue, BasicPublishOptions::default(), body, properties)
            .await
            .map_err(|e| WatcherError::publish(queue, e))?
            .await
            .map_err(|e| WatcherError::publish(queue, e))?;

        debug!("Message published");
        Ok(())
    }

    async fn consume(&self, queue: &str, handler: Handler<'_>) -> Result<()> {
        let auto_ack = self.consumer.auto_ack;
        let consumer_tag = self.consumer_tag();

        let mut consumer = self
            .channel
            .basic_consume(
                queue,
                &consumer_tag,
                BasicConsumeOptions {
                    no_ack: auto_ack,
                    ..BasicConsumeOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| WatcherError::consume(queue, e))?;

        info!(queue, consumer_tag = %consumer_tag, auto_ack, "Consumer registered");

        while let Some(delivery) = consumer.next().await {
            let delivery = delivery.map_err(|e| WatcherError::consume(queue, e))?;
            let incoming = Incoming::new(
                delivery.routing_key.as_str(),
                delivery.delivery_tag,
                delivery.data.clone(),
            );

            handler(incoming)?;

            if !auto_ack {
                delivery
                    .ack(BasicAckOptions::default())
                    .await
                    .map_err(|e| WatcherError::consume(queue, e))?;
            }
        }

        info!(queue, "Consumer stream ended");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        info!("Closing RabbitMQ connection");
        self.connection.close(CLOSE_REPLY_CODE, CLOSE_REPLY_TEXT).await?;
        Ok(())
    }
}
