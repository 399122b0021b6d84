// src/rabbitmq/errors.rs

use lapin::Error as LapinError;
use serde_json::Error as SerdeError;
use thiserror::Error;
use tokio::time::error::Elapsed;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("RabbitMQ connection error: {0}")]
    Connection(String),

    #[error("RabbitMQ channel error: {0}")]
    Channel(String),

    #[error("Failed to declare queue '{queue}': {reason}")]
    Declare { queue: String, reason: String },

    #[error("Failed to publish to queue '{queue}': {reason}")]
    Publish { queue: String, reason: String },

    #[error("Consumer error on queue '{queue}': {reason}")]
    Consume { queue: String, reason: String },

    #[error("Message payload is not valid JSON: {0}")]
    Payload(#[from] SerdeError),

    #[error("Connection timeout: {0}")]
    Timeout(String),
}

// Custom Result type for watcher operations
pub type Result<T> = std::result::Result<T, WatcherError>;

impl WatcherError {
    pub fn declare(queue: &str, error: impl ToString) -> Self {
        WatcherError::Declare {
            queue: queue.to_string(),
            reason: error.to_string(),
        }
    }

    pub fn publish(queue: &str, error: impl ToString) -> Self {
        WatcherError::Publish {
            queue: queue.to_string(),
            reason: error.to_string(),
        }
    }

    pub fn consume(queue: &str, error: impl ToString) -> Self {
        WatcherError::Consume {
            queue: queue.to_string(),
            reason: error.to_string(),
        }
    }
}

// Untagged lapin errors are classified by their message
impl From<LapinError> for WatcherError {
    fn from(error: LapinError) -> Self {
        let error_text = error.to_string();

        if error_text.to_lowercase().contains("channel") {
            WatcherError::Channel(error_text)
        } else {
            WatcherError::Connection(error_text)
        }
    }
}

impl From<Elapsed> for WatcherError {
    fn from(_: Elapsed) -> Self {
        WatcherError::Timeout("Connection timed out".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_errors_carry_queue_name() {
        let err = WatcherError::declare("audio.events", "PRECONDITION_FAILED");
        assert_eq!(
            err.to_string(),
            "Failed to declare queue 'audio.events': PRECONDITION_FAILED"
        );

        let err = WatcherError::publish("audio.events", "channel closed");
        assert!(err.to_string().contains("audio.events"));
    }

    #[test]
    fn test_payload_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: WatcherError = serde_err.into();
        assert!(matches!(err, WatcherError::Payload(_)));
    }
}
