// src/rabbitmq/mod.rs
// RabbitMQ side of the watcher: the broker seam and its lapin implementation

pub mod broker;
pub mod connection;
pub mod errors;
mod watcher;

pub use broker::{Broker, Handler, QueueInfo};
pub use errors::{Result, WatcherError};
pub use watcher::{Watcher, CLOSE_REPLY_CODE, CLOSE_REPLY_TEXT};
