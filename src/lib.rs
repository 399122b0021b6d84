pub mod app;
pub mod cli;
pub mod config;
pub mod message;
pub mod rabbitmq;
