use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rabbit_watcher::app::{self, Outcome};
use rabbit_watcher::cli::{Args, MISSING_QUEUE_MESSAGE};
use rabbit_watcher::config::WatcherConfig;
use rabbit_watcher::rabbitmq::{Broker, Watcher};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let Some(queue) = args.queue.as_deref() else {
        println!("{}", MISSING_QUEUE_MESSAGE);
        return Ok(());
    };

    let mut config = WatcherConfig::load(args.config.as_deref())?;
    if let Some(addr) = &args.amqp_addr {
        config.connection.uri = addr.clone();
        config.validate()?;
    }

    let watcher = Watcher::connect(&config.connection, &config.consumer).await?;
    info!(
        channel_id = watcher.channel_id(),
        "[Watcher] Built watcher instance, using queue name {}", queue
    );

    let outcome = match args.publish.as_deref() {
        Some(body) => app::publish(&watcher, queue, body).await,
        None => app::watch(&watcher, queue, print_message, shutdown_signal()).await,
    };

    // Close even when the flow failed, but report the flow's error first.
    let closed = watcher.close().await;
    let outcome = outcome?;
    closed?;

    if outcome == Outcome::Interrupted {
        info!("Watcher stopped by interrupt");
    }
    Ok(())
}

fn print_message(value: Value) {
    println!("{}", value);
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for interrupt signal: {}", e);
        std::future::pending::<()>().await;
    }
}
