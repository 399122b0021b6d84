use clap::Parser;
use std::path::PathBuf;

pub const MISSING_QUEUE_MESSAGE: &str = "Missing queue name";

/// Declares a RabbitMQ queue and prints every JSON message delivered to it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the queue to declare and watch
    pub queue: Option<String>,

    /// Publish this JSON body to the queue and exit instead of consuming
    #[arg(short, long, value_name = "JSON")]
    pub publish: Option<String>,

    /// RabbitMQ connection string, overrides config and AMQP_ADDR
    #[arg(short, long)]
    pub amqp_addr: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_parses_without_queue() {
        let args = Args::try_parse_from(["watcher"]).unwrap();
        assert!(args.queue.is_none());
        assert!(args.publish.is_none());
    }

    #[test]
    fn test_queue_name_is_kept_verbatim() {
        let args = Args::try_parse_from(["watcher", "Audio Events.v2"]).unwrap();
        assert_eq!(args.queue.as_deref(), Some("Audio Events.v2"));
    }

    #[test]
    fn test_publish_and_overrides() {
        let args = Args::try_parse_from([
            "watcher",
            "songs",
            "--publish",
            r#"{"id":1}"#,
            "-a",
            "amqp://localhost:5673/%2f",
            "--config",
            "conf/watcher.json",
        ])
        .unwrap();

        assert_eq!(args.queue.as_deref(), Some("songs"));
        assert_eq!(args.publish.as_deref(), Some(r#"{"id":1}"#));
        assert_eq!(args.amqp_addr.as_deref(), Some("amqp://localhost:5673/%2f"));
        assert_eq!(args.config, Some(PathBuf::from("conf/watcher.json")));
    }
}
