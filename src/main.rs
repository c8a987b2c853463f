//! kafka-topic-sync
//!
//! Reconcile Kafka topics against a JSON manifest.
//!
//! ## Usage
//!
//! ```bash
//! kafka-topic-sync --kafka-addr broker:9092 --username admin --password secret \
//!     --json-file topics.json
//!
//! # Credentials from the environment
//! KAFKA_USERNAME=admin KAFKA_PASSWORD=secret kafka-topic-sync \
//!     --kafka-addr broker:9092 --json-file topics.json
//! ```
//!
//! ## Exit Codes
//!
//! - 0: All topics reconciled
//! - 1: An admin call failed while reconciling a topic
//! - 2: The manifest could not be read or is invalid
//! - 3: The cluster connection or authentication failed
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kafka_topic_sync::kafka::constants::{
    DEFAULT_CLIENT_ID, DEFAULT_OPERATION_TIMEOUT_MS, DEFAULT_SASL_MECHANISM,
    DEFAULT_SECURITY_PROTOCOL,
};
use kafka_topic_sync::{manifest, reconcile_with_progress, AdminConfig, RdKafkaAdmin};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Create missing Kafka topics, grow partitions and push topic config from a manifest
#[derive(Parser, Debug)]
#[command(name = "kafka-topic-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Kafka bootstrap address(es), comma separated
    #[arg(long = "kafka-addr", alias = "kafkaAddr", value_name = "HOST:PORT", env = "KAFKA_ADDR")]
    kafka_addr: String,

    /// SASL username
    #[arg(long, env = "KAFKA_USERNAME", default_value = "")]
    username: String,

    /// SASL password
    #[arg(long, env = "KAFKA_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Path to the JSON topic manifest
    #[arg(long = "json-file", alias = "jsonFile", value_name = "FILE", env = "TOPICS_FILE")]
    json_file: PathBuf,

    /// Security protocol: PLAINTEXT, SSL, SASL_PLAINTEXT, SASL_SSL
    #[arg(long, env = "KAFKA_SECURITY_PROTOCOL", default_value = DEFAULT_SECURITY_PROTOCOL)]
    security_protocol: String,

    /// SASL mechanism: PLAIN, SCRAM-SHA-256, SCRAM-SHA-512
    #[arg(long, env = "KAFKA_SASL_MECHANISM", default_value = DEFAULT_SASL_MECHANISM)]
    sasl_mechanism: String,

    /// CA certificate for *_SSL protocols
    #[arg(long, value_name = "PATH", env = "KAFKA_SSL_CA_LOCATION")]
    ssl_ca_location: Option<String>,

    /// Timeout for each admin round trip, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_OPERATION_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Log level: trace, debug, info, warn, error (RUST_LOG takes precedence)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn admin_config(&self) -> AdminConfig {
        AdminConfig {
            bootstrap_servers: self.kafka_addr.clone(),
            security_protocol: self.security_protocol.clone(),
            sasl_mechanism: self.sasl_mechanism.clone(),
            sasl_username: self.username.clone(),
            sasl_password: self.password.clone(),
            ssl_ca_location: self.ssl_ca_location.clone(),
            operation_timeout_ms: self.timeout_ms,
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

/// Install the stderr log subscriber; stdout is reserved for status lines
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> kafka_topic_sync::Result<()> {
    let topics = manifest::load(&cli.json_file)?;
    info!(topics = topics.len(), manifest = %cli.json_file.display(), "Manifest loaded");

    let admin = RdKafkaAdmin::connect(&cli.admin_config())?;

    reconcile_with_progress(&topics, &admin, |entry| println!("{}", entry))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => {
            println!("Finished.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
