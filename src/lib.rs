//! kafka-topic-sync: declarative Kafka topic management
//!
//! Reads a manifest of desired topics (name, partitions, replication factor,
//! config) and reconciles a live cluster to match it: missing topics are
//! created, existing topics get their config overlay pushed and their
//! partition count grown. Topics are never deleted and partitions never shrink.
//!
//! ```no_run
//! use kafka_topic_sync::{manifest, reconcile, AdminConfig, RdKafkaAdmin};
//!
//! # fn main() -> Result<(), kafka_topic_sync::Error> {
//! let topics = manifest::load("topics.json")?;
//! let admin = RdKafkaAdmin::connect(&AdminConfig::new("broker:9092", "admin", "secret"))?;
//! let report = reconcile(&topics, &admin)?;
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod config; // Admin connection settings
pub mod kafka; // Cluster admin trait and rdkafka implementation
pub mod manifest; // Manifest loading and validation
pub mod reconcile; // Reconciliation engine

// Test utilities (only compiled in test builds)
#[cfg(test)]
pub mod testing;

pub use config::AdminConfig;
pub use kafka::{ClusterAdmin, ConnectionError, ObservedTopic, RdKafkaAdmin, TopicConfig};
pub use manifest::{ManifestError, TopicSpec};
pub use reconcile::{
    reconcile, reconcile_with_progress, EngineError, ReconciliationReport, ReportEntry,
};

use thiserror::Error;

/// Any fatal error of a run, in the order they can occur
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest unreadable or invalid (before any cluster contact)
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Client could not be built or authenticated (before any topic work)
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// An admin call failed while reconciling a topic
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl Error {
    /// Process exit code for this error
    ///
    /// Every fatal error maps to a non-zero code; the code tells operators
    /// which stage failed without parsing the message.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Engine(_) => 1,
            Error::Manifest(_) => 2,
            Error::Connection(_) => 3,
        }
    }
}

/// Result type alias for a whole run
pub type Result<T> = std::result::Result<T, Error>;
