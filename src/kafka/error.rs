//! Kafka admin error types
//!
//! `TransportError` covers a single admin round trip for one topic.
//! `ConnectionError` covers building and authenticating the client, which
//! happens once before any topic is processed.

use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use thiserror::Error;

/// Errors returned by a single `ClusterAdmin` call
#[derive(Error, Debug)]
pub enum TransportError {
    /// Broker reported UNKNOWN_TOPIC_OR_PARTITION for this topic
    #[error("Topic not found: {0}")]
    UnknownTopic(String),

    /// Broker rejected the operation for this topic
    #[error("Broker error for topic {topic}: {code} ({message})")]
    Broker {
        topic: String,
        code: String,
        message: String,
    },

    /// Client-side failure (timeout, transport, queue)
    #[error("Kafka client error: {0}")]
    Client(#[from] KafkaError),

    /// Broker response did not contain the expected topic/resource
    #[error("Unexpected admin response: {0}")]
    UnexpectedResponse(String),
}

impl TransportError {
    /// Build an error from a per-resource broker error code
    pub fn from_code(topic: &str, code: RDKafkaErrorCode) -> Self {
        match code {
            RDKafkaErrorCode::UnknownTopicOrPartition | RDKafkaErrorCode::UnknownTopic => {
                TransportError::UnknownTopic(topic.to_string())
            }
            other => TransportError::Broker {
                topic: topic.to_string(),
                code: format!("{:?}", other),
                message: other.to_string(),
            },
        }
    }

    /// True when the broker says the topic does not exist
    pub fn is_unknown_topic(&self) -> bool {
        matches!(self, TransportError::UnknownTopic(_))
    }
}

/// Result type alias for admin calls
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Errors establishing the authenticated admin connection
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Connection settings are incomplete or inconsistent
    #[error("Invalid connection configuration: {0}")]
    InvalidConfig(String),

    /// librdkafka refused the client configuration
    #[error("Failed to create admin client: {0}")]
    ClientCreation(#[source] KafkaError),

    /// Brokers unreachable or SASL negotiation rejected
    #[error("Failed to connect to {bootstrap_servers}: {source}")]
    Handshake {
        bootstrap_servers: String,
        #[source]
        source: KafkaError,
    },
}
