//! Kafka admin constants
//!
//! This module centralizes the defaults and limits used when talking to the
//! cluster and validating topic specifications.

// ===== Connection Defaults =====

/// Default security protocol for the admin connection
///
/// The cluster requires SASL authentication; TLS is opt-in via `SASL_SSL`.
pub const DEFAULT_SECURITY_PROTOCOL: &str = "SASL_PLAINTEXT";

/// Default SASL mechanism (challenge-response over SHA-512)
pub const DEFAULT_SASL_MECHANISM: &str = "SCRAM-SHA-512";

/// Default client.id reported to the brokers
pub const DEFAULT_CLIENT_ID: &str = "kafka-topic-sync";

/// Default timeout for each admin round trip (30 seconds)
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 30_000;

/// Security protocols accepted by librdkafka
pub const SECURITY_PROTOCOLS: [&str; 4] = ["PLAINTEXT", "SSL", "SASL_PLAINTEXT", "SASL_SSL"];

/// SASL mechanisms this tool knows how to configure
pub const SASL_MECHANISMS: [&str; 3] = ["PLAIN", "SCRAM-SHA-256", "SCRAM-SHA-512"];

// ===== Topic Limits =====
// Mirror the broker-side checks so a bad manifest fails before any cluster contact.

/// Maximum topic name length accepted by the broker
pub const MAX_TOPIC_NAME_LEN: usize = 249;

/// Replication factor is an INT16 on the wire
pub const MAX_REPLICATION_FACTOR: i32 = i16::MAX as i32;
