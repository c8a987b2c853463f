// Kafka admin transport module
//
// This module contains all Kafka-specific code:
// - The ClusterAdmin trait the reconciliation engine depends on
// - The rdkafka-backed implementation with SASL/SSL authentication
// - Transport and connection error types
// - Defaults and broker-side limits
//
// The engine never builds a client itself. The binary connects once via
// RdKafkaAdmin::connect() and hands the authenticated admin to the engine,
// which uses it serially, one topic at a time.

pub mod admin;
pub mod client;
pub mod constants;
pub mod error;

// Re-export commonly used types for convenience
pub use admin::{ClusterAdmin, ObservedTopic, TopicConfig};
pub use client::RdKafkaAdmin;
pub use error::{ConnectionError, TransportError, TransportResult};
