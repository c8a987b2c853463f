// Cluster admin abstraction
//
// This module defines the ClusterAdmin trait: the narrow set of admin calls the
// reconciliation engine needs from the cluster. Separating the contract from
// the rdkafka client gives us:
// 1. Testability - the engine runs against mocks and in-memory fakes
// 2. No credential machinery in the engine - it receives an authenticated admin
// 3. One place that knows about librdkafka's async admin API

use std::collections::BTreeMap;

use super::error::TransportResult;

/// Per-topic configuration entries (key -> value)
///
/// Ordered so calls and log output are deterministic.
pub type TopicConfig = BTreeMap<String, String>;

/// Topic state as observed on the cluster
///
/// Fetched fresh for each topic and discarded once the engine has decided
/// what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedTopic {
    /// Topic name
    pub name: String,
    /// Number of partition records returned by the describe call
    pub partition_count: i32,
}

/// Admin operations against the cluster
///
/// Every call is a blocking round trip on a single, already authenticated
/// connection. Implementations surface deadlines and cancellation as ordinary
/// errors.
#[cfg_attr(test, mockall::automock)]
pub trait ClusterAdmin {
    /// Describe a single topic
    ///
    /// Returns `TransportError::UnknownTopic` when the topic does not exist.
    fn describe_topic(&self, name: &str) -> TransportResult<ObservedTopic>;

    /// Create a topic with the given partition count, replication factor and config
    fn create_topic(
        &self,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        config: &TopicConfig,
    ) -> TransportResult<()>;

    /// Set the supplied config keys on an existing topic
    ///
    /// Keys not present in `config` are left untouched on the broker.
    fn alter_config(&self, name: &str, config: &TopicConfig) -> TransportResult<()>;

    /// Grow a topic to `total_partitions` partitions
    fn add_partitions(&self, name: &str, total_partitions: i32) -> TransportResult<()>;
}
