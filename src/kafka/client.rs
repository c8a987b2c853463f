//! rdkafka-backed cluster admin
//!
//! `RdKafkaAdmin` wraps an rdkafka `AdminClient` configured with SASL/SSL
//! authentication and exposes it through the blocking `ClusterAdmin` trait.
//!
//! librdkafka's admin API is future-based. Each call is driven to completion
//! with `futures::executor::block_on`, which works without a tokio runtime:
//! the admin client's own background thread resolves the futures.

use std::time::Duration;

use futures::executor::block_on;
use rdkafka::admin::{
    AdminClient, AdminOptions, AlterConfig, ConfigEntry, ConfigSource, NewPartitions, NewTopic,
    ResourceSpecifier, TopicReplication,
};
use rdkafka::client::DefaultClientContext;
use rdkafka::error::RDKafkaErrorCode;
use tracing::{debug, info};

use super::admin::{ClusterAdmin, ObservedTopic, TopicConfig};
use super::error::{ConnectionError, TransportError, TransportResult};
use crate::config::AdminConfig;

/// Authenticated admin connection to a Kafka cluster
pub struct RdKafkaAdmin {
    /// The underlying rdkafka admin client
    admin: AdminClient<DefaultClientContext>,
    /// Timeout applied to every round trip
    timeout: Duration,
}

impl RdKafkaAdmin {
    /// Create the admin client and complete the credential handshake
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid (missing brokers, credentials, etc.)
    /// - librdkafka rejects the client configuration
    /// - The brokers are unreachable or reject the SASL negotiation
    pub fn connect(config: &AdminConfig) -> Result<Self, ConnectionError> {
        config.validate()?;
        debug!(?config, "creating admin client");

        let admin: AdminClient<DefaultClientContext> = config
            .client_config()
            .create()
            .map_err(ConnectionError::ClientCreation)?;

        let timeout = config.operation_timeout();

        // librdkafka connects lazily; a cluster-wide metadata round trip forces
        // the SASL handshake so auth failures surface before any topic work.
        let metadata = admin
            .inner()
            .fetch_metadata(None, timeout)
            .map_err(|source| ConnectionError::Handshake {
                bootstrap_servers: config.bootstrap_servers.clone(),
                source,
            })?;

        info!(
            bootstrap_servers = %config.bootstrap_servers,
            brokers = metadata.brokers().len(),
            "Connected to Kafka cluster"
        );

        Ok(Self { admin, timeout })
    }

    fn options(&self) -> AdminOptions {
        AdminOptions::new()
            .operation_timeout(Some(self.timeout))
            .request_timeout(Some(self.timeout))
    }

    /// Every config entry the broker reports for a topic
    fn topic_config_entries(&self, name: &str) -> TransportResult<Vec<ConfigEntry>> {
        let resource = ResourceSpecifier::Topic(name);
        let results = block_on(self.admin.describe_configs([&resource], &self.options()))?;

        match results.into_iter().next() {
            Some(Ok(described)) => Ok(described.entries),
            Some(Err(code)) => Err(TransportError::from_code(name, code)),
            None => Err(TransportError::UnexpectedResponse(format!(
                "describe configs returned no result for topic {}",
                name
            ))),
        }
    }
}

/// Lay the requested keys over a topic's current per-topic overrides
///
/// Only `DynamicTopic` entries are overrides; defaults and broker-level values
/// are not carried. An override whose value the broker hides cannot be sent
/// back, so unless `config` replaces it the merge fails rather than letting
/// AlterConfigs reset it.
fn merge_overrides(
    topic: &str,
    entries: Vec<ConfigEntry>,
    config: &TopicConfig,
) -> TransportResult<TopicConfig> {
    let mut merged = TopicConfig::new();
    for entry in entries {
        if entry.source != ConfigSource::DynamicTopic {
            continue;
        }
        match entry.value {
            Some(value) => {
                merged.insert(entry.name, value);
            }
            None if config.contains_key(&entry.name) => {}
            None => {
                return Err(TransportError::UnexpectedResponse(format!(
                    "override {} on {} has a hidden value and would be reset",
                    entry.name, topic
                )))
            }
        }
    }

    merged.extend(config.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(merged)
}

/// Unwrap the single per-resource result of an admin call
fn single_result<T, S>(
    name: &str,
    call: &str,
    results: Vec<Result<T, (S, RDKafkaErrorCode)>>,
) -> TransportResult<()> {
    match results.into_iter().next() {
        Some(Ok(_)) => Ok(()),
        Some(Err((_, code))) => Err(TransportError::from_code(name, code)),
        None => Err(TransportError::UnexpectedResponse(format!(
            "{} returned no result for topic {}",
            call, name
        ))),
    }
}

impl ClusterAdmin for RdKafkaAdmin {
    fn describe_topic(&self, name: &str) -> TransportResult<ObservedTopic> {
        let metadata = self.admin.inner().fetch_metadata(Some(name), self.timeout)?;

        let topic = metadata
            .topics()
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| {
                TransportError::UnexpectedResponse(format!(
                    "metadata response has no entry for topic {}",
                    name
                ))
            })?;

        if let Some(err) = topic.error() {
            return Err(TransportError::from_code(name, err.into()));
        }

        Ok(ObservedTopic {
            name: name.to_string(),
            partition_count: topic.partitions().len() as i32,
        })
    }

    fn create_topic(
        &self,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        config: &TopicConfig,
    ) -> TransportResult<()> {
        let mut new_topic =
            NewTopic::new(name, partitions, TopicReplication::Fixed(replication_factor));
        for (key, value) in config {
            new_topic = new_topic.set(key, value);
        }

        let results = block_on(self.admin.create_topics([&new_topic], &self.options()))?;
        single_result(name, "create topics", results)
    }

    fn alter_config(&self, name: &str, config: &TopicConfig) -> TransportResult<()> {
        // AlterConfigs replaces the whole override set, so carry the existing
        // overrides and lay the requested keys on top of them.
        let merged = merge_overrides(name, self.topic_config_entries(name)?, config)?;
        debug!(topic = name, keys = merged.len(), "Sending merged topic overrides");

        let mut alter = AlterConfig::new(ResourceSpecifier::Topic(name));
        for (key, value) in &merged {
            alter = alter.set(key, value);
        }

        let results = block_on(self.admin.alter_configs([&alter], &self.options()))?;
        single_result(name, "alter configs", results)
    }

    fn add_partitions(&self, name: &str, total_partitions: i32) -> TransportResult<()> {
        let total = usize::try_from(total_partitions).map_err(|_| {
            TransportError::UnexpectedResponse(format!(
                "invalid partition count {} for topic {}",
                total_partitions, name
            ))
        })?;

        let new_partitions = NewPartitions::new(name, total);
        let results =
            block_on(self.admin.create_partitions([&new_partitions], &self.options()))?;
        single_result(name, "create partitions", results)
    }
}
