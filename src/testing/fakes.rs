//! In-memory cluster fake
//!
//! `FakeCluster` keeps topics in memory, applies admin calls with the same
//! semantics a broker would (config overlay, grow-only partitions) and records
//! every call in order so tests can assert on the exact sequence.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::kafka::{ClusterAdmin, ObservedTopic, TopicConfig, TransportError, TransportResult};

/// Admin operation kinds, used for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Describe,
    Create,
    AlterConfig,
    AddPartitions,
}

/// A recorded admin call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCall {
    Describe(String),
    Create {
        topic: String,
        partitions: i32,
        replication_factor: i32,
        config: TopicConfig,
    },
    AlterConfig {
        topic: String,
        config: TopicConfig,
    },
    AddPartitions {
        topic: String,
        total: i32,
    },
}

impl AdminCall {
    pub fn topic(&self) -> &str {
        match self {
            AdminCall::Describe(topic)
            | AdminCall::Create { topic, .. }
            | AdminCall::AlterConfig { topic, .. }
            | AdminCall::AddPartitions { topic, .. } => topic,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            AdminCall::Describe(_) => Operation::Describe,
            AdminCall::Create { .. } => Operation::Create,
            AdminCall::AlterConfig { .. } => Operation::AlterConfig,
            AdminCall::AddPartitions { .. } => Operation::AddPartitions,
        }
    }
}

/// Topic state held by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTopic {
    pub partitions: i32,
    pub replication_factor: i32,
    pub config: TopicConfig,
}

/// In-memory cluster implementing `ClusterAdmin`
#[derive(Debug, Default)]
pub struct FakeCluster {
    topics: RefCell<BTreeMap<String, FakeTopic>>,
    calls: RefCell<Vec<AdminCall>>,
    failures: Vec<(Operation, String)>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing topic (builder style)
    pub fn with_topic(self, name: &str, partitions: i32, config: &[(&str, &str)]) -> Self {
        let config = config
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.topics.borrow_mut().insert(
            name.to_string(),
            FakeTopic {
                partitions,
                replication_factor: 1,
                config,
            },
        );
        self
    }

    /// Make `operation` on `topic` fail with a broker error
    pub fn failing_on(mut self, operation: Operation, topic: &str) -> Self {
        self.failures.push((operation, topic.to_string()));
        self
    }

    /// Snapshot of a topic's state
    pub fn topic(&self, name: &str) -> Option<FakeTopic> {
        self.topics.borrow().get(name).cloned()
    }

    /// Snapshot of the whole cluster
    pub fn state(&self) -> BTreeMap<String, FakeTopic> {
        self.topics.borrow().clone()
    }

    /// All calls so far, in order
    pub fn calls(&self) -> Vec<AdminCall> {
        self.calls.borrow().clone()
    }

    /// Calls of one kind, in order
    pub fn calls_of(&self, operation: Operation) -> Vec<AdminCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.operation() == operation)
            .cloned()
            .collect()
    }

    /// Forget recorded calls, keep topic state
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn check_failure(&self, operation: Operation, topic: &str) -> TransportResult<()> {
        if self
            .failures
            .iter()
            .any(|(op, name)| *op == operation && name == topic)
        {
            return Err(TransportError::Broker {
                topic: topic.to_string(),
                code: "PolicyViolation".to_string(),
                message: format!("injected {:?} failure", operation),
            });
        }
        Ok(())
    }
}

impl ClusterAdmin for FakeCluster {
    fn describe_topic(&self, name: &str) -> TransportResult<ObservedTopic> {
        self.calls
            .borrow_mut()
            .push(AdminCall::Describe(name.to_string()));
        self.check_failure(Operation::Describe, name)?;

        match self.topics.borrow().get(name) {
            Some(topic) => Ok(ObservedTopic {
                name: name.to_string(),
                partition_count: topic.partitions,
            }),
            None => Err(TransportError::UnknownTopic(name.to_string())),
        }
    }

    fn create_topic(
        &self,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        config: &TopicConfig,
    ) -> TransportResult<()> {
        self.calls.borrow_mut().push(AdminCall::Create {
            topic: name.to_string(),
            partitions,
            replication_factor,
            config: config.clone(),
        });
        self.check_failure(Operation::Create, name)?;

        let mut topics = self.topics.borrow_mut();
        if topics.contains_key(name) {
            return Err(TransportError::Broker {
                topic: name.to_string(),
                code: "TopicAlreadyExists".to_string(),
                message: "topic already exists".to_string(),
            });
        }
        topics.insert(
            name.to_string(),
            FakeTopic {
                partitions,
                replication_factor,
                config: config.clone(),
            },
        );
        Ok(())
    }

    fn alter_config(&self, name: &str, config: &TopicConfig) -> TransportResult<()> {
        self.calls.borrow_mut().push(AdminCall::AlterConfig {
            topic: name.to_string(),
            config: config.clone(),
        });
        self.check_failure(Operation::AlterConfig, name)?;

        let mut topics = self.topics.borrow_mut();
        let topic = topics
            .get_mut(name)
            .ok_or_else(|| TransportError::UnknownTopic(name.to_string()))?;
        topic
            .config
            .extend(config.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn add_partitions(&self, name: &str, total_partitions: i32) -> TransportResult<()> {
        self.calls.borrow_mut().push(AdminCall::AddPartitions {
            topic: name.to_string(),
            total: total_partitions,
        });
        self.check_failure(Operation::AddPartitions, name)?;

        let mut topics = self.topics.borrow_mut();
        let topic = topics
            .get_mut(name)
            .ok_or_else(|| TransportError::UnknownTopic(name.to_string()))?;
        // Brokers reject anything but growth (INVALID_PARTITIONS)
        if total_partitions <= topic.partitions {
            return Err(TransportError::Broker {
                topic: name.to_string(),
                code: "InvalidPartitions".to_string(),
                message: format!(
                    "topic already has {} partitions",
                    topic.partitions
                ),
            });
        }
        topic.partitions = total_partitions;
        Ok(())
    }
}
