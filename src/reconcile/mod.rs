// Topic reconciliation engine
//
// Brings the cluster in line with the manifest, one topic at a time, in
// manifest order:
//
//   describe ──UnknownTopic──> create (partitions, replication, config)
//      │
//      └──exists──> alter config (always) ──> add partitions (only to grow)
//
// Each topic costs one describe plus zero or more writes. Nothing is retried
// and the first failed call aborts the run; changes already applied stay
// applied. Every write is safe to repeat, so the operator fixes the cause and
// re-runs.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::kafka::{ClusterAdmin, TransportError};
use crate::manifest::TopicSpec;


/// One observable outcome of a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    /// Topic did not exist and was created
    Created {
        topic: String,
        partitions: i32,
        replication_factor: i32,
    },
    /// Topic existed and its config overlay was pushed
    ConfigUpdated { topic: String, keys: usize },
    /// Topic existed with fewer partitions and was grown
    PartitionsIncreased { topic: String, from: i32, to: i32 },
    /// Manifest asks for fewer partitions than the topic has; left unchanged
    PartitionShrinkIgnored {
        topic: String,
        current: i32,
        requested: i32,
    },
}

impl ReportEntry {
    /// Topic this entry refers to
    pub fn topic(&self) -> &str {
        match self {
            ReportEntry::Created { topic, .. }
            | ReportEntry::ConfigUpdated { topic, .. }
            | ReportEntry::PartitionsIncreased { topic, .. }
            | ReportEntry::PartitionShrinkIgnored { topic, .. } => topic,
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEntry::Created { topic, .. } => write!(f, "Topic[{}] created.", topic),
            ReportEntry::ConfigUpdated { topic, keys } => {
                write!(f, "Topic[{}] existed. Config updated ({} keys).", topic, keys)
            }
            ReportEntry::PartitionsIncreased { topic, from, to } => write!(
                f,
                "Increased partitions of topic[{}] from {} to {}.",
                topic, from, to
            ),
            ReportEntry::PartitionShrinkIgnored {
                topic,
                current,
                requested,
            } => write!(
                f,
                "Topic[{}] has {} partitions but {} were requested. Partition counts only grow; left unchanged.",
                topic, current, requested
            ),
        }
    }
}

/// Ordered record of what a reconciliation pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    entries: Vec<ReportEntry>,
}

impl ReconciliationReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Names of topics created during this pass
    pub fn created(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| matches!(e, ReportEntry::Created { .. }))
            .map(ReportEntry::topic)
            .collect()
    }

    /// Human-readable status lines, one per entry
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fatal errors during reconciliation
///
/// Each variant names the topic being processed and the admin call that failed.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Error describing topic {topic}: {source}")]
    DescribeFailed {
        topic: String,
        #[source]
        source: TransportError,
    },

    #[error("Error creating topic {topic}: {source}")]
    CreateFailed {
        topic: String,
        #[source]
        source: TransportError,
    },

    #[error("Error updating config of topic {topic}: {source}")]
    AlterConfigFailed {
        topic: String,
        #[source]
        source: TransportError,
    },

    #[error("Error increasing partitions of topic {topic}: {source}")]
    AddPartitionsFailed {
        topic: String,
        #[source]
        source: TransportError,
    },
}

impl EngineError {
    /// Topic that was being processed when the run aborted
    pub fn topic(&self) -> &str {
        match self {
            EngineError::DescribeFailed { topic, .. }
            | EngineError::CreateFailed { topic, .. }
            | EngineError::AlterConfigFailed { topic, .. }
            | EngineError::AddPartitionsFailed { topic, .. } => topic,
        }
    }

    /// Admin operation that failed
    pub fn operation(&self) -> &'static str {
        match self {
            EngineError::DescribeFailed { .. } => "describe",
            EngineError::CreateFailed { .. } => "create",
            EngineError::AlterConfigFailed { .. } => "alter-config",
            EngineError::AddPartitionsFailed { .. } => "add-partitions",
        }
    }

    /// Underlying admin error
    pub fn transport_error(&self) -> &TransportError {
        match self {
            EngineError::DescribeFailed { source, .. }
            | EngineError::CreateFailed { source, .. }
            | EngineError::AlterConfigFailed { source, .. }
            | EngineError::AddPartitionsFailed { source, .. } => source,
        }
    }
}

/// Reconcile the cluster against `desired`
///
/// See [`reconcile_with_progress`].
pub fn reconcile<A>(desired: &[TopicSpec], admin: &A) -> Result<ReconciliationReport, EngineError>
where
    A: ClusterAdmin + ?Sized,
{
    reconcile_with_progress(desired, admin, |_| {})
}

/// Reconcile the cluster against `desired`, reporting entries as they happen
///
/// `on_entry` is called once per report entry, immediately after the call that
/// produced it succeeded, so callers can show progress even if a later topic
/// aborts the run.
///
/// # Errors
///
/// Returns the first failed admin call. Topics after the failing one are not
/// touched.
pub fn reconcile_with_progress<A, F>(
    desired: &[TopicSpec],
    admin: &A,
    mut on_entry: F,
) -> Result<ReconciliationReport, EngineError>
where
    A: ClusterAdmin + ?Sized,
    F: FnMut(&ReportEntry),
{
    let mut report = ReconciliationReport::new();
    let mut record = |entry: ReportEntry| {
        on_entry(&entry);
        report.push(entry);
    };

    for spec in desired {
        reconcile_topic(spec, admin, &mut record)?;
    }

    info!(
        topics = desired.len(),
        created = report.created().len(),
        "Reconciliation finished"
    );
    Ok(report)
}

fn reconcile_topic<A, R>(spec: &TopicSpec, admin: &A, record: &mut R) -> Result<(), EngineError>
where
    A: ClusterAdmin + ?Sized,
    R: FnMut(ReportEntry),
{
    let topic = spec.name.as_str();

    let observed = match admin.describe_topic(topic) {
        Ok(observed) => observed,
        Err(err) if err.is_unknown_topic() => {
            return create_topic(spec, admin, record);
        }
        Err(source) => {
            return Err(EngineError::DescribeFailed {
                topic: topic.to_string(),
                source,
            })
        }
    };

    debug!(
        topic = %observed.name,
        partitions = observed.partition_count,
        "Topic exists, updating"
    );

    // No diff against the broker's config: the overlay is pushed every run.
    admin
        .alter_config(topic, &spec.config)
        .map_err(|source| EngineError::AlterConfigFailed {
            topic: topic.to_string(),
            source,
        })?;
    info!(topic, keys = spec.config.len(), "Topic config updated");
    record(ReportEntry::ConfigUpdated {
        topic: topic.to_string(),
        keys: spec.config.len(),
    });

    let current = observed.partition_count;
    if spec.partitions > current {
        admin
            .add_partitions(topic, spec.partitions)
            .map_err(|source| EngineError::AddPartitionsFailed {
                topic: topic.to_string(),
                source,
            })?;
        info!(topic, from = current, to = spec.partitions, "Partitions increased");
        record(ReportEntry::PartitionsIncreased {
            topic: topic.to_string(),
            from: current,
            to: spec.partitions,
        });
    } else if spec.partitions < current {
        warn!(
            topic,
            current,
            requested = spec.partitions,
            "Partition count cannot shrink, leaving topic unchanged"
        );
        record(ReportEntry::PartitionShrinkIgnored {
            topic: topic.to_string(),
            current,
            requested: spec.partitions,
        });
    }

    Ok(())
}

fn create_topic<A, R>(spec: &TopicSpec, admin: &A, record: &mut R) -> Result<(), EngineError>
where
    A: ClusterAdmin + ?Sized,
    R: FnMut(ReportEntry),
{
    let topic = spec.name.as_str();

    admin
        .create_topic(topic, spec.partitions, spec.replication_factor, &spec.config)
        .map_err(|source| EngineError::CreateFailed {
            topic: topic.to_string(),
            source,
        })?;

    info!(
        topic,
        partitions = spec.partitions,
        replication_factor = spec.replication_factor,
        "Topic created"
    );
    record(ReportEntry::Created {
        topic: topic.to_string(),
        partitions: spec.partitions,
        replication_factor: spec.replication_factor,
    });
    Ok(())
}
