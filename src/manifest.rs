//! Topic manifest loading
//!
//! A manifest is a JSON array of topic records:
//!
//! ```json
//! [
//!   {
//!     "topic": "orders",
//!     "replication_factor": 2,
//!     "partitions": 3,
//!     "config": { "retention.ms": "604800000" }
//!   }
//! ]
//! ```
//!
//! Unknown fields are ignored and a missing or null `config` is an empty map. Every
//! record is validated against the broker's topic rules before the cluster is
//! contacted, and topic names must be unique within the manifest.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use crate::kafka::constants::{MAX_REPLICATION_FACTOR, MAX_TOPIC_NAME_LEN};
use crate::kafka::TopicConfig;

/// Desired state of a single topic
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicSpec {
    /// Topic name
    #[serde(rename = "topic")]
    pub name: String,
    /// Replication factor used when the topic is created
    pub replication_factor: i32,
    /// Target partition count
    pub partitions: i32,
    /// Config overlay pushed to the broker
    #[serde(default, deserialize_with = "null_as_empty")]
    pub config: TopicConfig,
}

impl TopicSpec {
    /// Create a spec with an empty config overlay
    pub fn new(name: impl Into<String>, partitions: i32, replication_factor: i32) -> Self {
        Self {
            name: name.into(),
            replication_factor,
            partitions,
            config: TopicConfig::new(),
        }
    }

    /// Add a config entry (builder style)
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Check the spec against the broker's topic rules
    pub fn validate(&self) -> Result<(), ManifestError> {
        let invalid = |reason: String| ManifestError::Invalid {
            topic: self.name.clone(),
            reason,
        };

        validate_topic_name(&self.name).map_err(invalid)?;

        if self.partitions < 1 {
            return Err(invalid(format!(
                "partitions must be positive, got {}",
                self.partitions
            )));
        }

        if !(1..=MAX_REPLICATION_FACTOR).contains(&self.replication_factor) {
            return Err(invalid(format!(
                "replication_factor must be between 1 and {}, got {}",
                MAX_REPLICATION_FACTOR, self.replication_factor
            )));
        }

        if self.config.keys().any(|key| key.trim().is_empty()) {
            return Err(invalid("config keys must not be empty".to_string()));
        }

        Ok(())
    }
}

/// `"config": null` reads as an empty overlay
fn null_as_empty<'de, D>(deserializer: D) -> Result<TopicConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TopicConfig>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Errors reading or validating a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not a JSON array of topic records
    #[error("Failed to parse manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A topic record breaks the broker's rules
    #[error("Invalid topic '{topic}': {reason}")]
    Invalid { topic: String, reason: String },

    /// The same topic name appears more than once
    #[error("Topic '{0}' is declared more than once")]
    DuplicateTopic(String),
}

/// Legal topic names: 1-249 chars of [a-zA-Z0-9._-], and not "." or ".."
fn validate_topic_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("topic name must not be empty".to_string());
    }
    if name == "." || name == ".." {
        return Err("topic name cannot be '.' or '..'".to_string());
    }
    if name.len() > MAX_TOPIC_NAME_LEN {
        return Err(format!(
            "topic name is {} characters, the limit is {}",
            name.len(),
            MAX_TOPIC_NAME_LEN
        ));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(format!("illegal character '{}' in topic name", bad));
    }
    Ok(())
}

/// Parse and validate manifest content
///
/// `path` is only used in error messages.
pub fn parse_from(content: &str, path: &Path) -> Result<Vec<TopicSpec>, ManifestError> {
    let topics: Vec<TopicSpec> =
        serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut seen = HashSet::new();
    for topic in &topics {
        topic.validate()?;
        if !seen.insert(topic.name.as_str()) {
            return Err(ManifestError::DuplicateTopic(topic.name.clone()));
        }
    }

    Ok(topics)
}

/// Parse and validate manifest content that did not come from a file
pub fn parse(content: &str) -> Result<Vec<TopicSpec>, ManifestError> {
    parse_from(content, Path::new("<inline>"))
}

/// Read, parse and validate a manifest file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<TopicSpec>, ManifestError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let topics = parse_from(&content, path)?;
    debug!(path = %path.display(), topics = topics.len(), "Loaded topic manifest");
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let topics = parse(
            r#"[{"topic":"orders","partitions":3,"replication_factor":2,
                 "config":{"retention.ms":"604800000","cleanup.policy":"delete"}}]"#,
        )
        .unwrap();

        assert_eq!(topics.len(), 1);
        let orders = &topics[0];
        assert_eq!(orders.name, "orders");
        assert_eq!(orders.partitions, 3);
        assert_eq!(orders.replication_factor, 2);
        assert_eq!(orders.config.len(), 2);
        assert_eq!(orders.config["retention.ms"], "604800000");
    }

    #[test]
    fn test_missing_config_is_empty() {
        let topics = parse(r#"[{"topic":"events","partitions":1,"replication_factor":1}]"#).unwrap();
        assert!(topics[0].config.is_empty());
    }

    #[test]
    fn test_null_config_is_empty() {
        let topics = parse(
            r#"[{"topic":"orders","partitions":3,"replication_factor":2,"config":null}]"#,
        )
        .unwrap();
        assert_eq!(topics[0], TopicSpec::new("orders", 3, 2));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let topics = parse(
            r#"[{"topic":"events","partitions":1,"replication_factor":1,"owner":"team-a"}]"#,
        )
        .unwrap();
        assert_eq!(topics[0], TopicSpec::new("events", 1, 1));
    }

    #[test]
    fn test_manifest_order_preserved() {
        let topics = parse(
            r#"[{"topic":"c","partitions":1,"replication_factor":1},
                {"topic":"a","partitions":1,"replication_factor":1},
                {"topic":"b","partitions":1,"replication_factor":1}]"#,
        )
        .unwrap();
        let names: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_manifest() {
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse(r#"{"topic":"orders"}"#).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));

        let err = parse(r#"[{"topic":"orders","partitions":"three","replication_factor":1}]"#)
            .unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse(r#"[{"topic":"orders","partitions":3}]"#).unwrap_err();
        assert!(err.to_string().contains("replication_factor"));
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let err = parse(
            r#"[{"topic":"orders","partitions":3,"replication_factor":1},
                {"topic":"orders","partitions":6,"replication_factor":1}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateTopic(ref name) if name == "orders"));
    }

    #[test]
    fn test_non_positive_counts_rejected() {
        let err = TopicSpec::new("orders", 0, 1).validate().unwrap_err();
        assert!(err.to_string().contains("partitions must be positive"));

        let err = TopicSpec::new("orders", 1, 0).validate().unwrap_err();
        assert!(err.to_string().contains("replication_factor"));

        let err = TopicSpec::new("orders", 1, 40_000).validate().unwrap_err();
        assert!(err.to_string().contains("32767"));
    }

    #[test]
    fn test_topic_name_rules() {
        assert!(TopicSpec::new("orders.v2_eu-west", 1, 1).validate().is_ok());

        for bad in ["", ".", "..", "orders topic", "orders/v2", "ördérs"] {
            let result = TopicSpec::new(bad, 1, 1).validate();
            assert!(result.is_err(), "'{}' should be rejected", bad);
        }

        let long_name = "a".repeat(MAX_TOPIC_NAME_LEN + 1);
        assert!(TopicSpec::new(long_name, 1, 1).validate().is_err());
        let max_name = "a".repeat(MAX_TOPIC_NAME_LEN);
        assert!(TopicSpec::new(max_name, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_empty_config_key_rejected() {
        let err = TopicSpec::new("orders", 1, 1)
            .with_config("", "1")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("config keys"));
    }

    #[test]
    fn test_error_names_topic() {
        let err = parse(r#"[{"topic":"bad name","partitions":1,"replication_factor":1}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid topic 'bad name'"));
    }
}
