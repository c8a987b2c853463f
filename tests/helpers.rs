// Shared helpers for integration tests

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Write manifest content to a temporary file
pub fn manifest_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp manifest");
    file.write_all(content.as_bytes()).expect("write temp manifest");
    file
}

pub const ORDERS_MANIFEST: &str = r#"[
    {
        "topic": "orders",
        "partitions": 3,
        "replication_factor": 2,
        "config": { "retention.ms": "604800000" }
    }
]"#;
