//! Testing utilities for kafka-topic-sync
//!
//! This module provides test infrastructure for the reconciliation engine.
//! It's only compiled when running tests.
//!
//! # Organization
//! - `fakes.rs` - In-memory cluster implementing `ClusterAdmin`, with a call log
//!   and failure injection
//!
//! Call-level expectations use `MockClusterAdmin`, generated by mockall from
//! the `ClusterAdmin` trait in `kafka::admin`.

#![cfg(test)]

pub mod fakes;

// Re-export commonly used items
pub use fakes::{AdminCall, FakeCluster, Operation};
