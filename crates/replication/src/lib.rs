//! Replication strategies for consistent hashing.
//!
//! This crate provides pluggable replication strategies that determine how
//! many replicas to create and where to place them on a ring.

pub mod strategy;

pub use strategy::{ReplicationStrategy, SimpleStrategy};
