//! Storage Module
//!
//! The institution collection and the HTTP surface that reads it.
//!
//! ## Core Concepts
//! - **Repository**: `InstitutionRepository` is the seam between handlers and the backing store.
//! - **Document Store**: `DocumentStore` keeps the collection in memory, in insertion order,
//!   optionally persisted to a JSON file.
//! - **Partitioning**: `partition_by_type` splits a record set into the five category buckets.
//! - **Access**: Read-only HTTP handlers for single-record lookup and health.

pub mod handlers;
pub mod memory;
pub mod partitioner;
pub mod protocol;
pub mod repository;
