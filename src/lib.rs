//! Escolha Certa
//!
//! Catalog and search service for Portuguese educational institutions (universities,
//! polytechnics, faculties, vocational schools and higher-education courses).
//!
//! ## Architecture Modules
//! - **`model`**: The institution record, its identifier and the type enumeration.
//! - **`search`**: Diacritic- and case-insensitive multi-term filtering, and the list endpoint.
//! - **`storage`**: The document store behind a repository trait, the category partitioner,
//!   and the single-record endpoint.
//! - **`seed`**: Replace-all loading of the catalog batch.
//! - **`client`**: Typed API client and the debounced live search controller.
//! - **`server`** / **`config`** / **`error`**: Process wiring, environment configuration and
//!   the HTTP error mapping.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod seed;
pub mod server;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
