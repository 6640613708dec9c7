//! Catalog Data Model
//!
//! The single entity of the catalog: an educational institution record.
//!
//! ## Wire Format
//! Field names follow the stored collection (`_id`, `nome`, `tipo`, ...) so the JSON
//! produced by the API is interchangeable with the documents the frontend already consumes.
//!
//! ## Submodules
//! - **`id`**: The 12-byte object identifier assigned by the store.
//! - **`types`**: `Institution`, `NewInstitution` and the `InstitutionType` enumeration.

pub mod id;
pub mod types;
