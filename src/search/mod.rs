//! Search Module
//!
//! Free-text filtering of the institution catalog.
//!
//! ## Overview
//! Matching is a boolean filter, not a ranked search: a record is kept when every query
//! token occurs in its searchable text, compared after case and diacritic folding.
//! The store narrows candidates by type first and this module does all text matching, so
//! there is exactly one search behavior behind the API.
//!
//! ## Submodules
//! - **`tokenizer`**: Text folding (`normalize`) and query tokenization.
//! - **`engine`**: Searchable text construction and the AND/substring match rule.
//! - **`handlers`**: The `GET /escolas` handler.
//! - **`types`**: Query parameters of the list endpoint.

pub mod engine;
pub mod handlers;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
