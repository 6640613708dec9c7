//! Catalog Client Module
//!
//! The consumer side of the API: what the frontend does with the two endpoints.
//!
//! ## Submodules
//! - **`api`**: `ApiClient`, a typed HTTP client for listing, searching and fetching records.
//! - **`live`**: `LiveSearch`, the debounced search-as-you-type controller.

pub mod api;
pub mod live;
