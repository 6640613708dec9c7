//! HTTP API Protocol
//!
//! Endpoint paths, response bodies and the user-facing error messages of the catalog API.
//! The messages are part of the contract: the frontend shows them verbatim.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Lists institutions, optionally filtered by `tipo` and searched with `q`.
pub const ENDPOINT_INSTITUTIONS: &str = "/escolas";
/// Fetches a single institution by id.
pub const ENDPOINT_INSTITUTION: &str = "/escolas/:id";
/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Error Messages ---

pub const MSG_INVALID_ID: &str = "Formato de ID inválido.";
pub const MSG_NOT_FOUND: &str = "Escola não encontrada.";
pub const MSG_LIST_FAILED: &str = "Erro interno ao buscar escolas.";
pub const MSG_DETAIL_FAILED: &str = "Erro interno ao buscar detalhes da escola.";

// --- Data Transfer Objects ---

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub records: usize,
}
