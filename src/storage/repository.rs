use crate::model::id::InstitutionId;
use crate::model::types::{Institution, InstitutionType, NewInstitution};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed collection file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {index} rejected: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("duplicate id {0}")]
    DuplicateId(InstitutionId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Exact-match pre-filter applied by the store before any text search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionFilter {
    pub kind: Option<InstitutionType>,
}

impl InstitutionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_kind(kind: InstitutionType) -> Self {
        Self { kind: Some(kind) }
    }

    pub fn accepts(&self, institution: &Institution) -> bool {
        self.kind
            .as_ref()
            .is_none_or(|kind| &institution.kind == kind)
    }
}

/// Read access plus replace-all loading of the institution collection.
///
/// Results are always in insertion order.
pub trait InstitutionRepository: Send + Sync + 'static {
    fn find(
        &self,
        filter: &InstitutionFilter,
    ) -> impl Future<Output = Result<Vec<Institution>, StoreError>> + Send;

    fn find_by_id(
        &self,
        id: &InstitutionId,
    ) -> impl Future<Output = Result<Option<Institution>, StoreError>> + Send;

    /// Deletes every record, then inserts `batch` with freshly assigned ids.
    ///
    /// Either the whole batch is stored or nothing changes.
    fn replace_all(
        &self,
        batch: Vec<NewInstitution>,
    ) -> impl Future<Output = Result<Vec<Institution>, StoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize, StoreError>> + Send;
}
