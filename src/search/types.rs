use crate::model::types::InstitutionType;
use crate::storage::repository::InstitutionFilter;
use serde::{Deserialize, Serialize};

/// Query string of the list/search endpoint: `?tipo=<Type>&q=<text>`.
///
/// Both parameters are optional; an empty value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListParams {
    pub fn kind(&self) -> Option<InstitutionType> {
        self.tipo
            .as_deref()
            .filter(|tipo| !tipo.is_empty())
            .map(InstitutionType::from_label)
    }

    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }

    /// The exact-match part handed to the store.
    pub fn filter(&self) -> InstitutionFilter {
        InstitutionFilter { kind: self.kind() }
    }
}
