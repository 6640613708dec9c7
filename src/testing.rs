//! Shared fixtures for the unit tests.

use crate::model::id::InstitutionId;
use crate::model::types::{Institution, InstitutionType, NewInstitution};
use crate::storage::memory::DocumentStore;
use crate::storage::repository::{InstitutionFilter, InstitutionRepository, StoreError};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

pub fn institution(name: &str, kind: InstitutionType, locality: &str) -> Institution {
    NewInstitution::new(name, kind)
        .with_locality(locality)
        .into_institution(InstitutionId::new())
}

/// A small catalog covering every type, in a fixed order.
pub fn sample_batch() -> Vec<NewInstitution> {
    vec![
        NewInstitution::new("Universidade do Porto", InstitutionType::University)
            .with_locality("Porto")
            .with_description("Universidade pública com catorze faculdades.")
            .with_career_paths(["Engenharia", "Medicina"]),
        NewInstitution::new("Universidade de Lisboa", InstitutionType::University)
            .with_locality("Lisboa")
            .with_career_paths(["Direito"]),
        NewInstitution::new("Instituto Politécnico do Porto", InstitutionType::Polytechnic)
            .with_locality("Porto")
            .with_career_paths(["Engenharia Informática"]),
        NewInstitution::new("Faculdade de Engenharia", InstitutionType::Faculty)
            .with_locality("Porto"),
        NewInstitution::new("Faculdade de Medicina", InstitutionType::Faculty)
            .with_locality("Lisboa"),
        NewInstitution::new("Escola Profissional de Braga", InstitutionType::Vocational)
            .with_locality("Braga")
            .with_career_paths(["Técnico de Informática"]),
        NewInstitution::new("Licenciatura em Enfermagem", InstitutionType::HigherEducationCourse)
            .with_locality("Coimbra"),
    ]
}

pub async fn seeded_store() -> (Arc<DocumentStore>, Vec<Institution>) {
    let store = Arc::new(DocumentStore::in_memory());
    let inserted = store
        .replace_all(sample_batch())
        .await
        .expect("sample batch is valid");
    (store, inserted)
}

/// Sends a GET through the router and decodes the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["nome"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// A repository whose every operation fails, for exercising the 500 paths.
pub struct FailingStore;

impl InstitutionRepository for FailingStore {
    async fn find(&self, _filter: &InstitutionFilter) -> Result<Vec<Institution>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: &InstitutionId) -> Result<Option<Institution>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn replace_all(&self, _batch: Vec<NewInstitution>) -> Result<Vec<Institution>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
