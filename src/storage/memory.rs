use super::repository::{InstitutionFilter, InstitutionRepository, StoreError};
use crate::model::id::InstitutionId;
use crate::model::types::{Institution, NewInstitution};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Records in insertion order plus their id index, always swapped together.
#[derive(Debug, Default)]
struct Collection {
    records: Vec<Institution>,
    positions: HashMap<InstitutionId, usize>,
}

impl Collection {
    fn indexed(records: Vec<Institution>) -> Result<Self, StoreError> {
        let mut positions = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if positions.insert(record.id, index).is_some() {
                return Err(StoreError::DuplicateId(record.id));
            }
        }
        Ok(Self { records, positions })
    }
}

/// In-process document store for the institution collection.
///
/// One async `RwLock` guards both the ordered records and the id index, so readers see
/// either the previous or the replacement batch. When opened on a file, every
/// `replace_all` rewrites that file (temp file + rename).
pub struct DocumentStore {
    collection: RwLock<Collection>,
    path: Option<PathBuf>,
}

impl DocumentStore {
    /// A store without persistence.
    pub fn in_memory() -> Self {
        Self {
            collection: RwLock::new(Collection::default()),
            path: None,
        }
    }

    /// Opens the collection stored at `path`. A missing file opens an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let records: Vec<Institution> = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| StoreError::Format {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Collection file {} not found, starting empty", path.display());
                Vec::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        if let Some(index) = records.iter().position(|record| !record.kind.is_known()) {
            return Err(StoreError::Invalid {
                index,
                reason: format!("unknown type {:?}", records[index].kind.label()),
            });
        }

        let collection = Collection::indexed(records)?;
        tracing::info!("Loaded {} records from {}", collection.records.len(), path.display());

        Ok(Self {
            collection: RwLock::new(collection),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, records: &[Institution]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_error = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Format {
            path: path.clone(),
            source,
        })?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(io_error)?;
        tokio::fs::rename(&tmp_path, path).await.map_err(io_error)?;

        tracing::debug!("Persisted {} records to {}", records.len(), path.display());
        Ok(())
    }
}

impl InstitutionRepository for DocumentStore {
    async fn find(&self, filter: &InstitutionFilter) -> Result<Vec<Institution>, StoreError> {
        let collection = self.collection.read().await;
        Ok(collection
            .records
            .iter()
            .filter(|record| filter.accepts(record))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &InstitutionId) -> Result<Option<Institution>, StoreError> {
        let collection = self.collection.read().await;
        let found = collection
            .positions
            .get(id)
            .and_then(|position| collection.records.get(*position).cloned());
        Ok(found)
    }

    async fn replace_all(&self, batch: Vec<NewInstitution>) -> Result<Vec<Institution>, StoreError> {
        let inserted = batch
            .into_iter()
            .enumerate()
            .map(|(index, new)| prepare(index, new).map(|new| new.into_institution(InstitutionId::new())))
            .collect::<Result<Vec<_>, _>>()?;
        let replacement = Collection::indexed(inserted.clone())?;

        let mut collection = self.collection.write().await;
        self.persist(&inserted).await?;
        *collection = replacement;

        tracing::info!("Replaced collection with {} records", inserted.len());
        Ok(inserted)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.collection.read().await.records.len())
    }
}

/// Validates a new record and trims the fields the collection stores trimmed.
fn prepare(index: usize, mut new: NewInstitution) -> Result<NewInstitution, StoreError> {
    new.name = new.name.trim().to_string();
    if new.name.is_empty() {
        return Err(StoreError::Invalid {
            index,
            reason: "name is required".to_string(),
        });
    }
    if !new.kind.is_known() {
        return Err(StoreError::Invalid {
            index,
            reason: format!("unknown type {:?}", new.kind.label()),
        });
    }

    new.description = trimmed(new.description);
    new.address = trimmed(new.address);
    new.website = trimmed(new.website);
    new.price = trimmed(new.price);
    new.career_paths = new
        .career_paths
        .into_iter()
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .collect();

    Ok(new)
}

fn trimmed(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
