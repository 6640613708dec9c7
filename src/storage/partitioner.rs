use crate::model::types::{Institution, InstitutionType};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One category of the catalog and the institutions that belong to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub kind: InstitutionType,
    pub items: Vec<Institution>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first `limit` items and how many remain hidden behind "see more".
    pub fn preview(&self, limit: usize) -> (&[Institution], usize) {
        let shown = self.items.len().min(limit);
        (&self.items[..shown], self.items.len() - shown)
    }
}

/// The catalog split into one bucket per known type, in `InstitutionType::KNOWN` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Categories {
    buckets: Vec<Bucket>,
}

impl Categories {
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn get(&self, kind: &InstitutionType) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| &bucket.kind == kind)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(bucket.kind.label(), &bucket.items)?;
        }
        map.end()
    }
}

/// Splits institutions into the five type buckets, keeping relative order inside each.
///
/// Institutions with an unrecognized type land in no bucket.
pub fn partition_by_type<I>(institutions: I) -> Categories
where
    I: IntoIterator<Item = Institution>,
{
    let mut buckets: Vec<Bucket> = InstitutionType::KNOWN
        .into_iter()
        .map(|kind| Bucket {
            kind,
            items: Vec::new(),
        })
        .collect();

    let mut skipped = 0usize;
    for institution in institutions {
        match buckets.iter_mut().find(|bucket| bucket.kind == institution.kind) {
            Some(bucket) => bucket.items.push(institution),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Partition skipped {} institutions with unknown type", skipped);
    }

    Categories { buckets }
}
