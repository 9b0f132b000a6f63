use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use filedeck_model::FileRecord;
use serde::{Deserialize, Serialize};

use crate::matcher::match_records;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub generation: u64,
    #[serde(rename = "q")]
    pub query: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("search backend unavailable: {0}")]
    Unavailable(String),
    #[error("search backend rejected query: {0}")]
    Rejected(String),
}

/// Source of candidate records for a query. Filters are applied by the caller.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<FileRecord>, BackendError>;
}

/// Backend over a fixed record list, answering with the plain name match.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<Vec<FileRecord>>,
}

impl MemoryBackend {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn replace_records(&self, records: Vec<FileRecord>) {
        *self.write_records() = records;
    }

    pub fn len(&self) -> usize {
        self.read_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A writer that panicked mid-swap still left a whole Vec behind, so the data stays usable.
    fn read_records(&self) -> RwLockReadGuard<'_, Vec<FileRecord>> {
        self.records.read().unwrap_or_else(|poisoned| {
            tracing::warn!("record store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, Vec<FileRecord>> {
        self.records.write().unwrap_or_else(|poisoned| {
            tracing::warn!("record store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<FileRecord>, BackendError> {
        let hits = match_records(&self.read_records(), &request.query);
        tracing::debug!(
            generation = request.generation,
            query = %request.query,
            hits = hits.len(),
            "memory backend answered"
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[tokio::test]
    async fn memory_backend_filters_by_name() {
        let backend = MemoryBackend::new(vec![
            record("1", "design-spec.md", "md", &["docs"]),
            record("2", "invoice.pdf", "pdf", &["finance"]),
        ]);

        let request = SearchRequest {
            generation: 1,
            query: "INVOICE".to_string(),
        };
        let hits = backend.search(&request).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[tokio::test]
    async fn replace_records_changes_later_answers() {
        let backend = MemoryBackend::default();
        assert!(backend.is_empty());

        backend.replace_records(vec![record("9", "fresh.txt", "txt", &[])]);
        let request = SearchRequest {
            generation: 2,
            query: String::new(),
        };
        assert_eq!(backend.search(&request).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn poisoned_store_keeps_serving() {
        let backend = std::sync::Arc::new(MemoryBackend::new(vec![record(
            "1", "old.md", "md", &[],
        )]));

        let poisoner = std::sync::Arc::clone(&backend);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.records.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(backend.records.is_poisoned());

        assert_eq!(backend.len(), 1);
        backend.replace_records(vec![
            record("2", "new.md", "md", &[]),
            record("3", "newer.md", "md", &[]),
        ]);
        assert_eq!(backend.len(), 2);

        let request = SearchRequest {
            generation: 4,
            query: "newer".to_string(),
        };
        let hits = backend.search(&request).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }

    #[test]
    fn request_serializes_query_as_q() {
        let request = SearchRequest {
            generation: 3,
            query: "spec".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["q"], "spec");
    }
}
