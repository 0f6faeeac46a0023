//! Document-store abstraction for course documents.
//!
//! This module defines the storage contract the catalog layer is written
//! against. The store holds whole JSON documents addressed by key and
//! supports:
//! - Point lookup and whole-document replacement
//! - Prefix scans with per-document metadata
//! - Conditional writes with preconditions
//!
//! Writes without a precondition are last-write-wins per document. The
//! version token is an opaque `String` so backends with native versioning
//! (ETags, generations) can plug in without leaking their scheme into the
//! catalog layer.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};

/// Precondition for conditional writes.
#[derive(Debug, Clone)]
pub enum WritePrecondition {
    /// Write only if the document does not exist.
    DoesNotExist,
    /// Write only if the document's version matches the given token.
    MatchesVersion(String),
    /// Write unconditionally (last-write-wins).
    None,
}

/// Result of a conditional write.
#[derive(Debug, Clone)]
pub enum WriteResult {
    /// Write succeeded, returns the new version token.
    Success {
        /// The new version token after the write.
        version: String,
    },
    /// Precondition failed, returns the current version token.
    PreconditionFailed {
        /// The current version that caused the precondition to fail.
        current_version: String,
    },
}

/// Metadata about a stored document.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    /// Document key.
    pub key: String,
    /// Document size in bytes.
    pub size: u64,
    /// Version token for conditional writes.
    pub version: String,
    /// Last modification timestamp.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Storage contract for course documents.
///
/// All backends implement this trait. Per-document operations are atomic;
/// there is no multi-document transaction.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Reads an entire document.
    ///
    /// Returns `Error::NotFound` if the document doesn't exist.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Writes a document with an optional precondition.
    ///
    /// Returns `WriteResult::PreconditionFailed` if the precondition is not
    /// met. Never returns an error for a precondition failure; that is a
    /// normal result.
    async fn put(&self, key: &str, data: Bytes, precondition: WritePrecondition)
        -> Result<WriteResult>;

    /// Deletes a document.
    ///
    /// Succeeds even if the document doesn't exist (idempotent).
    async fn delete(&self, key: &str) -> Result<()>;

    /// Lists documents with the given key prefix.
    ///
    /// Returns an empty vec if no documents match.
    ///
    /// **Ordering**: results are returned in arbitrary order that may vary
    /// between backends and invocations. Callers requiring deterministic
    /// order should sort the results (e.g., by `key`).
    async fn list(&self, prefix: &str) -> Result<Vec<DocumentMeta>>;

    /// Gets document metadata without reading content.
    ///
    /// Returns `None` if the document doesn't exist.
    async fn head(&self, key: &str) -> Result<Option<DocumentMeta>>;
}

/// In-memory document store.
///
/// Thread-safe via `RwLock`. Backs tests and debug deployments; not
/// suitable for durable production use. Uses numeric versions internally
/// (exposed as strings) to mimic generation-based backends.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, StoredDocument>>>,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    data: Bytes,
    version: i64,
    last_modified: DateTime<Utc>,
}

impl MemoryStore {
    /// Creates a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn meta(key: &str, doc: &StoredDocument) -> DocumentMeta {
        DocumentMeta {
            key: key.to_string(),
            size: doc.data.len() as u64,
            version: doc.version.to_string(),
            last_modified: Some(doc.last_modified),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Bytes> {
        let documents = self.documents.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        documents
            .get(key)
            .map(|d| d.data.clone())
            .ok_or_else(|| Error::NotFound(format!("document not found: {key}")))
    }

    async fn put(
        &self,
        key: &str,
        data: Bytes,
        precondition: WritePrecondition,
    ) -> Result<WriteResult> {
        let mut documents = self.documents.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        let current = documents.get(key);
        match (&precondition, current) {
            (WritePrecondition::DoesNotExist, Some(doc)) => {
                return Ok(WriteResult::PreconditionFailed {
                    current_version: doc.version.to_string(),
                });
            }
            (WritePrecondition::MatchesVersion(expected), Some(doc)) => {
                if doc.version.to_string() != *expected {
                    return Ok(WriteResult::PreconditionFailed {
                        current_version: doc.version.to_string(),
                    });
                }
            }
            (WritePrecondition::MatchesVersion(_), None) => {
                return Ok(WriteResult::PreconditionFailed {
                    current_version: String::new(),
                });
            }
            _ => {}
        }

        let version = current.map_or(1, |doc| doc.version + 1);
        documents.insert(
            key.to_string(),
            StoredDocument {
                data,
                version,
                last_modified: Utc::now(),
            },
        );

        Ok(WriteResult::Success {
            version: version.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut documents = self.documents.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;
        documents.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<DocumentMeta>> {
        let documents = self.documents.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        Ok(documents
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, doc)| Self::meta(key, doc))
            .collect())
    }

    async fn head(&self, key: &str) -> Result<Option<DocumentMeta>> {
        let documents = self.documents.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        Ok(documents.get(key).map(|doc| Self::meta(key, doc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("courses/missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let store = MemoryStore::new();
        let data = Bytes::from_static(b"{\"name\":\"Algebra\"}");

        let result = store
            .put("courses/a", data.clone(), WritePrecondition::None)
            .await
            .unwrap();
        assert!(matches!(result, WriteResult::Success { .. }));

        let read = store.get("courses/a").await.unwrap();
        assert_eq!(read, data);
    }

    #[tokio::test]
    async fn does_not_exist_precondition_rejects_existing() {
        let store = MemoryStore::new();
        store
            .put("courses/a", Bytes::from_static(b"1"), WritePrecondition::None)
            .await
            .unwrap();

        let result = store
            .put(
                "courses/a",
                Bytes::from_static(b"2"),
                WritePrecondition::DoesNotExist,
            )
            .await
            .unwrap();
        assert!(matches!(result, WriteResult::PreconditionFailed { .. }));
    }

    #[tokio::test]
    async fn matches_version_swaps_only_on_current_version() {
        let store = MemoryStore::new();
        let WriteResult::Success { version } = store
            .put("courses/a", Bytes::from_static(b"1"), WritePrecondition::None)
            .await
            .unwrap()
        else {
            panic!("first write should succeed");
        };

        let result = store
            .put(
                "courses/a",
                Bytes::from_static(b"2"),
                WritePrecondition::MatchesVersion(version.clone()),
            )
            .await
            .unwrap();
        assert!(matches!(result, WriteResult::Success { .. }));

        // Stale token: the first version is no longer current.
        let result = store
            .put(
                "courses/a",
                Bytes::from_static(b"3"),
                WritePrecondition::MatchesVersion(version),
            )
            .await
            .unwrap();
        assert!(matches!(result, WriteResult::PreconditionFailed { .. }));
    }

    #[tokio::test]
    async fn unconditional_put_is_last_write_wins() {
        let store = MemoryStore::new();
        store
            .put("courses/a", Bytes::from_static(b"1"), WritePrecondition::None)
            .await
            .unwrap();
        store
            .put("courses/a", Bytes::from_static(b"2"), WritePrecondition::None)
            .await
            .unwrap();

        assert_eq!(store.get("courses/a").await.unwrap(), Bytes::from_static(b"2"));
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let store = MemoryStore::new();
        store
            .put("courses/a", Bytes::from_static(b"1"), WritePrecondition::None)
            .await
            .unwrap();
        store
            .put("courses/b", Bytes::from_static(b"2"), WritePrecondition::None)
            .await
            .unwrap();
        store
            .put("other/c", Bytes::from_static(b"3"), WritePrecondition::None)
            .await
            .unwrap();

        let metas = store.list("courses/").await.unwrap();
        assert_eq!(metas.len(), 2);
        assert!(metas.iter().all(|m| m.key.starts_with("courses/")));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        store.delete("courses/never-existed").await.unwrap();

        store
            .put("courses/a", Bytes::from_static(b"1"), WritePrecondition::None)
            .await
            .unwrap();
        store.delete("courses/a").await.unwrap();
        assert!(store.head("courses/a").await.unwrap().is_none());
    }
}
