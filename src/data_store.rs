//! # Storage Abstraction
//!
//! This module provides the persistence gateway for livestock records. The
//! [`LivestockStore`] trait exposes the operations the API layer consumes
//! (`find`, `find_one`, `create`, `save`, `remove`); merge is a pure
//! function on the data model and never touches the store.
//!
//! ## Ownership
//!
//! The store is the sole owner of record identity and durable state:
//! identities are assigned on create and never reused after deletion.
//! Everything above the store (the HTTP API, the client cache) holds
//! transient copies only.
//!
//! ## Implementations
//!
//! - [`PgLivestockStore`]: PostgreSQL over a sqlx pool; every write runs as
//!   a single-row transaction, making the database the serialization point
//!   for concurrent writers (last write wins).
//! - [`InMemoryLivestockStore`]: thread-safe in-memory storage used by the
//!   test suites and local experimentation.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::async_trait;
use sqlx::PgPool;

use crate::errors::StoreError;
use crate::livestock::{LivestockFields, LivestockRecord};
use crate::sql;

/// Trait defining the persistence gateway for livestock records.
///
/// Implementors must be thread-safe; handlers call these methods
/// concurrently from independent requests.
#[async_trait]
pub trait LivestockStore: Send + Sync {
    /// Returns the full collection. Order is not part of the contract.
    async fn find(&self) -> Result<Vec<LivestockRecord>, StoreError>;

    /// Returns the record with `id`, or `None` if the id is unknown.
    async fn find_one(&self, id: i64) -> Result<Option<LivestockRecord>, StoreError>;

    /// Persists a new record built from validated fields.
    ///
    /// The store assigns the identity; callers never choose ids.
    async fn create(&self, fields: LivestockFields) -> Result<LivestockRecord, StoreError>;

    /// Writes `record` over the stored row with the same id.
    ///
    /// # Returns
    /// * `Ok(true)` - Record existed and was updated
    /// * `Ok(false)` - No record with that id
    async fn save(&self, record: &LivestockRecord) -> Result<bool, StoreError>;

    /// Hard-deletes the record with `id`; no tombstone is left behind.
    ///
    /// # Returns
    /// * `Ok(true)` - Record existed and was deleted
    /// * `Ok(false)` - No record with that id
    async fn remove(&self, id: i64) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed store.
///
/// Each operation begins a transaction, performs its single-row statement
/// through the sql layer, and commits. Validation happens strictly before
/// `create`/`save` are called, so a failed request never leaves a
/// half-written row.
pub struct PgLivestockStore {
    pool: PgPool,
}

impl PgLivestockStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LivestockStore for PgLivestockStore {
    async fn find(&self) -> Result<Vec<LivestockRecord>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let records = sql::livestock::list(&mut tx).await?;
        tx.commit().await?;
        Ok(records)
    }

    async fn find_one(&self, id: i64) -> Result<Option<LivestockRecord>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let record = sql::livestock::get(&mut tx, id).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn create(&self, fields: LivestockFields) -> Result<LivestockRecord, StoreError> {
        let mut tx = self.pool.begin().await?;
        let record = sql::livestock::create(&mut tx, &fields).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn save(&self, record: &LivestockRecord) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let updated = sql::livestock::update(&mut tx, record).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sql::livestock::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }
}

struct Inner {
    records: HashMap<i64, LivestockRecord>,
    next_id: i64,
}

/// Thread-safe in-memory implementation of [`LivestockStore`].
///
/// Identities come from a monotonic counter, so an id is never reused even
/// after the record holding it is deleted. Suitable for tests and
/// applications that don't require persistence.
pub struct InMemoryLivestockStore {
    inner: Mutex<Inner>,
}

impl InMemoryLivestockStore {
    /// Creates an empty store; the first record gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryLivestockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LivestockStore for InMemoryLivestockStore {
    async fn find(&self) -> Result<Vec<LivestockRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<LivestockRecord> = inner.records.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn find_one(&self, id: i64) -> Result<Option<LivestockRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.get(&id).cloned())
    }

    async fn create(&self, fields: LivestockFields) -> Result<LivestockRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        let record = LivestockRecord {
            id,
            kind: fields.kind,
            breed: fields.breed,
            age: fields.age,
            health_status: fields.health_status,
        };
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    async fn save(&self, record: &LivestockRecord) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let std::collections::hash_map::Entry::Occupied(mut e) =
            inner.records.entry(record.id)
        {
            e.insert(record.clone());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.records.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(kind: &str, age: f64) -> LivestockFields {
        LivestockFields {
            kind: kind.to_string(),
            breed: "test-breed".to_string(),
            age,
            health_status: "good".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = InMemoryLivestockStore::new();
        let first = store.create(fields("cow", 3.0)).await.unwrap();
        let second = store.create(fields("sheep", 2.0)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_deletion() {
        let store = InMemoryLivestockStore::new();
        let first = store.create(fields("cow", 3.0)).await.unwrap();
        assert!(store.remove(first.id).await.unwrap());

        let second = store.create(fields("goat", 1.0)).await.unwrap();
        assert_ne!(second.id, first.id);
    }

    #[tokio::test]
    async fn find_one_returns_none_for_unknown_id() {
        let store = InMemoryLivestockStore::new();
        assert_eq!(store.find_one(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_overwrites_existing_record() {
        let store = InMemoryLivestockStore::new();
        let mut record = store.create(fields("cow", 3.0)).await.unwrap();
        record.age = 4.0;
        assert!(store.save(&record).await.unwrap());
        assert_eq!(store.find_one(record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn save_unknown_id_returns_false() {
        let store = InMemoryLivestockStore::new();
        let record = LivestockRecord {
            id: 7,
            kind: "cow".to_string(),
            breed: "Holstein".to_string(),
            age: 3.0,
            health_status: "good".to_string(),
        };
        assert!(!store.save(&record).await.unwrap());
        assert_eq!(store.find_one(7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_is_not_resurrectable() {
        let store = InMemoryLivestockStore::new();
        let record = store.create(fields("cow", 3.0)).await.unwrap();
        assert!(store.remove(record.id).await.unwrap());
        assert!(!store.remove(record.id).await.unwrap());
        assert_eq!(store.find_one(record.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_returns_all_records() {
        let store = InMemoryLivestockStore::new();
        store.create(fields("cow", 3.0)).await.unwrap();
        store.create(fields("sheep", 2.0)).await.unwrap();
        let records = store.find().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
    }
}
