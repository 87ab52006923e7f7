//! # Herdbook: Livestock Record Keeping over HTTP
//!
//! Herdbook is a small CRUD service for livestock records. A single
//! relational table holds the records; an HTTP API exposes the four
//! operations a record-keeping UI needs (list, create, update, delete);
//! and an HTTP client with a resource-keyed read cache keeps a display
//! copy of the collection that is invalidated after every mutation.
//!
//! ## Core Concepts
//!
//! ### Records and Candidates
//! A [`LivestockRecord`] is the persisted shape: a store-assigned `id`
//! plus four descriptive fields (`type`, `breed`, `age`, `healthStatus`).
//! A [`LivestockCandidate`] is what clients submit: all fields optional,
//! full on create, possibly partial on update. Updates merge the
//! candidate onto the stored record (submitted fields overwrite, omitted
//! fields are retained) and the merged result must pass the full rule set
//! before anything is written.
//!
//! ### Validation
//! [`validate_full`] and [`validate_present`] implement one pure rule set
//! shared by the server and the client: text fields must be non-empty and
//! `age` must be a strictly positive number. The server is authoritative;
//! the client applies the same rules first so obviously invalid input
//! never crosses the network.
//!
//! ### Storage
//! The [`LivestockStore`] trait is the persistence gateway. The
//! PostgreSQL implementation runs every write as a single-row
//! transaction; the in-memory implementation backs the test suites.
//! The store owns record identity: ids are assigned on create and never
//! reused after deletion.
//!
//! ### The Client Cache
//! [`QueryCache`] maps a resource name to the last-known collection. The
//! client serves reads from it until a successful mutation invalidates
//! the entry; a failed mutation leaves the cache untouched.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ HTTP API Layer (Axum routes)            │
//! ├─────────────────────────────────────────┤
//! │ Validation (shared pure rule set)       │
//! ├─────────────────────────────────────────┤
//! │ LivestockStore (trait-based gateway)    │
//! ├─────────────────────────────────────────┤
//! │ PostgreSQL (sqlx, one tx per write)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ### Validating a Submission
//!
//! ```rust
//! use herdbook::{LivestockCandidate, validate_full};
//!
//! let candidate = LivestockCandidate {
//!     kind: Some("cow".to_string()),
//!     breed: Some("Holstein".to_string()),
//!     age: Some(3.0),
//!     health_status: Some("good".to_string()),
//! };
//! assert!(validate_full(&candidate).is_empty());
//!
//! let missing_age = LivestockCandidate {
//!     age: None,
//!     ..candidate
//! };
//! let violations = validate_full(&missing_age);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].field, "age");
//! ```
//!
//! ### Merging a Partial Update
//!
//! ```rust
//! use herdbook::{LivestockCandidate, LivestockRecord};
//!
//! let stored = LivestockRecord {
//!     id: 1,
//!     kind: "cow".to_string(),
//!     breed: "Holstein".to_string(),
//!     age: 3.0,
//!     health_status: "good".to_string(),
//! };
//!
//! // Only the submitted field is overwritten.
//! let patch = LivestockCandidate {
//!     age: Some(4.0),
//!     ..LivestockCandidate::default()
//! };
//! let fields = patch.merged_onto(&stored).into_fields().unwrap();
//! let updated = stored.with_fields(fields);
//! assert_eq!(updated.age, 4.0);
//! assert_eq!(updated.breed, "Holstein");
//! ```
//!
//! ### Serving the API from an In-Memory Store
//!
//! ```rust
//! # use std::sync::Arc;
//! # use herdbook::{InMemoryLivestockStore, create_livestock_router};
//! let store = Arc::new(InMemoryLivestockStore::new());
//! let app = create_livestock_router(store);
//! // `app` is an axum Router ready to be served.
//! ```

#![deny(missing_docs)]
mod cache;
mod config;
mod data_store;
mod errors;
mod livestock;
mod sql;
mod validate;

/// Command-line interface utilities for program termination and output
/// formatting, shared by the herdbook binaries.
pub mod cli_utils;

/// Command handlers for the herdctl CLI application.
pub mod commands;

/// HTTP client for the herdbook API.
///
/// Provides [`http_utils::HerdbookClient`], which pre-validates
/// submissions with the shared rule set and keeps the collection in a
/// read-through cache invalidated after every successful mutation.
pub mod http_utils;

pub use cache::QueryCache;
pub use config::{ConfigError, DATABASE_PORT, DatabaseConfig};
pub use data_store::{InMemoryLivestockStore, LivestockStore, PgLivestockStore};
pub use errors::{ApiError, ErrorsBody, MessageBody, StoreError};
pub use livestock::{
    LivestockCandidate, LivestockFields, LivestockRecord, StoreHandle, create_livestock_router,
};
pub use validate::{Violation, validate_full, validate_present};
