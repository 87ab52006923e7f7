//! PostgreSQL database operations for herdbook.
//!
//! All functions run inside a caller-provided transaction; the store
//! implementation in [`crate`] wraps each operation in its own
//! begin/commit pair so every write is a single-row transaction.

/// Livestock table operations.
pub mod livestock;
