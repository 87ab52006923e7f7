//! Livestock row operations for the PostgreSQL database.
//!
//! The table keeps `created_at`/`updated_at` metadata maintained in SQL;
//! neither column appears on the wire.

use sqlx::{FromRow, Postgres, Transaction};

use crate::errors::StoreError;
use crate::livestock::{LivestockFields, LivestockRecord};

/// Result type for database operations.
pub type SqlResult<T> = Result<T, StoreError>;

#[derive(FromRow)]
struct LivestockRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    breed: String,
    age: f64,
    health_status: String,
}

impl From<LivestockRow> for LivestockRecord {
    fn from(row: LivestockRow) -> Self {
        LivestockRecord {
            id: row.id,
            kind: row.kind,
            breed: row.breed,
            age: row.age,
            health_status: row.health_status,
        }
    }
}

/// Inserts a new row. The database assigns the id from the table's
/// identity sequence, so ids are unique and never reused.
///
/// # Returns
/// * `Ok(LivestockRecord)` - The persisted record with its assigned id
/// * `Err(StoreError::Internal)` - Database error
pub async fn create(
    tx: &mut Transaction<'_, Postgres>,
    fields: &LivestockFields,
) -> SqlResult<LivestockRecord> {
    let result = sqlx::query_as::<_, LivestockRow>(
        r#"
        INSERT INTO livestock ("type", breed, age, health_status)
        VALUES ($1, $2, $3, $4)
        RETURNING id, "type", breed, age, health_status
        "#,
    )
    .bind(&fields.kind)
    .bind(&fields.breed)
    .bind(fields.age)
    .bind(&fields.health_status)
    .fetch_one(&mut **tx)
    .await;

    match result {
        Ok(row) => Ok(row.into()),
        Err(e) => {
            tracing::error!("database error creating livestock: {}", e);
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Retrieves the record with `id`.
///
/// # Returns
/// * `Ok(Some(LivestockRecord))` - Record found
/// * `Ok(None)` - No row with that id
/// * `Err(StoreError::Internal)` - Database error
pub async fn get(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> SqlResult<Option<LivestockRecord>> {
    let result = sqlx::query_as::<_, LivestockRow>(
        r#"
        SELECT id, "type", breed, age, health_status
        FROM livestock
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await;

    match result {
        Ok(row) => Ok(row.map(LivestockRecord::from)),
        Err(e) => {
            tracing::error!("database error getting livestock: {}", e);
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Lists all records, oldest id first.
pub async fn list(tx: &mut Transaction<'_, Postgres>) -> SqlResult<Vec<LivestockRecord>> {
    let result = sqlx::query_as::<_, LivestockRow>(
        r#"
        SELECT id, "type", breed, age, health_status
        FROM livestock
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&mut **tx)
    .await;

    match result {
        Ok(rows) => Ok(rows.into_iter().map(LivestockRecord::from).collect()),
        Err(e) => {
            tracing::error!("database error listing livestock: {}", e);
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Overwrites the row with `record.id` and bumps `updated_at`.
///
/// # Returns
/// * `Ok(true)` - Row existed and was updated
/// * `Ok(false)` - No row with that id
/// * `Err(StoreError::Internal)` - Database error
pub async fn update(
    tx: &mut Transaction<'_, Postgres>,
    record: &LivestockRecord,
) -> SqlResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE livestock
        SET "type" = $2,
            breed = $3,
            age = $4,
            health_status = $5,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        "#,
    )
    .bind(record.id)
    .bind(&record.kind)
    .bind(&record.breed)
    .bind(record.age)
    .bind(&record.health_status)
    .execute(&mut **tx)
    .await;

    match result {
        Ok(result) => Ok(result.rows_affected() > 0),
        Err(e) => {
            tracing::error!("database error updating livestock: {}", e);
            Err(StoreError::Internal(e.to_string()))
        }
    }
}

/// Hard-deletes the row with `id`.
///
/// # Returns
/// * `Ok(true)` - Row existed and was deleted
/// * `Ok(false)` - No row with that id
/// * `Err(StoreError::Internal)` - Database error
pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: i64) -> SqlResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM livestock
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await;

    match result {
        Ok(result) => Ok(result.rows_affected() > 0),
        Err(e) => {
            tracing::error!("database error deleting livestock: {}", e);
            Err(StoreError::Internal(e.to_string()))
        }
    }
}
