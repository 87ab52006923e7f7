use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, put};
use serde::{Deserialize, Serialize};

use crate::data_store::LivestockStore;
use crate::errors::ApiError;
use crate::validate::{self, Violation};

////////////////////////////////////////// LivestockRecord /////////////////////////////////////////

/// A persisted livestock record.
///
/// The identity is assigned by the store on creation, is immutable, and is
/// never reused after deletion. The four descriptive fields always satisfy
/// the validation rules once a record has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivestockRecord {
    /// Store-assigned identity.
    pub id: i64,
    /// Kind of animal ("cow", "sheep", ...). Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Breed within the kind.
    pub breed: String,
    /// Age in years, strictly positive.
    pub age: f64,
    /// Free-form health assessment.
    pub health_status: String,
}

impl LivestockRecord {
    /// Returns a copy of this record with the descriptive fields replaced
    /// and the identity kept.
    pub fn with_fields(&self, fields: LivestockFields) -> LivestockRecord {
        LivestockRecord {
            id: self.id,
            kind: fields.kind,
            breed: fields.breed,
            age: fields.age,
            health_status: fields.health_status,
        }
    }
}

///////////////////////////////////////// LivestockCandidate ///////////////////////////////////////

/// A client submission: a full record on create, possibly partial on update.
///
/// Absent fields are omitted from the wire entirely so that update requests
/// carry only the keys the caller intends to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivestockCandidate {
    /// Kind of animal. Serialized as `type`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Breed within the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Free-form health assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<String>,
}

impl LivestockCandidate {
    /// Merges this candidate onto an existing record: submitted fields
    /// overwrite, omitted fields keep the stored value. The result is a
    /// full candidate that must still pass the full rule set before
    /// persistence.
    pub fn merged_onto(&self, existing: &LivestockRecord) -> LivestockCandidate {
        LivestockCandidate {
            kind: Some(self.kind.clone().unwrap_or_else(|| existing.kind.clone())),
            breed: Some(self.breed.clone().unwrap_or_else(|| existing.breed.clone())),
            age: Some(self.age.unwrap_or(existing.age)),
            health_status: Some(
                self.health_status
                    .clone()
                    .unwrap_or_else(|| existing.health_status.clone()),
            ),
        }
    }

    /// Validates the candidate as a full record and extracts its fields.
    ///
    /// # Returns
    /// * `Ok(LivestockFields)` - All four fields present and rule-satisfying
    /// * `Err(Vec<Violation>)` - Non-empty list of field-level violations
    pub fn into_fields(self) -> Result<LivestockFields, Vec<Violation>> {
        let violations = validate::validate_full(&self);
        match (self.kind, self.breed, self.age, self.health_status) {
            (Some(kind), Some(breed), Some(age), Some(health_status))
                if violations.is_empty() =>
            {
                Ok(LivestockFields {
                    kind,
                    breed,
                    age,
                    health_status,
                })
            }
            _ => Err(violations),
        }
    }
}

/// The validated descriptive fields of a record, ready to persist.
///
/// Values of this type only exist on the far side of
/// [`LivestockCandidate::into_fields`], so the store never sees a record
/// that violates the field rules.
#[derive(Debug, Clone, PartialEq)]
pub struct LivestockFields {
    /// Kind of animal.
    pub kind: String,
    /// Breed within the kind.
    pub breed: String,
    /// Age in years, strictly positive.
    pub age: f64,
    /// Free-form health assessment.
    pub health_status: String,
}

////////////////////////////////////////////// Routes //////////////////////////////////////////////

/// Shared handle to the persistence gateway backing the routes.
pub type StoreHandle = Arc<dyn LivestockStore>;

async fn list_livestock(
    State(store): State<StoreHandle>,
) -> Result<Json<Vec<LivestockRecord>>, ApiError> {
    let records = store.find().await?;
    Ok(Json(records))
}

async fn create_livestock(
    State(store): State<StoreHandle>,
    Json(candidate): Json<LivestockCandidate>,
) -> Result<(StatusCode, Json<LivestockRecord>), ApiError> {
    let fields = candidate.into_fields().map_err(ApiError::Validation)?;
    let record = store.create(fields).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_livestock(
    State(store): State<StoreHandle>,
    Path(id): Path<i64>,
    Json(patch): Json<LivestockCandidate>,
) -> Result<Json<LivestockRecord>, ApiError> {
    let existing = store.find_one(id).await?.ok_or(ApiError::NotFound)?;
    let fields = patch
        .merged_onto(&existing)
        .into_fields()
        .map_err(ApiError::Validation)?;
    let updated = existing.with_fields(fields);
    if !store.save(&updated).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(updated))
}

async fn delete_livestock(
    State(store): State<StoreHandle>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if store.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

////////////////////////////////////////////// Router //////////////////////////////////////////////

/// Creates an axum router exposing the livestock collection.
///
/// # Routes
/// - `GET /livestock` - List all records
/// - `POST /livestock` - Create a record (400 with violations on invalid input)
/// - `PUT /livestock/:id` - Merge a partial body onto a record (404 unknown id)
/// - `DELETE /livestock/:id` - Hard-delete a record (404 unknown id)
pub fn create_livestock_router(store: StoreHandle) -> Router {
    Router::new()
        .route("/livestock", get(list_livestock).post(create_livestock))
        .route(
            "/livestock/:id",
            put(update_livestock).delete(delete_livestock),
        )
        .with_state(store)
}
