use std::error::Error;
use std::fmt;

use reqwest::{Client, Response, StatusCode};

use crate::cache::QueryCache;
use crate::errors::{ErrorsBody, MessageBody};
use crate::livestock::{LivestockCandidate, LivestockRecord};
use crate::validate::{self, Violation};

/// Cache key under which the livestock collection is stored.
const LIVESTOCK_RESOURCE: &str = "livestock";

/// Errors surfaced by [`HerdbookClient`] operations.
#[derive(Debug)]
pub enum ClientError {
    /// The submission violated field rules, either locally before the
    /// request was sent or on the server.
    Validation(Vec<Violation>),
    /// The referenced record does not exist on the server.
    NotFound,
    /// The server answered with an unexpected status.
    Api {
        /// The HTTP status the server returned.
        status: StatusCode,
        /// The message body, if one could be read.
        message: String,
    },
    /// The request never completed.
    Transport(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(violations) => {
                write!(f, "validation failed:")?;
                for violation in violations {
                    write!(f, " [{}: {}]", violation.field, violation.message)?;
                }
                Ok(())
            }
            Self::NotFound => write!(f, "Livestock not found"),
            Self::Api { status, message } => write!(f, "server error ({}): {}", status, message),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// HTTP client for the herdbook API with a read-through collection cache.
///
/// `list_livestock` serves from the cache while an entry is fresh and
/// re-fetches on a miss. Every successful mutation invalidates the cache
/// entry; a failed mutation leaves it untouched, so the displayed list
/// stays at the last-known-good state. Invalidation happens only after a
/// mutation's success response is observed, never speculatively.
pub struct HerdbookClient {
    client: Client,
    base_url: String,
    cache: QueryCache<Vec<LivestockRecord>>,
}

impl HerdbookClient {
    /// Creates a client for the API at `base_url` with an empty cache.
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            cache: QueryCache::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/livestock", self.base_url.trim_end_matches('/'))
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Lists all records, serving from the cache when fresh.
    pub async fn list_livestock(&self) -> Result<Vec<LivestockRecord>, ClientError> {
        if let Some(records) = self.cache.get(LIVESTOCK_RESOURCE) {
            return Ok(records);
        }
        let response = self.client.get(self.collection_url()).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let records: Vec<LivestockRecord> = response.json().await?;
        self.cache.put(LIVESTOCK_RESOURCE, records.clone());
        Ok(records)
    }

    /// Creates a record. The candidate is checked against the full rule
    /// set before the request; the server remains authoritative.
    pub async fn create_livestock(
        &self,
        candidate: &LivestockCandidate,
    ) -> Result<LivestockRecord, ClientError> {
        let violations = validate::validate_full(candidate);
        if !violations.is_empty() {
            return Err(ClientError::Validation(violations));
        }
        let response = self
            .client
            .post(self.collection_url())
            .json(candidate)
            .send()
            .await?;
        if response.status() != StatusCode::CREATED {
            return Err(error_from_response(response).await);
        }
        self.cache.invalidate(LIVESTOCK_RESOURCE);
        Ok(response.json().await?)
    }

    /// Updates a record with a possibly-partial patch. Fields present in
    /// the patch are checked locally; the server validates the merged
    /// record.
    pub async fn update_livestock(
        &self,
        id: i64,
        patch: &LivestockCandidate,
    ) -> Result<LivestockRecord, ClientError> {
        let violations = validate::validate_present(patch);
        if !violations.is_empty() {
            return Err(ClientError::Validation(violations));
        }
        let response = self
            .client
            .put(self.record_url(id))
            .json(patch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        self.cache.invalidate(LIVESTOCK_RESOURCE);
        Ok(response.json().await?)
    }

    /// Deletes a record. The cache entry is dropped only once the 204 is
    /// observed.
    pub async fn delete_livestock(&self, id: i64) -> Result<(), ClientError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        if response.status() != StatusCode::NO_CONTENT {
            return Err(error_from_response(response).await);
        }
        self.cache.invalidate(LIVESTOCK_RESOURCE);
        Ok(())
    }
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    match status {
        StatusCode::BAD_REQUEST => match response.json::<ErrorsBody>().await {
            Ok(body) => ClientError::Validation(body.errors),
            Err(e) => ClientError::Transport(e.to_string()),
        },
        StatusCode::NOT_FOUND => ClientError::NotFound,
        _ => {
            let message = response
                .json::<MessageBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| "no error details".to_string());
            ClientError::Api { status, message }
        }
    }
}
