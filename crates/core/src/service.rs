//! The prescription CRUD service.
//!
//! Four operations — list, create, update, delete — mediating between the validation layer
//! and the document store. Each operation is independent, stateless, and atomic at the
//! single-document level; no coordination happens beyond what the store provides per
//! document.
//!
//! Validation errors are detected before any store interaction. Store failures are caught
//! here, logged, and mapped to `StoreUnavailable` so backend detail never leaks to callers.
//! Every store call runs under the configured timeout; no retries are attempted anywhere.

use crate::error::{PrescriptionError, PrescriptionResult, StoreError};
use crate::model::{Prescription, PrescriptionDraft, PrescriptionId};
use crate::store::{PrescriptionStore, StoreResult};
use crate::validation;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Service for prescription record operations.
#[derive(Clone)]
pub struct PrescriptionService {
    store: Arc<dyn PrescriptionStore>,
    store_timeout: Duration,
}

impl PrescriptionService {
    /// Creates a service over the given store backend.
    ///
    /// # Arguments
    ///
    /// * `store` - The document store holding prescription records
    /// * `store_timeout` - Upper bound applied to every store call
    pub fn new(store: Arc<dyn PrescriptionStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Returns all prescription records, in stored order.
    ///
    /// No pagination or filtering.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the store cannot be reached or times out.
    pub async fn list(&self) -> PrescriptionResult<Vec<Prescription>> {
        self.with_timeout(self.store.find_all()).await
    }

    /// Validates a payload and persists a new prescription record.
    ///
    /// Validation runs first, so nothing is persisted (not even partially) for an invalid
    /// payload. The store layer assigns the identifier and timestamps; the full created
    /// record is returned.
    ///
    /// # Errors
    ///
    /// Returns `MissingField`/`InvalidInscriptionFormat` before any persistence attempt, or
    /// `StoreUnavailable` on persistence failure.
    pub async fn create(&self, draft: PrescriptionDraft) -> PrescriptionResult<Prescription> {
        let body = validation::validate_draft(draft)?;
        self.with_timeout(self.store.insert(body)).await
    }

    /// Fully replaces the mutable fields of an existing record.
    ///
    /// The identifier is validated before any store lookup; a malformed id never reaches
    /// the backend. The replacement payload is re-validated, the identifier and creation
    /// timestamp are preserved, and the record is re-read after the write so the value
    /// returned is the canonical persisted state rather than an echo of the input.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a malformed or unmatched id, validation errors for a bad
    /// payload, or `StoreUnavailable` on store failure.
    pub async fn update(
        &self,
        raw_id: &str,
        draft: PrescriptionDraft,
    ) -> PrescriptionResult<Prescription> {
        let id = parse_id(raw_id)?;
        let body = validation::validate_draft(draft)?;

        let existing = self
            .with_timeout(self.store.find_by_id(&id))
            .await?
            .ok_or(PrescriptionError::NotFound)?;

        let replacement = existing.replacing(body, Utc::now());
        let matched = self.with_timeout(self.store.replace(&replacement)).await?;
        if !matched {
            // Removed between the read and the write.
            return Err(PrescriptionError::NotFound);
        }

        self.with_timeout(self.store.find_by_id(&id))
            .await?
            .ok_or(PrescriptionError::NotFound)
    }

    /// Removes a prescription record by id.
    ///
    /// Returns a confirmation, not the deleted record. Deleting an already-deleted id
    /// yields `NotFound`.
    ///
    /// # Errors
    ///
    /// Same malformed/missing id policy as [`PrescriptionService::update`].
    pub async fn delete(&self, raw_id: &str) -> PrescriptionResult<()> {
        let id = parse_id(raw_id)?;
        if self.with_timeout(self.store.delete(&id)).await? {
            Ok(())
        } else {
            Err(PrescriptionError::NotFound)
        }
    }

    /// Runs a store call under the configured timeout and maps failures to
    /// `StoreUnavailable`, logging the underlying cause at this boundary.
    async fn with_timeout<T>(
        &self,
        call: impl Future<Output = StoreResult<T>>,
    ) -> PrescriptionResult<T> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!("store operation failed: {e}");
                Err(PrescriptionError::StoreUnavailable(e))
            }
            Err(_) => {
                tracing::error!(
                    "store operation timed out after {:?}",
                    self.store_timeout
                );
                Err(PrescriptionError::StoreUnavailable(StoreError::Timeout(
                    self.store_timeout,
                )))
            }
        }
    }
}

fn parse_id(raw: &str) -> PrescriptionResult<PrescriptionId> {
    PrescriptionId::parse(raw).map_err(|e| {
        tracing::warn!("rejected malformed prescription id: {e}");
        PrescriptionError::NotFound
    })
}
