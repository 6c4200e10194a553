//! Prescription store backends.
//!
//! The store is an external collaborator: a document collection holding one document per
//! prescription. Backends implement [`PrescriptionStore`] so the CRUD service stays
//! backend-agnostic; [`MongoStore`] is the production backend and [`MemoryStore`] serves
//! tests and local development.
//!
//! Identifier and timestamp assignment is the store layer's job: `insert` allocates the
//! id and stamps `createdAt`/`updatedAt`, so callers never supply either.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::error::StoreError;
use crate::model::{Prescription, PrescriptionBody, PrescriptionId};
use async_trait::async_trait;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A document collection of prescription records.
///
/// Each method corresponds to one single-document operation; whatever atomicity the backend
/// provides per document is the only coordination assumed.
#[async_trait]
pub trait PrescriptionStore: Send + Sync {
    /// Persists a new record, assigning its identifier and timestamps.
    async fn insert(&self, body: PrescriptionBody) -> StoreResult<Prescription>;

    /// Returns all records in stored order.
    async fn find_all(&self) -> StoreResult<Vec<Prescription>>;

    /// Looks up a single record by id.
    async fn find_by_id(&self, id: &PrescriptionId) -> StoreResult<Option<Prescription>>;

    /// Fully replaces the record with `record.id`. Returns `false` if no record matched.
    async fn replace(&self, record: &Prescription) -> StoreResult<bool>;

    /// Removes the record with the given id. Returns `false` if no record matched.
    async fn delete(&self, id: &PrescriptionId) -> StoreResult<bool>;
}
