//! MongoDB store backend.
//!
//! One [`mongodb::Client`] is opened at process start and shared for the life of the
//! process; the driver multiplexes request concurrency internally. Identifiers are
//! client-generated ObjectIds stored as their 24-character hex string, which keeps the
//! `_id` on the wire identical to the `_id` in the collection.

use super::{PrescriptionStore, StoreResult};
use crate::config::CoreConfig;
use crate::model::{Prescription, PrescriptionBody, PrescriptionId};
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

/// `Collection`-backed prescription store.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Prescription>,
}

impl MongoStore {
    /// Opens the store connection described by `cfg`.
    ///
    /// The driver connects lazily, so this succeeds even when the server is down;
    /// unreachable backends surface per-operation as `StoreError::Backend`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the connection string cannot be parsed.
    pub async fn connect(cfg: &CoreConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(cfg.store_uri()).await?;
        let collection = client.database(cfg.database()).collection(cfg.collection());
        Ok(Self { collection })
    }
}

#[async_trait]
impl PrescriptionStore for MongoStore {
    async fn insert(&self, body: PrescriptionBody) -> StoreResult<Prescription> {
        let record = Prescription::from_parts(PrescriptionId::generate(), body, Utc::now());
        self.collection.insert_one(&record, None).await?;
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<Prescription>> {
        let mut cursor = self.collection.find(None, None).await?;
        let mut records = Vec::new();
        while cursor.advance().await? {
            records.push(cursor.deserialize_current()?);
        }
        Ok(records)
    }

    async fn find_by_id(&self, id: &PrescriptionId) -> StoreResult<Option<Prescription>> {
        let record = self
            .collection
            .find_one(doc! { "_id": id.to_hex() }, None)
            .await?;
        Ok(record)
    }

    async fn replace(&self, record: &Prescription) -> StoreResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": record.id.to_hex() }, record, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &PrescriptionId) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_hex() }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }
}
