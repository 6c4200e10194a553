//! In-memory store backend.
//!
//! Preserves insertion order in a `Vec`, mirroring the "order as stored" contract of the
//! document store closely enough for tests and local development.

use super::{PrescriptionStore, StoreResult};
use crate::model::{Prescription, PrescriptionBody, PrescriptionId};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Prescription>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrescriptionStore for MemoryStore {
    async fn insert(&self, body: PrescriptionBody) -> StoreResult<Prescription> {
        let record = Prescription::from_parts(PrescriptionId::generate(), body, Utc::now());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<Prescription>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &PrescriptionId) -> StoreResult<Option<Prescription>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == *id)
            .cloned())
    }

    async fn replace(&self, record: &Prescription) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &PrescriptionId) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != *id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Medicine;
    use rx_types::NonEmptyText;

    fn body(name: &str) -> PrescriptionBody {
        PrescriptionBody {
            name: NonEmptyText::new(name).unwrap(),
            age: 30,
            gender: NonEmptyText::new("Female").unwrap(),
            date_of_prescription: NonEmptyText::new("2025-01-01").unwrap(),
            inscription: vec![Medicine {
                name: NonEmptyText::new("Paracetamol").unwrap(),
                dosage: NonEmptyText::new("500mg").unwrap(),
                frequency: 2.0,
                quantity: 10.0,
            }],
            instructions: NonEmptyText::new("Take after meals").unwrap(),
            doctor_information: NonEmptyText::new("Dr. Mark Doe, MD").unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_keeps_order() {
        let store = MemoryStore::new();
        let first = store.insert(body("Alice")).await.unwrap();
        let second = store.insert(body("Bob")).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name.as_str(), "Alice");
        assert_eq!(all[1].name.as_str(), "Bob");
    }

    #[tokio::test]
    async fn replace_and_delete_report_matches() {
        let store = MemoryStore::new();
        let record = store.insert(body("Alice")).await.unwrap();

        let replacement = record.replacing(body("Alice Smith"), Utc::now());
        assert!(store.replace(&replacement).await.unwrap());
        let found = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found.name.as_str(), "Alice Smith");

        assert!(store.delete(&record.id).await.unwrap());
        assert!(!store.delete(&record.id).await.unwrap());
        assert!(store.find_by_id(&record.id).await.unwrap().is_none());
    }
}
