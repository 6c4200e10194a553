//! # docsys Core
//!
//! Core business logic for the docsys prescription management system.
//!
//! This crate contains pure data operations over prescription records:
//! - The `Prescription`/`Medicine` data model and draft payloads
//! - Payload validation (required fields, inscription shape)
//! - The CRUD service mediating between validation and the document store
//! - Store backends (MongoDB and an in-memory store for tests/local use)
//! - Client-side sort policy for prescription lists
//!
//! **No API concerns**: HTTP servers, response envelopes, or service interfaces belong in
//! `api-rest` or `api-shared`.

pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod sort;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use error::{PrescriptionError, PrescriptionResult, StoreError};
pub use model::{
    Medicine, MedicineDraft, Prescription, PrescriptionBody, PrescriptionDraft, PrescriptionId,
};
pub use service::PrescriptionService;
pub use store::{MemoryStore, MongoStore, PrescriptionStore};
