//! # API Shared
//!
//! Shared utilities and definitions for docsys APIs.
//!
//! Contains:
//! - The REST response envelope (`ApiResponse`) and its OpenAPI aliases
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` (and any future API surface) for common functionality.

pub mod envelope;
pub mod health;

pub use envelope::{AckRes, ApiResponse, PrescriptionListRes, PrescriptionRes};
pub use health::{HealthRes, HealthService};
