use std::time::Duration;

/// Failures raised by a store backend.
///
/// These never reach API callers directly: the service boundary logs the detail and maps the
/// whole class to [`PrescriptionError::StoreUnavailable`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store backend failure: {0}")]
    Backend(#[from] mongodb::error::Error),
    #[error("document store unreachable: {0}")]
    Unavailable(String),
    #[error("document store did not respond within {0:?}")]
    Timeout(Duration),
}

/// The prescription error taxonomy.
///
/// `MissingField` and `InvalidInscriptionFormat` are client-input errors detected before any
/// store interaction. `NotFound` covers both malformed and absent identifiers. Display strings
/// double as the wire messages in the REST envelope, so they are phrased for API callers.
#[derive(Debug, thiserror::Error)]
pub enum PrescriptionError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid inscription format. Must be an array of medicine objects.")]
    InvalidInscriptionFormat,
    #[error("Prescription not found")]
    NotFound,
    #[error("Prescription store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

pub type PrescriptionResult<T> = std::result::Result<T, PrescriptionError>;
