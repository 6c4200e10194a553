use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service usable by any API surface.
///
/// This service provides a standardised way to check the health status of the docsys
/// system. It can be used both as a static utility and as an instantiated service.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// This is the preferred method for health checks as it doesn't require
    /// instantiating the service.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "docsys is alive".into(),
        }
    }

    /// Instance method for compatibility
    ///
    /// Delegates to the static `check_health()` method.
    pub fn check_health_instance(&self) -> HealthRes {
        Self::check_health()
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}
