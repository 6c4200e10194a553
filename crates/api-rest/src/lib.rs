//! # API REST
//!
//! REST API implementation for docsys.
//!
//! Handles:
//! - HTTP endpoints with axum, bound 1:1 to the prescription CRUD service
//! - The response envelope and error-to-status mapping
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON deserialization, CORS)
//!
//! Uses `api-shared` for common types and utilities.

#![warn(rust_2018_idioms)]

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::envelope::{AckRes, ApiResponse, PrescriptionListRes, PrescriptionRes};
use api_shared::health::{HealthRes, HealthService};
use docsys_core::{
    CoreConfig, MongoStore, Prescription, PrescriptionDraft, PrescriptionError,
    PrescriptionService,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PrescriptionService>,
}

/// Errors a handler can surface, each carrying its HTTP mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Malformed payload")]
    MalformedPayload,
    #[error(transparent)]
    Domain(#[from] PrescriptionError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("rejected request body: {rejection}");
        ApiError::MalformedPayload
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MalformedPayload => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Domain(err) => match err {
                PrescriptionError::MissingField(_)
                | PrescriptionError::InvalidInscriptionFormat => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                PrescriptionError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                PrescriptionError::StoreUnavailable(cause) => {
                    // Internal detail stays in the logs.
                    tracing::error!("store unavailable: {cause}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        (status, Json(ApiResponse::<String>::error(message))).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_prescriptions,
        create_prescription,
        update_prescription,
        delete_prescription,
    ),
    components(schemas(
        HealthRes,
        Prescription,
        docsys_core::Medicine,
        PrescriptionDraft,
        docsys_core::MedicineDraft,
        PrescriptionRes,
        PrescriptionListRes,
        AckRes,
    ))
)]
struct ApiDoc;

/// Builds the REST router over the given state.
///
/// Routes, Swagger UI and the permissive CORS layer are all attached here so the binary
/// entrypoints and the integration tests serve the same surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/prescriptions",
            get(list_prescriptions).post(create_prescription),
        )
        .route(
            "/prescriptions/:id",
            put(update_prescription).delete(delete_prescription),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Boots the REST server from environment configuration.
///
/// Resolves configuration once, opens the single store connection, then serves until the
/// process is stopped.
///
/// # Environment Variables
/// - `DOCSYS_REST_ADDR`: Server address (default: "0.0.0.0:5000")
/// - `DOCSYS_MONGO_URI`: Store connection string (default: "mongodb://localhost:27017")
/// - `DOCSYS_DB` / `DOCSYS_COLLECTION`: Database and collection names
/// - `DOCSYS_STORE_TIMEOUT_SECS`: Per-call store timeout in whole seconds (default: 5)
///
/// # Errors
/// Returns an error if configuration is invalid, the store URI cannot be parsed, or the
/// server address cannot be bound.
pub async fn serve_from_env() -> anyhow::Result<()> {
    let cfg = CoreConfig::from_env_values(
        std::env::var("DOCSYS_MONGO_URI").ok(),
        std::env::var("DOCSYS_DB").ok(),
        std::env::var("DOCSYS_COLLECTION").ok(),
        std::env::var("DOCSYS_STORE_TIMEOUT_SECS").ok(),
    )?;
    let addr = std::env::var("DOCSYS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    tracing::info!("-- Starting docsys REST API on {}", addr);

    let store = MongoStore::connect(&cfg).await?;
    let state = AppState {
        service: Arc::new(PrescriptionService::new(
            Arc::new(store),
            cfg.store_timeout(),
        )),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/prescriptions",
    responses(
        (status = 200, description = "List of prescriptions", body = PrescriptionListRes),
        (status = 500, description = "Store unavailable", body = AckRes)
    )
)]
/// List all prescription records.
///
/// Returns every record in stored order; no pagination or filtering.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be reached.
#[axum::debug_handler]
async fn list_prescriptions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Prescription>>>, ApiError> {
    let records = state.service.list().await?;
    Ok(Json(ApiResponse::ok(records)))
}

#[utoipa::path(
    post,
    path = "/prescriptions",
    request_body = PrescriptionDraft,
    responses(
        (status = 201, description = "Prescription created", body = PrescriptionRes),
        (status = 400, description = "Validation failure", body = AckRes),
        (status = 500, description = "Store unavailable", body = AckRes)
    )
)]
/// Create a new prescription record.
///
/// The payload is validated before any persistence attempt; the created record, including
/// its store-assigned id and timestamps, is returned.
///
/// # Errors
/// Returns `400 Bad Request` for a missing field, a malformed inscription, or an
/// undecodable body; `500 Internal Server Error` on store failure.
#[axum::debug_handler]
async fn create_prescription(
    State(state): State<AppState>,
    payload: Result<Json<PrescriptionDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Prescription>>), ApiError> {
    let Json(draft) = payload?;
    let record = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

#[utoipa::path(
    put,
    path = "/prescriptions/{id}",
    request_body = PrescriptionDraft,
    responses(
        (status = 200, description = "Prescription updated", body = PrescriptionRes),
        (status = 400, description = "Validation failure", body = AckRes),
        (status = 404, description = "Unknown or malformed id", body = AckRes),
        (status = 500, description = "Store unavailable", body = AckRes)
    )
)]
/// Fully replace an existing prescription record.
///
/// A malformed id is rejected before any store lookup. The canonical persisted record is
/// returned after the write.
///
/// # Errors
/// Returns `404 Not Found` for a malformed or unmatched id, `400 Bad Request` for an
/// invalid payload, `500 Internal Server Error` on store failure.
#[axum::debug_handler]
async fn update_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    payload: Result<Json<PrescriptionDraft>, JsonRejection>,
) -> Result<Json<ApiResponse<Prescription>>, ApiError> {
    let Json(draft) = payload?;
    let record = state.service.update(&id, draft).await?;
    Ok(Json(ApiResponse::ok(record)))
}

#[utoipa::path(
    delete,
    path = "/prescriptions/{id}",
    responses(
        (status = 200, description = "Prescription deleted", body = AckRes),
        (status = 404, description = "Unknown or malformed id", body = AckRes),
        (status = 500, description = "Store unavailable", body = AckRes)
    )
)]
/// Delete a prescription record.
///
/// Returns a confirmation, not the deleted record.
///
/// # Errors
/// Returns `404 Not Found` for a malformed or unmatched id, `500 Internal Server Error`
/// on store failure.
#[axum::debug_handler]
async fn delete_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state.service.delete(&id).await?;
    Ok(Json(ApiResponse::confirmation("Prescription deleted")))
}
