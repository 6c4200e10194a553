//! Main entrypoint for the docsys server.
//!
//! Initialises logging, loads `.env`, resolves configuration once, opens the single store
//! connection, and serves the REST API until the process is stopped.
//!
//! # Environment Variables
//! - `DOCSYS_REST_ADDR`: Server address (default: "0.0.0.0:5000")
//! - `DOCSYS_MONGO_URI`: Store connection string (default: "mongodb://localhost:27017")
//! - `DOCSYS_DB` / `DOCSYS_COLLECTION`: Database and collection names
//! - `DOCSYS_STORE_TIMEOUT_SECS`: Per-call store timeout in whole seconds (default: 5)
//!
//! # Errors
//! Returns an error if:
//! - the logging/tracing configuration cannot be initialised,
//! - the configuration or store URI is invalid, or
//! - the server address cannot be bound.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use docsys_core::{CoreConfig, MongoStore, PrescriptionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docsys_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var("DOCSYS_MONGO_URI").ok(),
        std::env::var("DOCSYS_DB").ok(),
        std::env::var("DOCSYS_COLLECTION").ok(),
        std::env::var("DOCSYS_STORE_TIMEOUT_SECS").ok(),
    )?;
    let addr = std::env::var("DOCSYS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    tracing::info!("-- Starting docsys on {}", addr);

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
