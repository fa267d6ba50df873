//! Dynaform API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod app_definition;
mod error;
mod handlers;
mod state;

use dynaform_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_router::{MANIFEST_PATH, build_router};
use crate::api_services::build_app_state;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let app_state = build_app_state(&config)?;
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;
    let address = listener
        .local_addr()
        .map_err(|error| AppError::Internal(format!("failed to read listener address: {error}")))?;

    info!(%address, app_id = app_definition::APP_ID, "dynaform-api listening");
    info!(
        "install with: /apps install http {}{MANIFEST_PATH}",
        config.root_url.as_str().trim_end_matches('/')
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
