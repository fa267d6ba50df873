use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub const MANIFEST_PATH: &str = "/manifest.json";
pub const LOOKUP_PATH: &str = "/lookup";
pub const DYNAMIC_SOURCE_PATH: &str = "/dynamic_source";
pub const SUBMIT_PATH: &str = "/submit";
pub const BINDINGS_PATH: &str = "/bindings";
pub const PING_PATH: &str = "/ping";
pub const INSTALL_PATH: &str = "/install";
pub const UNINSTALL_PATH: &str = "/uninstall";
pub const ENABLE_PATH: &str = "/enable";
pub const DISABLE_PATH: &str = "/disable";

/// Paths the host may reference from a `Call`.
pub const CALL_PATHS: &[&str] = &[
    LOOKUP_PATH,
    DYNAMIC_SOURCE_PATH,
    SUBMIT_PATH,
    BINDINGS_PATH,
    PING_PATH,
    INSTALL_PATH,
    UNINSTALL_PATH,
    ENABLE_PATH,
    DISABLE_PATH,
];

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(MANIFEST_PATH, get(handlers::app_lifecycle::manifest_handler))
        .route(
            LOOKUP_PATH,
            get(handlers::lookup::lookup_handler).post(handlers::lookup::lookup_handler),
        )
        .route(
            DYNAMIC_SOURCE_PATH,
            get(handlers::forms::dynamic_source_handler)
                .post(handlers::forms::dynamic_source_handler),
        )
        .route(SUBMIT_PATH, post(handlers::forms::submit_handler))
        .route(
            BINDINGS_PATH,
            get(handlers::app_lifecycle::bindings_handler)
                .post(handlers::app_lifecycle::bindings_handler),
        )
        .route(PING_PATH, post(handlers::app_lifecycle::ping_handler))
        .route(
            INSTALL_PATH,
            get(handlers::app_lifecycle::install_handler)
                .post(handlers::app_lifecycle::install_handler),
        )
        .route(
            UNINSTALL_PATH,
            post(handlers::app_lifecycle::uninstall_handler),
        )
        .route(ENABLE_PATH, post(handlers::app_lifecycle::enable_handler))
        .route(DISABLE_PATH, post(handlers::app_lifecycle::disable_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
