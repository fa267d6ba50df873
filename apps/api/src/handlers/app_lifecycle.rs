use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use dynaform_application::LifecycleEvent;
use dynaform_domain::{CallRequest, CallResponse, Manifest};
use tracing::{debug, info, warn};

use crate::error::ApiResult;
use crate::handlers::optional_call_request;
use crate::state::AppState;


pub async fn manifest_handler(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.manifest_service.manifest().clone())
}

pub async fn bindings_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> ApiResult<Json<CallResponse>> {
    let context = match optional_call_request(body) {
        Ok(request) => request.context,
        Err(rejection) => {
            debug!(error = %rejection, "ignoring unparsable bindings request body");
            None
        }
    };

    debug!(has_context = context.is_some(), "bindings requested");
    Ok(Json(state.binding_service.bindings(context.as_ref())?))
}

pub async fn ping_handler() -> Json<CallResponse> {
    Json(CallResponse::ok())
}

pub async fn install_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    let mut param_names: Vec<&str> = params.keys().map(String::as_str).collect();
    param_names.sort_unstable();
    info!(params = ?param_names, "install requested");

    lifecycle_response(&state, LifecycleEvent::Install, body)
}

pub async fn uninstall_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    lifecycle_response(&state, LifecycleEvent::Uninstall, body)
}

pub async fn enable_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    lifecycle_response(&state, LifecycleEvent::Enable, body)
}

pub async fn disable_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    lifecycle_response(&state, LifecycleEvent::Disable, body)
}

fn lifecycle_response(
    state: &AppState,
    event: LifecycleEvent,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    match optional_call_request(body) {
        Ok(request) => info!(
            event = event.as_str(),
            has_context = request.context.is_some(),
            "lifecycle event received"
        ),
        Err(rejection) => warn!(
            event = event.as_str(),
            error = %rejection,
            "lifecycle event with unparsable body"
        ),
    }

    Json(state.lifecycle_service.on_event(event))
}
