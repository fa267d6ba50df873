use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use dynaform_application::ResolveEvent;
use dynaform_domain::{CallRequest, CallResponse};
use tracing::{debug, info, warn};

use crate::state::AppState;


pub async fn dynamic_source_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected dynamic source request body");
            return Json(CallResponse::generic_error());
        }
    };

    let event = ResolveEvent::from(request);
    match state.form_flow.resolve_form(&event) {
        Ok(form) => {
            debug!(
                selected_field = event.selected_field().unwrap_or_default(),
                fields = form.fields().len(),
                "resolved dynamic form"
            );
            Json(CallResponse::form(form))
        }
        Err(error) => {
            warn!(
                error = %error,
                selected_field = event.selected_field().unwrap_or_default(),
                "dynamic form resolution failed"
            );
            Json(CallResponse::generic_error())
        }
    }
}

pub async fn submit_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Json<CallResponse> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected submit request body");
            return Json(CallResponse::generic_error());
        }
    };

    info!(fields = ?request.value_names(), "form submitted");
    Json(state.submission_service.submit(&request.values))
}
