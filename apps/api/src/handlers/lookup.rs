use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use dynaform_application::lookup_items_response;
use dynaform_domain::{CallRequest, CallResponse};
use tracing::{debug, warn};

use crate::api_router::LOOKUP_PATH;
use crate::error::ApiResult;
use crate::handlers::optional_call_request;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn lookup_handler(
    State(state): State<AppState>,
    body: Result<Json<CallRequest>, JsonRejection>,
) -> ApiResult<Json<CallResponse>> {
    let request = match optional_call_request(body) {
        Ok(request) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected lookup request body");
            return Ok(Json(CallResponse::generic_error()));
        }
    };

    let field_name = match request.selected_field() {
        Some(field_name) => field_name.to_owned(),
        None => match state.form_flow.lookup_field_for_path(LOOKUP_PATH) {
            Some(field) => field.name().to_owned(),
            None => {
                warn!("lookup called without a field and no field uses this endpoint");
                return Ok(Json(CallResponse::generic_error()));
            }
        },
    };

    match state
        .lookup_service
        .lookup(field_name.as_str(), request.query())
        .await
    {
        Ok(options) => {
            debug!(
                field = field_name.as_str(),
                query = request.query().unwrap_or_default(),
                count = options.len(),
                "lookup answered"
            );
            Ok(Json(lookup_items_response(&options)?))
        }
        Err(error) => {
            warn!(error = %error, field = field_name.as_str(), "option lookup failed");
            Ok(Json(CallResponse::generic_error()))
        }
    }
}
