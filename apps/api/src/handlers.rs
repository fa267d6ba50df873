pub mod app_lifecycle;
pub mod forms;
pub mod lookup;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use dynaform_domain::CallRequest;

/// Accepts a missing body as an empty request; anything unparsable is rejected.
fn optional_call_request(
    body: Result<Json<CallRequest>, JsonRejection>,
) -> Result<CallRequest, JsonRejection> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(CallRequest::default()),
        Err(rejection) => Err(rejection),
    }
}
