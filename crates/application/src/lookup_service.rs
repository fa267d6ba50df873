use std::sync::Arc;
use std::time::Duration;

use dynaform_core::{AppError, AppResult};
use dynaform_domain::{CallResponse, SelectOption};
use serde_json::json;

use crate::lookup_ports::OptionLookup;

/// Application service for option lookups.
///
/// Every lookup is bounded by a timeout; dropping the returned future
/// cancels the underlying call.
#[derive(Clone)]
pub struct LookupService {
    lookup: Arc<dyn OptionLookup>,
    timeout: Duration,
}

impl LookupService {
    /// Creates a lookup service around an adapter.
    #[must_use]
    pub fn new(lookup: Arc<dyn OptionLookup>, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    /// Returns options for `field_name`.
    pub async fn lookup(
        &self,
        field_name: &str,
        query: Option<&str>,
    ) -> AppResult<Vec<SelectOption>> {
        tokio::time::timeout(self.timeout, self.lookup.lookup(field_name, query))
            .await
            .map_err(|_| {
                AppError::Unavailable(format!(
                    "option lookup for field '{field_name}' timed out after {} ms",
                    self.timeout.as_millis()
                ))
            })?
    }
}

/// Wraps options in the `{type: ok, data: {items}}` lookup envelope.
pub fn lookup_items_response(options: &[SelectOption]) -> AppResult<CallResponse> {
    let items = serde_json::to_value(options).map_err(|error| {
        AppError::Internal(format!("failed to serialize lookup options: {error}"))
    })?;

    Ok(CallResponse::ok_data(json!({ "items": items })))
}
