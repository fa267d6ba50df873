use std::collections::HashSet;

use async_trait::async_trait;
use dynaform_application::OptionLookup;
use dynaform_core::{AppError, AppResult};
use dynaform_domain::{CallRequest, CallResponse, SelectOption};
use serde::Deserialize;
use tracing::debug;

/// Option lookup delegated to a remote call endpoint.
///
/// The timeout is owned by `LookupService`; this adapter makes exactly one
/// attempt per lookup.
pub struct HttpOptionLookup {
    http_client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct LookupItems {
    #[serde(default)]
    items: Vec<SelectOption>,
}

impl HttpOptionLookup {
    /// Creates a lookup adapter posting to `endpoint`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the remote endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl OptionLookup for HttpOptionLookup {
    async fn lookup(&self, field_name: &str, query: Option<&str>) -> AppResult<Vec<SelectOption>> {
        let request = CallRequest {
            selected_field: Some(field_name.to_owned()),
            query: query.map(str::to_owned),
            ..CallRequest::default()
        };

        let response = self
            .http_client
            .post(self.endpoint.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|error| {
                AppError::Unavailable(format!("option lookup transport error: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Unavailable(format!(
                "option lookup for field '{field_name}' failed with status {status}"
            )));
        }

        let body: CallResponse = response.json().await.map_err(|error| {
            AppError::Unavailable(format!("option lookup returned an invalid body: {error}"))
        })?;

        let options = options_from_response(body)?;
        debug!(
            field = field_name,
            endpoint = %self.endpoint,
            count = options.len(),
            "remote option lookup answered"
        );

        Ok(options)
    }
}

fn options_from_response(response: CallResponse) -> AppResult<Vec<SelectOption>> {
    match response {
        CallResponse::Ok { data: None, .. } => Ok(Vec::new()),
        CallResponse::Ok {
            data: Some(data), ..
        } => {
            let items = serde_json::from_value::<LookupItems>(data)
                .map_err(|error| {
                    AppError::Unavailable(format!("option lookup items are malformed: {error}"))
                })?
                .items;

            let mut seen_values = HashSet::new();
            if let Some(duplicate) = items.iter().find(|item| !seen_values.insert(item.value())) {
                return Err(AppError::Unavailable(format!(
                    "option lookup returned duplicate value '{}'",
                    duplicate.value()
                )));
            }

            Ok(items)
        }
        CallResponse::Error { text } => Err(AppError::Unavailable(format!(
            "option lookup answered with an error: {text}"
        ))),
        other => Err(AppError::Unavailable(format!(
            "option lookup answered with unexpected type '{}'",
            other.type_name()
        ))),
    }
}
