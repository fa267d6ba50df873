use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::extract::State;
use dynaform_application::{LookupService, OptionLookup};
use dynaform_core::AppResult;
use dynaform_domain::{CallResponse, SelectOption};
use serde_json::{Value, json};

use super::lookup_handler;
use crate::handlers::test_support::{app_state, json_body, raw_body};
use crate::state::AppState;

struct StalledLookup;

#[async_trait]
impl OptionLookup for StalledLookup {
    async fn lookup(
        &self,
        _field_name: &str,
        _query: Option<&str>,
    ) -> AppResult<Vec<SelectOption>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }
}

fn item_values(response: &CallResponse) -> Vec<String> {
    let CallResponse::Ok {
        data: Some(data), ..
    } = response
    else {
        return Vec::new();
    };

    data["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["value"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

async fn lookup(state: AppState, body: Value) -> CallResponse {
    let Json(response) = lookup_handler(State(state), json_body(body).await)
        .await
        .unwrap_or_else(|_| unreachable!());
    response
}

#[tokio::test]
async fn lookup_returns_all_digits_in_order() {
    let response = lookup(app_state(), json!({"selected_field": "choice_1"})).await;

    assert_eq!(
        item_values(&response),
        vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]
    );
}

#[tokio::test]
async fn lookup_without_body_uses_the_field_bound_to_the_endpoint() {
    let Json(response) = lookup_handler(State(app_state()), raw_body(None, "").await)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(item_values(&response).len(), 10);
}

#[tokio::test]
async fn lookup_filters_by_query() {
    let response = lookup(
        app_state(),
        json!({"selected_field": "choice_1", "query": "7"}),
    )
    .await;

    assert_eq!(item_values(&response), vec!["7"]);
}

#[tokio::test]
async fn lookup_for_unknown_field_is_empty() {
    let response = lookup(app_state(), json!({"selected_field": "choice_9"})).await;

    assert_eq!(response, CallResponse::ok_data(json!({"items": []})));
}

#[tokio::test]
async fn lookup_with_malformed_body_is_generic_error() {
    let body = raw_body(Some("application/json"), "{\"query\": 7").await;
    let Json(response) = lookup_handler(State(app_state()), body)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response, CallResponse::generic_error());
}

#[tokio::test(start_paused = true)]
async fn stalled_lookup_answers_with_generic_error() {
    let mut state = app_state();
    state.lookup_service = LookupService::new(Arc::new(StalledLookup), Duration::from_millis(50));

    let response = lookup(state, json!({"selected_field": "choice_1"})).await;

    assert_eq!(response, CallResponse::generic_error());
}
