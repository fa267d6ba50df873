use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body the host posts to every call endpoint.
///
/// Only the parts a handler needs are typed; everything the host expanded is
/// kept as opaque JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Path the host called.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Values entered so far, keyed by field name.
    #[serde(default, deserialize_with = "values_or_empty")]
    pub values: Map<String, Value>,
    /// Field whose change triggered the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_field: Option<String>,
    /// Free text typed into a lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Expanded context (acting user, channel, app, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    /// Opaque state from the originating call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// Expansion the host applied, kept as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<Value>,
    /// Raw slash command text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_command: Option<String>,
}

impl CallRequest {
    /// Returns the selected field, ignoring blank names.
    #[must_use]
    pub fn selected_field(&self) -> Option<&str> {
        self.selected_field
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Returns the lookup query, ignoring blank input.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }

    /// Returns the submitted value names in a stable order.
    #[must_use]
    pub fn value_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// Hosts send `"values": null` when nothing was entered yet.
fn values_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::CallRequest;

    #[test]
    fn empty_body_parses_to_defaults() {
        let request: Result<CallRequest, _> = serde_json::from_value(json!({}));
        assert!(request.is_ok());
        assert_eq!(request.unwrap_or_default(), CallRequest::default());
    }

    #[test]
    fn null_values_parse_as_empty_map() {
        let request: CallRequest =
            serde_json::from_value(json!({"values": null})).unwrap_or_default();
        assert!(request.values.is_empty());
    }

    #[test]
    fn blank_selected_field_is_ignored() {
        let request: CallRequest =
            serde_json::from_value(json!({"selected_field": "  "})).unwrap_or_default();
        assert!(request.selected_field().is_none());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let request: Result<CallRequest, _> = serde_json::from_value(json!({
            "selected_field": "choice_1",
            "values": {"choice_1": {"label": "2", "value": "2"}},
            "context": {"acting_user": {"id": "abc"}},
            "user_agent": "webapp",
        }));
        assert!(request.is_ok());
        let request = request.unwrap_or_default();
        assert_eq!(request.selected_field(), Some("choice_1"));
        assert_eq!(request.value_names(), vec!["choice_1"]);
    }

    #[test]
    fn any_expand_levels_are_accepted() {
        let request: Result<CallRequest, _> = serde_json::from_value(json!({
            "selected_field": "choice_1",
            "expand": {"app": "none", "acting_user": "+all", "channel": "+summary"},
        }));

        assert!(request.is_ok());
        let request = request.unwrap_or_default();
        assert_eq!(request.selected_field(), Some("choice_1"));
        assert_eq!(
            request.expand,
            Some(json!({"app": "none", "acting_user": "+all", "channel": "+summary"}))
        );
    }
}
