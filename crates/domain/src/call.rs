use dynaform_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How much of a contextual entity the host should attach to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpandLevel {
    /// The full entity.
    #[serde(rename = "all")]
    All,
    /// Only the entity identifier.
    #[serde(rename = "id")]
    Id,
    /// A reduced summary of the entity.
    #[serde(rename = "summary")]
    Summary,
    /// The full entity, failing the call when it cannot be expanded.
    #[serde(rename = "+all")]
    RequiredAll,
    /// The identifier, failing the call when it cannot be expanded.
    #[serde(rename = "+id")]
    RequiredId,
    /// The summary, failing the call when it cannot be expanded.
    #[serde(rename = "+summary")]
    RequiredSummary,
}

/// Contextual entities a call target wants populated by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    acting_user: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    acting_user_access_token: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel_member: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_member: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root_post: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth2_app: Option<ExpandLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth2_user: Option<ExpandLevel>,
}

impl Expand {
    /// Creates an expansion that requests nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Requests the installed app.
    #[must_use]
    pub fn app(mut self, level: ExpandLevel) -> Self {
        self.app = Some(level);
        self
    }

    /// Requests the user who triggered the call.
    #[must_use]
    pub fn acting_user(mut self, level: ExpandLevel) -> Self {
        self.acting_user = Some(level);
        self
    }

    /// Requests the acting user's access token.
    #[must_use]
    pub fn acting_user_access_token(mut self, level: ExpandLevel) -> Self {
        self.acting_user_access_token = Some(level);
        self
    }

    /// Requests the acting user's locale.
    #[must_use]
    pub fn locale(mut self, level: ExpandLevel) -> Self {
        self.locale = Some(level);
        self
    }

    /// Requests the channel the call was made in.
    #[must_use]
    pub fn channel(mut self, level: ExpandLevel) -> Self {
        self.channel = Some(level);
        self
    }

    /// Requests the acting user's channel membership.
    #[must_use]
    pub fn channel_member(mut self, level: ExpandLevel) -> Self {
        self.channel_member = Some(level);
        self
    }

    /// Requests the team the call was made in.
    #[must_use]
    pub fn team(mut self, level: ExpandLevel) -> Self {
        self.team = Some(level);
        self
    }

    /// Requests the acting user's team membership.
    #[must_use]
    pub fn team_member(mut self, level: ExpandLevel) -> Self {
        self.team_member = Some(level);
        self
    }

    /// Requests the thread root post.
    #[must_use]
    pub fn root_post(mut self, level: ExpandLevel) -> Self {
        self.root_post = Some(level);
        self
    }

    /// Requests the post the call was made on.
    #[must_use]
    pub fn post(mut self, level: ExpandLevel) -> Self {
        self.post = Some(level);
        self
    }

    /// Requests the user referenced by the call.
    #[must_use]
    pub fn user(mut self, level: ExpandLevel) -> Self {
        self.user = Some(level);
        self
    }

    /// Requests the app's OAuth2 configuration.
    #[must_use]
    pub fn oauth2_app(mut self, level: ExpandLevel) -> Self {
        self.oauth2_app = Some(level);
        self
    }

    /// Requests the acting user's OAuth2 data.
    #[must_use]
    pub fn oauth2_user(mut self, level: ExpandLevel) -> Self {
        self.oauth2_user = Some(level);
        self
    }

    /// Returns the requested app expansion.
    #[must_use]
    pub fn app_level(&self) -> Option<ExpandLevel> {
        self.app
    }

    /// Returns the requested acting user expansion.
    #[must_use]
    pub fn acting_user_level(&self) -> Option<ExpandLevel> {
        self.acting_user
    }

    /// Returns whether no entity is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Typed pointer to a server-side operation.
///
/// `state` is round-tripped by the client untouched; nothing on the server
/// side interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CallWire")]
pub struct Call {
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expand: Option<Expand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<Value>,
}

#[derive(Deserialize)]
struct CallWire {
    path: String,
    #[serde(default)]
    expand: Option<Expand>,
    #[serde(default)]
    state: Option<Value>,
}

impl TryFrom<CallWire> for Call {
    type Error = AppError;

    fn try_from(wire: CallWire) -> Result<Self, Self::Error> {
        let call = Self::new(wire.path)?;
        let call = match wire.expand {
            Some(expand) => call.with_expand(expand),
            None => call,
        };

        Ok(match wire.state {
            Some(state) => call.with_state(state),
            None => call,
        })
    }
}

impl Call {
    /// Creates a call to an app-relative path.
    pub fn new(path: impl Into<String>) -> AppResult<Self> {
        let path = path.into();
        let trimmed = path.trim();
        if !trimmed.starts_with('/') {
            return Err(AppError::Validation(format!(
                "call path '{path}' must start with '/'"
            )));
        }

        Ok(Self {
            path: trimmed.to_owned(),
            expand: None,
            state: None,
        })
    }

    /// Returns a copy of this call requesting the given expansion.
    #[must_use]
    pub fn with_expand(mut self, expand: Expand) -> Self {
        self.expand = (!expand.is_empty()).then_some(expand);
        self
    }

    /// Returns a copy of this call carrying opaque client state.
    #[must_use]
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the requested expansion.
    #[must_use]
    pub fn expand(&self) -> Option<&Expand> {
        self.expand.as_ref()
    }

    /// Returns the opaque client state.
    #[must_use]
    pub fn state(&self) -> Option<&Value> {
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Call, Expand, ExpandLevel};

    #[test]
    fn call_path_must_be_app_relative() {
        assert!(Call::new("lookup").is_err());
        assert!(Call::new("").is_err());
        assert!(Call::new(" /lookup ").is_ok());
    }

    #[test]
    fn call_serializes_only_present_parts() {
        let call = Call::new("/submit")
            .unwrap_or_else(|_| unreachable!())
            .with_expand(
                Expand::none()
                    .app(ExpandLevel::All)
                    .acting_user(ExpandLevel::RequiredId),
            );

        let serialized = serde_json::to_value(&call).unwrap_or_default();
        assert_eq!(
            serialized,
            json!({"path": "/submit", "expand": {"app": "all", "acting_user": "+id"}})
        );
    }

    #[test]
    fn parsed_call_is_validated() {
        let relative: Result<Call, _> = serde_json::from_value(json!({"path": "lookup"}));
        let parsed: Result<Call, _> = serde_json::from_value(json!({
            "path": "/install",
            "expand": {"app": "all", "acting_user": "summary"}
        }));

        assert!(relative.is_err());
        let parsed = parsed.unwrap_or_else(|_| unreachable!());
        assert_eq!(
            parsed.expand().and_then(Expand::app_level),
            Some(ExpandLevel::All)
        );
        assert_eq!(
            parsed.expand().and_then(Expand::acting_user_level),
            Some(ExpandLevel::Summary)
        );
    }

    #[test]
    fn empty_expand_is_dropped() {
        let call = Call::new("/bindings")
            .unwrap_or_else(|_| unreachable!())
            .with_expand(Expand::none());
        assert!(call.expand().is_none());
    }

    #[test]
    fn state_round_trips_untouched() {
        let state = json!({"step": 2, "nested": ["a", null]});
        let call = Call::new("/dynamic_source")
            .unwrap_or_else(|_| unreachable!())
            .with_state(state.clone());

        let encoded = serde_json::to_string(&call).unwrap_or_default();
        let decoded: Result<Call, _> = serde_json::from_str(&encoded);
        assert!(decoded.is_ok());
        assert_eq!(
            decoded.unwrap_or_else(|_| unreachable!()).state(),
            Some(&state)
        );
    }
}
