use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::Form;
use crate::is_false;

/// Text returned for every protocol-level failure.
pub const GENERIC_ERROR_TEXT: &str = "Something went wrong.";

/// Outcome of a call, consumed by the client.
///
/// Each variant carries only the payload valid for its `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallResponse {
    /// The call succeeded.
    Ok {
        /// Markdown shown to the user.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Machine-readable result.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
        /// Whether the host should refetch bindings for the acting user.
        #[serde(default, skip_serializing_if = "is_false")]
        refresh_bindings: bool,
    },
    /// The call failed.
    Error {
        /// Failure shown to the user.
        text: String,
    },
    /// The client should render this form.
    Form {
        /// Form to render.
        form: Form,
    },
    /// The client should open a URL.
    Navigate {
        /// Destination.
        navigate_to_url: String,
        /// Whether to leave the host application.
        #[serde(default)]
        use_external_browser: bool,
    },
}

impl CallResponse {
    /// Empty success.
    #[must_use]
    pub fn ok() -> Self {
        Self::Ok {
            text: None,
            data: None,
            refresh_bindings: false,
        }
    }

    /// Success with a message for the user.
    #[must_use]
    pub fn ok_text(text: impl Into<String>) -> Self {
        Self::Ok {
            text: Some(text.into()),
            data: None,
            refresh_bindings: false,
        }
    }

    /// Success with a data payload.
    #[must_use]
    pub fn ok_data(data: Value) -> Self {
        Self::Ok {
            text: None,
            data: Some(data),
            refresh_bindings: false,
        }
    }

    /// Failure with a message for the user.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::Error { text: text.into() }
    }

    /// Failure that reveals nothing about the cause.
    #[must_use]
    pub fn generic_error() -> Self {
        Self::error(GENERIC_ERROR_TEXT)
    }

    /// Form to render.
    #[must_use]
    pub fn form(form: Form) -> Self {
        Self::Form { form }
    }

    /// Navigation to `url`.
    #[must_use]
    pub fn navigate(url: impl Into<String>, use_external_browser: bool) -> Self {
        Self::Navigate {
            navigate_to_url: url.into(),
            use_external_browser,
        }
    }

    /// Returns the wire name of the response type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::Error { .. } => "error",
            Self::Form { .. } => "form",
            Self::Navigate { .. } => "navigate",
        }
    }

    /// Returns the form carried by a form response.
    #[must_use]
    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Self::Form { form } => Some(form),
            _ => None,
        }
    }
}
