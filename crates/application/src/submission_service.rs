use dynaform_core::{AppResult, NonEmptyString};
use dynaform_domain::CallResponse;
use serde_json::{Map, Value};

/// Application service for terminal form submissions.
///
/// Submissions are accepted as-is: this protocol version has no
/// server-side validation failure path.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    summary: NonEmptyString,
}

impl SubmissionService {
    /// Creates a submission service answering with `summary`.
    pub fn new(summary: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            summary: NonEmptyString::new(summary)?,
        })
    }

    /// Accepts the final values of a form.
    #[must_use]
    pub fn submit(&self, _values: &Map<String, Value>) -> CallResponse {
        CallResponse::ok_text(self.summary.as_str())
    }
}
