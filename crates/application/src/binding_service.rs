use std::sync::Arc;

use dynaform_core::{AppError, AppResult};
use dynaform_domain::{Binding, CallResponse, Location};
use serde_json::Value;

/// Application service exposing the static binding tree.
#[derive(Debug, Clone)]
pub struct BindingService {
    bindings: Arc<Vec<Binding>>,
}

impl BindingService {
    /// Creates a binding service; top-level bindings must sit on host locations.
    pub fn new(bindings: Vec<Binding>) -> AppResult<Self> {
        for binding in &bindings {
            binding.location().parse::<Location>().map_err(|_| {
                AppError::Validation(format!(
                    "top-level binding location '{}' is not a host location",
                    binding.location()
                ))
            })?;
        }

        Ok(Self {
            bindings: Arc::new(bindings),
        })
    }

    /// Returns the binding tree.
    #[must_use]
    pub fn tree(&self) -> &[Binding] {
        &self.bindings
    }

    /// Answers a bindings call.
    ///
    /// The host sends the expanded context with every call; the tree does
    /// not depend on it.
    pub fn bindings(&self, _context: Option<&Value>) -> AppResult<CallResponse> {
        let data = serde_json::to_value(self.bindings.as_ref()).map_err(|error| {
            AppError::Internal(format!("failed to serialize bindings: {error}"))
        })?;

        Ok(CallResponse::ok_data(data))
    }
}

#[cfg(test)]
mod tests {
    use dynaform_domain::{Binding, Call, CallResponse};
    use serde_json::json;

    use super::BindingService;

    fn tree() -> Vec<Binding> {
        let leaf = Binding::submit(
            "send-button",
            "send hello message",
            Call::new("/hello").unwrap_or_else(|_| unreachable!()),
        )
        .unwrap_or_else(|_| unreachable!());
        vec![Binding::group("/channel_header", vec![leaf]).unwrap_or_else(|_| unreachable!())]
    }

    #[test]
    fn top_level_location_must_be_a_host_location() {
        let leaf = Binding::submit(
            "send-button",
            "send",
            Call::new("/hello").unwrap_or_else(|_| unreachable!()),
        )
        .unwrap_or_else(|_| unreachable!());
        assert!(BindingService::new(vec![leaf]).is_err());
    }

    #[test]
    fn bindings_are_independent_of_context() {
        let service = BindingService::new(tree()).unwrap_or_else(|_| unreachable!());

        let without_context = service.bindings(None);
        let context = json!({"acting_user": {"id": "u1"}, "channel": {"id": "c1"}});
        let with_context = service.bindings(Some(&context));

        assert!(without_context.is_ok());
        assert!(with_context.is_ok());
        assert_eq!(
            without_context.unwrap_or_else(|_| CallResponse::generic_error()),
            with_context.unwrap_or_else(|_| CallResponse::ok())
        );
    }

    #[test]
    fn bindings_response_carries_tree_as_data() {
        let service = BindingService::new(tree()).unwrap_or_else(|_| unreachable!());
        let response = service
            .bindings(None)
            .unwrap_or_else(|_| CallResponse::generic_error());

        let serialized = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(serialized["type"], json!("ok"));
        assert_eq!(serialized["data"][0]["location"], json!("/channel_header"));
        assert_eq!(service.tree().len(), 1);
    }
}
