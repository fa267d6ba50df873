use std::sync::Arc;

use dynaform_application::{
    BindingService, FormFlow, LifecycleService, LookupService, ManifestService, SubmissionService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub form_flow: Arc<FormFlow>,
    pub lookup_service: LookupService,
    pub submission_service: SubmissionService,
    pub binding_service: BindingService,
    pub manifest_service: ManifestService,
    pub lifecycle_service: LifecycleService,
}
