use std::sync::Arc;

use dynaform_application::{
    BindingService, FormFlow, LifecycleService, LookupService, ManifestService, OptionLookup,
    SubmissionService,
};
use dynaform_core::AppError;
use dynaform_infrastructure::HttpOptionLookup;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::api_router::CALL_PATHS;
use crate::app_definition;
use crate::state::AppState;

pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let form_flow = app_definition::form_flow()?;
    let binding_service = BindingService::new(app_definition::bindings(
        form_flow.template().clone(),
    )?)?;
    let manifest_service =
        ManifestService::new(app_definition::manifest(&config.root_url)?, CALL_PATHS)?;

    manifest_service.validate_calls(form_flow.calls())?;
    manifest_service.validate_bindings(binding_service.tree())?;

    Ok(AppState {
        form_flow: Arc::new(form_flow),
        lookup_service: LookupService::new(build_option_lookup(config)?, config.lookup_timeout),
        submission_service: SubmissionService::new(app_definition::SUBMIT_SUMMARY)?,
        binding_service,
        manifest_service,
        lifecycle_service: LifecycleService::new(),
    })
}

fn build_option_lookup(config: &ApiConfig) -> Result<Arc<dyn OptionLookup>, AppError> {
    match &config.lookup_remote_url {
        Some(remote_url) => {
            info!(%remote_url, "option lookups delegated to remote endpoint");
            Ok(Arc::new(HttpOptionLookup::new(
                reqwest::Client::new(),
                remote_url.as_str(),
            )))
        }
        None => Ok(Arc::new(app_definition::option_catalogue()?)),
    }
}
