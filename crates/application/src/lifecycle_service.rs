use std::str::FromStr;

use dynaform_core::AppError;
use dynaform_domain::CallResponse;
use serde_json::json;

/// Installation lifecycle notifications sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The app was installed.
    Install,
    /// The app is about to be uninstalled.
    Uninstall,
    /// The app was enabled.
    Enable,
    /// The app was disabled.
    Disable,
}

impl LifecycleEvent {
    /// Returns stable event name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl FromStr for LifecycleEvent {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "install" => Ok(Self::Install),
            "uninstall" => Ok(Self::Uninstall),
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            _ => Err(AppError::Validation(format!(
                "unknown lifecycle event '{value}'"
            ))),
        }
    }
}

/// Application service answering lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct LifecycleService;

impl LifecycleService {
    /// Creates a lifecycle service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Acknowledges a lifecycle event.
    #[must_use]
    pub fn on_event(&self, event: LifecycleEvent) -> CallResponse {
        match event {
            LifecycleEvent::Install => CallResponse::ok_data(json!({})),
            LifecycleEvent::Uninstall => CallResponse::ok_text("No, don't uninstall me!"),
            LifecycleEvent::Enable => CallResponse::ok_text("I'm back up again"),
            LifecycleEvent::Disable => CallResponse::ok_text("Taking a little nap"),
        }
    }
}
