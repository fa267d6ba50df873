//! Application services and ports.

#![forbid(unsafe_code)]

mod binding_service;
mod form_flow;
mod lifecycle_service;
mod lookup_ports;
mod lookup_service;
mod manifest_service;
mod submission_service;

pub use binding_service::BindingService;
pub use form_flow::{FlowStep, FlowTransition, FormFlow, ResolveEvent};
pub use lifecycle_service::{LifecycleEvent, LifecycleService};
pub use lookup_ports::OptionLookup;
pub use lookup_service::{LookupService, lookup_items_response};
pub use manifest_service::ManifestService;
pub use submission_service::SubmissionService;
