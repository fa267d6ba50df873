//! Domain types of the remote form protocol.

#![forbid(unsafe_code)]

mod binding;
mod call;
mod field;
mod form;
mod manifest;
mod request;
mod response;

pub use binding::Binding;
pub use call::{Call, Expand, ExpandLevel};
pub use field::{Field, FieldKind, SelectOption, TextSubtype};
pub use form::Form;
pub use manifest::{HttpDeploy, Location, Manifest, ManifestCalls, Permission};
pub use request::CallRequest;
pub use response::{CallResponse, GENERIC_ERROR_TEXT};

fn is_false(value: &bool) -> bool {
    !*value
}
