use dynaform_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::call::Call;
use crate::form::Form;

/// Where in the host UI a form or action is exposed.
///
/// Bindings form a tree: groups hold children, leaves hold either a submit
/// call or an inline form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BindingWire")]
pub struct Binding {
    location: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submit: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    form: Option<Form>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    bindings: Vec<Binding>,
}

#[derive(Deserialize)]
struct BindingWire {
    location: NonEmptyString,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    submit: Option<Call>,
    #[serde(default)]
    form: Option<Form>,
    #[serde(default)]
    bindings: Vec<Binding>,
}

impl TryFrom<BindingWire> for Binding {
    type Error = AppError;

    // A leaf carries exactly one of `submit` or `form`; a group only children.
    fn try_from(wire: BindingWire) -> Result<Self, Self::Error> {
        let label = wire.label.unwrap_or_default();
        let mut binding = match (wire.submit, wire.form) {
            (None, None) => {
                let mut group = Self::group(wire.location, wire.bindings)?;
                group.label = (!label.trim().is_empty()).then_some(label);
                group
            }
            (Some(submit), None) if wire.bindings.is_empty() => {
                Self::submit(wire.location, label, submit)?
            }
            (None, Some(form)) if wire.bindings.is_empty() => {
                Self::form(wire.location, label, form)?
            }
            _ => {
                return Err(AppError::Validation(format!(
                    "binding '{}' must hold either children, a submit call or a form",
                    wire.location.as_str()
                )));
            }
        };

        binding.icon = wire.icon;
        binding.hint = wire.hint;
        binding.description = wire.description;
        Ok(binding)
    }
}

impl Binding {
    /// Creates a group of child bindings under `location`.
    pub fn group(location: impl Into<String>, bindings: Vec<Binding>) -> AppResult<Self> {
        let location = NonEmptyString::new(location)?;
        if bindings.is_empty() {
            return Err(AppError::Validation(format!(
                "binding group '{}' must contain at least one binding",
                location.as_str()
            )));
        }

        Ok(Self::empty(location).with_children(bindings))
    }

    /// Creates a leaf that opens `form`.
    pub fn form(location: impl Into<String>, label: impl Into<String>, form: Form) -> AppResult<Self> {
        let mut binding = Self::empty(NonEmptyString::new(location)?);
        binding.label = Some(NonEmptyString::new(label)?.into());
        binding.form = Some(form);
        Ok(binding)
    }

    /// Creates a leaf that runs `submit` directly.
    pub fn submit(location: impl Into<String>, label: impl Into<String>, submit: Call) -> AppResult<Self> {
        let mut binding = Self::empty(NonEmptyString::new(location)?);
        binding.label = Some(NonEmptyString::new(label)?.into());
        binding.submit = Some(submit);
        Ok(binding)
    }

    fn empty(location: NonEmptyString) -> Self {
        Self {
            location,
            icon: None,
            label: None,
            hint: None,
            description: None,
            submit: None,
            form: None,
            bindings: Vec::new(),
        }
    }

    fn with_children(mut self, bindings: Vec<Binding>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Sets the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the submit call of a leaf.
    #[must_use]
    pub fn submit_call(&self) -> Option<&Call> {
        self.submit.as_ref()
    }

    /// Returns the inline form of a leaf.
    #[must_use]
    pub fn inline_form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    /// Returns child bindings.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns every call referenced by this binding and its descendants.
    #[must_use]
    pub fn calls(&self) -> Vec<&Call> {
        let mut calls: Vec<&Call> = self.submit.iter().collect();
        if let Some(form) = &self.form {
            calls.extend(form.calls());
        }
        for child in &self.bindings {
            calls.extend(child.calls());
        }

        calls
    }
}
