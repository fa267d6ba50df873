use std::collections::HashSet;

use dynaform_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::call::Call;
use crate::field::Field;

/// Form definition rendered by the host as a modal or command.
///
/// Forms are values: builders consume `self` and return the next form, so a
/// shared template is only ever read and cloned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FormWire")]
pub struct Form {
    title: NonEmptyString,
    icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    footer: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submit: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submit_buttons: Option<String>,
}

#[derive(Deserialize)]
struct FormWire {
    title: NonEmptyString,
    icon: String,
    #[serde(default)]
    header: Option<String>,
    #[serde(default)]
    footer: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default)]
    source: Option<Call>,
    #[serde(default)]
    submit: Option<Call>,
    #[serde(default)]
    submit_buttons: Option<String>,
}

impl TryFrom<FormWire> for Form {
    type Error = AppError;

    fn try_from(wire: FormWire) -> Result<Self, Self::Error> {
        let mut form = Self::new(wire.title, wire.icon, wire.fields)?;
        form.header = wire.header;
        form.footer = wire.footer;
        form.source = wire.source;
        form.submit = wire.submit;

        match wire.submit_buttons {
            Some(field_name) => form.with_submit_buttons(field_name),
            None => Ok(form),
        }
    }
}

impl Form {
    /// Creates a validated form.
    pub fn new(
        title: impl Into<String>,
        icon: impl Into<String>,
        fields: Vec<Field>,
    ) -> AppResult<Self> {
        let mut seen_field_names = HashSet::new();
        for field in &fields {
            if !seen_field_names.insert(field.name()) {
                return Err(AppError::Validation(format!(
                    "duplicate field '{}' in form",
                    field.name()
                )));
            }
        }

        Ok(Self {
            title: NonEmptyString::new(title)?,
            icon: icon.into(),
            header: None,
            footer: None,
            fields,
            source: None,
            submit: None,
            submit_buttons: None,
        })
    }

    /// Sets the modal header.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the modal footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Sets the call used to (re)fetch the form definition.
    #[must_use]
    pub fn with_source(mut self, source: Call) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the call made when the form is submitted.
    #[must_use]
    pub fn with_submit(mut self, submit: Call) -> Self {
        self.submit = Some(submit);
        self
    }

    /// Renders the options of a select field as submit buttons.
    pub fn with_submit_buttons(mut self, field_name: impl Into<String>) -> AppResult<Self> {
        let field_name = field_name.into();
        let is_select = self
            .field(field_name.as_str())
            .is_some_and(|field| field.kind().is_select());
        if !is_select {
            return Err(AppError::Validation(format!(
                "submit_buttons must reference a select field, got '{field_name}'"
            )));
        }

        self.submit_buttons = Some(field_name);
        Ok(self)
    }

    /// Returns a copy of this form where `field_name` holds `value`.
    pub fn with_field_value(mut self, field_name: &str, value: Value) -> AppResult<Self> {
        let position = self
            .fields
            .iter()
            .position(|field| field.name() == field_name)
            .ok_or_else(|| {
                AppError::NotFound(format!("field '{field_name}' is not part of the form"))
            })?;

        let field = self.fields.remove(position);
        self.fields.insert(position, field.with_value(value));
        Ok(self)
    }

    /// Returns a copy of this form with `fields` appended in order.
    ///
    /// Fields whose name is already present are skipped, so appending the
    /// same dependents twice leaves the form unchanged.
    #[must_use]
    pub fn with_appended_fields<'a>(mut self, fields: impl IntoIterator<Item = &'a Field>) -> Self {
        for field in fields {
            if self.field(field.name()).is_none() {
                self.fields.push(field.clone());
            }
        }

        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the icon path or URL.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }

    /// Returns fields in rendering order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the source call.
    #[must_use]
    pub fn source(&self) -> Option<&Call> {
        self.source.as_ref()
    }

    /// Returns the submit call.
    #[must_use]
    pub fn submit(&self) -> Option<&Call> {
        self.submit.as_ref()
    }

    /// Returns every call the form references: source, submit, then field lookups.
    #[must_use]
    pub fn calls(&self) -> Vec<&Call> {
        self.source
            .iter()
            .chain(self.submit.iter())
            .chain(self.fields.iter().filter_map(Field::lookup))
            .collect()
    }
}
