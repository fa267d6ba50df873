use std::collections::HashSet;

use dynaform_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::call::Call;
use crate::is_false;

/// One selectable option of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    label: NonEmptyString,
    value: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon_data: Option<String>,
}

impl SelectOption {
    /// Creates a validated option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            label: NonEmptyString::new(label)?,
            value: NonEmptyString::new(value)?,
            icon_data: None,
        })
    }

    /// Returns a copy of this option with an icon.
    #[must_use]
    pub fn with_icon_data(mut self, icon_data: impl Into<String>) -> Self {
        self.icon_data = Some(icon_data.into());
        self
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the submitted value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Returns the icon, if any.
    #[must_use]
    pub fn icon_data(&self) -> Option<&str> {
        self.icon_data.as_deref()
    }

    /// Returns whether the label or value contains `query`, ignoring case.
    ///
    /// A missing or blank query matches every option.
    #[must_use]
    pub fn matches(&self, query: Option<&str>) -> bool {
        let Some(query) = query.map(str::trim).filter(|query| !query.is_empty()) else {
            return true;
        };

        let query = query.to_lowercase();
        self.label().to_lowercase().contains(&query) || self.value().to_lowercase().contains(&query)
    }
}

/// Input flavour of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSubtype {
    /// Single line input.
    Input,
    /// Multi-line input.
    Textarea,
    /// Email address.
    Email,
    /// Numeric input.
    Number,
    /// Phone number.
    Tel,
    /// URL.
    Url,
}

/// Field kinds and the attributes valid for each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text {
        /// Input flavour.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtype: Option<TextSubtype>,
        /// Minimum accepted length.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u32>,
        /// Maximum accepted length.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    /// Select over options known when the form is built.
    StaticSelect {
        /// Options in display order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<SelectOption>,
        /// Optional call that replaces the static options.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lookup: Option<Call>,
        /// Whether several options may be picked.
        #[serde(default, skip_serializing_if = "is_false")]
        multiselect: bool,
    },
    /// Select whose options are fetched through a lookup call.
    DynamicSelect {
        /// Call that produces the options.
        lookup: Call,
        /// Whether several options may be picked.
        #[serde(default, skip_serializing_if = "is_false")]
        multiselect: bool,
    },
    /// Checkbox.
    Bool,
    /// Channel picker.
    Channel {
        /// Whether several channels may be picked.
        #[serde(default, skip_serializing_if = "is_false")]
        multiselect: bool,
    },
    /// Read-only markdown block.
    Markdown,
}

impl FieldKind {
    /// Creates a plain text kind.
    #[must_use]
    pub fn text() -> Self {
        Self::Text {
            subtype: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Creates a single-choice static select kind.
    #[must_use]
    pub fn static_select(options: Vec<SelectOption>) -> Self {
        Self::StaticSelect {
            options,
            lookup: None,
            multiselect: false,
        }
    }

    /// Creates a single-choice dynamic select kind.
    #[must_use]
    pub fn dynamic_select(lookup: Call) -> Self {
        Self::DynamicSelect {
            lookup,
            multiselect: false,
        }
    }

    /// Returns the wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::StaticSelect { .. } => "static_select",
            Self::DynamicSelect { .. } => "dynamic_select",
            Self::Bool => "bool",
            Self::Channel { .. } => "channel",
            Self::Markdown => "markdown",
        }
    }

    /// Returns whether the kind is a select variant.
    #[must_use]
    pub fn is_select(&self) -> bool {
        matches!(self, Self::StaticSelect { .. } | Self::DynamicSelect { .. })
    }

    fn validate(&self, field_name: &str) -> AppResult<()> {
        match self {
            Self::Text {
                min_length: Some(min),
                max_length: Some(max),
                ..
            } if min > max => Err(AppError::Validation(format!(
                "field '{field_name}' has min_length {min} greater than max_length {max}"
            ))),
            Self::StaticSelect {
                options, lookup, ..
            } => {
                if options.is_empty() && lookup.is_none() {
                    return Err(AppError::Validation(format!(
                        "static_select field '{field_name}' needs options or a lookup call"
                    )));
                }

                let mut seen_values = HashSet::new();
                for option in options {
                    if !seen_values.insert(option.value()) {
                        return Err(AppError::Validation(format!(
                            "duplicate option value '{}' in field '{field_name}'",
                            option.value()
                        )));
                    }
                }

                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// One input of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldWire")]
pub struct Field {
    name: NonEmptyString,
    #[serde(flatten)]
    kind: FieldKind,
    #[serde(default, skip_serializing_if = "is_false")]
    is_required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    readonly: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    refresh: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modal_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<i32>,
}

#[derive(Deserialize)]
struct FieldWire {
    name: NonEmptyString,
    #[serde(flatten)]
    kind: FieldKind,
    #[serde(default)]
    is_required: bool,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    refresh: bool,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    modal_label: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    position: Option<i32>,
}

impl TryFrom<FieldWire> for Field {
    type Error = AppError;

    fn try_from(wire: FieldWire) -> Result<Self, Self::Error> {
        let mut field = Self::new(wire.name, wire.kind)?;
        field.is_required = wire.is_required;
        field.readonly = wire.readonly;
        field.refresh = wire.refresh;
        field.value = wire.value;
        field.label = wire.label;
        field.modal_label = wire.modal_label;
        field.hint = wire.hint;
        field.description = wire.description;
        field.position = wire.position;
        Ok(field)
    }
}

impl Field {
    /// Creates a validated field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        kind.validate(name.as_str())?;

        Ok(Self {
            name,
            kind,
            is_required: false,
            readonly: false,
            refresh: false,
            value: None,
            label: None,
            modal_label: None,
            hint: None,
            description: None,
            position: None,
        })
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Marks the field as read-only.
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Asks the client to re-resolve the form whenever this field changes.
    #[must_use]
    pub fn refreshing(mut self) -> Self {
        self.refresh = true;
        self
    }

    /// Sets the short label used by autocomplete.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the label shown in modal dialogs.
    #[must_use]
    pub fn with_modal_label(mut self, modal_label: impl Into<String>) -> Self {
        self.modal_label = Some(modal_label.into());
        self
    }

    /// Sets the hint text.
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

    /// Sets the autocomplete position.
    #[must_use]
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns a copy of this field holding `value`.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the field kind.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns whether a value is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Returns whether the field is read-only.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Returns whether a change re-resolves the form.
    #[must_use]
    pub fn refresh(&self) -> bool {
        self.refresh
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns the modal label.
    #[must_use]
    pub fn modal_label(&self) -> Option<&str> {
        self.modal_label.as_deref()
    }

    /// Returns the lookup call for select fields that have one.
    #[must_use]
    pub fn lookup(&self) -> Option<&Call> {
        match &self.kind {
            FieldKind::DynamicSelect { lookup, .. } => Some(lookup),
            FieldKind::StaticSelect { lookup, .. } => lookup.as_ref(),
            _ => None,
        }
    }

    /// Returns the statically known options.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::StaticSelect { options, .. } => options,
            _ => &[],
        }
    }
}
