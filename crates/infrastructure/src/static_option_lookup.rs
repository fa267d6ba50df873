use std::collections::HashMap;

use async_trait::async_trait;
use dynaform_application::OptionLookup;
use dynaform_core::AppResult;
use dynaform_domain::SelectOption;

/// In-process option catalogue keyed by field name.
#[derive(Debug, Default)]
pub struct StaticOptionLookup {
    options: HashMap<String, Vec<SelectOption>>,
}

impl StaticOptionLookup {
    /// Creates a catalogue from a field name to options map.
    #[must_use]
    pub fn new(options: HashMap<String, Vec<SelectOption>>) -> Self {
        Self { options }
    }

    /// Returns a catalogue extended with options for one more field.
    #[must_use]
    pub fn with_field(mut self, field_name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        self.options.insert(field_name.into(), options);
        self
    }
}

#[async_trait]
impl OptionLookup for StaticOptionLookup {
    async fn lookup(&self, field_name: &str, query: Option<&str>) -> AppResult<Vec<SelectOption>> {
        Ok(self
            .options
            .get(field_name)
            .map(|options| {
                options
                    .iter()
                    .filter(|option| option.matches(query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
