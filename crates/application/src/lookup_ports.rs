use async_trait::async_trait;
use dynaform_core::AppResult;
use dynaform_domain::SelectOption;

/// Port producing candidate options for a select field.
///
/// Implementations return an empty list, not an error, when nothing matches.
#[async_trait]
pub trait OptionLookup: Send + Sync {
    /// Returns options for `field_name`, narrowed by the free-text `query`.
    async fn lookup(&self, field_name: &str, query: Option<&str>)
    -> AppResult<Vec<SelectOption>>;
}
