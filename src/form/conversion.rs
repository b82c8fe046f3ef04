use super::definition::FormDefinition;
use crate::error::ConversionError;

/// A trait for custom form models that can be converted into a `FormDefinition`.
///
/// Editing surfaces usually store sections, fields and navigation logic in
/// their own shape (database rows, JSON documents with UI-specific keys).
/// Implementing this trait is the translation layer that lets the validator
/// and the evaluator work on that data.
///
/// # Example
///
/// ```rust,no_run
/// use michi::prelude::*;
/// use michi::error::ConversionError;
///
/// struct MyPage { key: String, position: i32 }
/// struct MyForm { pages: Vec<MyPage> }
///
/// impl IntoForm for MyForm {
///     fn into_form(self) -> Result<FormDefinition, ConversionError> {
///         let sections = self
///             .pages
///             .into_iter()
///             .map(|page| Section::new(page.key, page.position))
///             .collect();
///         Ok(FormDefinition { sections, ..Default::default() })
///     }
/// }
/// ```
pub trait IntoForm {
    /// Consumes the object and converts it into a form definition.
    fn into_form(self) -> Result<FormDefinition, ConversionError>;
}

impl IntoForm for FormDefinition {
    fn into_form(self) -> Result<FormDefinition, ConversionError> {
        Ok(self)
    }
}
