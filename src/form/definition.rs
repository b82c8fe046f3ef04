use crate::error::ConversionError;
use crate::logic::{FieldType, NavigationSpec};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// A field of a section, as far as navigation rules care about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// The selectable values of a choice field.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Field {
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            field_type,
            options: Vec::new(),
            min: None,
            max: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// A page of a multi-section form. `order` defines the linear sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub order: i32,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(id: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            order,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

/// Finds the section that follows `order` in the linear sequence: the one with
/// the smallest order strictly greater than `order`. Ties go to the section
/// listed first.
pub fn next_in_order(sections: &[Section], order: i32) -> Option<&Section> {
    sections
        .iter()
        .filter(|s| s.order > order)
        .fold(None, |best: Option<&Section>, s| match best {
            Some(b) if b.order <= s.order => Some(b),
            _ => Some(s),
        })
}

/// The sections of a form with the navigation spec stored for each of them.
///
/// Sections without an entry in `logic` use the default linear spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub logic: AHashMap<String, NavigationSpec>,
}

impl FormDefinition {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, ConversionError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConversionError::Invalid(format!("Could not read file '{}': {}", path, e))
        })?;
        Self::from_json(&content)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_in_order_skips_gaps() {
        let sections = vec![
            Section::new("c", 10),
            Section::new("a", 1),
            Section::new("b", 5),
        ];
        assert_eq!(next_in_order(&sections, 1).map(|s| s.id.as_str()), Some("b"));
        assert_eq!(next_in_order(&sections, 5).map(|s| s.id.as_str()), Some("c"));
        assert!(next_in_order(&sections, 10).is_none());
    }

    #[test]
    fn test_next_in_order_tie_prefers_first_listed() {
        let sections = vec![
            Section::new("a", 1),
            Section::new("b", 2),
            Section::new("c", 2),
        ];
        assert_eq!(next_in_order(&sections, 1).map(|s| s.id.as_str()), Some("b"));
    }
}
