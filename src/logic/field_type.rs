use serde::{Deserialize, Serialize};
use std::fmt;

/// The input type of a form field.
///
/// Only choice and numeric/scale fields have a bounded value domain and can
/// therefore drive navigation rules; see [`FieldType::family`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    ShortAnswer,
    Paragraph,
    MultipleChoice,
    Checkboxes,
    Dropdown,
    Rating,
    LinearScale,
    Date,
    Time,
    Email,
    Number,
    FileUpload,
    /// Any type string this crate does not recognize.
    #[serde(other)]
    Unknown,
}

/// Groups of field types that share the same set of rule operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFamily {
    /// Exactly one value is selected from a fixed option list.
    SingleChoice,
    /// Any number of values is selected from a fixed option list.
    MultiChoice,
    /// A bounded numeric answer.
    Numeric,
}

impl FieldType {
    /// Returns the operator family of this field type, or `None` when the field
    /// has no bounded value domain and cannot drive navigation.
    pub fn family(self) -> Option<FieldFamily> {
        match self {
            FieldType::MultipleChoice | FieldType::Dropdown => Some(FieldFamily::SingleChoice),
            FieldType::Checkboxes => Some(FieldFamily::MultiChoice),
            FieldType::Rating | FieldType::LinearScale => Some(FieldFamily::Numeric),
            _ => None,
        }
    }

    pub fn supports_navigation(self) -> bool {
        self.family().is_some()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::ShortAnswer => "short answer",
            FieldType::Paragraph => "paragraph",
            FieldType::MultipleChoice => "multiple choice",
            FieldType::Checkboxes => "checkboxes",
            FieldType::Dropdown => "dropdown",
            FieldType::Rating => "rating",
            FieldType::LinearScale => "linear scale",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::FileUpload => "file upload",
            FieldType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
