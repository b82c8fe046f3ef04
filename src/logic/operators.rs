use super::{FieldFamily, FieldType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A comparison a navigation rule applies to a field's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    AnyOf,
    AllOf,
    NoneOf,
    GreaterThan,
    LessThan,
    Between,
}

const SINGLE_CHOICE: &[Operator] = &[Operator::Equals, Operator::NotEquals];
const MULTI_CHOICE: &[Operator] = &[Operator::AnyOf, Operator::AllOf, Operator::NoneOf];
const NUMERIC: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::Between,
];

impl Operator {
    /// The label shown next to the operator in the rule editor.
    pub fn label(self) -> &'static str {
        match self {
            Operator::Equals => "is",
            Operator::NotEquals => "is not",
            Operator::AnyOf => "is any of",
            Operator::AllOf => "includes all of",
            Operator::NoneOf => "is none of",
            Operator::GreaterThan => "is greater than",
            Operator::LessThan => "is less than",
            Operator::Between => "is between",
        }
    }

    /// The wire name of the operator, as used in serialized rules.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::AnyOf => "any_of",
            Operator::AllOf => "all_of",
            Operator::NoneOf => "none_of",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::Between => "between",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the operators a rule on a field of `field_type` may use.
///
/// The first entry is the default for newly created rules. Field types that
/// cannot drive navigation yield an empty slice.
pub fn operators_for(field_type: FieldType) -> &'static [Operator] {
    match field_type.family() {
        Some(FieldFamily::SingleChoice) => SINGLE_CHOICE,
        Some(FieldFamily::MultiChoice) => MULTI_CHOICE,
        Some(FieldFamily::Numeric) => NUMERIC,
        None => &[],
    }
}

/// Returns `(operator, label)` pairs for populating an operator picker.
pub fn operator_options(field_type: FieldType) -> Vec<(Operator, &'static str)> {
    operators_for(field_type)
        .iter()
        .map(|op| (*op, op.label()))
        .collect()
}

pub fn is_operator_allowed(field_type: FieldType, operator: Operator) -> bool {
    operators_for(field_type).contains(&operator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_operator_per_family() {
        assert_eq!(operators_for(FieldType::Dropdown)[0], Operator::Equals);
        assert_eq!(operators_for(FieldType::Checkboxes)[0], Operator::AnyOf);
        assert_eq!(operators_for(FieldType::LinearScale)[0], Operator::Equals);
    }

    #[test]
    fn test_unbounded_fields_have_no_operators() {
        assert!(operators_for(FieldType::Paragraph).is_empty());
        assert!(operators_for(FieldType::Unknown).is_empty());
        assert!(operator_options(FieldType::Email).is_empty());
    }

    #[test]
    fn test_operator_wire_name_matches_serde() {
        for op in NUMERIC.iter().chain(MULTI_CHOICE) {
            let json = serde_json::to_string(op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }
}
