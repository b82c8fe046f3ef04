use crate::logic::Operator;
use itertools::Itertools;
use thiserror::Error;

/// A single authoring problem found while validating navigation logic.
///
/// These are never fatal. The validator collects every issue it finds and the
/// `Display` text of each one is what the editing surface shows to the author.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    #[error("Rule {position}: no field selected")]
    NoFieldSelected { position: usize },

    #[error("Rule {position}: field '{field_id}' does not belong to section '{section_id}'")]
    FieldNotInSection {
        position: usize,
        field_id: String,
        section_id: String,
    },

    #[error("Rule {position}: operator '{operator}' cannot be used with a {field_type} field")]
    OperatorNotAllowed {
        position: usize,
        operator: Operator,
        field_type: String,
    },

    #[error("Rule {position}: a value is required for '{operator}'")]
    EmptyValue { position: usize, operator: Operator },

    #[error("Rule {position}: '{value}' is not one of the options of field '{field_id}'")]
    UnknownOption {
        position: usize,
        field_id: String,
        value: String,
    },

    #[error("Rule {position}: '{value}' is not a number")]
    NotANumber { position: usize, value: String },

    #[error("Rule {position}: range {low}..{high} is inverted")]
    InvertedRange {
        position: usize,
        low: String,
        high: String,
    },

    #[error("Rule {position}: {value} is outside the field's range {min}..{max}")]
    OutOfRange {
        position: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Rule {position}: rule id '{rule_id}' is used more than once")]
    DuplicateRuleId { position: usize, rule_id: String },

    #[error("Rule {position}: target section '{target}' does not exist")]
    UnknownRuleTarget { position: usize, target: String },

    #[error("Default target section '{target}' does not exist")]
    UnknownDefaultTarget { target: String },

    #[error("Rule {position}: a section cannot navigate to itself")]
    RuleSelfLoop { position: usize },

    #[error("Default target: a section cannot navigate to itself")]
    DefaultSelfLoop,

    #[error("Conditional navigation needs at least one rule")]
    NoRules,

    #[error("Navigation creates a loop: {}", format_cycle(.sections))]
    Cycle { sections: Vec<String> },

    #[error("Section '{section_id}': {issue}")]
    InSection {
        section_id: String,
        issue: Box<ValidationIssue>,
    },
}

fn format_cycle(sections: &[String]) -> String {
    match sections.first() {
        Some(first) => format!("{} -> {}", sections.iter().join(" -> "), first),
        None => String::new(),
    }
}

/// A non-blocking observation about the navigation graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    #[error("Section '{0}' can never be reached from the first section")]
    Unreachable(String),
}

/// Errors caused by a malformed call into the validator or the form aggregate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogicError {
    #[error("Section '{0}' is not part of the form")]
    UnknownSection(String),

    #[error("Section '{0}' is defined more than once")]
    DuplicateSection(String),

    #[error("Navigation logic was supplied for section '{0}', which is not part of the form")]
    OrphanSpec(String),
}

/// Precondition violations detected by the runtime evaluator.
///
/// These can only occur when the caller passes data that is inconsistent with
/// the form it validated, so they indicate an integration bug and must never be
/// surfaced to a respondent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("No section with order {0} exists in the ordered section list")]
    OrderNotFound(i32),

    #[error("Section '{0}' is not part of the form")]
    UnknownSection(String),

    #[error("Rule '{rule_id}' tests field '{field_id}', which is not part of section '{section_id}'")]
    FieldNotInSection {
        rule_id: String,
        field_id: String,
        section_id: String,
    },
}

/// Errors that can occur when converting a caller-specific format into a `FormDefinition`.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to parse form JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid form data: {0}")]
    Invalid(String),
}
