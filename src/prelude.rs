//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the michi crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use michi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let definition = FormDefinition::from_file("path/to/form.json")?;
//! let logic = FormLogic::from_definition(definition, Validator::default())?;
//!
//! let report = logic.validate_all()?;
//! println!("valid: {}, errors: {:?}", report.valid, report.errors);
//!
//! let mut answers = AHashMap::new();
//! answers.insert("q1".to_string(), AnswerValue::from("yes"));
//! let outcome = logic.resolve_next("s1", &answers)?;
//! println!("next: {}", outcome);
//! # Ok(())
//! # }
//! ```

// Rule model
pub use crate::logic::{
    AnswerValue, Condition, ConditionalRule, FieldFamily, FieldType, NavigationKind,
    NavigationSpec, NavigationTarget, Operator, create_default_logic, create_empty_rule,
    operators_for,
};

// Forms and their navigation state
pub use crate::form::{
    Field, FormDefinition, FormLogic, IntoForm, Section, SectionRemoval, retarget_references,
};

// Validation and evaluation
pub use crate::evaluator::{Answers, Decision, Evaluator, NavigationOutcome, resolve_next};
pub use crate::validator::{NavigationGraph, ValidationResult, Validator, validate};

// Error types
pub use crate::error::{
    ConversionError, EvaluationError, LogicError, ValidationIssue, ValidationWarning,
};

// Trace formatting
pub use crate::trace::{EvaluationTrace, TraceFormatter};

// Map type used for answers and stored specs
pub use ahash::AHashMap;

// Result type alias for convenience; the error type can still be named explicitly
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
