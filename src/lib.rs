//! # Michi - Section Navigation Logic for Multi-Section Forms
//!
//! **Michi** decides which section of a multi-section form a respondent sees
//! next. Each section carries a navigation spec: either linear (go to the next
//! section in order) or conditional (an ordered list of rules keyed on the
//! section's answers, with a default target when none match). Before a spec is
//! stored, Michi validates it against the whole form so that no author can
//! build a dead end or an infinite loop.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Data**: Bring sections, fields and stored specs into a
//!     `FormDefinition`, directly or by implementing `IntoForm` for your own format.
//! 2.  **Validate on Save**: Run a proposed spec through `Validator::validate`
//!     (or `FormLogic::accept`), which checks the spec's rules and searches the
//!     complete navigation graph for cycles. Every problem is reported at once.
//! 3.  **Resolve at Fill Time**: When a respondent completes a section, hand its
//!     spec and their answers to an `Evaluator` to get the next section or a
//!     submit signal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use michi::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let sections = vec![
//!         Section::new("s1", 1).with_field(
//!             Field::new("q1", FieldType::MultipleChoice).with_options(["yes", "no"]),
//!         ),
//!         Section::new("s2", 2),
//!         Section::new("s3", 3),
//!     ];
//!
//!     // Skip straight to s3 when q1 is answered "yes".
//!     let rule = ConditionalRule::empty("r1", "q1", FieldType::MultipleChoice)
//!         .with_condition(Condition::Equals("yes".to_string()))
//!         .with_target(NavigationTarget::section("s3"));
//!     let spec = NavigationSpec::conditional(vec![rule], NavigationTarget::Next);
//!
//!     let stored = AHashMap::new();
//!     let result = Validator::default().validate(&sections, &stored, "s1", &spec)?;
//!     assert!(result.valid, "{:?}", result.errors);
//!
//!     let mut answers = AHashMap::new();
//!     answers.insert("q1".to_string(), AnswerValue::from("yes"));
//!
//!     let decision = Evaluator::new(&sections).explain(&spec, 1, &answers)?;
//!     println!("-> {} ({})", decision.outcome, decision.reason);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod evaluator;
pub mod form;
pub mod logic;
pub mod prelude;
pub mod trace;
pub mod validator;
