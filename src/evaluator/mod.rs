use crate::error::EvaluationError;
use crate::form::{Section, next_in_order};
use crate::logic::{AnswerValue, NavigationSpec, NavigationTarget};
use crate::trace::{EvaluationTrace, TraceFormatter};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

mod matcher;

/// Where the respondent goes after completing a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationOutcome {
    Section {
        #[serde(rename = "sectionId")]
        section_id: String,
    },
    Submit,
}

impl NavigationOutcome {
    pub fn section(id: impl Into<String>) -> Self {
        NavigationOutcome::Section {
            section_id: id.into(),
        }
    }
}

impl fmt::Display for NavigationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationOutcome::Section { section_id } => write!(f, "section '{}'", section_id),
            NavigationOutcome::Submit => write!(f, "submit"),
        }
    }
}

/// The result of resolving the next section, with an explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub outcome: NavigationOutcome,
    /// The id of the rule that decided, or `None` when the default target was used.
    pub matched_rule: Option<String>,
    /// A human-readable explanation of the decision.
    pub reason: String,
    /// Every step taken, in order. The last step is the decisive one.
    pub trace: Vec<EvaluationTrace>,
}

/// Read access to a respondent's answers, keyed by field id.
pub trait Answers {
    fn answer(&self, field_id: &str) -> Option<&AnswerValue>;
}

impl<S: BuildHasher> Answers for HashMap<String, AnswerValue, S> {
    fn answer(&self, field_id: &str) -> Option<&AnswerValue> {
        self.get(field_id)
    }
}

impl Answers for AHashMap<String, AnswerValue> {
    fn answer(&self, field_id: &str) -> Option<&AnswerValue> {
        self.get(field_id)
    }
}

/// Resolves the next section of a form at fill time.
///
/// An `Evaluator` borrows the form's sections and can be reused for any
/// number of resolutions. It performs no I/O and holds no state, so the same
/// inputs always produce the same outcome.
pub struct Evaluator<'a> {
    sections: &'a [Section],
}

impl<'a> Evaluator<'a> {
    pub fn new(sections: &'a [Section]) -> Self {
        Self { sections }
    }

    /// Resolves where a respondent goes after completing the section at
    /// `section_order`, whose navigation is `spec`.
    ///
    /// Rules of a conditional spec are tried in order and the first match
    /// wins; a rule whose field is unanswered does not match. When no rule
    /// matches, or the spec is linear, the default target is used.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::OrderNotFound` when no section has
    /// `section_order`, and `EvaluationError::FieldNotInSection` when an
    /// active rule tests a field the section does not own. Both mean the
    /// caller's data is inconsistent and must be treated as a bug, not shown
    /// to the respondent.
    pub fn explain<A>(
        &self,
        spec: &NavigationSpec,
        section_order: i32,
        answers: &A,
    ) -> Result<Decision, EvaluationError>
    where
        A: Answers + ?Sized,
    {
        let section = self
            .sections
            .iter()
            .find(|s| s.order == section_order)
            .ok_or(EvaluationError::OrderNotFound(section_order))?;
        self.explain_in(section, spec, answers)
    }

    fn explain_in<A>(
        &self,
        section: &Section,
        spec: &NavigationSpec,
        answers: &A,
    ) -> Result<Decision, EvaluationError>
    where
        A: Answers + ?Sized,
    {
        // Rules without a field never match and are rejected by the validator.
        if let Some(rule) = spec
            .active_rules()
            .iter()
            .find(|r| !r.field_id.is_empty() && section.field(&r.field_id).is_none())
        {
            return Err(EvaluationError::FieldNotInSection {
                rule_id: rule.id.clone(),
                field_id: rule.field_id.clone(),
                section_id: section.id.clone(),
            });
        }

        let section_order = section.order;
        let mut trace = Vec::with_capacity(spec.active_rules().len() + 1);
        for rule in spec.active_rules() {
            let answer = answers.answer(&rule.field_id).filter(|a| !a.is_blank());
            let matched = answer.is_some_and(|a| matcher::matches(&rule.condition, a));
            trace.push(EvaluationTrace::Rule {
                rule_id: rule.id.clone(),
                field_id: rule.field_id.clone(),
                condition: rule.condition.clone(),
                answer: answer.cloned(),
                matched,
                target: rule.target_section_id.clone(),
            });

            if matched {
                let outcome = self.resolve_target(&rule.target_section_id, section_order);
                tracing::debug!(rule = %rule.id, %outcome, "navigation rule matched");
                return Ok(Self::decide(outcome, Some(rule.id.clone()), trace));
            }
        }

        trace.push(EvaluationTrace::Default {
            target: spec.default_target.clone(),
            linear: !spec.is_conditional(),
        });
        let outcome = self.resolve_target(&spec.default_target, section_order);
        tracing::debug!(%outcome, "navigation fell through to default target");
        Ok(Self::decide(outcome, None, trace))
    }

    /// Like [`Evaluator::explain`], returning only the outcome.
    pub fn resolve_next<A>(
        &self,
        spec: &NavigationSpec,
        section_order: i32,
        answers: &A,
    ) -> Result<NavigationOutcome, EvaluationError>
    where
        A: Answers + ?Sized,
    {
        self.explain(spec, section_order, answers).map(|decision| decision.outcome)
    }

    /// Like [`Evaluator::explain`], locating the current section by id.
    pub fn explain_section<A>(
        &self,
        section_id: &str,
        spec: &NavigationSpec,
        answers: &A,
    ) -> Result<Decision, EvaluationError>
    where
        A: Answers + ?Sized,
    {
        let section = self
            .sections
            .iter()
            .find(|s| s.id == section_id)
            .ok_or_else(|| EvaluationError::UnknownSection(section_id.to_string()))?;
        self.explain_in(section, spec, answers)
    }

    /// Turns a target into an outcome. `NEXT` after the last section submits.
    pub fn resolve_target(
        &self,
        target: &NavigationTarget,
        section_order: i32,
    ) -> NavigationOutcome {
        match target {
            NavigationTarget::Submit => NavigationOutcome::Submit,
            NavigationTarget::Section(id) => NavigationOutcome::section(id.clone()),
            NavigationTarget::Next => next_in_order(self.sections, section_order)
                .map_or(NavigationOutcome::Submit, |s| NavigationOutcome::section(s.id.clone())),
        }
    }

    fn decide(
        outcome: NavigationOutcome,
        matched_rule: Option<String>,
        trace: Vec<EvaluationTrace>,
    ) -> Decision {
        let reason = TraceFormatter::format_decision(&trace, &outcome);
        Decision {
            outcome,
            matched_rule,
            reason,
            trace,
        }
    }
}

/// Resolves the next section with a one-off evaluator.
///
/// See [`Evaluator::explain`] for the rules and the error case.
pub fn resolve_next<A>(
    spec: &NavigationSpec,
    section_order: i32,
    sections: &[Section],
    answers: &A,
) -> Result<NavigationOutcome, EvaluationError>
where
    A: Answers + ?Sized,
{
    Evaluator::new(sections).resolve_next(spec, section_order, answers)
}
