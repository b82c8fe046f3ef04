use super::EvaluationTrace;
use crate::evaluator::NavigationOutcome;
use crate::logic::{Condition, NavigationTarget};
use itertools::Itertools;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Explains a decision from its trace. Only the decisive (last) step is
    /// described.
    pub fn format_decision(trace: &[EvaluationTrace], outcome: &NavigationOutcome) -> String {
        match trace.last() {
            Some(step @ EvaluationTrace::Rule { .. }) => {
                format!("{} -> {}", Self::format_step(step), outcome)
            }
            Some(EvaluationTrace::Default {
                target: NavigationTarget::Next,
                linear,
            }) => format!("{} -> next section ({})", Self::fallthrough(*linear), outcome),
            Some(EvaluationTrace::Default { linear, .. }) => {
                format!("{} -> {}", Self::fallthrough(*linear), outcome)
            }
            None => outcome.to_string(),
        }
    }

    /// Formats a single step, e.g. `$q1 (was "yes") is "yes"`.
    pub fn format_step(step: &EvaluationTrace) -> String {
        match step {
            EvaluationTrace::Rule {
                field_id,
                condition,
                answer,
                matched,
                ..
            } => {
                let was = answer
                    .as_ref()
                    .map_or("unanswered".to_string(), |a| format!("was {}", a));
                let verdict = if *matched { "" } else { " (no match)" };
                format!(
                    "${} ({}) {}{}",
                    field_id,
                    was,
                    Self::format_condition(condition),
                    verdict
                )
            }
            EvaluationTrace::Default { target, linear } => {
                format!("{}: default {}", Self::fallthrough(*linear), target)
            }
        }
    }

    fn fallthrough(linear: bool) -> &'static str {
        if linear {
            "linear navigation"
        } else {
            "no rule matched"
        }
    }

    fn format_condition(condition: &Condition) -> String {
        let operator = condition.operator();
        match condition {
            Condition::Between(low, high) => {
                format!("{} {} and {}", operator.label(), quote(low), quote(high))
            }
            Condition::AnyOf(values) | Condition::AllOf(values) | Condition::NoneOf(values) => {
                format!(
                    "{} [{}]",
                    operator.label(),
                    values.iter().map(|v| quote(v)).join(", ")
                )
            }
            other => {
                let value = other.values().first().copied().unwrap_or_default();
                format!("{} {}", operator.label(), quote(value))
            }
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}
