use crate::logic::{AnswerValue, Condition, NavigationTarget};

pub mod formatter;

pub use formatter::TraceFormatter;

/// A record of one step taken while resolving the next section.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationTrace {
    /// A rule was tested against the respondent's answer.
    Rule {
        rule_id: String,
        field_id: String,
        condition: Condition,
        /// `None` when the field was left unanswered.
        answer: Option<AnswerValue>,
        matched: bool,
        target: NavigationTarget,
    },
    /// No rule decided, so the default target was taken.
    Default {
        target: NavigationTarget,
        linear: bool,
    },
}

impl EvaluationTrace {
    pub fn is_decisive(&self) -> bool {
        match self {
            EvaluationTrace::Rule { matched, .. } => *matched,
            EvaluationTrace::Default { .. } => true,
        }
    }
}
