use crate::logic::answer::parse_number;
use crate::logic::{AnswerValue, Condition};
use ahash::AHashSet;

/// Tests a condition against a present, non-blank answer.
///
/// Comparisons that cannot be made (a multi-selection against a scalar, a
/// non-numeric answer against a number) simply do not match.
pub(super) fn matches(condition: &Condition, answer: &AnswerValue) -> bool {
    match condition {
        Condition::Equals(expected) => answer.as_single().is_some_and(|a| a == expected.as_str()),
        Condition::NotEquals(expected) => answer.as_single().is_some_and(|a| a != expected.as_str()),
        Condition::AnyOf(expected) => {
            let selected = answer.as_set();
            let selected: AHashSet<&str> = selected.iter().map(|c| &**c).collect();
            expected.iter().any(|v| selected.contains(v.as_str()))
        }
        Condition::AllOf(expected) => {
            let selected = answer.as_set();
            let selected: AHashSet<&str> = selected.iter().map(|c| &**c).collect();
            !expected.is_empty() && expected.iter().all(|v| selected.contains(v.as_str()))
        }
        Condition::NoneOf(expected) => {
            let selected = answer.as_set();
            let selected: AHashSet<&str> = selected.iter().map(|c| &**c).collect();
            !expected.iter().any(|v| selected.contains(v.as_str()))
        }
        Condition::GreaterThan(bound) => compare(answer, bound, |a, b| a > b),
        Condition::LessThan(bound) => compare(answer, bound, |a, b| a < b),
        Condition::Between(low, high) => {
            match (answer.as_number(), parse_number(low), parse_number(high)) {
                (Some(n), Some(lo), Some(hi)) => lo <= n && n <= hi,
                _ => false,
            }
        }
    }
}

fn compare(answer: &AnswerValue, bound: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (answer.as_number(), parse_number(bound)) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}
