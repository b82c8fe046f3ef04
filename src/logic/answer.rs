use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A respondent's answer to one field.
///
/// Deserializes from a JSON number, string, or array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    /// An empty or whitespace-only string, or an empty selection, counts as
    /// no answer at all.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Number(_) => false,
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Choices(cs) => cs.is_empty(),
        }
    }

    /// The answer as a single value. A selection counts only if it holds
    /// exactly one entry.
    pub fn as_single(&self) -> Option<Cow<'_, str>> {
        match self {
            AnswerValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            AnswerValue::Text(s) => Some(Cow::Borrowed(s)),
            AnswerValue::Choices(cs) => match cs.as_slice() {
                [only] => Some(Cow::Borrowed(only)),
                _ => None,
            },
        }
    }

    /// The answer as a set of selected values; a single value is a one-element set.
    pub fn as_set(&self) -> Vec<Cow<'_, str>> {
        match self {
            AnswerValue::Choices(cs) => cs.iter().map(|c| Cow::Borrowed(c.as_str())).collect(),
            other => other.as_single().into_iter().collect(),
        }
    }

    /// The answer as a number. Text is parsed; anything non-numeric is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => self.as_single().and_then(|s| parse_number(&s)),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        AnswerValue::Choices(values.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", format_number(*n)),
            AnswerValue::Text(s) => write!(f, "\"{}\"", s),
            AnswerValue::Choices(cs) => {
                write!(f, "[")?;
                for (i, c) in cs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\"", c)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Renders whole numbers without a fractional part, so `3.0` compares equal to `"3"`.
/// Magnitudes beyond exact integer range keep the float rendering.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parses a rule or answer value as a finite floating-point number.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
