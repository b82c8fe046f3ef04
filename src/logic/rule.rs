use super::{FieldType, NavigationTarget, Operator, operators_for};
use serde::{Deserialize, Serialize};

/// An operator together with a value of the shape that operator requires.
///
/// Serialized adjacently tagged, e.g. `{"operator": "between", "value": ["1", "5"]}`,
/// so a value of the wrong shape for its operator fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "operator", content = "value", rename_all = "snake_case")]
pub enum Condition {
    Equals(String),
    NotEquals(String),
    AnyOf(Vec<String>),
    AllOf(Vec<String>),
    NoneOf(Vec<String>),
    GreaterThan(String),
    LessThan(String),
    Between(String, String),
}

impl Condition {
    /// Creates a condition for `operator` with an empty value.
    pub fn empty(operator: Operator) -> Self {
        match operator {
            Operator::Equals => Condition::Equals(String::new()),
            Operator::NotEquals => Condition::NotEquals(String::new()),
            Operator::AnyOf => Condition::AnyOf(Vec::new()),
            Operator::AllOf => Condition::AllOf(Vec::new()),
            Operator::NoneOf => Condition::NoneOf(Vec::new()),
            Operator::GreaterThan => Condition::GreaterThan(String::new()),
            Operator::LessThan => Condition::LessThan(String::new()),
            Operator::Between => Condition::Between(String::new(), String::new()),
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            Condition::Equals(_) => Operator::Equals,
            Condition::NotEquals(_) => Operator::NotEquals,
            Condition::AnyOf(_) => Operator::AnyOf,
            Condition::AllOf(_) => Operator::AllOf,
            Condition::NoneOf(_) => Operator::NoneOf,
            Condition::GreaterThan(_) => Operator::GreaterThan,
            Condition::LessThan(_) => Operator::LessThan,
            Condition::Between(_, _) => Operator::Between,
        }
    }

    /// All literal values the condition compares against, in declaration order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Condition::Equals(v)
            | Condition::NotEquals(v)
            | Condition::GreaterThan(v)
            | Condition::LessThan(v) => vec![v.as_str()],
            Condition::AnyOf(vs) | Condition::AllOf(vs) | Condition::NoneOf(vs) => {
                vs.iter().map(String::as_str).collect()
            }
            Condition::Between(low, high) => vec![low.as_str(), high.as_str()],
        }
    }

    /// Whether the value is missing: a blank scalar, an empty set, or a range
    /// with a blank endpoint.
    pub fn has_empty_value(&self) -> bool {
        match self {
            Condition::AnyOf(vs) | Condition::AllOf(vs) | Condition::NoneOf(vs) => {
                vs.is_empty() || vs.iter().any(|v| v.trim().is_empty())
            }
            _ => self.values().iter().any(|v| v.trim().is_empty()),
        }
    }
}

/// One branching condition of a conditional navigation spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    /// Unique within the owning `NavigationSpec`.
    pub id: String,
    /// A field of the section that owns the spec. Empty when no field was picked yet.
    pub field_id: String,
    /// The field's type when the rule was authored.
    pub field_type: FieldType,
    pub condition: Condition,
    pub target_section_id: NavigationTarget,
}

impl ConditionalRule {
    /// Creates a rule for a field, using the first operator valid for its type
    /// and an empty value. The rule targets `NEXT` until the author picks a section.
    ///
    /// A field type without operators still produces a rule (with `equals`), which
    /// the validator later rejects as having no usable field.
    pub fn empty(id: impl Into<String>, field_id: impl Into<String>, field_type: FieldType) -> Self {
        let operator = operators_for(field_type)
            .first()
            .copied()
            .unwrap_or(Operator::Equals);
        Self {
            id: id.into(),
            field_id: field_id.into(),
            field_type,
            condition: Condition::empty(operator),
            target_section_id: NavigationTarget::Next,
        }
    }

    pub fn operator(&self) -> Operator {
        self.condition.operator()
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_target(mut self, target: NavigationTarget) -> Self {
        self.target_section_id = target;
        self
    }
}

/// Creates a rule pre-populated with the first valid operator for `field_type`.
pub fn create_empty_rule(
    id: impl Into<String>,
    field_id: impl Into<String>,
    field_type: FieldType,
) -> ConditionalRule {
    ConditionalRule::empty(id, field_id, field_type)
}
