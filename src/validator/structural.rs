use crate::error::ValidationIssue;
use crate::form::{Field, Section};
use crate::logic::answer::parse_number;
use crate::logic::{
    Condition, ConditionalRule, FieldFamily, NavigationSpec, NavigationTarget, is_operator_allowed,
    operators_for,
};
use ahash::AHashSet;

/// Runs the per-spec checks for the spec owned by `section`.
///
/// Every check runs regardless of earlier failures so the author sees all
/// problems at once.
pub(super) struct StructuralCheck<'a> {
    section: &'a Section,
    known_sections: &'a AHashSet<&'a str>,
    strict_values: bool,
    issues: Vec<ValidationIssue>,
}

impl<'a> StructuralCheck<'a> {
    pub(super) fn new(
        section: &'a Section,
        known_sections: &'a AHashSet<&'a str>,
        strict_values: bool,
    ) -> Self {
        Self {
            section,
            known_sections,
            strict_values,
            issues: Vec::new(),
        }
    }

    pub(super) fn run(mut self, spec: &NavigationSpec) -> Vec<ValidationIssue> {
        if spec.is_conditional() && spec.rules.is_empty() {
            self.issues.push(ValidationIssue::NoRules);
        }

        let mut seen_ids = AHashSet::new();
        for (index, rule) in spec.active_rules().iter().enumerate() {
            let position = index + 1;
            if !seen_ids.insert(rule.id.as_str()) {
                self.issues.push(ValidationIssue::DuplicateRuleId {
                    position,
                    rule_id: rule.id.clone(),
                });
            }
            self.check_rule(position, rule);
        }

        self.check_default_target(&spec.default_target);
        self.issues
    }

    fn check_rule(&mut self, position: usize, rule: &ConditionalRule) {
        let field = self.section.field(&rule.field_id);
        if !rule.field_id.is_empty() && field.is_none() {
            self.issues.push(ValidationIssue::FieldNotInSection {
                position,
                field_id: rule.field_id.clone(),
                section_id: self.section.id.clone(),
            });
        }

        // The live field type wins over the snapshot, which may be stale.
        let field_type = field.map_or(rule.field_type, |f| f.field_type);
        let operator = rule.operator();
        if rule.field_id.is_empty() || operators_for(field_type).is_empty() {
            self.issues.push(ValidationIssue::NoFieldSelected { position });
        } else if !is_operator_allowed(field_type, operator) {
            self.issues.push(ValidationIssue::OperatorNotAllowed {
                position,
                operator,
                field_type: field_type.to_string(),
            });
        } else if rule.condition.has_empty_value() {
            self.issues.push(ValidationIssue::EmptyValue { position, operator });
        } else if let Some(field) = field.filter(|_| self.strict_values) {
            self.check_values(position, field, &rule.condition);
        }

        if let NavigationTarget::Section(target) = &rule.target_section_id {
            if *target == self.section.id {
                self.issues.push(ValidationIssue::RuleSelfLoop { position });
            } else if !self.known_sections.contains(target.as_str()) {
                self.issues.push(ValidationIssue::UnknownRuleTarget {
                    position,
                    target: target.clone(),
                });
            }
        }
    }

    /// Checks rule values against the field's declared domain.
    fn check_values(&mut self, position: usize, field: &Field, condition: &Condition) {
        match field.field_type.family() {
            Some(FieldFamily::SingleChoice | FieldFamily::MultiChoice) => {
                if field.options.is_empty() {
                    return;
                }
                for value in condition.values() {
                    if !field.options.iter().any(|option| option == value) {
                        self.issues.push(ValidationIssue::UnknownOption {
                            position,
                            field_id: field.id.clone(),
                            value: value.to_string(),
                        });
                    }
                }
            }
            Some(FieldFamily::Numeric) => {
                let mut numbers = Vec::new();
                for value in condition.values() {
                    match parse_number(value) {
                        Some(n) => numbers.push(n),
                        None => self.issues.push(ValidationIssue::NotANumber {
                            position,
                            value: value.to_string(),
                        }),
                    }
                }

                if let (Condition::Between(low, high), [lo, hi]) = (condition, numbers.as_slice())
                {
                    if lo > hi {
                        self.issues.push(ValidationIssue::InvertedRange {
                            position,
                            low: low.clone(),
                            high: high.clone(),
                        });
                    }
                }

                let min = field.min.unwrap_or(f64::NEG_INFINITY);
                let max = field.max.unwrap_or(f64::INFINITY);
                for n in numbers {
                    if n < min || n > max {
                        self.issues.push(ValidationIssue::OutOfRange {
                            position,
                            value: n,
                            min,
                            max,
                        });
                    }
                }
            }
            None => {}
        }
    }

    fn check_default_target(&mut self, target: &NavigationTarget) {
        if let NavigationTarget::Section(id) = target {
            if *id == self.section.id {
                self.issues.push(ValidationIssue::DefaultSelfLoop);
            } else if !self.known_sections.contains(id.as_str()) {
                self.issues.push(ValidationIssue::UnknownDefaultTarget { target: id.clone() });
            }
        }
    }
}
