//! Validation of proposed navigation specs against the whole form.
mod common;
use common::*;
use michi::prelude::*;

#[cfg(test)]
mod validator_tests {
    use super::*;

    fn validate_s1(spec: &NavigationSpec) -> ValidationResult {
        let sections = create_three_sections();
        validate(&sections, &AHashMap::new(), "s1", spec).expect("well-formed call")
    }

    #[test]
    fn test_skip_rule_is_valid() {
        let result = validate_s1(&create_skip_spec());
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_logic_is_valid_everywhere() {
        let sections = create_three_sections();
        for section in &sections {
            let result = validate(&sections, &AHashMap::new(), &section.id, &create_default_logic())
                .unwrap();
            assert!(result.valid, "{}: {:?}", section.id, result.errors);
        }
    }

    #[test]
    fn test_two_section_loop_is_rejected() {
        let sections = vec![
            Section::new("A", 1),
            Section::new("B", 2)
                .with_field(Field::new("f", FieldType::Dropdown).with_options(["back", "on"])),
        ];
        // A is linear and moves on to B; the edit sends B back to A.
        let back = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "f",
                FieldType::Dropdown,
                Condition::Equals("back".to_string()),
                NavigationTarget::section("A"),
            )],
            NavigationTarget::Submit,
        );

        let result = validate(&sections, &AHashMap::new(), "B", &back).unwrap();
        assert!(!result.valid);
        assert_eq!(result.cycles(), vec![["A".to_string(), "B".to_string()].as_slice()]);
        assert_eq!(result.errors, vec!["Navigation creates a loop: A -> B -> A"]);
    }

    #[test]
    fn test_cycle_through_stored_specs_is_rejected() {
        let sections = create_three_sections();
        // s3 is stored as jumping back to s1; the edit of s1 itself is harmless.
        let mut stored = AHashMap::new();
        stored.insert(
            "s3".to_string(),
            NavigationSpec::linear(NavigationTarget::section("s1")),
        );

        let result = validate(&sections, &stored, "s1", &create_default_logic()).unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.cycles(),
            vec![["s1".to_string(), "s2".to_string(), "s3".to_string()].as_slice()]
        );
    }

    #[test]
    fn test_proposal_replaces_stored_spec() {
        let sections = create_three_sections();
        let mut stored = AHashMap::new();
        stored.insert(
            "s3".to_string(),
            NavigationSpec::linear(NavigationTarget::section("s1")),
        );

        // Fixing s3 itself must be judged on the proposal, not on the stored loop.
        let result = validate(&sections, &stored, "s3", &create_default_logic()).unwrap();
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_rule_self_loop_is_rejected() {
        let spec = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "q1",
                FieldType::MultipleChoice,
                Condition::Equals("no".to_string()),
                NavigationTarget::section("s1"),
            )],
            NavigationTarget::Next,
        );

        let result = validate_s1(&spec);
        assert!(!result.valid);
        assert_eq!(result.issues, vec![ValidationIssue::RuleSelfLoop { position: 1 }]);
        assert_eq!(
            result.errors,
            vec!["Rule 1: a section cannot navigate to itself"]
        );
    }

    #[test]
    fn test_default_self_loop_is_rejected() {
        let result = validate_s1(&NavigationSpec::linear(NavigationTarget::section("s1")));
        assert_eq!(result.issues, vec![ValidationIssue::DefaultSelfLoop]);
    }

    #[test]
    fn test_set_operator_on_single_choice_field_is_rejected() {
        let spec = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "q1",
                FieldType::MultipleChoice,
                Condition::AnyOf(vec!["yes".to_string()]),
                NavigationTarget::section("s3"),
            )],
            NavigationTarget::Next,
        );

        let result = validate_s1(&spec);
        assert!(!result.valid);
        assert_eq!(
            result.issues,
            vec![ValidationIssue::OperatorNotAllowed {
                position: 1,
                operator: Operator::AnyOf,
                field_type: "multiple choice".to_string(),
            }]
        );
        assert_eq!(
            result.errors[0],
            "Rule 1: operator 'any_of' cannot be used with a multiple choice field"
        );
    }

    #[test]
    fn test_live_field_type_wins_over_stale_snapshot() {
        // The rule was authored when q1 was a checkbox field.
        let spec = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "q1",
                FieldType::Checkboxes,
                Condition::AllOf(vec!["yes".to_string()]),
                NavigationTarget::section("s3"),
            )],
            NavigationTarget::Next,
        );

        let result = validate_s1(&spec);
        assert!(matches!(
            result.issues.as_slice(),
            [ValidationIssue::OperatorNotAllowed { operator: Operator::AllOf, .. }]
        ));
    }

    #[test]
    fn test_all_problems_are_reported_together() {
        let spec = NavigationSpec::conditional(
            vec![
                create_empty_rule("r1", "", FieldType::MultipleChoice),
                rule(
                    "r1",
                    "q1",
                    FieldType::MultipleChoice,
                    Condition::Equals(String::new()),
                    NavigationTarget::section("ghost"),
                ),
            ],
            NavigationTarget::section("nowhere"),
        );

        let result = validate_s1(&spec);
        assert!(!result.valid);
        assert_eq!(
            result.issues,
            vec![
                ValidationIssue::NoFieldSelected { position: 1 },
                ValidationIssue::DuplicateRuleId {
                    position: 2,
                    rule_id: "r1".to_string(),
                },
                ValidationIssue::EmptyValue {
                    position: 2,
                    operator: Operator::Equals,
                },
                ValidationIssue::UnknownRuleTarget {
                    position: 2,
                    target: "ghost".to_string(),
                },
                ValidationIssue::UnknownDefaultTarget {
                    target: "nowhere".to_string(),
                },
            ]
        );
        assert_eq!(result.errors.len(), result.issues.len());
    }

    #[test]
    fn test_field_from_another_section_is_rejected() {
        let spec = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "q2",
                FieldType::Checkboxes,
                Condition::AnyOf(vec!["a".to_string()]),
                NavigationTarget::section("s3"),
            )],
            NavigationTarget::Next,
        );

        let result = validate_s1(&spec);
        assert_eq!(
            result.issues,
            vec![ValidationIssue::FieldNotInSection {
                position: 1,
                field_id: "q2".to_string(),
                section_id: "s1".to_string(),
            }]
        );
    }

    #[test]
    fn test_conditional_spec_without_rules_is_rejected() {
        let result = validate_s1(&NavigationSpec::conditional(Vec::new(), NavigationTarget::Next));
        assert_eq!(result.issues, vec![ValidationIssue::NoRules]);
    }

    #[test]
    fn test_linear_spec_ignores_stored_rules() {
        let mut spec = create_default_logic();
        spec.rules.push(create_empty_rule("r1", "", FieldType::Unknown));
        assert!(validate_s1(&spec).valid);
    }

    #[test]
    fn test_unknown_option_depends_on_strictness() {
        let sections = create_three_sections();
        let spec = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "q1",
                FieldType::MultipleChoice,
                Condition::Equals("maybe".to_string()),
                NavigationTarget::section("s3"),
            )],
            NavigationTarget::Next,
        );

        let strict = validate(&sections, &AHashMap::new(), "s1", &spec).unwrap();
        assert_eq!(
            strict.errors,
            vec!["Rule 1: 'maybe' is not one of the options of field 'q1'"]
        );

        let lenient = Validator::builder()
            .strict_values(false)
            .build()
            .validate(&sections, &AHashMap::new(), "s1", &spec)
            .unwrap();
        assert!(lenient.valid);
    }

    #[test]
    fn test_numeric_values_are_checked_against_field_range() {
        let sections = create_three_sections();
        let spec = NavigationSpec::conditional(
            vec![
                rule(
                    "r1",
                    "q3",
                    FieldType::LinearScale,
                    Condition::Between("8".to_string(), "2".to_string()),
                    NavigationTarget::Submit,
                ),
                rule(
                    "r2",
                    "q3",
                    FieldType::LinearScale,
                    Condition::GreaterThan("ten".to_string()),
                    NavigationTarget::Submit,
                ),
                rule(
                    "r3",
                    "q3",
                    FieldType::LinearScale,
                    Condition::LessThan("42".to_string()),
                    NavigationTarget::Submit,
                ),
            ],
            NavigationTarget::Next,
        );

        let result = validate(&sections, &AHashMap::new(), "s3", &spec).unwrap();
        assert_eq!(
            result.issues,
            vec![
                ValidationIssue::InvertedRange {
                    position: 1,
                    low: "8".to_string(),
                    high: "2".to_string(),
                },
                ValidationIssue::NotANumber {
                    position: 2,
                    value: "ten".to_string(),
                },
                ValidationIssue::OutOfRange {
                    position: 3,
                    value: 42.0,
                    min: 1.0,
                    max: 10.0,
                },
            ]
        );
    }

    #[test]
    fn test_field_without_operators_cannot_drive_rules() {
        let sections = vec![
            Section::new("s1", 1).with_field(Field::new("bio", FieldType::Paragraph)),
            Section::new("s2", 2),
        ];
        let spec = NavigationSpec::conditional(
            vec![rule(
                "r1",
                "bio",
                FieldType::Paragraph,
                Condition::Equals("x".to_string()),
                NavigationTarget::Submit,
            )],
            NavigationTarget::Next,
        );

        let result = validate(&sections, &AHashMap::new(), "s1", &spec).unwrap();
        assert_eq!(result.issues, vec![ValidationIssue::NoFieldSelected { position: 1 }]);
    }

    #[test]
    fn test_skipped_section_warns_but_stays_valid() {
        let sections = create_three_sections();
        let skip_all = NavigationSpec::linear(NavigationTarget::section("s3"));

        let result = validate(&sections, &AHashMap::new(), "s1", &skip_all).unwrap();
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["Section 's2' can never be reached from the first section"]
        );

        let quiet = Validator::builder()
            .report_unreachable(false)
            .build()
            .validate(&sections, &AHashMap::new(), "s1", &skip_all)
            .unwrap();
        assert!(quiet.warnings.is_empty());
    }

    #[test]
    fn test_malformed_calls_are_errors() {
        let sections = create_three_sections();
        let spec = create_default_logic();

        assert_eq!(
            validate(&sections, &AHashMap::new(), "s9", &spec),
            Err(LogicError::UnknownSection("s9".to_string()))
        );

        let mut doubled = sections.clone();
        doubled.push(Section::new("s2", 4));
        assert_eq!(
            validate(&doubled, &AHashMap::new(), "s1", &spec),
            Err(LogicError::DuplicateSection("s2".to_string()))
        );
    }

    #[test]
    fn test_result_serializes_for_the_editor() {
        let result = validate_s1(&NavigationSpec::conditional(Vec::new(), NavigationTarget::Next));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": false,
                "errors": ["Conditional navigation needs at least one rule"],
                "warnings": []
            })
        );
    }
}
