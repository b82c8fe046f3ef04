//! Common test utilities for building forms, specs and answers.
use michi::prelude::*;

/// Three sections in order, each with one field.
///
/// - `s1`: `q1`, multiple choice `yes` / `no`
/// - `s2`: `q2`, checkboxes `a` / `b` / `c`
/// - `s3`: `q3`, linear scale from 1 to 10
#[allow(dead_code)]
pub fn create_three_sections() -> Vec<Section> {
    vec![
        Section::new("s1", 1).with_field(
            Field::new("q1", FieldType::MultipleChoice).with_options(["yes", "no"]),
        ),
        Section::new("s2", 2)
            .with_field(Field::new("q2", FieldType::Checkboxes).with_options(["a", "b", "c"])),
        Section::new("s3", 3)
            .with_field(Field::new("q3", FieldType::LinearScale).with_range(1.0, 10.0)),
    ]
}

/// A rule on `field_id` with the given condition and target.
#[allow(dead_code)]
pub fn rule(
    id: &str,
    field_id: &str,
    field_type: FieldType,
    condition: Condition,
    target: NavigationTarget,
) -> ConditionalRule {
    ConditionalRule::empty(id, field_id, field_type)
        .with_condition(condition)
        .with_target(target)
}

/// `s1`: if `q1` is "yes" jump to `s3`, otherwise go to the next section.
#[allow(dead_code)]
pub fn create_skip_spec() -> NavigationSpec {
    NavigationSpec::conditional(
        vec![rule(
            "r1",
            "q1",
            FieldType::MultipleChoice,
            Condition::Equals("yes".to_string()),
            NavigationTarget::section("s3"),
        )],
        NavigationTarget::Next,
    )
}

/// Builds an answer map from `(field_id, answer)` pairs.
#[allow(dead_code)]
pub fn answers<I, V>(pairs: I) -> AHashMap<String, AnswerValue>
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<AnswerValue>,
{
    pairs
        .into_iter()
        .map(|(field_id, value)| (field_id.to_string(), value.into()))
        .collect()
}

/// A form export with the skip rule stored for `s1`.
#[allow(dead_code)]
pub const SKIP_FORM_JSON: &str = r#"{
    "sections": [
        {"id": "s1", "title": "About you", "order": 1, "fields": [
            {"id": "q1", "label": "Do you own a car?", "type": "MULTIPLE_CHOICE", "options": ["yes", "no"]}
        ]},
        {"id": "s2", "title": "Public transport", "order": 2, "fields": []},
        {"id": "s3", "title": "Your car", "order": 3, "fields": []}
    ],
    "logic": {
        "s1": {
            "kind": "conditional",
            "rules": [{
                "id": "r1",
                "fieldId": "q1",
                "fieldType": "MULTIPLE_CHOICE",
                "condition": {"operator": "equals", "value": "yes"},
                "targetSectionId": "s3"
            }],
            "defaultTarget": "next"
        }
    }
}"#;
