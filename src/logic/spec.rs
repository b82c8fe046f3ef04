use super::ConditionalRule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a section leads once it is completed.
///
/// On the wire a target is a plain string: `"next"`, `"submit"`, or a section id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NavigationTarget {
    /// The section with the next-higher order value, or submit after the last one.
    #[default]
    Next,
    /// End the form.
    Submit,
    Section(String),
}

impl NavigationTarget {
    pub fn section(id: impl Into<String>) -> Self {
        NavigationTarget::Section(id.into())
    }

    /// The concrete section id, if this target names one.
    pub fn section_id(&self) -> Option<&str> {
        match self {
            NavigationTarget::Section(id) => Some(id),
            _ => None,
        }
    }

    pub fn points_to(&self, section_id: &str) -> bool {
        self.section_id() == Some(section_id)
    }
}

impl From<String> for NavigationTarget {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "next" => NavigationTarget::Next,
            "submit" => NavigationTarget::Submit,
            _ => NavigationTarget::Section(raw),
        }
    }
}

impl From<NavigationTarget> for String {
    fn from(target: NavigationTarget) -> Self {
        match target {
            NavigationTarget::Next => "next".to_string(),
            NavigationTarget::Submit => "submit".to_string(),
            NavigationTarget::Section(id) => id,
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Next => write!(f, "NEXT"),
            NavigationTarget::Submit => write!(f, "SUBMIT"),
            NavigationTarget::Section(id) => write!(f, "section '{}'", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    #[default]
    Linear,
    Conditional,
}

/// The navigation configuration attached to one section.
///
/// `rules` only take effect when `kind` is `Conditional`; they are tried in
/// order and the first match wins. `default_target` is used when no rule
/// matches, and always for linear sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSpec {
    pub kind: NavigationKind,
    #[serde(default)]
    pub rules: Vec<ConditionalRule>,
    #[serde(default)]
    pub default_target: NavigationTarget,
}

impl NavigationSpec {
    pub fn linear(default_target: NavigationTarget) -> Self {
        Self {
            kind: NavigationKind::Linear,
            rules: Vec::new(),
            default_target,
        }
    }

    pub fn conditional(rules: Vec<ConditionalRule>, default_target: NavigationTarget) -> Self {
        Self {
            kind: NavigationKind::Conditional,
            rules,
            default_target,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.kind == NavigationKind::Conditional
    }

    /// The rules that take part in evaluation: all of them for a conditional
    /// spec, none for a linear one.
    pub fn active_rules(&self) -> &[ConditionalRule] {
        match self.kind {
            NavigationKind::Conditional => &self.rules,
            NavigationKind::Linear => &[],
        }
    }

    /// Every destination this spec can lead to: each active rule's target
    /// followed by the default target.
    pub fn targets(&self) -> impl Iterator<Item = &NavigationTarget> {
        self.active_rules()
            .iter()
            .map(|rule| &rule.target_section_id)
            .chain(std::iter::once(&self.default_target))
    }

    /// Whether the default target or any rule target names `section_id`.
    /// Rules of a linear spec are included, since they are still stored.
    pub fn references(&self, section_id: &str) -> bool {
        self.default_target.points_to(section_id)
            || self
                .rules
                .iter()
                .any(|rule| rule.target_section_id.points_to(section_id))
    }

    /// Rewrites every reference to `section_id` to `NEXT`. Returns whether
    /// anything changed.
    pub fn retarget(&mut self, section_id: &str) -> bool {
        let mut changed = false;
        if self.default_target.points_to(section_id) {
            self.default_target = NavigationTarget::Next;
            changed = true;
        }
        for rule in &mut self.rules {
            if rule.target_section_id.points_to(section_id) {
                rule.target_section_id = NavigationTarget::Next;
                changed = true;
            }
        }
        changed
    }
}

/// The spec every new section starts with: linear, no rules, default `NEXT`.
pub fn create_default_logic() -> NavigationSpec {
    NavigationSpec::default()
}
