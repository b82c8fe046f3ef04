use crate::error::{LogicError, ValidationIssue, ValidationWarning};
use crate::form::Section;
use crate::logic::NavigationSpec;
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

mod graph;
mod structural;

pub use graph::NavigationGraph;
use structural::StructuralCheck;

/// The outcome of validating navigation logic.
///
/// Serializes as `{"valid": bool, "errors": [...], "warnings": [...]}` for the
/// editing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Human-readable messages, one per issue.
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn new(issues: Vec<ValidationIssue>, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The cycles reported by this result, as lists of section ids.
    pub fn cycles(&self) -> Vec<&[String]> {
        self.issues
            .iter()
            .filter_map(|issue| match issue {
                ValidationIssue::Cycle { sections } => Some(sections.as_slice()),
                _ => None,
            })
            .collect()
    }
}

/// Checks navigation specs for structural problems and cycles before they
/// are persisted.
///
/// The validator is stateless: every call builds the navigation graph from
/// the complete snapshot it is given.
#[derive(Debug, Clone)]
pub struct Validator {
    strict_values: bool,
    report_unreachable: bool,
}

pub struct ValidatorBuilder {
    strict_values: bool,
    report_unreachable: bool,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            strict_values: true,
            report_unreachable: true,
        }
    }

    /// Check rule values against the field's options and numeric range.
    pub fn strict_values(mut self, enabled: bool) -> Self {
        self.strict_values = enabled;
        self
    }

    /// Emit a warning for every section no path from the first section reaches.
    pub fn report_unreachable(mut self, enabled: bool) -> Self {
        self.report_unreachable = enabled;
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            strict_values: self.strict_values,
            report_unreachable: self.report_unreachable,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Validator {
    fn default() -> Self {
        ValidatorBuilder::new().build()
    }
}

impl Validator {
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Validates the spec proposed for `edited_section_id` against the stored
    /// specs of every other section.
    ///
    /// Structural checks run on the proposed spec; the cycle check runs on the
    /// whole graph with the proposal in place of the stored spec. Authoring
    /// problems are reported in the result. `Err` is returned only for a
    /// malformed call.
    pub fn validate(
        &self,
        sections: &[Section],
        stored: &AHashMap<String, NavigationSpec>,
        edited_section_id: &str,
        edited_spec: &NavigationSpec,
    ) -> Result<ValidationResult, LogicError> {
        let known = Self::section_ids(sections)?;
        let edited = sections
            .iter()
            .find(|s| s.id == edited_section_id)
            .ok_or_else(|| LogicError::UnknownSection(edited_section_id.to_string()))?;

        let mut issues = StructuralCheck::new(edited, &known, self.strict_values).run(edited_spec);

        let graph = NavigationGraph::build(sections, |id| {
            if id == edited_section_id {
                Some(edited_spec)
            } else {
                stored.get(id)
            }
        });
        let warnings = self.check_graph(&graph, &mut issues);

        tracing::debug!(
            section = edited_section_id,
            issues = issues.len(),
            "validated proposed navigation"
        );
        Ok(ValidationResult::new(issues, warnings))
    }

    /// Validates every stored spec and the graph they form together.
    ///
    /// Structural issues are prefixed with the section they belong to.
    pub fn validate_graph(
        &self,
        sections: &[Section],
        specs: &AHashMap<String, NavigationSpec>,
    ) -> Result<ValidationResult, LogicError> {
        let known = Self::section_ids(sections)?;
        let default_spec = NavigationSpec::default();

        let mut issues = Vec::new();
        for section in sections {
            let spec = specs.get(&section.id).unwrap_or(&default_spec);
            let found = StructuralCheck::new(section, &known, self.strict_values).run(spec);
            issues.extend(found.into_iter().map(|issue| ValidationIssue::InSection {
                section_id: section.id.clone(),
                issue: Box::new(issue),
            }));
        }

        let graph = NavigationGraph::build(sections, |id| specs.get(id));
        let warnings = self.check_graph(&graph, &mut issues);

        tracing::debug!(
            sections = sections.len(),
            issues = issues.len(),
            "validated navigation graph"
        );
        Ok(ValidationResult::new(issues, warnings))
    }

    fn check_graph(
        &self,
        graph: &NavigationGraph,
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<ValidationWarning> {
        issues.extend(
            graph
                .find_cycles()
                .into_iter()
                .map(|sections| ValidationIssue::Cycle { sections }),
        );

        if self.report_unreachable {
            graph
                .unreachable_from_start()
                .into_iter()
                .map(ValidationWarning::Unreachable)
                .collect()
        } else {
            Vec::new()
        }
    }

    fn section_ids(sections: &[Section]) -> Result<AHashSet<&str>, LogicError> {
        let mut ids = AHashSet::with_capacity(sections.len());
        for section in sections {
            if !ids.insert(section.id.as_str()) {
                return Err(LogicError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(ids)
    }
}

/// Validates a proposed spec with the default configuration.
///
/// See [`Validator::validate`].
pub fn validate(
    sections: &[Section],
    stored: &AHashMap<String, NavigationSpec>,
    edited_section_id: &str,
    edited_spec: &NavigationSpec,
) -> Result<ValidationResult, LogicError> {
    Validator::default().validate(sections, stored, edited_section_id, edited_spec)
}
