use super::{FormDefinition, Section};
use crate::error::{EvaluationError, LogicError};
use crate::evaluator::{Answers, Decision, Evaluator, NavigationOutcome};
use crate::logic::NavigationSpec;
use crate::validator::{ValidationResult, Validator};
use ahash::AHashMap;

/// The navigation logic of one form: its sections and the spec stored for each.
///
/// All writes go through validation. A proposed spec is stored only when the
/// complete graph, with the proposal in place, passes every check.
#[derive(Debug, Clone)]
pub struct FormLogic {
    sections: Vec<Section>,
    specs: AHashMap<String, NavigationSpec>,
    validator: Validator,
}

/// What happened when a section was removed.
#[derive(Debug, Clone)]
pub struct SectionRemoval {
    /// Sections whose spec referenced the removed section and now point to `NEXT`.
    pub rewritten: Vec<String>,
    /// Validation of the whole graph after the rewrite.
    pub validation: ValidationResult,
}

impl FormLogic {
    pub fn new(validator: Validator) -> Self {
        Self {
            sections: Vec::new(),
            specs: AHashMap::new(),
            validator,
        }
    }

    /// Loads a form as stored. Sections without a spec get the default one.
    ///
    /// Stored specs are taken as they are; call [`FormLogic::validate_all`] to
    /// check them.
    pub fn from_definition(
        definition: FormDefinition,
        validator: Validator,
    ) -> Result<Self, LogicError> {
        let mut logic = Self::new(validator);
        for section in definition.sections {
            logic.add_section(section)?;
        }
        for (section_id, spec) in definition.logic {
            if !logic.specs.contains_key(&section_id) {
                return Err(LogicError::OrphanSpec(section_id));
            }
            logic.specs.insert(section_id, spec);
        }
        Ok(logic)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn spec(&self, section_id: &str) -> Option<&NavigationSpec> {
        self.specs.get(section_id)
    }

    pub fn specs(&self) -> &AHashMap<String, NavigationSpec> {
        &self.specs
    }

    /// Adds a section with the default linear spec.
    pub fn add_section(&mut self, section: Section) -> Result<(), LogicError> {
        if self.specs.contains_key(&section.id) {
            return Err(LogicError::DuplicateSection(section.id));
        }
        self.specs.insert(section.id.clone(), NavigationSpec::default());
        self.sections.push(section);
        Ok(())
    }

    /// Validates `spec` as the new navigation of `section_id` without storing it.
    pub fn propose(
        &self,
        section_id: &str,
        spec: &NavigationSpec,
    ) -> Result<ValidationResult, LogicError> {
        self.validator.validate(&self.sections, &self.specs, section_id, spec)
    }

    /// Stores `spec` for `section_id` if it validates. The returned result
    /// says whether it was stored; on failure nothing changes.
    pub fn accept(
        &mut self,
        section_id: &str,
        spec: NavigationSpec,
    ) -> Result<ValidationResult, LogicError> {
        let result = self.propose(section_id, &spec)?;
        if result.valid {
            tracing::debug!(section = section_id, "navigation spec accepted");
            self.specs.insert(section_id.to_string(), spec);
        } else {
            tracing::debug!(
                section = section_id,
                errors = result.errors.len(),
                "navigation spec rejected"
            );
        }
        Ok(result)
    }

    /// Removes a section. Every other spec that targets it is rewritten to
    /// `NEXT` first, then the whole graph is validated again.
    pub fn remove_section(&mut self, section_id: &str) -> Result<SectionRemoval, LogicError> {
        let index = self
            .sections
            .iter()
            .position(|s| s.id == section_id)
            .ok_or_else(|| LogicError::UnknownSection(section_id.to_string()))?;

        let rewritten = retarget_references(&mut self.specs, section_id);
        self.specs.remove(section_id);
        self.sections.remove(index);

        let validation = self.validate_all()?;
        if !validation.valid {
            tracing::warn!(
                section = section_id,
                errors = ?validation.errors,
                "navigation graph invalid after section removal"
            );
        }
        Ok(SectionRemoval {
            rewritten,
            validation,
        })
    }

    /// Validates every stored spec and the graph they form.
    pub fn validate_all(&self) -> Result<ValidationResult, LogicError> {
        self.validator.validate_graph(&self.sections, &self.specs)
    }

    pub fn explain<A>(&self, section_id: &str, answers: &A) -> Result<Decision, EvaluationError>
    where
        A: Answers + ?Sized,
    {
        let spec = self
            .specs
            .get(section_id)
            .ok_or_else(|| EvaluationError::UnknownSection(section_id.to_string()))?;
        Evaluator::new(&self.sections).explain_section(section_id, spec, answers)
    }

    /// Resolves where a respondent goes after completing `section_id`.
    pub fn resolve_next<A>(
        &self,
        section_id: &str,
        answers: &A,
    ) -> Result<NavigationOutcome, EvaluationError>
    where
        A: Answers + ?Sized,
    {
        self.explain(section_id, answers).map(|decision| decision.outcome)
    }

    /// Returns the stored form as a definition, e.g. for persisting.
    pub fn to_definition(&self) -> FormDefinition {
        FormDefinition {
            sections: self.sections.clone(),
            logic: self.specs.clone(),
        }
    }
}

impl Default for FormLogic {
    fn default() -> Self {
        Self::new(Validator::default())
    }
}

/// Rewrites every reference to `removed_section_id` in `specs` to `NEXT`.
///
/// Returns the ids of the specs that changed, sorted. The removed section's own
/// spec is left alone.
pub fn retarget_references(
    specs: &mut AHashMap<String, NavigationSpec>,
    removed_section_id: &str,
) -> Vec<String> {
    let mut rewritten: Vec<String> = specs
        .iter_mut()
        .filter(|(id, _)| id.as_str() != removed_section_id)
        .filter_map(|(id, spec)| spec.retarget(removed_section_id).then(|| id.clone()))
        .collect();
    rewritten.sort();
    rewritten
}
