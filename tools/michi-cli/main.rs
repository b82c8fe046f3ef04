use ahash::AHashMap;
use clap::{Parser, Subcommand};
use michi::prelude::*;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These match the form builder's export format and are only used here for conversion.

#[derive(Deserialize)]
struct RawForm {
    sections: Vec<RawSection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    id: String,
    #[serde(default)]
    title: String,
    order: i32,
    #[serde(default)]
    fields: Vec<RawField>,
    logic: Option<RawLogic>,
}

#[derive(Deserialize)]
struct RawField {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    options: Vec<String>,
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogic {
    #[serde(alias = "type")]
    navigation_type: String,
    #[serde(default)]
    rules: Vec<RawRule>,
    #[serde(default = "default_target")]
    default_target: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    id: String,
    #[serde(default)]
    field_id: String,
    field_type: FieldType,
    operator: String,
    #[serde(default)]
    value: serde_json::Value,
    target_section_id: String,
}

fn default_target() -> String {
    "next".to_string()
}

// --- Converter Implementation ---
// This implements the conversion from the raw export model to michi's FormDefinition.

impl RawLogic {
    fn into_spec(self) -> Result<NavigationSpec, ConversionError> {
        let kind = match self.navigation_type.to_ascii_lowercase().as_str() {
            "linear" => NavigationKind::Linear,
            "conditional" => NavigationKind::Conditional,
            other => {
                return Err(ConversionError::Invalid(format!(
                    "Unknown navigation type '{}'",
                    other
                )));
            }
        };

        let rules = self
            .rules
            .into_iter()
            .map(|raw| {
                let condition: Condition = serde_json::from_value(json!({
                    "operator": raw.operator,
                    "value": raw.value,
                }))
                .map_err(|e| {
                    ConversionError::Invalid(format!(
                        "Rule '{}' has a value that does not fit operator '{}': {}",
                        raw.id, raw.operator, e
                    ))
                })?;
                Ok(ConditionalRule {
                    id: raw.id,
                    field_id: raw.field_id,
                    field_type: raw.field_type,
                    condition,
                    target_section_id: NavigationTarget::from(raw.target_section_id),
                })
            })
            .collect::<Result<Vec<_>, ConversionError>>()?;

        Ok(NavigationSpec {
            kind,
            rules,
            default_target: NavigationTarget::from(self.default_target),
        })
    }
}

impl IntoForm for RawForm {
    fn into_form(self) -> Result<FormDefinition, ConversionError> {
        let mut definition = FormDefinition::default();
        for raw in self.sections {
            if let Some(logic) = raw.logic {
                definition.logic.insert(raw.id.clone(), logic.into_spec()?);
            }
            let fields = raw
                .fields
                .into_iter()
                .map(|f| Field {
                    id: f.id,
                    label: f.label,
                    field_type: f.field_type,
                    options: f.options,
                    min: f.min,
                    max: f.max,
                })
                .collect();
            definition.sections.push(Section {
                id: raw.id,
                title: raw.title,
                order: raw.order,
                fields,
            });
        }
        Ok(definition)
    }
}

/// Validate and evaluate section navigation logic of multi-section forms
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log the validator's and evaluator's decisions
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the navigation graph, or a proposed spec for one section
    Validate {
        /// Path to the form export JSON file
        form_path: String,
        /// Section whose proposed spec is validated
        #[arg(short, long, requires = "spec")]
        section: Option<String>,
        /// Path to the proposed navigation spec JSON file
        #[arg(long, requires = "section")]
        spec: Option<String>,
        /// Skip checking rule values against field options and ranges
        #[arg(long)]
        lenient: bool,
        /// Do not warn about unreachable sections
        #[arg(long)]
        no_unreachable: bool,
    },
    /// Resolve the next section for a set of answers
    Resolve {
        /// Path to the form export JSON file
        form_path: String,
        /// The section the respondent just completed
        #[arg(short, long)]
        section: String,
        /// Path to a JSON object mapping field ids to answers
        #[arg(short, long)]
        answers: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Validate {
            form_path,
            section,
            spec,
            lenient,
            no_unreachable,
        } => {
            let validator = Validator::builder()
                .strict_values(!lenient)
                .report_unreachable(!no_unreachable)
                .build();
            run_validate(&form_path, section.zip(spec), validator);
        }
        Command::Resolve {
            form_path,
            section,
            answers,
        } => run_resolve(&form_path, &section, answers.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "michi=debug" } else { "michi=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_form(form_path: &str, validator: Validator) -> FormLogic {
    let json = fs::read_to_string(form_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read form file '{}': {}", form_path, e))
    });
    let raw: RawForm = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse form JSON: {}", e)));
    let definition = raw
        .into_form()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert form: {}", e)));
    FormLogic::from_definition(definition, validator)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid form: {}", e)))
}

fn run_validate(form_path: &str, proposal: Option<(String, String)>, validator: Validator) {
    let start = Instant::now();
    let logic = load_form(form_path, validator);

    let result = match proposal {
        Some((section_id, spec_path)) => {
            let json = fs::read_to_string(&spec_path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read spec file '{}': {}", spec_path, e))
            });
            let raw: RawLogic = serde_json::from_str(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse spec JSON: {}", e)));
            let spec = raw
                .into_spec()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert spec: {}", e)));
            println!("Validating proposed navigation for section '{}'", section_id);
            logic.propose(&section_id, &spec)
        }
        None => {
            println!("Validating navigation of {} sections", logic.sections().len());
            logic.validate_all()
        }
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Validation could not run: {}", e)));

    for warning in &result.warnings {
        println!("  warning: {}", warning);
    }
    if result.valid {
        println!("  -> Valid ({:?})", start.elapsed());
    } else {
        println!("  -> Invalid, {} problem(s):", result.errors.len());
        for error in &result.errors {
            println!("     - {}", error);
        }
        std::process::exit(1);
    }
}

fn run_resolve(form_path: &str, section_id: &str, answers_path: Option<&str>) {
    let logic = load_form(form_path, Validator::default());

    let answers: AHashMap<String, AnswerValue> = match answers_path {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read answers file '{}': {}", path, e))
            });
            serde_json::from_str(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse answers JSON: {}", e)))
        }
        None => {
            println!("No answers file provided. Resolving with no answers.");
            AHashMap::new()
        }
    };

    let decision = logic
        .explain(section_id, &answers)
        .unwrap_or_else(|e| exit_with_error(&format!("Resolution failed: {}", e)));

    println!("\nAfter section '{}':", section_id);
    for step in &decision.trace {
        println!("  - {}", TraceFormatter::format_step(step));
    }
    println!("  -> Next: {}", decision.outcome);
    println!("  -> Reason: {}", decision.reason);
    match serde_json::to_string(&decision.outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize outcome: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_without_section_is_refused() {
        let parsed =
            Cli::try_parse_from(["michi-cli", "validate", "form.json", "--spec", "s.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_section_with_spec_is_a_proposal() {
        let cli = Cli::try_parse_from([
            "michi-cli",
            "validate",
            "form.json",
            "--section",
            "s1",
            "--spec",
            "s.json",
        ])
        .unwrap();
        match cli.command {
            Command::Validate { section, spec, .. } => {
                assert_eq!(section.zip(spec), Some(("s1".to_string(), "s.json".to_string())));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
