//! Implementation of the `streamfmt check` command.

use miette::Report;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use streamfmt::parser::DEFAULT_MAX_DEPTH;
use streamfmt::{DefinitionField, Engine, FormatterDefinition, LintWarning, ParseError};

use crate::output::diagnostic::{LintDiagnostic, TemplateDiagnostic};
use crate::output::json::print_json;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Templates to check
    #[arg(required_unless_present = "definition")]
    pub templates: Vec<String>,

    /// Formatter definitions to check (repeatable)
    #[arg(short, long)]
    pub definition: Vec<String>,

    /// Treat lint warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Maximum branch nesting depth
    #[arg(long, env = "STREAMFMT_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One template to check, with a display name.
struct CheckInput {
    name: String,
    source: String,
    /// Set when the input could not be read as a definition.
    invalid: Option<String>,
}

impl CheckInput {
    fn new(name: String, source: String) -> Self {
        Self {
            name,
            source,
            invalid: None,
        }
    }
}

/// The outcome of checking one template.
enum Outcome {
    Invalid(String),
    Failed(ParseError),
    Checked(Vec<LintWarning>),
}

/// JSON output for a single checked template.
#[derive(Serialize)]
pub struct CheckResult {
    pub name: String,
    pub source: String,
    pub error: Option<ErrorInfo>,
    pub warnings: Vec<String>,
}

/// JSON output for a parse error.
#[derive(Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub offset: Option<usize>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

/// JSON output for the whole check run.
#[derive(Serialize)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
    pub errors: usize,
    pub warnings: usize,
}

/// Expand the command-line arguments into named template sources.
fn collect_inputs(args: &CheckArgs) -> Vec<CheckInput> {
    let mut inputs = Vec::new();
    for (i, template) in args.templates.iter().enumerate() {
        inputs.push(CheckInput::new(format!("template #{}", i + 1), template.clone()));
    }
    for (i, raw) in args.definition.iter().enumerate() {
        let prefix = format!("definition #{}", i + 1);
        match raw.parse::<FormatterDefinition>() {
            Ok(definition) => {
                for field in [DefinitionField::Name, DefinitionField::Description] {
                    inputs.push(CheckInput::new(
                        format!("{prefix} {field}"),
                        definition.template(field).to_string(),
                    ));
                }
            }
            Err(e) => inputs.push(CheckInput {
                name: prefix,
                source: raw.clone(),
                invalid: Some(e.to_string()),
            }),
        }
    }
    inputs
}

fn check_input(engine: &Engine, input: &CheckInput) -> Outcome {
    if let Some(message) = &input.invalid {
        return Outcome::Invalid(message.clone());
    }
    match engine.parse(&input.source) {
        Ok(template) => Outcome::Checked(engine.lint(&template)),
        Err(e) => Outcome::Failed(e),
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let engine = Engine::builder().max_depth(args.max_depth).build();

    let mut results = Vec::new();
    let mut error_count = 0;
    let mut warning_count = 0;

    for input in collect_inputs(&args) {
        let outcome = check_input(&engine, &input);
        let (error, warnings) = match &outcome {
            Outcome::Invalid(message) => {
                error_count += 1;
                if !args.json {
                    eprintln!("{}: {}", input.name, message);
                }
                let info = ErrorInfo {
                    message: message.clone(),
                    offset: None,
                    line: None,
                    column: None,
                };
                (Some(info), Vec::new())
            }
            Outcome::Failed(e) => {
                error_count += 1;
                if !args.json {
                    let diagnostic =
                        TemplateDiagnostic::from_parse_error(&input.name, &input.source, e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                let (line, column) = e.line_column(&input.source);
                let info = ErrorInfo {
                    message: e.to_string(),
                    offset: Some(e.offset()),
                    line: Some(line),
                    column: Some(column),
                };
                (Some(info), Vec::new())
            }
            Outcome::Checked(lints) => {
                warning_count += lints.len();
                if !args.json {
                    if lints.is_empty() {
                        println!(
                            "{} {}",
                            "✓".if_supports_color(Stream::Stdout, |t| t.green()),
                            input.name
                        );
                    }
                    for warning in lints {
                        let diagnostic = LintDiagnostic::from_warning(&input.name, warning);
                        eprintln!("{:?}", Report::new(diagnostic));
                    }
                }
                (None, lints.iter().map(ToString::to_string).collect())
            }
        };
        results.push(CheckResult {
            name: input.name,
            source: input.source,
            error,
            warnings,
        });
    }

    if args.json {
        let report = CheckReport {
            results,
            errors: error_count,
            warnings: warning_count,
        };
        print_json(&report)?;
    } else {
        let summary = format!("{} error(s), {} warning(s)", error_count, warning_count);
        if error_count > 0 || (args.strict && warning_count > 0) {
            println!("{}", summary.if_supports_color(Stream::Stdout, |t| t.red()));
        } else {
            println!("{}", summary);
        }
    }

    if error_count > 0 || (args.strict && warning_count > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
