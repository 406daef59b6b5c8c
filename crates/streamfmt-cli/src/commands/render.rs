//! Implementation of the `streamfmt render` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::Report;
use serde::Serialize;
use streamfmt::parser::DEFAULT_MAX_DEPTH;
use streamfmt::{
    Context, DefinitionError, Engine, FormatterDefinition, Namespace, RenderWarning, Value,
};
use tracing::debug;

use crate::output::diagnostic::TemplateDiagnostic;
use crate::output::json::print_json;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template string to render
    #[arg(
        short,
        long,
        conflicts_with = "definition",
        required_unless_present = "definition"
    )]
    pub template: Option<String>,

    /// Formatter definition (`custom:{"name":"…","description":"…"}`)
    #[arg(short, long)]
    pub definition: Option<String>,

    /// JSON file with `stream`, `provider` and `addon` objects
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// Property in namespace.property=value format (repeatable)
    #[arg(short = 's', long = "set", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,

    /// Maximum branch nesting depth
    #[arg(long, env = "STREAMFMT_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// A `--set` property assignment.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub namespace: Namespace,
    pub property: String,
    pub value: Value,
}

/// JSON output for a rendered template.
#[derive(Serialize)]
pub struct RenderResult {
    pub result: String,
    pub warnings: Vec<String>,
}

/// JSON output for a rendered definition.
#[derive(Serialize)]
pub struct DefinitionResult {
    pub name: String,
    pub description: String,
    pub warnings: Vec<String>,
}

/// Parse a `namespace.property=value` assignment.
fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (path, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid property '{s}': expected namespace.property=value"))?;
    let (namespace, property) = path
        .split_once('.')
        .ok_or_else(|| format!("invalid property '{path}': expected namespace.property"))?;
    let namespace: Namespace = namespace.trim().parse().map_err(|e| format!("{e}"))?;
    let property = property.trim();
    if property.is_empty() {
        return Err(format!("invalid property '{path}': missing property name"));
    }
    Ok(Assignment {
        namespace,
        property: property.to_string(),
        value: typed_value(raw),
    })
}

/// Interpret command-line text as the most specific value type.
fn typed_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n)
            } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
                Value::Float(f)
            } else {
                Value::from(raw)
            }
        }
    }
}

/// Build the render context from the context file and `--set` overrides.
fn load_context(args: &RenderArgs) -> miette::Result<Context> {
    let mut context = match &args.context {
        Some(path) => {
            let content = read_to_string(path).map_err(|e| {
                miette::miette!("Cannot read context file {}: {}", path.display(), e)
            })?;
            Context::from_json(&content).map_err(|e| {
                miette::miette!("Invalid context file {}: {}", path.display(), e)
            })?
        }
        None => Context::new(),
    };
    for assignment in &args.set {
        debug!(
            namespace = %assignment.namespace,
            property = %assignment.property,
            value = %assignment.value,
            "context override"
        );
        context.insert(
            assignment.namespace,
            assignment.property.clone(),
            assignment.value.clone(),
        );
    }
    Ok(context)
}

fn warning_strings(warnings: &[RenderWarning]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let engine = Engine::builder().max_depth(args.max_depth).build();
    let context = load_context(&args)?;

    if let Some(template) = &args.template {
        return render_template(&engine, template, &context, args.json);
    }
    match &args.definition {
        Some(definition) => render_definition(&engine, definition, &context, args.json),
        None => Err(miette::miette!("either --template or --definition is required")),
    }
}

fn render_template(
    engine: &Engine,
    source: &str,
    context: &Context,
    json: bool,
) -> miette::Result<i32> {
    let template = match engine.parse(source) {
        Ok(template) => template,
        Err(e) => {
            let diagnostic = TemplateDiagnostic::from_parse_error("template", source, &e);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    let (result, warnings) = engine.render_with_warnings(&template, context);
    if json {
        print_json(&RenderResult {
            result,
            warnings: warning_strings(&warnings),
        })?;
    } else {
        // Warnings reach stderr through the tracing subscriber.
        println!("{}", result);
    }
    Ok(exitcode::OK)
}

fn render_definition(
    engine: &Engine,
    source: &str,
    context: &Context,
    json: bool,
) -> miette::Result<i32> {
    let definition = match source.parse::<FormatterDefinition>() {
        Ok(definition) => definition,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exitcode::DATAERR);
        }
    };
    let formatter = match engine.compile(&definition) {
        Ok(formatter) => formatter,
        Err(DefinitionError::Template { field, source: e }) => {
            let diagnostic = TemplateDiagnostic::from_parse_error(
                &field.to_string(),
                definition.template(field),
                &e,
            );
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(exitcode::DATAERR);
        }
    };

    let (rendered, warnings) = engine.render_formatter_with_warnings(&formatter, context);
    if json {
        print_json(&DefinitionResult {
            name: rendered.name,
            description: rendered.description,
            warnings: warning_strings(&warnings),
        })?;
    } else {
        println!("{}", rendered.name);
        println!("{}", rendered.description);
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_values_are_typed() {
        assert_eq!(typed_value("true"), Value::Bool(true));
        assert_eq!(typed_value("12"), Value::Number(12));
        assert_eq!(typed_value("2.5"), Value::Float(2.5));
        assert_eq!(typed_value("1080p"), Value::from("1080p"));
        assert_eq!(typed_value("NaN"), Value::from("NaN"));
    }

    #[test]
    fn assignment_parses_namespace_and_property() {
        let assignment = parse_assignment("provider.cached=true").unwrap();
        assert_eq!(assignment.namespace, Namespace::Provider);
        assert_eq!(assignment.property, "cached");
        assert_eq!(assignment.value, Value::Bool(true));

        let assignment = parse_assignment("stream.title=A=B").unwrap();
        assert_eq!(assignment.value, Value::from("A=B"));
    }

    #[test]
    fn assignment_rejects_malformed_input() {
        assert!(parse_assignment("stream.title").is_err());
        assert!(parse_assignment("title=x").is_err());
        assert!(parse_assignment("user.name=x").is_err());
        assert!(parse_assignment("stream.=x").is_err());
    }
}
