//! Miette diagnostic wrappers for template errors and lint warnings.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use streamfmt::{compute_suggestions, FormatterRegistry, LintWarning, Namespace, ParseError};
use thiserror::Error;

/// A miette-compatible diagnostic for template parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(streamfmt::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    label: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(name: &str, source: &str, err: &ParseError) -> Self {
        let offset = err.offset().min(source.len());
        // A zero-width span at the end of input, otherwise the offending char.
        let width = source
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);

        TemplateDiagnostic {
            src: NamedSource::new(name, source.to_string()),
            span: (offset, width).into(),
            label: label_for(err).to_string(),
            message: err.to_string(),
            help: help_for(err),
        }
    }
}

fn label_for(err: &ParseError) -> &'static str {
    match err {
        ParseError::UnterminatedPlaceholder { .. } => "placeholder opened here",
        ParseError::UnterminatedBranch { .. } => "branch opened here",
        ParseError::UnterminatedRegex { .. } => "regex opened here",
        ParseError::MissingBranches { .. } => "modifier without branches",
        ParseError::InvalidOperator { .. } => "unrecognized modifier",
        ParseError::UnknownNamespace { .. } => "unknown namespace",
        ParseError::NestingTooDeep { .. } => "nested too deeply",
        ParseError::MalformedBranches { .. } | ParseError::Syntax { .. } => "error here",
    }
}

fn help_for(err: &ParseError) -> Option<String> {
    match err {
        ParseError::UnterminatedPlaceholder { .. } => {
            Some("close the placeholder with '}'".to_string())
        }
        ParseError::UnterminatedBranch { .. } | ParseError::MalformedBranches { .. } => {
            Some(r#"branches are written as ["when true"||"when false"]"#.to_string())
        }
        ParseError::UnterminatedRegex { .. } => {
            Some(r"close the pattern with '/'; write '\/' for a literal slash".to_string())
        }
        ParseError::MissingBranches { .. } => Some(
            r#"comparisons and regex tests need branches, e.g. ::>0["yes"||"no"]"#.to_string(),
        ),
        ParseError::InvalidOperator { .. } => Some(
            "modifiers are a formatter name, one of = > >= < <=, or a /regex/".to_string(),
        ),
        ParseError::UnknownNamespace { namespace, .. } => {
            let names: Vec<&str> = Namespace::ALL.into_iter().map(Namespace::as_str).collect();
            let suggestions = compute_suggestions(namespace, &names);
            Some(match suggestions.first() {
                Some(closest) => format!("did you mean '{closest}'?"),
                None => format!("expected one of: {}", names.join(", ")),
            })
        }
        ParseError::NestingTooDeep { .. } => {
            Some("raise the limit with --max-depth or STREAMFMT_MAX_DEPTH".to_string())
        }
        ParseError::Syntax { .. } => None,
    }
}

/// A miette-compatible diagnostic for lint warnings.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(streamfmt::lint), severity(Warning))]
pub struct LintDiagnostic {
    message: String,

    #[help]
    help: Option<String>,
}

impl LintDiagnostic {
    /// Create a diagnostic from a lint warning found in the named template.
    pub fn from_warning(name: &str, warning: &LintWarning) -> Self {
        let help = match warning {
            LintWarning::UnknownProperty { .. } => {
                Some("run `streamfmt properties` to list documented properties".to_string())
            }
            LintWarning::UnknownFormatter { .. } => Some(format!(
                "built-in formatters: {}",
                FormatterRegistry::default().names().join(", ")
            )),
            LintWarning::InvalidRegex { .. } => None,
        };
        LintDiagnostic {
            message: format!("{name}: {warning}"),
            help,
        }
    }
}
