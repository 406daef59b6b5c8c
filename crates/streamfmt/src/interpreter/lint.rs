//! Static lint rules for parsed templates.
//!
//! Analyzes the parsed AST, branches included, to detect references that will
//! silently render as absent or fall back at render time.

use regex::Regex;

use crate::catalog::{is_known_property, property_names};
use crate::interpreter::FormatterRegistry;
use crate::interpreter::error::{LintWarning, compute_suggestions};
use crate::parser::ast::{Modifier, Placeholder, Template};

/// Runs static lint rules over a parsed template, returning warnings.
///
/// Operates purely on the AST without rendering. Each distinct finding is
/// reported once, in source order.
///
/// # Example
///
/// ```
/// use streamfmt::interpreter::{FormatterRegistry, LintWarning, lint_template};
/// use streamfmt::parse;
///
/// let template = parse("{stream.sesaon} {stream.size::size}").unwrap();
/// let warnings = lint_template(&template, &FormatterRegistry::default());
///
/// assert_eq!(warnings.len(), 1);
/// let LintWarning::UnknownProperty { suggestions, .. } = &warnings[0] else {
///     panic!("expected unknown property");
/// };
/// assert_eq!(suggestions, &["season"]);
/// ```
pub fn lint_template(template: &Template, formatters: &FormatterRegistry) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    template.walk(&mut |placeholder, _depth| {
        lint_unknown_property(placeholder, &mut warnings);
        lint_unknown_formatter(placeholder, formatters, &mut warnings);
        lint_invalid_regex(placeholder, &mut warnings);
    });
    warnings
}

fn push_unique(warnings: &mut Vec<LintWarning>, warning: LintWarning) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

/// Detects properties that are not in the catalog for their namespace.
fn lint_unknown_property(placeholder: &Placeholder, warnings: &mut Vec<LintWarning>) {
    if is_known_property(placeholder.namespace, &placeholder.property) {
        return;
    }
    let available = property_names(placeholder.namespace);
    push_unique(
        warnings,
        LintWarning::UnknownProperty {
            namespace: placeholder.namespace,
            property: placeholder.property.clone(),
            suggestions: compute_suggestions(&placeholder.property, &available),
        },
    );
}

/// Detects `Format` modifiers naming a formatter that is not registered.
fn lint_unknown_formatter(
    placeholder: &Placeholder,
    formatters: &FormatterRegistry,
    warnings: &mut Vec<LintWarning>,
) {
    let Some(Modifier::Format(name)) = &placeholder.modifier else {
        return;
    };
    if formatters.has_formatter(name) {
        return;
    }
    push_unique(
        warnings,
        LintWarning::UnknownFormatter {
            name: name.clone(),
            namespace: placeholder.namespace,
            property: placeholder.property.clone(),
            suggestions: compute_suggestions(name, &formatters.names()),
        },
    );
}

/// Detects regex patterns that do not compile.
fn lint_invalid_regex(placeholder: &Placeholder, warnings: &mut Vec<LintWarning>) {
    let Some(Modifier::Regex { pattern, .. }) = &placeholder.modifier else {
        return;
    };
    if let Err(error) = Regex::new(pattern) {
        push_unique(
            warnings,
            LintWarning::InvalidRegex {
                pattern: pattern.clone(),
                namespace: placeholder.namespace,
                property: placeholder.property.clone(),
                message: error.to_string(),
            },
        );
    }
}
