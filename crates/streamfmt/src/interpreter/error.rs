//! Diagnostic types for the streamfmt interpreter.
//!
//! Rendering never fails. Anything that degrades the output is reported as a
//! [`RenderWarning`] through the render context instead of an error.

use strsim::levenshtein;
use thiserror::Error;

use crate::types::Namespace;

/// A non-fatal anomaly encountered while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderWarning {
    /// A regex modifier whose pattern does not compile. The false branch
    /// was rendered.
    #[error("invalid regex /{pattern}/ on {namespace}.{property}: {message}")]
    InvalidRegex {
        pattern: String,
        namespace: Namespace,
        property: String,
        message: String,
    },

    /// A formatter name that is not registered. The raw value was rendered.
    #[error("unknown formatter '{name}' on {namespace}.{property}")]
    UnknownFormatter {
        name: String,
        namespace: Namespace,
        property: String,
    },

    /// Branches nested deeper than the engine allows. Nothing was rendered
    /// for the branch.
    #[error("branch nesting exceeded {max_depth} levels at {namespace}.{property}")]
    MaxDepthExceeded {
        max_depth: usize,
        namespace: Namespace,
        property: String,
    },
}

/// A static finding about a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A property that is not in the property catalog. It will always
    /// render as absent unless the context supplies it.
    #[error("unknown property '{namespace}.{property}'{}", did_you_mean(.suggestions))]
    UnknownProperty {
        namespace: Namespace,
        property: String,
        suggestions: Vec<String>,
    },

    /// A formatter name that is not registered.
    #[error("unknown formatter '{name}' on {namespace}.{property}{}", did_you_mean(.suggestions))]
    UnknownFormatter {
        name: String,
        namespace: Namespace,
        property: String,
        suggestions: Vec<String>,
    },

    /// A regex pattern that does not compile. The placeholder will always
    /// select its false branch.
    #[error("invalid regex /{pattern}/ on {namespace}.{property}: {message}")]
    InvalidRegex {
        pattern: String,
        namespace: Namespace,
        property: String,
        message: String,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Returns up to three names from `available` that are close to `target`.
///
/// Matching is case-insensitive. Names within an edit distance of 1 (for
/// targets of three characters or fewer) or 2 (longer targets) qualify,
/// closest first.
pub fn compute_suggestions(target: &str, available: &[&str]) -> Vec<String> {
    let target_lower = target.to_lowercase();
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(|name| (levenshtein(&target_lower, &name.to_lowercase()), *name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
