//! Integration tests for template linting

use streamfmt::catalog::{is_known_property, properties, property_names};
use streamfmt::interpreter::{FormatterRegistry, lint_template};
use streamfmt::{Engine, LintWarning, Namespace, parse};

fn lint(source: &str) -> Vec<LintWarning> {
    lint_template(&parse(source).unwrap(), &FormatterRegistry::default())
}

#[test]
fn test_clean_template() {
    let warnings = lint(r#"{stream.title} {stream.size::size} {provider.cached::=true["✓"||""]}"#);
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn test_unknown_property_with_suggestion() {
    let warnings = lint("{stream.resoltion}");
    assert_eq!(
        warnings,
        vec![LintWarning::UnknownProperty {
            namespace: Namespace::Stream,
            property: "resoltion".into(),
            suggestions: vec!["resolution".into()],
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "unknown property 'stream.resoltion' (did you mean: resolution?)"
    );
}

#[test]
fn test_unknown_property_without_suggestion() {
    let warnings = lint("{addon.homepage}");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "unknown property 'addon.homepage'");
}

#[test]
fn test_properties_are_namespace_specific() {
    assert!(is_known_property(Namespace::Provider, "cached"));
    assert!(!is_known_property(Namespace::Stream, "cached"));
    assert!(!is_known_property(Namespace::Stream, "Title"));
    assert_eq!(lint("{addon.cached}").len(), 1);
}

#[test]
fn test_catalog_contents() {
    assert_eq!(properties(Namespace::Stream).len(), 17);
    assert_eq!(property_names(Namespace::Provider), ["id", "name", "shortName", "cached"]);
    assert_eq!(property_names(Namespace::Addon), ["id", "name"]);
    assert!(properties(Namespace::Stream).iter().all(|p| !p.description.is_empty()));
}

#[test]
fn test_unknown_formatter_with_suggestion() {
    let warnings = lint("{stream.size::sise}");
    assert_eq!(
        warnings,
        vec![LintWarning::UnknownFormatter {
            name: "sise".into(),
            namespace: Namespace::Stream,
            property: "size".into(),
            suggestions: vec!["size".into()],
        }]
    );
}

#[test]
fn test_invalid_regex() {
    let warnings = lint(r#"{stream.title::/[a-/["x"||"y"]}"#);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(&warnings[0], LintWarning::InvalidRegex { pattern, .. } if pattern == "[a-"));
}

#[test]
fn test_lint_descends_into_branches() {
    let warnings = lint(r#"{stream.season::>0["{stream.sesaon}"||"{stream.episode::bogus}"]}"#);
    assert_eq!(warnings.len(), 2);
    assert!(matches!(&warnings[0], LintWarning::UnknownProperty { property, .. } if property == "sesaon"));
    assert!(matches!(&warnings[1], LintWarning::UnknownFormatter { name, .. } if name == "bogus"));
}

#[test]
fn test_duplicate_findings_reported_once() {
    let warnings = lint("{stream.foo}{stream.foo}");
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_engine_lint_uses_engine_formatters() {
    let mut engine = Engine::new();
    let template = engine.parse("{stream.title::shout}").unwrap();
    assert_eq!(engine.lint(&template).len(), 1);

    engine
        .formatters_mut()
        .register("shout", |value| value.map(|v| format!("{v}!")).unwrap_or_default());
    assert!(engine.lint(&template).is_empty());
}
