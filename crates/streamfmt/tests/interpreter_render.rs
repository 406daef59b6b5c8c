//! Integration tests for template rendering

use streamfmt::catalog::snippet;
use streamfmt::{Context, Engine, Namespace, RenderWarning, Value, context, parse};

fn render(source: &str, ctx: &Context) -> String {
    Engine::new().render_str(source, ctx).unwrap()
}

fn season(value: impl Into<Value>) -> Context {
    Context::new().with(Namespace::Stream, "season", value)
}

// =========================================================================
// Basics
// =========================================================================

#[test]
fn test_literal_only_renders_unchanged() {
    for source in ["", "plain text", "  spaced  ", "a } b", "✓ Cached | 1080p"] {
        assert_eq!(render(source, &Context::new()), source);
    }
}

#[test]
fn test_placeholder_renders_value() {
    let ctx = context! { stream: { "title" => "Show", "year" => 2024 } };
    assert_eq!(render("{stream.title} ({stream.year})", &ctx), "Show (2024)");
}

#[test]
fn test_absent_placeholder_renders_nothing() {
    assert_eq!(render("[{stream.title}]", &Context::new()), "[]");
}

#[test]
fn test_canonical_value_strings() {
    let ctx = context! {
        stream: { "int" => 42, "float" => 2.5, "whole" => 3.0, "flag" => false },
    };
    assert_eq!(
        render("{stream.int} {stream.float} {stream.whole} {stream.flag}", &ctx),
        "42 2.5 3 false"
    );
}

#[test]
fn test_namespaces_are_separate() {
    let ctx = context! {
        provider: { "name" => "Provider" },
        addon: { "name" => "Addon" },
    };
    assert_eq!(
        render("{provider.name}/{addon.name}/{stream.name}", &ctx),
        "Provider/Addon/"
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let engine = Engine::new();
    let template = parse(snippet("season").unwrap().template).unwrap();
    let ctx = season(4);
    let first = engine.render(&template, &ctx);
    for _ in 0..10 {
        assert_eq!(engine.render(&template, &ctx), first);
    }
}

// =========================================================================
// Comparisons
// =========================================================================

#[test]
fn test_greater_or_equal_zero() {
    let source = r#"{stream.season::>=0["yes"||"no"]}"#;
    assert_eq!(render(source, &season(5)), "yes");
    assert_eq!(render(source, &season(0)), "yes");
    assert_eq!(render(source, &season(-1)), "no");
    assert_eq!(render(source, &Context::new()), "no");
}

#[test]
fn test_absent_is_false_for_every_comparator() {
    for op in ["=", ">", ">=", "<", "<="] {
        for operand in ["0", "-1", "abc", "\"\""] {
            let source = format!(r#"{{stream.season::{op}{operand}["T"||"F"]}}"#);
            assert_eq!(render(&source, &Context::new()), "F", "{source}");
        }
    }
}

#[test]
fn test_numeric_string_compares_numerically() {
    let source = r#"{stream.season::>9["big"||"small"]}"#;
    assert_eq!(render(source, &season("10")), "big");
    assert_eq!(render(source, &season(" 3 ")), "small");
}

#[test]
fn test_non_numeric_value_with_numeric_operand_is_false() {
    for op in ["=", ">", ">=", "<", "<="] {
        let source = format!(r#"{{stream.season::{op}0["T"||"F"]}}"#);
        assert_eq!(render(&source, &season("abc")), "F", "{source}");
        assert_eq!(render(&source, &season(true)), "F", "{source}");
        assert_eq!(render(&source, &season("")), "F", "{source}");
    }
}

#[test]
fn test_float_comparison() {
    let source = r#"{stream.size::<=1.5["small"||"big"]}"#;
    let ctx = context! { stream: { "size" => 1.5 } };
    assert_eq!(render(source, &ctx), "small");
    let ctx = context! { stream: { "size" => 1.51 } };
    assert_eq!(render(source, &ctx), "big");
}

#[test]
fn test_boolean_equals_text() {
    let source = r#"{provider.cached::=true["✓"||"✗"]}"#;
    let cached = context! { provider: { "cached" => true } };
    let uncached = context! { provider: { "cached" => false } };
    assert_eq!(render(source, &cached), "✓");
    assert_eq!(render(source, &uncached), "✗");
    assert_eq!(render(source, &Context::new()), "✗");
}

#[test]
fn test_text_equality_and_ordering() {
    let ctx = context! { stream: { "quality" => "WEBDL" } };
    assert_eq!(render(r#"{stream.quality::=WEBDL["T"||"F"]}"#, &ctx), "T");
    assert_eq!(render(r#"{stream.quality::=webdl["T"||"F"]}"#, &ctx), "F");
    assert_eq!(render(r#"{stream.quality::>BluRay["T"||"F"]}"#, &ctx), "T");
    assert_eq!(render(r#"{stream.quality::<BluRay["T"||"F"]}"#, &ctx), "F");
}

#[test]
fn test_number_against_text_operand_uses_string_form() {
    let ctx = season(2);
    assert_eq!(render(r#"{stream.season::>1a["T"||"F"]}"#, &ctx), "T");
    assert_eq!(render(r#"{stream.season::=two["T"||"F"]}"#, &ctx), "F");
}

// =========================================================================
// Regex
// =========================================================================

#[test]
fn test_regex_snippet() {
    let source = r#"{stream.resolution::/^$|Unknown/[""||" {stream.resolution}"]}"#;
    let ctx = context! { stream: { "resolution" => "1080p" } };
    assert_eq!(render(source, &ctx), " 1080p");
    let ctx = context! { stream: { "resolution" => "Unknown" } };
    assert_eq!(render(source, &ctx), "");
    assert_eq!(render(source, &Context::new()), "");
}

#[test]
fn test_regex_is_case_sensitive_substring_search() {
    let source = r#"{stream.filename::/HDR/["hdr"||"sdr"]}"#;
    let ctx = context! { stream: { "filename" => "Show.S01E01.2160p.HDR.mkv" } };
    assert_eq!(render(source, &ctx), "hdr");
    let ctx = context! { stream: { "filename" => "show.s01e01.hdr.mkv" } };
    assert_eq!(render(source, &ctx), "sdr");
}

#[test]
fn test_regex_against_number_uses_string_form() {
    let source = r#"{stream.year::/^20\d\d$/["modern"||"old"]}"#;
    let ctx = context! { stream: { "year" => 2021 } };
    assert_eq!(render(source, &ctx), "modern");
}

#[test]
fn test_invalid_regex_renders_false_branch_with_warning() {
    let engine = Engine::new();
    let template = parse(r#"{stream.title::/(unclosed/["T"||"F"]}"#).unwrap();
    let ctx = context! { stream: { "title" => "(unclosed" } };
    let (output, warnings) = engine.render_with_warnings(&template, &ctx);
    assert_eq!(output, "F");
    assert_eq!(warnings.len(), 1);
    assert!(matches!(&warnings[0], RenderWarning::InvalidRegex { pattern, .. } if pattern == "(unclosed"));
}

// =========================================================================
// Nesting
// =========================================================================

#[test]
fn test_nested_branch_renders_inner_placeholder() {
    let source = r#"{stream.season::>0["{stream.season}"||""]}"#;
    assert_eq!(render(source, &season(3)), "3");
    assert_eq!(render(source, &season(0)), "");
}

#[test]
fn test_nested_branches_two_levels() {
    let source = r#"{stream.season::>0["S{stream.season::<=9["0"||""]}{stream.season}"||"-"]}"#;
    assert_eq!(render(source, &season(3)), "S03");
    assert_eq!(render(source, &season(12)), "S12");
    assert_eq!(render(source, &season(0)), "-");
}

#[test]
fn test_output_is_not_reparsed() {
    let ctx = context! { stream: { "title" => "{stream.secret}" } };
    assert_eq!(render("{stream.title}", &ctx), "{stream.secret}");
}

#[test]
fn test_render_guard_stops_at_engine_depth() {
    let source = r#"{stream.a::>0["{stream.b::>0["deep"||""]}"||""]}"#;
    let template = parse(source).unwrap();
    let ctx = context! { stream: { "a" => 1, "b" => 1 } };

    let (output, warnings) = Engine::new().render_with_warnings(&template, &ctx);
    assert_eq!(output, "deep");
    assert!(warnings.is_empty());

    let shallow = Engine::builder().max_depth(1).build();
    let (output, warnings) = shallow.render_with_warnings(&template, &ctx);
    assert_eq!(output, "");
    assert_eq!(
        warnings,
        vec![RenderWarning::MaxDepthExceeded {
            max_depth: 1,
            namespace: Namespace::Stream,
            property: "b".into(),
        }]
    );
}

// =========================================================================
// End to end
// =========================================================================

fn episode_context() -> Context {
    context! {
        stream: {
            "title" => "Show",
            "season" => 1,
            "episode" => 2,
            "quality" => "WEBDL",
            "resolution" => "1080p",
        },
    }
}

fn snippet_sequence() -> String {
    ["season", "episode", "quality", "resolution"]
        .iter()
        .map(|id| snippet(id).unwrap().template)
        .collect()
}

#[test]
fn test_end_to_end_snippets() {
    assert_eq!(render(&snippet_sequence(), &episode_context()), "S01E02 WEBDL 1080p");
}

#[test]
fn test_end_to_end_with_title() {
    let source = format!("{{stream.title}} {}", snippet_sequence());
    assert_eq!(render(&source, &episode_context()), "Show S01E02 WEBDL 1080p");
}

#[test]
fn test_end_to_end_double_digit_episode() {
    let mut ctx = episode_context();
    ctx.insert(Namespace::Stream, "season", 10);
    ctx.insert(Namespace::Stream, "episode", 11);
    ctx.remove(Namespace::Stream, "quality");
    assert_eq!(render(&snippet_sequence(), &ctx), "S10E11 1080p");
}
