//! Integration tests for template parsing

use streamfmt::Namespace;
use streamfmt::parser::{
    Comparator, Modifier, Node, Operand, ParseError, Placeholder, Template, parse_template,
    parse_template_with_depth,
};

fn single_placeholder(source: &str) -> Placeholder {
    let template = parse_template(source).unwrap();
    assert_eq!(template.nodes.len(), 1, "expected one node in {source:?}");
    match template.nodes.into_iter().next() {
        Some(Node::Placeholder(placeholder)) => placeholder,
        other => panic!("expected placeholder, got {other:?}"),
    }
}

// =========================================================================
// Literals and placeholders
// =========================================================================

#[test]
fn test_empty_template() {
    let template = parse_template("").unwrap();
    assert!(template.is_empty());
}

#[test]
fn test_literal_only() {
    let template = parse_template("Hello, world!").unwrap();
    assert_eq!(template, Template::literal("Hello, world!"));
}

#[test]
fn test_literal_preserves_whitespace() {
    let template = parse_template("  a \t b\n").unwrap();
    assert_eq!(template.nodes, vec![Node::Literal("  a \t b\n".into())]);
}

#[test]
fn test_stray_closing_brace_is_literal() {
    let template = parse_template("a } b").unwrap();
    assert_eq!(template, Template::literal("a } b"));
}

#[test]
fn test_simple_placeholder() {
    let placeholder = single_placeholder("{stream.title}");
    assert_eq!(placeholder, Placeholder::new(Namespace::Stream, "title"));
}

#[test]
fn test_all_namespaces() {
    for (source, namespace) in [
        ("{stream.id}", Namespace::Stream),
        ("{provider.id}", Namespace::Provider),
        ("{addon.id}", Namespace::Addon),
    ] {
        assert_eq!(single_placeholder(source).namespace, namespace);
    }
}

#[test]
fn test_whitespace_inside_braces_is_insignificant() {
    let placeholder = single_placeholder("{ stream . size :: size }");
    assert_eq!(placeholder.property, "size");
    assert_eq!(placeholder.modifier, Some(Modifier::Format("size".into())));
}

#[test]
fn test_mixed_literals_and_placeholders() {
    let template = parse_template("{stream.title} ({stream.year})").unwrap();
    assert_eq!(
        template.nodes,
        vec![
            Node::Placeholder(Placeholder::new(Namespace::Stream, "title")),
            Node::Literal(" (".into()),
            Node::Placeholder(Placeholder::new(Namespace::Stream, "year")),
            Node::Literal(")".into()),
        ]
    );
}

#[test]
fn test_unknown_property_is_not_a_parse_error() {
    let placeholder = single_placeholder("{stream.doesNotExist}");
    assert_eq!(placeholder.property, "doesNotExist");
}

// =========================================================================
// Modifiers
// =========================================================================

#[test]
fn test_format_modifier() {
    let placeholder = single_placeholder("{stream.size::size}");
    assert_eq!(placeholder.modifier, Some(Modifier::Format("size".into())));
}

#[test]
fn test_all_comparators() {
    for (symbol, expected) in [
        ("=", Comparator::Eq),
        (">", Comparator::Gt),
        (">=", Comparator::Ge),
        ("<", Comparator::Lt),
        ("<=", Comparator::Le),
    ] {
        let source = format!(r#"{{stream.season::{symbol}1["a"||"b"]}}"#);
        match single_placeholder(&source).modifier {
            Some(Modifier::Compare { op, operand, .. }) => {
                assert_eq!(op, expected, "{source}");
                assert_eq!(operand, Operand::Number(1.0));
            }
            other => panic!("expected comparison, got {other:?}"),
        }
    }
}

#[test]
fn test_comparison_branches() {
    let placeholder = single_placeholder(r#"{stream.season::>=0["S"||""]}"#);
    let branches = placeholder.branches().unwrap();
    assert_eq!(branches.when_true, Template::literal("S"));
    assert!(branches.when_false.is_empty());
}

#[test]
fn test_text_operand() {
    match single_placeholder(r#"{provider.cached::=true["yes"||"no"]}"#).modifier {
        Some(Modifier::Compare { operand, .. }) => {
            assert_eq!(operand, Operand::Text("true".into()));
        }
        other => panic!("expected comparison, got {other:?}"),
    }
}

#[test]
fn test_quoted_operand() {
    match single_placeholder(r#"{stream.quality::="WEB DL"["a"||"b"]}"#).modifier {
        Some(Modifier::Compare { operand, .. }) => {
            assert_eq!(operand, Operand::Text("WEB DL".into()));
        }
        other => panic!("expected comparison, got {other:?}"),
    }
}

#[test]
fn test_float_operand() {
    match single_placeholder(r#"{stream.size::>1.5["big"||"small"]}"#).modifier {
        Some(Modifier::Compare { operand, .. }) => assert_eq!(operand, Operand::Number(1.5)),
        other => panic!("expected comparison, got {other:?}"),
    }
}

#[test]
fn test_regex_modifier() {
    match single_placeholder(r#"{stream.quality::/^$|Unknown/[""||" {stream.quality}"]}"#).modifier
    {
        Some(Modifier::Regex { pattern, branches }) => {
            assert_eq!(pattern, "^$|Unknown");
            assert!(branches.when_true.is_empty());
            assert_eq!(
                branches.when_false.nodes,
                vec![
                    Node::Literal(" ".into()),
                    Node::Placeholder(Placeholder::new(Namespace::Stream, "quality")),
                ]
            );
        }
        other => panic!("expected regex, got {other:?}"),
    }
}

#[test]
fn test_regex_escaped_slash() {
    match single_placeholder(r#"{stream.filename::/a\/b/["y"||"n"]}"#).modifier {
        Some(Modifier::Regex { pattern, .. }) => assert_eq!(pattern, "a/b"),
        other => panic!("expected regex, got {other:?}"),
    }
}

#[test]
fn test_regex_keeps_other_escapes() {
    match single_placeholder(r#"{stream.filename::/\d+\.mkv/["y"||"n"]}"#).modifier {
        Some(Modifier::Regex { pattern, .. }) => assert_eq!(pattern, r"\d+\.mkv"),
        other => panic!("expected regex, got {other:?}"),
    }
}

#[test]
fn test_nested_branch_templates() {
    let placeholder = single_placeholder(r#"{stream.season::>0["{stream.season::<=9["0"||""]}"||""]}"#);
    let branches = placeholder.branches().unwrap();
    let inner = match &branches.when_true.nodes[..] {
        [Node::Placeholder(inner)] => inner,
        other => panic!("expected nested placeholder, got {other:?}"),
    };
    let inner_branches = inner.branches().unwrap();
    assert_eq!(inner_branches.when_true, Template::literal("0"));
}

#[test]
fn test_nested_branch_with_brace_in_regex() {
    assert!(parse_template(r#"{stream.x::/\{/["y"||"n"]}"#).is_ok());

    let placeholder = single_placeholder(r#"{stream.a::>0["{stream.x::/\{/["y"||"n"]}"||""]}"#);
    let branches = placeholder.branches().unwrap();
    let inner = match &branches.when_true.nodes[..] {
        [Node::Placeholder(inner)] => inner,
        other => panic!("expected nested placeholder, got {other:?}"),
    };
    match &inner.modifier {
        Some(Modifier::Regex { pattern, branches }) => {
            assert_eq!(pattern, r"\{");
            assert_eq!(branches.when_true, Template::literal("y"));
            assert_eq!(branches.when_false, Template::literal("n"));
        }
        other => panic!("expected regex modifier, got {other:?}"),
    }
}

#[test]
fn test_nested_branch_with_closing_brace_literal() {
    let placeholder = single_placeholder(r#"{stream.a::>0["{stream.b::>0["}"||""]}"||""]}"#);
    let branches = placeholder.branches().unwrap();
    let inner = match &branches.when_true.nodes[..] {
        [Node::Placeholder(inner)] => inner,
        other => panic!("expected nested placeholder, got {other:?}"),
    };
    assert_eq!(inner.branches().unwrap().when_true, Template::literal("}"));
    assert!(branches.when_false.is_empty());
}

#[test]
fn test_template_depth() {
    let flat = parse_template("{stream.title}").unwrap();
    assert_eq!(flat.depth(), 0);

    let nested =
        parse_template(r#"{stream.season::>0["{stream.season::<=9["0"||""]}"||""]}"#).unwrap();
    assert_eq!(nested.depth(), 2);
}

#[test]
fn test_placeholders_includes_branches() {
    let template =
        parse_template(r#"{stream.title} {stream.season::>0["S{stream.season}"||"{addon.name}"]}"#)
            .unwrap();
    let names: Vec<_> = template
        .placeholders()
        .iter()
        .map(|p| format!("{}.{}", p.namespace, p.property))
        .collect();
    assert_eq!(names, ["stream.title", "stream.season", "stream.season", "addon.name"]);
}

#[test]
fn test_display_quotes_text_operand_when_needed() {
    let source = r#"{stream.x::=" a"["y"||"n"]}"#;
    let template = parse_template(source).unwrap();
    assert_eq!(template.to_string(), source);
    assert_eq!(parse_template(&template.to_string()).unwrap(), template);

    let bare = parse_template(r#"{provider.cached::=true["y"||""]}"#).unwrap();
    assert_eq!(bare.to_string(), r#"{provider.cached::=true["y"||""]}"#);
}

#[test]
fn test_display_round_trip() {
    let source = r#"{stream.title} {stream.season::>=0["S"||""]}{stream.quality::/^$|Unknown/[""||" {stream.quality}"]} {stream.size::size}"#;
    let template = parse_template(source).unwrap();
    assert_eq!(template.to_string(), source);
    assert_eq!(parse_template(&template.to_string()).unwrap(), template);
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_error_unterminated_placeholder() {
    let err = parse_template("Hello {stream.title").unwrap_err();
    assert_eq!(err, ParseError::UnterminatedPlaceholder { offset: 6 });
}

#[test]
fn test_error_unterminated_branch() {
    let err = parse_template(r#"{stream.season::>0["missing bracket"#).unwrap_err();
    assert_eq!(err, ParseError::UnterminatedBranch { offset: 19 });
}

#[test]
fn test_error_unterminated_branch_list() {
    let err = parse_template(r#"{stream.season::>0["a"||"b""#).unwrap_err();
    assert_eq!(err, ParseError::UnterminatedBranch { offset: 18 });
}

#[test]
fn test_error_unterminated_regex() {
    let err = parse_template("{stream.quality::/abc").unwrap_err();
    assert_eq!(err, ParseError::UnterminatedRegex { offset: 17 });
}

#[test]
fn test_error_missing_branches_on_comparison() {
    let err = parse_template("{stream.season::>0}").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingBranches {
            operator: ">".into(),
            offset: 16
        }
    );
}

#[test]
fn test_error_missing_branches_on_regex() {
    let err = parse_template("{stream.quality::/x/}").unwrap_err();
    assert!(matches!(err, ParseError::MissingBranches { offset: 17, .. }));
}

#[test]
fn test_error_malformed_branches() {
    let err = parse_template(r#"{stream.season::>0["a" "b"]}"#).unwrap_err();
    assert!(matches!(err, ParseError::MalformedBranches { offset: 23, .. }), "{err:?}");
}

#[test]
fn test_error_unquoted_branch() {
    let err = parse_template(r#"{stream.season::>0[a||"b"]}"#).unwrap_err();
    assert!(matches!(err, ParseError::MalformedBranches { offset: 19, .. }), "{err:?}");
}

#[test]
fn test_error_unknown_namespace() {
    let err = parse_template("{user.name}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownNamespace {
            namespace: "user".into(),
            offset: 1
        }
    );
}

#[test]
fn test_error_invalid_operator() {
    let err = parse_template(r#"{stream.season::!0["a"||"b"]}"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidOperator {
            token: "!0".into(),
            offset: 16
        }
    );
}

#[test]
fn test_error_doubled_operator() {
    let err = parse_template(r#"{stream.season::>>0["a"||"b"]}"#).unwrap_err();
    assert!(matches!(err, ParseError::InvalidOperator { ref token, .. } if token == ">>"));
}

#[test]
fn test_error_formatter_with_branches() {
    let err = parse_template(r#"{stream.size::size["a"||"b"]}"#).unwrap_err();
    assert!(matches!(err, ParseError::InvalidOperator { ref token, offset: 14 } if token == "size"));
}

#[test]
fn test_error_missing_property() {
    let err = parse_template("{stream.}").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { offset: 8, .. }), "{err:?}");
}

#[test]
fn test_error_empty_modifier() {
    let err = parse_template("{stream.size::}").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{err:?}");
}

#[test]
fn test_error_offset_inside_nested_branch() {
    let err = parse_template(r#"{stream.season::>0["{user.name}"||""]}"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownNamespace {
            namespace: "user".into(),
            offset: 21
        }
    );
}

#[test]
fn test_error_nesting_too_deep() {
    let source = r#"{stream.a::>0["{stream.b::>0["{stream.c::>0["x"||""]}"||""]}"||""]}"#;
    assert!(parse_template_with_depth(source, 3).is_ok());
    let err = parse_template_with_depth(source, 2).unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { max_depth: 2, .. }), "{err:?}");
}

#[test]
fn test_error_line_column() {
    let source = "line one\nline {two";
    let err = parse_template(source).unwrap_err();
    assert_eq!(err.offset(), 14);
    assert_eq!(err.line_column(source), (2, 6));
}
