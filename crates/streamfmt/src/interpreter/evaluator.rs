//! Template rendering.
//!
//! Rendering walks a parsed template once, writing literals verbatim and
//! resolving each placeholder against the context. Branch templates are
//! rendered with the same algorithm; rendered output is never re-parsed.

use crate::interpreter::compare::compare;
use crate::interpreter::{FormatterRegistry, RegexCache, RenderContext, RenderWarning};
use crate::parser::ast::{Branches, Modifier, Node, Placeholder, Template};

/// Render a template, producing the output string.
///
/// Rendering never fails. Anomalies (unknown formatter, invalid regex,
/// branches nested past the depth limit) fall back to a defined output and
/// are recorded as warnings in `ctx`:
/// - unknown formatter: the raw value
/// - invalid regex: the false branch
/// - depth exceeded: nothing
///
/// # Example
///
/// ```
/// use streamfmt::interpreter::{FormatterRegistry, RegexCache, RenderContext, render_template};
/// use streamfmt::{Context, Namespace, parse};
///
/// let template = parse(r#"{stream.season::>0["S{stream.season}"||""]}"#).unwrap();
/// let context = Context::new().with(Namespace::Stream, "season", 3);
///
/// let mut ctx = RenderContext::new(&context);
/// let output = render_template(
///     &template,
///     &mut ctx,
///     &FormatterRegistry::default(),
///     &RegexCache::new(),
/// );
/// assert_eq!(output, "S3");
/// assert!(ctx.warnings().is_empty());
/// ```
pub fn render_template(
    template: &Template,
    ctx: &mut RenderContext<'_>,
    formatters: &FormatterRegistry,
    regexes: &RegexCache,
) -> String {
    let mut output = String::new();
    render_into(&mut output, template, ctx, formatters, regexes);
    output
}

fn render_into(
    output: &mut String,
    template: &Template,
    ctx: &mut RenderContext<'_>,
    formatters: &FormatterRegistry,
    regexes: &RegexCache,
) {
    for node in &template.nodes {
        match node {
            Node::Literal(text) => output.push_str(text),
            Node::Placeholder(placeholder) => {
                render_placeholder(output, placeholder, ctx, formatters, regexes);
            }
        }
    }
}

fn render_placeholder(
    output: &mut String,
    placeholder: &Placeholder,
    ctx: &mut RenderContext<'_>,
    formatters: &FormatterRegistry,
    regexes: &RegexCache,
) {
    let value = ctx.get(placeholder.namespace, &placeholder.property);
    match &placeholder.modifier {
        None => {
            if let Some(value) = value {
                output.push_str(&value.to_string());
            }
        }
        Some(Modifier::Format(name)) => match formatters.get(name) {
            Some(formatter) => output.push_str(&formatter(value)),
            None => {
                ctx.add_warning(RenderWarning::UnknownFormatter {
                    name: name.clone(),
                    namespace: placeholder.namespace,
                    property: placeholder.property.clone(),
                });
                if let Some(value) = value {
                    output.push_str(&value.to_string());
                }
            }
        },
        Some(Modifier::Compare {
            op,
            operand,
            branches,
        }) => {
            let outcome = compare(value, *op, operand);
            render_branch(output, placeholder, branches, outcome, ctx, formatters, regexes);
        }
        Some(Modifier::Regex { pattern, branches }) => {
            let haystack = value.map(ToString::to_string).unwrap_or_default();
            let outcome = match regexes.is_match(pattern, &haystack) {
                Ok(matched) => matched,
                Err(message) => {
                    ctx.add_warning(RenderWarning::InvalidRegex {
                        pattern: pattern.clone(),
                        namespace: placeholder.namespace,
                        property: placeholder.property.clone(),
                        message,
                    });
                    false
                }
            };
            render_branch(output, placeholder, branches, outcome, ctx, formatters, regexes);
        }
    }
}

fn render_branch(
    output: &mut String,
    placeholder: &Placeholder,
    branches: &Branches,
    outcome: bool,
    ctx: &mut RenderContext<'_>,
    formatters: &FormatterRegistry,
    regexes: &RegexCache,
) {
    if !ctx.enter_branch() {
        ctx.add_warning(RenderWarning::MaxDepthExceeded {
            max_depth: ctx.max_depth(),
            namespace: placeholder.namespace,
            property: placeholder.property.clone(),
        });
        return;
    }
    let selected = if outcome {
        &branches.when_true
    } else {
        &branches.when_false
    };
    render_into(output, selected, ctx, formatters, regexes);
    ctx.exit_branch();
}
