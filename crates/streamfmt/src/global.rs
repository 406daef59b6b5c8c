//! Process-wide default engine.
//!
//! Provides shared access to an [`Engine`] with default settings, removing
//! the need to thread an engine through code that only renders templates.

use std::sync::LazyLock;

use crate::parser::{ParseError, Template};
use crate::{Context, Engine};

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::new);

/// The process-wide default engine.
pub fn engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Renders a parsed template with the default engine.
pub fn render(template: &Template, context: &Context) -> String {
    DEFAULT_ENGINE.render(template, context)
}

/// Parses (or fetches from the default engine's cache) and renders a
/// template source.
///
/// # Example
///
/// ```
/// use streamfmt::{Context, Namespace};
///
/// let ctx = Context::new().with(Namespace::Provider, "cached", true);
/// let output = streamfmt::render_str(r#"{provider.cached::=true["✓"||"✗"]}"#, &ctx).unwrap();
/// assert_eq!(output, "✓");
/// ```
pub fn render_str(source: &str, context: &Context) -> Result<String, ParseError> {
    DEFAULT_ENGINE.render_str(source, context)
}
