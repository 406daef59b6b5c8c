//! A small template language for formatting stream metadata.
//!
//! Templates mix literal text with `{namespace.property::modifier}`
//! placeholders. Modifiers apply a named formatter (`::size`), or branch on a
//! comparison (`::>=0["…"||"…"]`) or a regex search (`::/pattern/["…"||"…"]`).
//! Branch bodies are templates themselves.
//!
//! ```
//! use streamfmt::{Namespace, context};
//!
//! let ctx = context! {
//!     stream: { "season" => 1, "episode" => 2, "quality" => "WEBDL" },
//! };
//! let output = streamfmt::render_str(
//!     r#"S{stream.season::<=9["0"||""]}{stream.season} {stream.quality::/^$|Unknown/[""||"{stream.quality}"]}"#,
//!     &ctx,
//! )
//! .unwrap();
//! assert_eq!(output, "S01 WEBDL");
//! assert!(ctx.get(Namespace::Stream, "episode").is_some());
//! ```

pub mod catalog;
pub mod definition;
mod global;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use definition::{
    CompiledFormatter, DefinitionError, DefinitionField, FormatterDefinition, RenderedStream,
};
pub use global::{engine, render, render_str};
pub use interpreter::{
    Engine, FormatterFn, FormatterRegistry, LintWarning, RenderWarning, compute_suggestions,
};
pub use parser::{ParseError, Template, parse_template as parse, parse_template_with_depth};
pub use types::{Context, Namespace, Properties, TemplateId, Value, ValueKind};

/// Creates a [`Context`] from per-namespace key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, strings, or booleans directly. Namespaces may be
/// omitted and appear in any order.
///
/// # Example
///
/// ```
/// use streamfmt::{Namespace, Value, context};
///
/// let ctx = context! {
///     stream: { "title" => "Show", "season" => 3 },
///     provider: { "cached" => true },
/// };
/// assert_eq!(ctx.get(Namespace::Stream, "season"), Some(&Value::Number(3)));
/// assert_eq!(ctx.get(Namespace::Provider, "cached"), Some(&Value::Bool(true)));
/// assert!(ctx.addon.is_empty());
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Context::new()
    };
    { $($namespace:ident: { $($key:expr => $value:expr),* $(,)? }),+ $(,)? } => {
        {
            let mut ctx = $crate::Context::new();
            $(
                $(
                    ctx.$namespace.insert(
                        $key.to_string(),
                        ::std::convert::Into::<$crate::Value>::into($value),
                    );
                )*
            )+
            ctx
        }
    };
}
