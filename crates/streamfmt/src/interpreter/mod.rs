//! streamfmt interpreter for rendering templates.
//!
//! This module provides the rendering engine that takes parsed templates and
//! a context of property values and produces output strings. It applies
//! formatters, evaluates comparison and regex branches, and reports
//! anomalies as warnings rather than errors.

mod compare;
mod context;
mod engine;
mod error;
mod evaluator;
mod formatters;
mod lint;
mod regex_cache;

pub use compare::compare;
pub use context::RenderContext;
pub use engine::{DEFAULT_CACHE_CAPACITY, Engine};
pub use error::{LintWarning, RenderWarning, compute_suggestions};
pub use evaluator::render_template;
pub use formatters::{
    FormatterFn, FormatterRegistry, format_lower, format_size, format_title, format_upper,
};
pub use lint::lint_template;
pub use regex_cache::{DEFAULT_REGEX_CAPACITY, RegexCache};
