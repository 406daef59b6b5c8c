//! streamfmt template parser.
//!
//! This module provides parsing for template strings. The parser produces an
//! AST that can be rendered by the interpreter or inspected by external
//! tooling.

pub mod ast;
pub mod error;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use template::{DEFAULT_MAX_DEPTH, parse_template, parse_template_with_depth};
