//! Parse error types for streamfmt templates.

use thiserror::Error;

/// An error that aborted parsing of a template.
///
/// Every variant carries the byte offset of the failure in the outermost
/// source string, including failures inside nested branch templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `{` with no matching `}`.
    #[error("unterminated placeholder starting at byte {offset}")]
    UnterminatedPlaceholder { offset: usize },

    /// A branch string opened with `"` that is never closed.
    #[error("unterminated branch starting at byte {offset}")]
    UnterminatedBranch { offset: usize },

    /// A regex pattern opened with `/` that is never closed.
    #[error("unterminated regex starting at byte {offset}")]
    UnterminatedRegex { offset: usize },

    /// Branch brackets that do not follow `["..."||"..."]`.
    #[error("malformed branches at byte {offset}: {message}")]
    MalformedBranches { offset: usize, message: String },

    /// A comparison or regex modifier with no branches.
    #[error("modifier '{operator}' at byte {offset} requires branches [\"...\"||\"...\"]")]
    MissingBranches { operator: String, offset: usize },

    /// A modifier that is not a comparison, regex or formatter name.
    #[error("invalid operator '{token}' at byte {offset}")]
    InvalidOperator { token: String, offset: usize },

    /// A namespace other than `stream`, `provider` or `addon`.
    #[error("unknown namespace '{namespace}' at byte {offset}")]
    UnknownNamespace { namespace: String, offset: usize },

    /// Any other syntax error.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// Branch templates nested beyond the configured limit.
    #[error("branches nested deeper than {max_depth} levels at byte {offset}")]
    NestingTooDeep { max_depth: usize, offset: usize },
}

impl ParseError {
    /// Byte offset of the failure in the source string.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedPlaceholder { offset }
            | ParseError::UnterminatedBranch { offset }
            | ParseError::UnterminatedRegex { offset }
            | ParseError::MalformedBranches { offset, .. }
            | ParseError::MissingBranches { offset, .. }
            | ParseError::InvalidOperator { offset, .. }
            | ParseError::UnknownNamespace { offset, .. }
            | ParseError::Syntax { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => *offset,
        }
    }

    /// Converts the offset into a 1-based `(line, column)` pair in `source`.
    ///
    /// Columns count characters, not bytes.
    pub fn line_column(&self, source: &str) -> (usize, usize) {
        let mut offset = self.offset().min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let consumed = &source[..offset];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
        let column = consumed[line_start..].chars().count() + 1;
        (line, column)
    }
}
