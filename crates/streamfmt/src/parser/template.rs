//! Template string parser using winnow.
//!
//! Parses streamfmt template strings into an AST. Handles:
//! - Literal text (verbatim, including whitespace)
//! - Placeholders: `{namespace.property}`
//! - Formatter modifiers: `{stream.size::size}`
//! - Comparisons with branches: `{stream.season::>0["S"||""]}`
//! - Regex tests with branches: `{stream.quality::/^$|Unknown/[""||" {stream.quality}"]}`
//!
//! Branch strings are templates themselves and are parsed recursively by the
//! same parser, with error offsets reported against the outermost source. A
//! branch ends at the first `"` in literal position; quotes inside nested
//! placeholders belong to their own branches.

use super::ast::{Branches, Comparator, Modifier, Node, Operand, Placeholder, Template};
use super::error::ParseError;
use crate::types::Namespace;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Maximum branch nesting depth accepted by [`parse_template`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Parse a template string into an AST.
///
/// # Example
///
/// ```
/// use streamfmt::parser::{Node, parse_template};
///
/// let template = parse_template("{stream.title} ({stream.year})").unwrap();
/// assert_eq!(template.nodes.len(), 4);
/// assert_eq!(template.nodes[1], Node::Literal(" (".into()));
/// ```
pub fn parse_template(source: &str) -> Result<Template, ParseError> {
    parse_template_with_depth(source, DEFAULT_MAX_DEPTH)
}

/// Parse a template string, rejecting branches nested deeper than `max_depth`.
pub fn parse_template_with_depth(source: &str, max_depth: usize) -> Result<Template, ParseError> {
    TemplateParser::new(source, 0, 0, max_depth, false).template()
}

/// Recursive-descent driver over a template fragment.
///
/// `fragment` is the text being parsed (the whole source, or the rest of it
/// after a branch's opening quote) and `base` is its byte offset in the
/// outermost source. In a branch body, parsing stops at the closing `"`.
struct TemplateParser<'s> {
    fragment: &'s str,
    remaining: &'s str,
    base: usize,
    depth: usize,
    max_depth: usize,
    in_branch: bool,
}

impl<'s> TemplateParser<'s> {
    fn new(
        fragment: &'s str,
        base: usize,
        depth: usize,
        max_depth: usize,
        in_branch: bool,
    ) -> Self {
        Self {
            fragment,
            remaining: fragment,
            base,
            depth,
            max_depth,
            in_branch,
        }
    }

    /// Byte offset of the current position in the outermost source.
    fn offset(&self) -> usize {
        self.base + self.fragment.len() - self.remaining.len()
    }

    /// Parse template nodes up to the end of input, or up to the closing
    /// quote of a branch body.
    fn template(&mut self) -> Result<Template, ParseError> {
        let in_branch = self.in_branch;
        let mut nodes = Vec::new();
        while let Some(next) = self.remaining.chars().next() {
            match next {
                '"' if in_branch => break,
                '{' => nodes.push(Node::Placeholder(self.placeholder()?)),
                _ => {
                    let end = self
                        .remaining
                        .find(|c: char| c == '{' || (in_branch && c == '"'))
                        .unwrap_or(self.remaining.len());
                    let (text, rest) = self.remaining.split_at(end);
                    nodes.push(Node::Literal(text.to_string()));
                    self.remaining = rest;
                }
            }
        }
        Ok(Template { nodes })
    }

    /// Parse `{ namespace . property ( :: modifier )? }`.
    fn placeholder(&mut self) -> Result<Placeholder, ParseError> {
        let start = self.offset();
        self.advance(1);
        self.skip_ws();

        let namespace_offset = self.offset();
        let name = self
            .run(identifier)
            .ok_or_else(|| self.expected(start, "a namespace"))?;
        let namespace: Namespace = name.parse().map_err(|_| {
            if self.remaining.contains('}') {
                ParseError::UnknownNamespace {
                    namespace: name.to_string(),
                    offset: namespace_offset,
                }
            } else {
                ParseError::UnterminatedPlaceholder { offset: start }
            }
        })?;

        self.skip_ws();
        self.expect('.', start, "'.' after the namespace")?;
        self.skip_ws();

        let property_offset = self.offset();
        let property = self
            .run(identifier)
            .ok_or_else(|| self.expected(start, "a property name"))?;
        if property.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ParseError::Syntax {
                offset: property_offset,
                message: format!("property name '{property}' cannot start with a digit"),
            });
        }
        self.skip_ws();

        let modifier = if self.eat("::") {
            self.skip_ws();
            let modifier = self.modifier(start)?;
            self.skip_ws();
            Some(modifier)
        } else {
            None
        };

        self.expect('}', start, "'}' to close the placeholder")?;
        Ok(Placeholder {
            namespace,
            property: property.to_string(),
            modifier,
        })
    }

    /// Parse the text after `::`.
    fn modifier(&mut self, start: usize) -> Result<Modifier, ParseError> {
        let offset = self.offset();
        match self.remaining.chars().next() {
            None => Err(ParseError::UnterminatedPlaceholder { offset: start }),
            Some('<' | '>' | '=') => self.comparison(start, offset),
            Some('/') => self.regex(start, offset),
            Some(c) if is_ident_start(c) => {
                let name = self
                    .run(identifier)
                    .ok_or_else(|| self.expected(start, "a formatter name"))?;
                self.skip_ws();
                if self.remaining.starts_with('[') {
                    return Err(ParseError::InvalidOperator {
                        token: name.to_string(),
                        offset,
                    });
                }
                Ok(Modifier::Format(name.to_string()))
            }
            Some(_) => match self.operator_token() {
                "" => Err(self.expected(start, "a modifier after '::'")),
                token => Err(ParseError::InvalidOperator {
                    token: token.to_string(),
                    offset,
                }),
            },
        }
    }

    /// Parse `op operand [branches]`.
    fn comparison(&mut self, start: usize, offset: usize) -> Result<Modifier, ParseError> {
        let op = self
            .run(comparator)
            .ok_or_else(|| self.expected(start, "a comparison operator"))?;
        if let Some(next) = self
            .remaining
            .chars()
            .next()
            .filter(|c| matches!(c, '<' | '>' | '=' | '!'))
        {
            return Err(ParseError::InvalidOperator {
                token: format!("{}{next}", op.symbol()),
                offset,
            });
        }

        let raw = self.run(operand_text).unwrap_or_default();
        let operand = Operand::parse(raw);
        if !self.remaining.starts_with('[') {
            return Err(self.missing_branches(start, op.symbol(), offset));
        }
        let branches = self.branches()?;
        Ok(Modifier::Compare {
            op,
            operand,
            branches,
        })
    }

    /// Parse `/pattern/ [branches]`. `\/` inside the pattern is a literal `/`.
    fn regex(&mut self, start: usize, offset: usize) -> Result<Modifier, ParseError> {
        self.advance(1);
        let mut pattern = String::new();
        let mut close = None;
        let mut chars = self.remaining.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, '/')) => pattern.push('/'),
                    Some((_, escaped)) => {
                        pattern.push('\\');
                        pattern.push(escaped);
                    }
                    None => pattern.push('\\'),
                },
                '/' => {
                    close = Some(i);
                    break;
                }
                _ => pattern.push(c),
            }
        }
        let Some(close) = close else {
            return Err(ParseError::UnterminatedRegex { offset });
        };
        self.advance(close + 1);
        self.skip_ws();

        if !self.remaining.starts_with('[') {
            return Err(self.missing_branches(start, &format!("/{pattern}/"), offset));
        }
        let branches = self.branches()?;
        Ok(Modifier::Regex { pattern, branches })
    }

    /// Parse `[ "true" || "false" ]`.
    fn branches(&mut self) -> Result<Branches, ParseError> {
        let open = self.offset();
        self.advance(1);
        self.skip_ws();
        let when_true = self.branch(open)?;
        self.skip_ws();
        if !self.eat("||") {
            return Err(self.malformed(open, "expected '||' between the branches"));
        }
        self.skip_ws();
        let when_false = self.branch(open)?;
        self.skip_ws();
        if !self.eat("]") {
            return Err(self.malformed(open, "expected ']' after the false branch"));
        }
        Ok(Branches {
            when_true,
            when_false,
        })
    }

    /// Parse one quoted branch with the template grammar.
    ///
    /// Nested placeholders are parsed in full before the closing quote is
    /// looked for, so their regexes and branches may contain `"`, `{` or `}`.
    fn branch(&mut self, open: usize) -> Result<Template, ParseError> {
        if !self.remaining.starts_with('"') {
            return Err(self.malformed(open, "expected a quoted branch template"));
        }
        let quote = self.offset();
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
                offset: quote,
            });
        }
        self.advance(1);

        let mut body = TemplateParser::new(
            self.remaining,
            self.offset(),
            self.depth + 1,
            self.max_depth,
            true,
        );
        let template = body.template()?;
        match body.remaining.strip_prefix('"') {
            Some(rest) => self.remaining = rest,
            None => return Err(ParseError::UnterminatedBranch { offset: quote }),
        }
        Ok(template)
    }

    /// Run a winnow parser, restoring the input if it fails.
    fn run<O>(&mut self, parser: fn(&mut &'s str) -> ModalResult<O>) -> Option<O> {
        let checkpoint = self.remaining;
        match parser(&mut self.remaining) {
            Ok(output) => Some(output),
            Err(_) => {
                self.remaining = checkpoint;
                None
            }
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.remaining = &self.remaining[bytes..];
    }

    fn skip_ws(&mut self) {
        let _ = ws(&mut self.remaining);
    }

    fn eat(&mut self, token: &str) -> bool {
        match self.remaining.strip_prefix(token) {
            Some(rest) => {
                self.remaining = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char, start: usize, what: &str) -> Result<(), ParseError> {
        match self.remaining.strip_prefix(c) {
            Some(rest) => {
                self.remaining = rest;
                Ok(())
            }
            None => Err(self.expected(start, what)),
        }
    }

    /// Error for a missing token inside the placeholder opened at `start`.
    ///
    /// Without any `}` left in the input the placeholder is unterminated.
    fn expected(&self, start: usize, what: &str) -> ParseError {
        match self.remaining.chars().next() {
            Some(found) if self.remaining.contains('}') => ParseError::Syntax {
                offset: self.offset(),
                message: format!("expected {what}, found '{found}'"),
            },
            _ => ParseError::UnterminatedPlaceholder { offset: start },
        }
    }

    fn missing_branches(&self, start: usize, operator: &str, offset: usize) -> ParseError {
        if self.remaining.contains('}') {
            ParseError::MissingBranches {
                operator: operator.to_string(),
                offset,
            }
        } else {
            ParseError::UnterminatedPlaceholder { offset: start }
        }
    }

    /// Error for a malformed branch list opened with `[` at `open`.
    fn malformed(&self, open: usize, message: &str) -> ParseError {
        if self.remaining.is_empty() {
            ParseError::UnterminatedBranch { offset: open }
        } else {
            ParseError::MalformedBranches {
                offset: self.offset(),
                message: message.to_string(),
            }
        }
    }

    /// The unrecognized modifier text, for error messages.
    fn operator_token(&self) -> &'s str {
        let end = self
            .remaining
            .find(|c: char| c == '[' || c == '}' || c.is_ascii_whitespace())
            .unwrap_or(self.remaining.len());
        &self.remaining[..end]
    }
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse an identifier (alphanumeric with underscores).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_ident_cont).parse_next(input)
}

/// Parse a comparison operator, longest match first.
fn comparator(input: &mut &str) -> ModalResult<Comparator> {
    alt((
        ">=".value(Comparator::Ge),
        "<=".value(Comparator::Le),
        '>'.value(Comparator::Gt),
        '<'.value(Comparator::Lt),
        '='.value(Comparator::Eq),
    ))
    .parse_next(input)
}

/// Parse the raw operand text up to the branch list or the closing brace.
fn operand_text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(0.., ['[', '}']).parse_next(input)
}

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
