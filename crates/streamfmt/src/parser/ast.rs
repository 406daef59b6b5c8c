//! Public AST types for streamfmt templates.
//!
//! These types are public to enable external tooling (linters, editors,
//! preview panes). A `Template` is a tree: branching modifiers own their two
//! nested templates, so a template is parsed once and rendered many times.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::{Namespace, parse_number};

/// A parsed template: an ordered sequence of nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub nodes: Vec<Node>,
}

/// A node within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, passed through unchanged.
    Literal(String),
    /// A property reference: `{namespace.property::modifier}`
    Placeholder(Placeholder),
}

/// A `{namespace.property[::modifier]}` unit referencing context data.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub namespace: Namespace,
    /// Property name. Not validated at parse time: unknown properties are
    /// absent at render time.
    pub property: String,
    pub modifier: Option<Modifier>,
}

/// How a placeholder's value is transformed or branched upon.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// A named formatter from the formatter registry (e.g. `size`).
    Format(String),
    /// A comparison against an operand, selecting one of two branches.
    Compare {
        op: Comparator,
        operand: Operand,
        branches: Branches,
    },
    /// A regex search over the stringified value, selecting one of two branches.
    Regex { pattern: String, branches: Branches },
}

/// The two templates selected by a boolean modifier's outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branches {
    pub when_true: Template,
    pub when_false: Template,
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// The operand text parsed as a finite number.
    Number(f64),
    /// Any other operand, compared as a string.
    Text(String),
}

impl Template {
    /// Create a template from nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// A template that renders to the empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A template consisting of a single literal.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::Literal(text.into())],
        }
    }

    /// Returns true if the template has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit every placeholder in the tree, branches included, together with
    /// its branch nesting depth (0 for top-level placeholders).
    pub fn walk(&self, visit: &mut impl FnMut(&Placeholder, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at(&self, depth: usize, visit: &mut impl FnMut(&Placeholder, usize)) {
        for node in &self.nodes {
            if let Node::Placeholder(placeholder) = node {
                visit(placeholder, depth);
                if let Some(branches) = placeholder.branches() {
                    branches.when_true.walk_at(depth + 1, visit);
                    branches.when_false.walk_at(depth + 1, visit);
                }
            }
        }
    }

    /// All placeholders in the tree, in source order.
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let mut found = Vec::new();
        collect_placeholders(self, &mut found);
        found
    }

    /// The deepest branch nesting level in the tree (0 without branches).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        self.walk(&mut |placeholder, depth| {
            if placeholder.branches().is_some() {
                deepest = deepest.max(depth + 1);
            }
        });
        deepest
    }
}

fn collect_placeholders<'t>(template: &'t Template, found: &mut Vec<&'t Placeholder>) {
    for node in &template.nodes {
        if let Node::Placeholder(placeholder) = node {
            found.push(placeholder);
            if let Some(branches) = placeholder.branches() {
                collect_placeholders(&branches.when_true, found);
                collect_placeholders(&branches.when_false, found);
            }
        }
    }
}

impl Placeholder {
    /// Create a placeholder without a modifier.
    pub fn new(namespace: Namespace, property: impl Into<String>) -> Self {
        Self {
            namespace,
            property: property.into(),
            modifier: None,
        }
    }

    /// Attach a modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// The branches of a comparison or regex modifier.
    pub fn branches(&self) -> Option<&Branches> {
        match &self.modifier {
            Some(Modifier::Compare { branches, .. } | Modifier::Regex { branches, .. }) => {
                Some(branches)
            }
            Some(Modifier::Format(_)) | None => None,
        }
    }
}

impl Branches {
    pub fn new(when_true: Template, when_false: Template) -> Self {
        Self {
            when_true,
            when_false,
        }
    }
}

impl Comparator {
    /// The operator as written in template syntax.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
        }
    }
}

impl Operand {
    /// Interpret raw operand text.
    ///
    /// Surrounding whitespace and one pair of surrounding double quotes are
    /// removed. Text that parses as a finite number becomes
    /// [`Operand::Number`].
    pub fn parse(raw: &str) -> Operand {
        let trimmed = raw.trim();
        let text = trimmed
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(trimmed);
        match parse_number(text) {
            Some(n) => Operand::Number(n),
            None => Operand::Text(text.to_string()),
        }
    }
}

impl Display for Template {
    /// Writes the template back in source syntax.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for node in &self.nodes {
            match node {
                Node::Literal(text) => f.write_str(text)?,
                Node::Placeholder(placeholder) => write!(f, "{placeholder}")?,
            }
        }
        Ok(())
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{}.{}", self.namespace, self.property)?;
        if let Some(modifier) = &self.modifier {
            write!(f, "::{modifier}")?;
        }
        f.write_str("}")
    }
}

impl Display for Modifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Modifier::Format(name) => f.write_str(name),
            Modifier::Compare {
                op,
                operand,
                branches,
            } => write!(f, "{}{operand}{branches}", op.symbol()),
            Modifier::Regex { pattern, branches } => {
                write!(f, "/{}/{branches}", pattern.replace('/', "\\/"))
            }
        }
    }
}

impl Display for Branches {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[\"{}\"||\"{}\"]", self.when_true, self.when_false)
    }
}

impl Display for Operand {
    /// Text is quoted unless it reads back unchanged without quotes.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Text(text) if Operand::parse(text) == *self => f.write_str(text),
            Operand::Text(text) => write!(f, "\"{text}\""),
        }
    }
}
