//! Formatter definitions: a name template and a description template.
//!
//! Definitions are exchanged as `custom:{"name":"…","description":"…"}`
//! strings. The `custom:` prefix is optional when parsing.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::parser::{ParseError, Template};

/// Prefix marking a custom formatter definition string.
pub const CUSTOM_PREFIX: &str = "custom:";

const NAME_OPEN: &str = r#"{"name":""#;
const DESCRIPTION_SEPARATOR: &str = r#"","description":""#;
const CLOSE: &str = r#""}"#;

/// The unparsed templates of a custom formatter.
///
/// # Example
///
/// ```
/// use streamfmt::FormatterDefinition;
///
/// let definition: FormatterDefinition =
///     r#"custom:{"name":"{stream.title}","description":"{stream.size::size}"}"#.parse().unwrap();
/// assert_eq!(definition.name, "{stream.title}");
/// assert_eq!(definition.description, "{stream.size::size}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterDefinition {
    /// Template for the stream's display name.
    #[serde(default)]
    pub name: String,
    /// Template for the stream's description.
    #[serde(default)]
    pub description: String,
}

/// Which template of a definition an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionField {
    Name,
    Description,
}

/// An error loading or compiling a formatter definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The definition string is not a JSON object with string members.
    #[error("invalid formatter definition: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the templates failed to parse.
    #[error("invalid {field} template: {source}")]
    Template {
        field: DefinitionField,
        #[source]
        source: ParseError,
    },
}

/// A definition whose templates have been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFormatter {
    pub name: Arc<Template>,
    pub description: Arc<Template>,
}

/// The rendered name and description of one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedStream {
    pub name: String,
    pub description: String,
}

impl FormatterDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The template source of one field.
    pub fn template(&self, field: DefinitionField) -> &str {
        match field {
            DefinitionField::Name => &self.name,
            DefinitionField::Description => &self.description,
        }
    }

    /// Serializes as a `custom:` string, with the templates JSON-escaped.
    pub fn to_custom_string(&self) -> String {
        let name = JsonValue::from(self.name.as_str());
        let description = JsonValue::from(self.description.as_str());
        format!(r#"{CUSTOM_PREFIX}{{"name":{name},"description":{description}}}"#)
    }

    /// Templates pasted into the JSON layout without escaping their quotes.
    ///
    /// Such strings are not valid JSON, but their layout is fixed: the name
    /// runs up to the last `","description":"` separator.
    fn from_unescaped(body: &str) -> Option<Self> {
        let inner = body.strip_prefix(NAME_OPEN)?.strip_suffix(CLOSE)?;
        let (name, description) = inner.rsplit_once(DESCRIPTION_SEPARATOR)?;
        Some(Self::new(name, description))
    }
}

impl FromStr for FormatterDefinition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix(CUSTOM_PREFIX).unwrap_or(trimmed);
        match serde_json::from_str(body) {
            Ok(definition) => Ok(definition),
            Err(error) => Self::from_unescaped(body).ok_or(DefinitionError::Json(error)),
        }
    }
}

impl Display for FormatterDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.to_custom_string())
    }
}

impl Display for DefinitionField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            DefinitionField::Name => "name",
            DefinitionField::Description => "description",
        })
    }
}
