use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three property groups a placeholder can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Properties of the stream itself (title, season, size, ...).
    Stream,
    /// Properties of the debrid or storage provider serving the stream.
    Provider,
    /// Properties of the addon that produced the stream.
    Addon,
}

impl Namespace {
    /// All namespaces, in display order.
    pub const ALL: [Namespace; 3] = [Namespace::Stream, Namespace::Provider, Namespace::Addon];

    /// The name used in template syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Stream => "stream",
            Namespace::Provider => "provider",
            Namespace::Addon => "addon",
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name is not one of the known namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown namespace '{0}', expected one of: stream, provider, addon")]
pub struct UnknownNamespace(pub String);

impl FromStr for Namespace {
    type Err = UnknownNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stream" => Ok(Namespace::Stream),
            "provider" => Ok(Namespace::Provider),
            "addon" => Ok(Namespace::Addon),
            other => Err(UnknownNamespace(other.to_string())),
        }
    }
}
