use std::fmt::{Display, Formatter, Result as FmtResult};

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A content address for a template source string.
///
/// `TemplateId` wraps a 64-bit FNV-1a hash of the template source. It is the
/// key of the engine's parsed-template cache: identical sources always map to
/// the same id, so a template is parsed once no matter how many times it is
/// rendered.
///
/// # Example
///
/// ```
/// use streamfmt::TemplateId;
///
/// const SIZE: TemplateId = TemplateId::from_source("{stream.size::size}");
///
/// assert_eq!(SIZE, TemplateId::from_source("{stream.size::size}"));
/// assert_ne!(SIZE, TemplateId::from_source("{stream.size}"));
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TemplateId(u64);

impl TemplateId {
    /// Hash a template source. This is a `const fn`.
    pub const fn from_source(source: &str) -> Self {
        Self(fnv1a_hash_str_64(source))
    }

    /// Get the raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TemplateId({:016x})", self.0)
    }
}
