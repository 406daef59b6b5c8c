//! Shared cache of compiled regex patterns.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use regex::Regex;
use tracing::debug;

/// Default number of patterns kept before the cache is cleared.
pub const DEFAULT_REGEX_CAPACITY: usize = 512;

/// Compiled regex patterns keyed by pattern source.
///
/// Compilation failures are cached too, so an invalid pattern is compiled
/// once no matter how many streams are rendered with it. The cache is safe
/// to share between threads.
#[derive(Debug)]
pub struct RegexCache {
    patterns: RwLock<HashMap<String, Result<Regex, String>>>,
    capacity: usize,
}

impl RegexCache {
    /// Create an empty cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REGEX_CAPACITY)
    }

    /// Create an empty cache holding at most `capacity` patterns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            patterns: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Search `haystack` for `pattern`.
    ///
    /// Returns the compile error message if the pattern is invalid.
    pub fn is_match(&self, pattern: &str, haystack: &str) -> Result<bool, String> {
        {
            let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(compiled) = patterns.get(pattern) {
                return compiled
                    .as_ref()
                    .map(|regex| regex.is_match(haystack))
                    .map_err(Clone::clone);
            }
        }

        let compiled = Regex::new(pattern).map_err(|e| e.to_string());
        let result = compiled
            .as_ref()
            .map(|regex| regex.is_match(haystack))
            .map_err(Clone::clone);

        let mut patterns = self.patterns.write().unwrap_or_else(PoisonError::into_inner);
        if patterns.len() >= self.capacity {
            debug!(capacity = self.capacity, "regex cache full, clearing");
            patterns.clear();
        }
        patterns.insert(pattern.to_string(), compiled);
        result
    }

    /// Check a pattern without matching anything.
    pub fn validate(&self, pattern: &str) -> Result<(), String> {
        self.is_match(pattern, "").map(|_| ())
    }

    /// Number of cached patterns, including invalid ones.
    pub fn len(&self) -> usize {
        self.patterns.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no patterns are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached patterns.
    pub fn clear(&self) {
        self.patterns.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}
