//! Formatter registry for `Format` modifiers.
//!
//! Formatters are pure functions from an optional property value to a string
//! (e.g. `{stream.size::size}`). They must be total: absent or malformed
//! input produces an empty string or a documented fallback, never a panic.

use std::collections::HashMap;

use crate::types::Value;

/// Formatter function signature.
///
/// Receives the property value, or `None` if the property is absent.
pub type FormatterFn = fn(Option<&Value>) -> String;

/// Units used by the `size` formatter, 1024 apart.
const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Registry for formatter functions.
///
/// The default registry contains the built-in formatters: `size`, `upper`,
/// `lower` and `title`. Custom formatters can be added with
/// [`FormatterRegistry::register`].
///
/// # Example
///
/// ```
/// use streamfmt::{FormatterRegistry, Value};
///
/// let mut formatters = FormatterRegistry::default();
/// formatters.register("stars", |value| match value.and_then(Value::as_number) {
///     Some(n) if n > 0 => "*".repeat(n.min(5) as usize),
///     _ => String::new(),
/// });
///
/// let stars = formatters.get("stars").unwrap();
/// assert_eq!(stars(Some(&Value::Number(3))), "***");
/// assert_eq!(formatters.get("size").unwrap()(Some(&Value::Number(1024))), "1.00 KB");
/// ```
#[derive(Debug, Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<String, FormatterFn>,
}

impl FormatterRegistry {
    /// Create a registry with no formatters.
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Create a registry with the built-in formatters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("size", format_size);
        registry.register("upper", format_upper);
        registry.register("lower", format_lower);
        registry.register("title", format_title);
        registry
    }

    /// Get a formatter by name.
    pub fn get(&self, name: &str) -> Option<FormatterFn> {
        self.formatters.get(name).copied()
    }

    /// Check if a formatter exists.
    pub fn has_formatter(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Register a formatter, returning the one it replaced, if any.
    pub fn register(&mut self, name: impl Into<String>, formatter: FormatterFn) -> Option<FormatterFn> {
        self.formatters.insert(name.into(), formatter)
    }

    /// Registered formatter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Human-readable byte size using 1024-based units.
///
/// - Absent or zero: `"0 B"`
/// - Below 1024: whole bytes, e.g. `"512 B"`
/// - Otherwise two decimals in the largest unit with magnitude ≥ 1, e.g.
///   `"1.00 KB"`, `"2.50 GB"`
/// - Negative, boolean or non-numeric: `""`
pub fn format_size(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return "0 B".to_string();
    };
    match value.numeric() {
        Some(bytes) if bytes == 0.0 => "0 B".to_string(),
        Some(bytes) if bytes >= 0.0 => human_size(bytes),
        _ => String::new(),
    }
}

fn human_size(bytes: f64) -> String {
    if bytes < 1024.0 {
        return format!("{} B", bytes.trunc());
    }
    let last = SIZE_UNITS.len() - 1;
    let mut scaled = bytes;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < last {
        scaled /= 1024.0;
        unit += 1;
    }
    // 1023.999 KB would print as "1024.00 KB"
    if unit < last && (scaled * 100.0).round() >= 102_400.0 {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{scaled:.2} {}", SIZE_UNITS[unit])
}

/// Uppercase string form. Absent renders as `""`.
pub fn format_upper(value: Option<&Value>) -> String {
    value.map(|v| v.to_string().to_uppercase()).unwrap_or_default()
}

/// Lowercase string form. Absent renders as `""`.
pub fn format_lower(value: Option<&Value>) -> String {
    value.map(|v| v.to_string().to_lowercase()).unwrap_or_default()
}

/// Capitalizes the first letter of each whitespace-separated word.
/// Absent renders as `""`.
pub fn format_title(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let text = value.to_string();
    let mut output = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            output.extend(c.to_uppercase());
        } else {
            output.push(c);
        }
        word_start = c.is_whitespace();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_picks_largest_unit() {
        assert_eq!(human_size(1024.0), "1.00 KB");
        assert_eq!(human_size(1536.0), "1.50 KB");
        assert_eq!(human_size(1_048_576.0), "1.00 MB");
        assert_eq!(human_size(2_684_354_560.0), "2.50 GB");
        assert_eq!(human_size(1_099_511_627_776.0), "1.00 TB");
    }

    #[test]
    fn human_size_whole_bytes_below_one_kilobyte() {
        assert_eq!(human_size(0.0), "0 B");
        assert_eq!(human_size(1.0), "1 B");
        assert_eq!(human_size(1023.0), "1023 B");
        assert_eq!(human_size(512.7), "512 B");
    }

    #[test]
    fn human_size_rounding_carries_into_next_unit() {
        // 1023.999 KB
        assert_eq!(human_size(1_048_575.0), "1.00 MB");
        assert_eq!(human_size(1_048_063.0), "1023.50 KB");
    }

    #[test]
    fn human_size_caps_at_petabytes() {
        let two_exabytes = 2.0 * 1024f64.powi(6);
        assert_eq!(human_size(two_exabytes), "2048.00 PB");
    }
}
