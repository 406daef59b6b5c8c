use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Namespace, Value};

/// Property name to value mapping for a single namespace.
pub type Properties = HashMap<String, Value>;

/// The per-render snapshot of namespaced property values.
///
/// A context is read-only to the evaluator and is supplied fresh for each
/// render call. Properties that are not present are treated as absent.
///
/// # Example
///
/// ```
/// use streamfmt::{Context, Namespace, Value};
///
/// let ctx = Context::new()
///     .with(Namespace::Stream, "title", "Show")
///     .with(Namespace::Stream, "season", 1)
///     .with(Namespace::Provider, "cached", true);
///
/// assert_eq!(ctx.get(Namespace::Stream, "season"), Some(&Value::Number(1)));
/// assert!(ctx.get(Namespace::Addon, "name").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    #[serde(deserialize_with = "deserialize_properties")]
    pub stream: Properties,

    #[serde(deserialize_with = "deserialize_properties")]
    pub provider: Properties,

    #[serde(deserialize_with = "deserialize_properties")]
    pub addon: Properties,
}

impl Context {
    /// Create an empty context where every property is absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a context from JSON.
    ///
    /// The document is an object with optional `stream`, `provider` and
    /// `addon` members. `null` property values are treated as absent.
    ///
    /// ```
    /// use streamfmt::{Context, Namespace};
    ///
    /// let ctx = Context::from_json(r#"{"stream": {"season": 2, "quality": null}}"#).unwrap();
    /// assert_eq!(ctx.get(Namespace::Stream, "season").unwrap().to_string(), "2");
    /// assert!(ctx.get(Namespace::Stream, "quality").is_none());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a property, returning `None` if it is absent.
    pub fn get(&self, namespace: Namespace, property: &str) -> Option<&Value> {
        self.properties(namespace).get(property)
    }

    /// The property map for a namespace.
    pub fn properties(&self, namespace: Namespace) -> &Properties {
        match namespace {
            Namespace::Stream => &self.stream,
            Namespace::Provider => &self.provider,
            Namespace::Addon => &self.addon,
        }
    }

    /// The property map for a namespace (mutable).
    pub fn properties_mut(&mut self, namespace: Namespace) -> &mut Properties {
        match namespace {
            Namespace::Stream => &mut self.stream,
            Namespace::Provider => &mut self.provider,
            Namespace::Addon => &mut self.addon,
        }
    }

    /// Set a property, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        namespace: Namespace,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.properties_mut(namespace)
            .insert(property.into(), value.into())
    }

    /// Builder-style variant of [`Context::insert`].
    pub fn with(
        mut self,
        namespace: Namespace,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(namespace, property, value);
        self
    }

    /// Remove a property, making it absent.
    pub fn remove(&mut self, namespace: Namespace, property: &str) -> Option<Value> {
        self.properties_mut(namespace).remove(property)
    }
}

fn deserialize_properties<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, Option<Value>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect())
}
