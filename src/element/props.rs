use serde_json::{Map, Value};

use crate::foundation::error::{SelError, SelResult};

/// Properties handed to a component: a JSON object, or an explicit null.
///
/// Lookups on null props behave like lookups of missing keys, so components can
/// fall back to their defaults either way.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Props(Option<Map<String, Value>>);

impl Default for Props {
    fn default() -> Self {
        Self::empty()
    }
}

impl Props {
    /// The empty mapping `{}`.
    pub fn empty() -> Self {
        Self(Some(Map::new()))
    }

    /// Explicit null props.
    pub fn null() -> Self {
        Self(None)
    }

    /// Wrap an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(Some(map))
    }

    /// Whether these props are an explicit null.
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The underlying object, unless null.
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        self.0.as_ref()
    }

    /// Number of keys (zero for null).
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, Map::len)
    }

    /// Whether there are no keys (always true for null).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_ref().and_then(|m| m.get(key))
    }

    /// String value of `key`, or `default` when missing or not a string.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    /// Numeric value of `key`, or `default`.
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Integer value of `key`, or `default`.
    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    /// Boolean value of `key`, or `default`.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Return a copy with `key` set. Setting a key on null props starts a new object.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(Some(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl TryFrom<Value> for Props {
    type Error = SelError;

    fn try_from(value: Value) -> SelResult<Self> {
        match value {
            Value::Null => Ok(Self::null()),
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(SelError::serde(format!(
                "props must be an object or null, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/props.rs"]
mod tests;
