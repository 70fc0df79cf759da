use serde_json::Value;

use crate::foundation::error::{SelError, SelResult};

slotmap::new_key_type! {
    /// Generational key of a node inside a [`crate::Document`].
    ///
    /// A key stays valid until its node is removed. Keys of removed nodes are never
    /// handed out again, so a stale key is reported as an error instead of resolving
    /// to whatever node reused the slot.
    pub struct NodeId;
}

/// Stringify a bound datum the way attribute values are written.
///
/// Strings are written bare, integral numbers without a fractional part, very large
/// or very small magnitudes in exponent form (`1e+21`, `1e-7`), arrays as a
/// comma-joined list and objects as `[object Object]`.
pub fn datum_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                number_to_string(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => datum_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        // `{:e}` writes `1e21`; positive exponents get an explicit `+`.
        let text = format!("{f:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{f}")
}

/// Reject tag and attribute names that could not round-trip through markup.
pub(crate) fn validate_name(kind: &str, name: &str) -> SelResult<()> {
    if name.is_empty() {
        return Err(SelError::dom(format!("{kind} name must be non-empty")));
    }
    let bad = name
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '=' | '&'));
    if let Some(c) = bad {
        return Err(SelError::dom(format!(
            "{kind} name '{name}' contains invalid character {c:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
