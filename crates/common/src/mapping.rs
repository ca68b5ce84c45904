//! Mapping (object) utilities over ordered JSON maps.
//!
//! Keys keep insertion order (serde_json is built with `preserve_order`),
//! which matches how objects iterate in the snippets these helpers replace.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CommonError;
use crate::truthy::Truthy;

/// Ordered string-keyed JSON object.
pub type JsonMap = Map<String, Value>;

/// Full structural copy through a JSON round trip.
///
/// The copy shares nothing with the original.
///
/// # Errors
///
/// Returns [`CommonError::Unsupported`] for values JSON cannot carry, such
/// as non-finite floats or maps keyed by non-string types.
///
/// # Examples
///
/// ```
/// use snipkit_common::mapping::deep_clone;
/// use serde_json::json;
///
/// let original = json!({"tags": ["a", "b"], "meta": {"n": 1}});
/// let mut copy = deep_clone(&original).unwrap();
/// copy["meta"]["n"] = json!(2);
/// assert_eq!(original["meta"]["n"], json!(1));
/// ```
pub fn deep_clone<T>(value: &T) -> Result<T, CommonError>
where
    T: Serialize + DeserializeOwned,
{
    let json = serde_json::to_value(value)
        .map_err(|e| CommonError::unsupported(format!("not JSON-serializable: {}", e)))?;
    serde_json::from_value(json)
        .map_err(|e| CommonError::unsupported(format!("did not survive JSON round trip: {}", e)))
}

/// True when both maps have the same keys and equal top-level values.
///
/// Nested arrays and objects compare structurally.
pub fn shallow_equal(a: &JsonMap, b: &JsonMap) -> bool {
    a.len() == b.len() && a.iter().all(|(key, value)| b.get(key) == Some(value))
}

/// Renders a scalar JSON value as a map key.
pub(crate) fn scalar_key(value: &Value) -> Result<String, CommonError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(CommonError::unsupported(
            "arrays and objects cannot be used as keys",
        )),
    }
}

/// Swaps keys and values.
///
/// Scalar values become keys in their string form. When several keys share
/// a value, the last one in iteration order wins and the entry keeps the
/// position of the first.
///
/// # Errors
///
/// Returns [`CommonError::Unsupported`] if any value is an array or object.
pub fn invert(map: &JsonMap) -> Result<JsonMap, CommonError> {
    let mut inverted = JsonMap::with_capacity(map.len());
    for (key, value) in map {
        inverted.insert(scalar_key(value)?, Value::String(key.clone()));
    }
    Ok(inverted)
}

/// Keeps entries whose value is truthy.
pub fn filter_truthy(map: &JsonMap) -> JsonMap {
    map.iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Shallow merge; later maps override earlier ones on key collision.
pub fn merge(maps: &[&JsonMap]) -> JsonMap {
    let mut merged = JsonMap::new();
    for map in maps {
        for (key, value) in *map {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Copy without the listed keys.
pub fn omit(map: &JsonMap, keys: &[&str]) -> JsonMap {
    map.iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Copy with only the listed keys, in the order requested.
///
/// Keys missing from `map` are skipped.
pub fn pick(map: &JsonMap, keys: &[&str]) -> JsonMap {
    keys.iter()
        .filter_map(|key| map.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}
