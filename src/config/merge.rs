//! Deep merge of the on-disk document over the defaults.

use serde_yaml::Value;

/// Merge `raw` over `defaults` and return a new tree.
///
/// Mappings present on both sides are merged key by key. Any other pairing
/// (scalars, sequences, null, or a type mismatch) takes the raw value as-is.
pub fn merge(defaults: &Value, raw: &Value) -> Value {
    match (defaults, raw) {
        (Value::Mapping(base), Value::Mapping(over)) => {
            let mut merged = base.clone();
            for (key, value) in over {
                let next = match base.get(key) {
                    Some(existing) => merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Mapping(merged)
        }
        (_, other) => other.clone(),
    }
}
