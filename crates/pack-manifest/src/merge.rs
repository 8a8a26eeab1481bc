//! Deep JSON merge.

use serde_json::Value;

/// Deep-merge `overlay` into `base`.
///
/// Objects merge key-wise and recursively. Any other value, arrays
/// included, is replaced by the overlay's value. Array-valued manifest
/// sections that need id-keyed union semantics go through
/// [`ManifestAccumulator`](crate::ManifestAccumulator) instead.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
