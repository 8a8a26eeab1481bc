//! The in-progress merged manifest for the pack.
//!
//! Extensions are folded in list order. Set-valued sections are folded
//! with id-keyed uniqueness so folding the same extension twice cannot
//! duplicate entries; everything else deep-merges. The per-extension
//! entry overrides in `kaitianContributes` are stripped unconditionally
//! since they are meaningless once folded into the shared pack.

use serde_json::{Map, Value};

use crate::merge::deep_merge;

/// `kaitianContributes` fields that only make sense on a standalone
/// extension.
const STRIPPED_ENTRY_FIELDS: [&str; 3] = ["nodeMain", "browserMain", "workerMain"];

/// Accumulates extension manifests into the pack's merged manifest.
#[derive(Debug, Clone)]
pub struct ManifestAccumulator {
    root: Map<String, Value>,
    app_view_id: String,
}

impl ManifestAccumulator {
    /// Start from the pack's existing manifest. A non-object base is
    /// replaced with an empty manifest.
    pub fn new(base: Value, app_view_id: impl Into<String>) -> Self {
        let root = match base {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            root,
            app_view_id: app_view_id.into(),
        }
    }

    /// Reset the contributed sections to empty so a repeated full run
    /// folds onto a clean slate instead of onto the previous run's
    /// output. Dependencies are left alone: extension entries are keyed
    /// by package name and overwritten per run, and the pack's own
    /// runtime dependencies must survive.
    pub fn reset_contributed(&mut self) {
        let contributes = object_entry(&mut self.root, "contributes");
        contributes.insert("commands".to_string(), Value::Array(Vec::new()));
        let views = object_entry(contributes, "views");
        views.insert(self.app_view_id.clone(), Value::Array(Vec::new()));
        self.root
            .insert("activationEvents".to_string(), Value::Array(Vec::new()));
        self.root
            .insert("kaitianContributes".to_string(), Value::Object(Map::new()));
    }

    /// Fold one extension's manifest into the accumulator.
    pub fn fold(&mut self, extension: &Value) {
        let Some(ext) = extension.as_object() else {
            return;
        };

        if let Some(ext_contributes) = ext.get("contributes").and_then(Value::as_object) {
            // Deep-merge every contributes key except the two set-valued
            // ones, which get id-keyed unions below.
            let mut overlay = ext_contributes.clone();
            overlay.remove("commands");
            if let Some(views) = overlay.get_mut("views").and_then(Value::as_object_mut) {
                views.remove(&self.app_view_id);
            }
            let contributes = object_entry(&mut self.root, "contributes");
            merge_into(contributes, &overlay);

            if let Some(commands) = ext_contributes.get("commands").and_then(Value::as_array) {
                union_by_key(array_entry(contributes, "commands"), commands, "command");
            }

            if let Some(items) = ext_contributes
                .get("views")
                .and_then(Value::as_object)
                .and_then(|views| views.get(&self.app_view_id))
                .and_then(Value::as_array)
            {
                let views = object_entry(contributes, "views");
                union_by_key(array_entry(views, &self.app_view_id), items, "id");
            }
        }

        if let Some(events) = ext.get("activationEvents").and_then(Value::as_array) {
            let existing = array_entry(&mut self.root, "activationEvents");
            for event in events {
                if !existing.contains(event) {
                    existing.push(event.clone());
                }
            }
        }

        if let Some(kaitian) = ext.get("kaitianContributes").and_then(Value::as_object) {
            let mut stripped = kaitian.clone();
            for field in STRIPPED_ENTRY_FIELDS {
                stripped.remove(field);
            }
            let target = object_entry(&mut self.root, "kaitianContributes");
            merge_into(target, &stripped);
        }
    }

    /// Record a dependency on `package` at `version`, overwriting any
    /// existing entry for the same package.
    pub fn add_dependency(&mut self, package: &str, version: &str) {
        let deps = object_entry(&mut self.root, "dependencies");
        deps.insert(package.to_string(), Value::String(version.to_string()));
    }

    /// The merged manifest so far.
    pub fn value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Consume the accumulator, returning the merged manifest.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

/// Get `map[key]` as a mutable object, coercing a missing or
/// non-object value to an empty object.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(obj) => obj,
        _ => unreachable!(),
    }
}

/// Get `map[key]` as a mutable array, coercing a missing or
/// non-array value to an empty array.
fn array_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !entry.is_array() {
        *entry = Value::Array(Vec::new());
    }
    match entry {
        Value::Array(items) => items,
        _ => unreachable!(),
    }
}

fn merge_into(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        match base.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Append items from `incoming` whose `key` field is not already
/// present; the first occurrence wins. Items without the key field fall
/// back to whole-value equality.
fn union_by_key(existing: &mut Vec<Value>, incoming: &[Value], key: &str) {
    for item in incoming {
        let duplicate = match item.get(key).and_then(Value::as_str) {
            Some(id) => existing
                .iter()
                .any(|e| e.get(key).and_then(Value::as_str) == Some(id)),
            None => existing.contains(item),
        };
        if !duplicate {
            existing.push(item.clone());
        }
    }
}
