//! Loading and editing `package.json` manifests.
//!
//! Extension manifests are open-world JSON: beyond the handful of fields
//! the pipeline reads (`name`, `publisher`, `version`, `contributes`,
//! `activationEvents`, `kaitianContributes`) an extension may declare
//! anything. The manifest is therefore kept as a [`serde_json::Value`]
//! with typed accessors, rather than a closed struct that would drop
//! unknown fields on rewrite.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::merge::deep_merge;

/// A `package.json` manifest bound to its on-disk path.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    value: Value,
}

impl Manifest {
    /// Read and parse a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let value = pack_fs::read_json_opt(path)?
            .ok_or_else(|| Error::ManifestNotFound(path.to_path_buf()))?;
        if !value.is_object() {
            return Err(Error::NotAnObject(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            value,
        })
    }

    /// Write the manifest back to its path, pretty-printed, atomically.
    pub fn save(&self) -> Result<()> {
        pack_fs::write_json_pretty(&self.path, &self.value)?;
        Ok(())
    }

    /// The path this manifest was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw manifest JSON.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the manifest, returning the raw JSON.
    pub fn into_value(self) -> Value {
        self.value
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.value.get(field).and_then(Value::as_str)
    }

    fn required_str(&self, field: &str) -> Result<&str> {
        self.str_field(field).ok_or_else(|| Error::MissingField {
            path: self.path.clone(),
            field: field.to_string(),
        })
    }

    /// The `name` field.
    pub fn name(&self) -> Result<&str> {
        self.required_str("name")
    }

    /// The `version` field.
    pub fn version(&self) -> Result<&str> {
        self.required_str("version")
    }

    /// The `publisher` field, if present.
    pub fn publisher(&self) -> Option<&str> {
        self.str_field("publisher")
    }

    /// The `"{publisher}.{name}"` key used to match extensions against
    /// the publishable allow-list and deny-list.
    pub fn qualified_name(&self) -> Result<String> {
        let publisher = self.str_field("publisher").ok_or_else(|| Error::MissingField {
            path: self.path.clone(),
            field: "publisher".to_string(),
        })?;
        Ok(format!("{}.{}", publisher, self.name()?))
    }

    /// Deep-merge an overlay object into the manifest.
    pub fn merge(&mut self, overlay: &Value) {
        deep_merge(&mut self.value, overlay);
    }

    /// Set a top-level string field.
    pub fn set_str(&mut self, field: &str, value: &str) {
        if let Some(map) = self.value.as_object_mut() {
            map.insert(field.to_string(), Value::String(value.to_string()));
        }
    }

    /// Remove a top-level field. Removing an absent field is a no-op.
    pub fn remove(&mut self, field: &str) {
        if let Some(map) = self.value.as_object_mut() {
            map.remove(field);
        }
    }
}
