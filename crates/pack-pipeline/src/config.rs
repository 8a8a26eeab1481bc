//! Run configuration for the pack pipeline.
//!
//! Loaded from a TOML file; relative paths resolve against the config
//! file's directory. The publishable allow-list and deny-list are keyed
//! by the `"{publisher}.{name}"` qualified name from each extension's
//! manifest.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// One locally built extension allowed to be folded into the pack.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishableEntry {
    /// Qualified name, `"{publisher}.{name}"`.
    pub package_name: String,
    /// Asset folders to copy into the pack, relative to the extension.
    #[serde(default)]
    pub assets_folders: Vec<String>,
    #[serde(default)]
    pub is_active_node: bool,
    #[serde(default)]
    pub is_active_browser: bool,
}

/// One third-party extension fetched from the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct OtherEntry {
    /// Registry package name to fetch.
    pub package_name: String,
    /// Directory name the package is extracted into.
    pub extension_name: String,
    #[serde(default)]
    pub assets_folders: Vec<String>,
    #[serde(default)]
    pub is_active_node: bool,
    #[serde(default)]
    pub is_active_browser: bool,
}

/// Static configuration for one pack run.
#[derive(Debug, Clone, Deserialize)]
pub struct PackConfig {
    /// Beta mode: publish under the beta prefix against the beta
    /// registry config.
    #[serde(default)]
    pub beta: bool,
    /// Actually publish to the registry; otherwise dry-run.
    #[serde(default)]
    pub push: bool,
    /// Package-manager executable name.
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    /// Registry URL.
    #[serde(default = "default_registry")]
    pub registry: String,
    /// Registry-name prefix in stable mode.
    pub stable_prefix: String,
    /// Registry-name prefix in beta mode.
    pub beta_prefix: String,
    /// Directory holding one subdirectory per local extension.
    #[serde(default = "default_extensions_dir")]
    pub extensions_dir: PathBuf,
    /// The pack package directory.
    #[serde(default = "default_pack_dir")]
    pub pack_dir: PathBuf,
    /// Template directory for pack sources and manifest overrides.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
    /// Scratch directory fetched extensions extract into.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
    /// The pack's app view container id in `contributes.views`.
    pub app_view_id: String,
    /// Localization file name prefix.
    #[serde(default = "default_nls_prefix")]
    pub nls_prefix: String,
    /// Qualified names excluded even when publishable.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Locally built extensions to fold into the pack.
    #[serde(default)]
    pub publishable: Vec<PublishableEntry>,
    /// Registry extensions to fetch and fold into the pack.
    #[serde(default)]
    pub other: Vec<OtherEntry>,
}

fn default_package_manager() -> String {
    "npm".to_string()
}

fn default_registry() -> String {
    "https://registry.npmjs.org".to_string()
}

fn default_extensions_dir() -> PathBuf {
    PathBuf::from("extensions")
}

fn default_pack_dir() -> PathBuf {
    PathBuf::from("pack")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("template")
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from(".pack-tmp")
}

fn default_nls_prefix() -> String {
    "package.nls".to_string()
}

impl PackConfig {
    /// Load a config file, resolving relative paths against its
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for dir in [
            &mut self.extensions_dir,
            &mut self.pack_dir,
            &mut self.template_dir,
            &mut self.scratch_dir,
        ] {
            if dir.is_relative() {
                *dir = base.join(dir.as_path());
            }
        }
    }

    /// The registry-name prefix for the active mode.
    pub fn name_prefix(&self) -> &str {
        if self.beta {
            &self.beta_prefix
        } else {
            &self.stable_prefix
        }
    }

    /// Look up the publishable entry for a qualified name.
    pub fn publishable_entry(&self, qualified_name: &str) -> Option<&PublishableEntry> {
        self.publishable
            .iter()
            .find(|entry| entry.package_name == qualified_name)
    }

    /// Whether a qualified name is deny-listed.
    pub fn is_denied(&self, qualified_name: &str) -> bool {
        self.deny.iter().any(|name| name == qualified_name)
    }
}
