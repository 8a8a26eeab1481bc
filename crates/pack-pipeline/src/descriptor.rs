//! Extension descriptors flowing between pipeline stages.

use std::path::{Path, PathBuf};

use crate::config::{OtherEntry, PackConfig};

/// Identifies one extension to be folded into the pack.
///
/// Constructed by the publisher for local extensions and from config
/// for fetched ones; consumed read-only by the downstream stages.
#[derive(Debug, Clone)]
pub struct ExtensionDescriptor {
    /// Directory name, unique within a pack run.
    pub extension_name: String,
    /// Registry package name (synthesized for local extensions).
    pub package_name: String,
    /// Fetched from the registry rather than built locally.
    pub is_other: bool,
    /// Asset folders to copy into the pack, in declaration order.
    pub assets_folders: Vec<String>,
    /// Activates under the Node runtime target.
    pub is_active_node: bool,
    /// Activates under the browser runtime target.
    pub is_active_browser: bool,
}

impl ExtensionDescriptor {
    /// The directory holding this extension's sources for the current
    /// run: the scratch dir for fetched extensions, the extensions dir
    /// otherwise.
    pub fn source_dir(&self, config: &PackConfig) -> PathBuf {
        let root: &Path = if self.is_other {
            &config.scratch_dir
        } else {
            &config.extensions_dir
        };
        root.join(&self.extension_name)
    }
}

/// Publisher output: a descriptor plus the version a real publish
/// resolved. `version` is `None` for dry-run publishes and for fetched
/// extensions.
#[derive(Debug, Clone)]
pub struct PublishedExtensionRecord {
    pub descriptor: ExtensionDescriptor,
    pub version: Option<String>,
}

impl From<&OtherEntry> for PublishedExtensionRecord {
    fn from(entry: &OtherEntry) -> Self {
        Self {
            descriptor: ExtensionDescriptor {
                extension_name: entry.extension_name.clone(),
                package_name: entry.package_name.clone(),
                is_other: true,
                assets_folders: entry.assets_folders.clone(),
                is_active_node: entry.is_active_node,
                is_active_browser: entry.is_active_browser,
            },
            version: None,
        }
    }
}
