//! Extension publisher.
//!
//! Scans the local extensions directory, matches each extension's
//! `"{publisher}.{name}"` against the publishable allow-list, and for
//! each match synthesizes its registry name, bumps its version, rewrites
//! its manifest, and publishes it. With push disabled the manifest is
//! left untouched and no publish happens, but the descriptor is still
//! produced so the downstream stages can run end to end.
//!
//! Extensions process concurrently; each item's failure is isolated and
//! collected, never corrupting a sibling's manifest rewrite.

use pack_manifest::{Manifest, MANIFEST_FILENAME, next_version, registry_name};
use pack_registry::Registry;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::PackConfig;
use crate::descriptor::{ExtensionDescriptor, PublishedExtensionRecord};
use crate::error::{Error, ItemFailure, Result};
use crate::settle::settle_all;

/// Per-extension results of the publish stage.
#[derive(Debug, Default)]
pub struct PublishOutcome {
    /// Descriptors for every allow-listed extension, in scan order.
    pub records: Vec<PublishedExtensionRecord>,
    /// Extensions present on disk but not folded into the pack.
    pub skipped: Vec<String>,
    /// Per-extension failures (dry-run mode only; failures are fatal
    /// when push is enabled).
    pub failed: Vec<ItemFailure>,
}

/// Publish every allow-listed local extension.
///
/// All items settle before the stage reports. When push is enabled any
/// per-item failure aborts the run (a publish rejection is fatal),
/// naming every failed extension; in dry-run mode failures are carried
/// in the outcome instead.
pub async fn publish_extensions(
    config: &PackConfig,
    registry: &dyn Registry,
) -> Result<PublishOutcome> {
    let extension_names = pack_fs::scan_subdirs(&config.extensions_dir)?;
    info!(count = extension_names.len(), "scanning local extensions");

    let outcomes = settle_all(
        extension_names
            .iter()
            .map(|name| publish_one(config, registry, name)),
    )
    .await;

    let mut outcome = PublishOutcome::default();
    for (name, item) in extension_names.iter().zip(outcomes) {
        match item {
            Ok(Some(record)) => outcome.records.push(record),
            Ok(None) => outcome.skipped.push(name.clone()),
            Err(failure) => outcome.failed.push(failure),
        }
    }

    if config.push && !outcome.failed.is_empty() {
        return Err(Error::PublishFailed {
            failures: outcome.failed,
        });
    }
    Ok(outcome)
}

async fn publish_one(
    config: &PackConfig,
    registry: &dyn Registry,
    extension_name: &str,
) -> std::result::Result<Option<PublishedExtensionRecord>, ItemFailure> {
    let fail = |message: String| ItemFailure {
        name: extension_name.to_string(),
        message,
    };

    let dir = config.extensions_dir.join(extension_name);
    let mut manifest =
        Manifest::load(&dir.join(MANIFEST_FILENAME)).map_err(|e| fail(e.to_string()))?;

    // No publisher field means the extension can never match the
    // allow-list; treat it like any other non-publishable directory.
    let Ok(qualified) = manifest.qualified_name() else {
        debug!(extension_name, "no publisher field, skipping");
        return Ok(None);
    };
    let Some(entry) = config.publishable_entry(&qualified) else {
        debug!(extension_name, qualified, "not allow-listed, skipping");
        return Ok(None);
    };
    if config.is_denied(&qualified) {
        debug!(extension_name, qualified, "deny-listed, skipping");
        return Ok(None);
    }

    let local_name = manifest.name().map_err(|e| fail(e.to_string()))?.to_string();
    let package_name = registry_name(config.name_prefix(), &local_name);

    let mut version = None;
    if config.push {
        let local_version = manifest.version().map_err(|e| fail(e.to_string()))?.to_string();
        // Not-yet-published packages fall back to the local version.
        let latest = match registry.latest_version(&package_name).await {
            Ok(Some(published)) => published,
            Ok(None) => local_version,
            Err(e) => {
                warn!(package_name, error = %e, "version lookup failed, using local version");
                local_version
            }
        };
        let next = next_version(&latest).map_err(|e| fail(e.to_string()))?;

        manifest.merge(&publish_overrides(config));
        manifest.set_str("name", &package_name);
        manifest.set_str("version", &next);
        manifest.save().map_err(|e| fail(e.to_string()))?;

        info!(extension_name, package_name, version = next, "publishing");
        registry.publish(&dir).await.map_err(|e| fail(e.to_string()))?;
        version = Some(next);
    }

    Ok(Some(PublishedExtensionRecord {
        descriptor: ExtensionDescriptor {
            extension_name: extension_name.to_string(),
            package_name,
            is_other: false,
            assets_folders: entry.assets_folders.clone(),
            is_active_node: entry.is_active_node,
            is_active_browser: entry.is_active_browser,
        },
        version,
    }))
}

/// Publish-time manifest overrides: prepublish hook, registry access
/// config, and a file allowlist restricted to the build output.
fn publish_overrides(config: &PackConfig) -> serde_json::Value {
    let publish_config = if config.beta {
        json!({ "registry": config.registry })
    } else {
        json!({ "access": "public" })
    };
    json!({
        "scripts": { "prepublishOnly": "npm run vscode:prepublish" },
        "publishConfig": publish_config,
        "files": ["build"],
    })
}
