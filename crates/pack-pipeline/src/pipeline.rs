//! Pipeline orchestration.
//!
//! The stage order is a strict pipeline: fetcher, then publisher, then
//! the three disjoint-output stages (manifest merger, asset
//! synchronizer, source generator) concurrently, then the customizer.
//! The customizer must run after the merger since it layers overrides
//! on top of the merged manifest; sequencing is the only concurrency
//! control the shared manifest file needs.

use std::sync::Arc;

use pack_registry::Registry;
use tracing::info;

use crate::config::PackConfig;
use crate::descriptor::PublishedExtensionRecord;
use crate::error::Result;
use crate::report::RunReport;
use crate::{assets, codegen, customizer, fetcher, merger, publisher};

/// One configured pack-assembly run.
pub struct Pipeline {
    config: PackConfig,
    registry: Arc<dyn Registry>,
}

impl Pipeline {
    pub fn new(config: PackConfig, registry: Arc<dyn Registry>) -> Self {
        Self { config, registry }
    }

    /// Run the full pipeline, returning the per-extension summary.
    pub async fn run(&self) -> Result<RunReport> {
        fetcher::fetch_other_extensions(&self.config, self.registry.as_ref()).await?;

        let outcome = publisher::publish_extensions(&self.config, self.registry.as_ref()).await?;

        // Publisher results first, then the static "other" list: the
        // fold order downstream is deterministic.
        let mut records = outcome.records;
        records.extend(self.config.other.iter().map(PublishedExtensionRecord::from));

        let merge = {
            let config = self.config.clone();
            let records = records.clone();
            tokio::task::spawn_blocking(move || merger::merge_manifests(&config, &records))
        };
        let sync = {
            let config = self.config.clone();
            let records = records.clone();
            tokio::task::spawn_blocking(move || assets::sync_assets(&config, &records))
        };
        let generate = {
            let config = self.config.clone();
            let records = records.clone();
            tokio::task::spawn_blocking(move || codegen::generate_sources(&config, &records))
        };
        let (merged, synced, generated) = tokio::try_join!(merge, sync, generate)?;
        merged?;
        synced?;
        generated?;

        customizer::customize_pack_manifest(&self.config)?;

        let report = RunReport {
            succeeded: records
                .iter()
                .map(|r| r.descriptor.extension_name.clone())
                .collect(),
            skipped: outcome.skipped,
            failed: outcome.failed.iter().map(|f| f.name.clone()).collect(),
        };
        info!(%report, "pack assembled");
        Ok(report)
    }
}
