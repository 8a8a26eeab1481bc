//! Remote package fetcher.
//!
//! Clears and recreates the scratch directory, then downloads every
//! configured "other" extension into `scratch/<extension_name>`. All
//! downloads proceed concurrently; failures settle before the stage
//! reports, so one bad package never masks its siblings' results, but
//! any failure is fatal for the run.

use pack_registry::Registry;
use tracing::{debug, info};

use crate::config::PackConfig;
use crate::error::{Error, ItemFailure, Result};
use crate::settle::{partition, settle_all};

/// Fetch all configured third-party extensions into the scratch dir.
pub async fn fetch_other_extensions(config: &PackConfig, registry: &dyn Registry) -> Result<()> {
    pack_fs::recreate_dir(&config.scratch_dir)?;
    if config.other.is_empty() {
        return Ok(());
    }
    info!(count = config.other.len(), "fetching remote extensions");

    let outcomes = settle_all(config.other.iter().map(|entry| async move {
        let dest = config.scratch_dir.join(&entry.extension_name);
        debug!(package = %entry.package_name, dest = %dest.display(), "fetching");
        registry
            .fetch(&entry.package_name, &dest)
            .await
            .map_err(|e| ItemFailure {
                name: entry.package_name.clone(),
                message: e.to_string(),
            })
    }))
    .await;

    let (_, failures) = partition(outcomes);
    if !failures.is_empty() {
        return Err(Error::FetchFailed { failures });
    }
    Ok(())
}
