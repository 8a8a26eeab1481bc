//! Asset synchronizer.
//!
//! Clears the union of all declared asset folders from the pack, then
//! copies each extension's asset folders in, in list order. Two
//! extensions declaring the same folder is not a conflict: the
//! last-processed one wins on file collisions. The pack's build folder
//! is rebuilt the same way from every locally built extension's own
//! build output.

use tracing::{debug, info};

use crate::config::PackConfig;
use crate::descriptor::PublishedExtensionRecord;
use crate::error::Result;

/// Name of the pre-built UI bundle folder inside each local extension
/// and the pack.
const BUILD_FOLDER: &str = "build";

/// Copy every included extension's assets and build output into the
/// pack, clearing stale copies first.
pub fn sync_assets(config: &PackConfig, records: &[PublishedExtensionRecord]) -> Result<()> {
    // Clear the union of declared asset folders. Missing paths are fine.
    let mut folders: Vec<&str> = Vec::new();
    for record in records {
        for folder in &record.descriptor.assets_folders {
            if !folders.contains(&folder.as_str()) {
                folders.push(folder);
            }
        }
    }
    for folder in &folders {
        pack_fs::remove_best_effort(&config.pack_dir.join(folder))?;
    }

    for record in records {
        let source_root = record.descriptor.source_dir(config);
        for folder in &record.descriptor.assets_folders {
            let source = source_root.join(folder);
            if !source.is_dir() {
                debug!(
                    extension = record.descriptor.extension_name,
                    folder, "asset folder missing, skipping"
                );
                continue;
            }
            pack_fs::copy_dir_all(&source, &config.pack_dir.join(folder))?;
        }
    }

    // Rebuild the pack's UI bundle folder from locally built extensions.
    let pack_build = config.pack_dir.join(BUILD_FOLDER);
    pack_fs::remove_best_effort(&pack_build)?;
    for record in records.iter().filter(|r| !r.descriptor.is_other) {
        let source = config
            .extensions_dir
            .join(&record.descriptor.extension_name)
            .join(BUILD_FOLDER);
        if source.is_dir() {
            pack_fs::copy_dir_all(&source, &pack_build)?;
        }
    }

    info!(
        extensions = records.len(),
        folders = folders.len(),
        "assets synchronized"
    );
    Ok(())
}
