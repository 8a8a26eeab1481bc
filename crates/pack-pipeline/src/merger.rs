//! Manifest merger.
//!
//! Folds every included extension's manifest into the pack's manifest,
//! records one dependency entry per extension, and folds the collected
//! localization files into the pack's per-locale tables. The pack
//! manifest's contributed sections are reset before folding so a
//! repeated full run produces the same result as a fresh one.

use pack_manifest::{
    Manifest, MANIFEST_FILENAME, ManifestAccumulator, NlsFile, collect_nls_files, merge_nls,
    registry_name,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::PackConfig;
use crate::descriptor::PublishedExtensionRecord;
use crate::error::Result;

/// Merge every included extension's manifest and localization files
/// into the pack.
pub fn merge_manifests(config: &PackConfig, records: &[PublishedExtensionRecord]) -> Result<()> {
    let pack_manifest_path = config.pack_dir.join(MANIFEST_FILENAME);
    let base = Manifest::load(&pack_manifest_path)?;
    let mut accumulator = ManifestAccumulator::new(base.into_value(), &config.app_view_id);
    accumulator.reset_contributed();

    let mut nls_files: Vec<NlsFile> = Vec::new();
    for record in records {
        let source_dir = record.descriptor.source_dir(config);
        let manifest = Manifest::load(&source_dir.join(MANIFEST_FILENAME))?;
        debug!(
            extension = record.descriptor.extension_name,
            "folding manifest"
        );
        accumulator.fold(manifest.value());

        // Real publishes pin the published name to the resolved version;
        // dry-run locals and fetched extensions get a wildcard dependency
        // on the synthesized prefixed name.
        match &record.version {
            Some(version) => {
                accumulator.add_dependency(&record.descriptor.package_name, version);
            }
            None => {
                let name = registry_name(config.name_prefix(), manifest.name()?);
                accumulator.add_dependency(&name, "*");
            }
        }

        nls_files.extend(collect_nls_files(&source_dir, &config.nls_prefix)?);
    }

    pack_fs::write_json_pretty(&pack_manifest_path, &accumulator.into_value())?;
    info!(count = records.len(), "pack manifest merged");

    // A locale file that does not exist yet starts from an empty table.
    for file in nls_files {
        let path = config.pack_dir.join(&file.file_name);
        let mut table = pack_fs::read_json_opt(&path)?.unwrap_or_else(|| Value::Object(Map::new()));
        merge_nls(&mut table, &file.content);
        pack_fs::write_json_pretty(&path, &table)?;
    }
    Ok(())
}
