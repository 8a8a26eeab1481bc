//! Pack manifest customizer.
//!
//! Runs last: layers the template's pack-level manifest overrides on
//! top of the merged manifest, drops the `extensionPack` marker so the
//! assembled pack is not mistaken for a pointer-only meta-package, and
//! copies the build configuration from the template directory.

use pack_manifest::{Manifest, MANIFEST_FILENAME};
use tracing::info;

use crate::config::PackConfig;
use crate::error::Result;

/// Build-configuration file copied verbatim from the template dir.
const BUILD_CONFIG_FILENAME: &str = "tsconfig.json";

/// Apply pack-level overrides to the merged manifest.
pub fn customize_pack_manifest(config: &PackConfig) -> Result<()> {
    let manifest_path = config.pack_dir.join(MANIFEST_FILENAME);
    let mut manifest = Manifest::load(&manifest_path)?;

    let overrides = pack_fs::read_json(&config.template_dir.join(MANIFEST_FILENAME))?;
    manifest.merge(&overrides);
    manifest.remove("extensionPack");
    manifest.save()?;

    let from = config.template_dir.join(BUILD_CONFIG_FILENAME);
    let to = config.pack_dir.join(BUILD_CONFIG_FILENAME);
    std::fs::copy(&from, &to).map_err(|e| pack_fs::Error::io(&from, e))?;

    info!("pack manifest customized");
    Ok(())
}
