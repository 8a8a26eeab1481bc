//! Pack source generator.
//!
//! Refreshes the pack's `src/` tree from the template directory, then
//! renders every `.j2` template against a typed context listing each
//! included extension's package name, runtime targets, and derived
//! entry-point symbols. The rendered file replaces the template at the
//! same path with the suffix stripped; this wires every sub-extension's
//! activate/deactivate hooks into the pack's single entry module.

use std::path::Path;

use pack_manifest::camel_case;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PackConfig;
use crate::descriptor::PublishedExtensionRecord;
use crate::error::{Error, Result};

/// Suffix marking a file as a template to render.
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Per-extension entry in the template render context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageContext {
    pub package_name: String,
    pub is_active_node: bool,
    pub is_active_browser: bool,
    pub activate_func: String,
    pub deactivate_func: String,
    pub activate_node_func: String,
    pub deactivate_node_func: String,
}

impl From<&PublishedExtensionRecord> for PackageContext {
    fn from(record: &PublishedExtensionRecord) -> Self {
        let stem = camel_case(&record.descriptor.package_name);
        Self {
            package_name: record.descriptor.package_name.clone(),
            is_active_node: record.descriptor.is_active_node,
            is_active_browser: record.descriptor.is_active_browser,
            activate_func: format!("{stem}Active"),
            deactivate_func: format!("{stem}Deactivate"),
            activate_node_func: format!("{stem}NodeActive"),
            deactivate_node_func: format!("{stem}NodeDeactivate"),
        }
    }
}

/// Regenerate the pack's source tree from the template directory.
pub fn generate_sources(config: &PackConfig, records: &[PublishedExtensionRecord]) -> Result<()> {
    let template_src = config.template_dir.join("src");
    let pack_src = config.pack_dir.join("src");

    // Full refresh so no stale generated file survives between runs.
    pack_fs::remove_best_effort(&pack_src)?;
    pack_fs::copy_dir_all(&template_src, &pack_src)?;

    let packages: Vec<PackageContext> = records.iter().map(PackageContext::from).collect();
    let env = minijinja::Environment::new();

    for relative in pack_fs::walk_files(&pack_src)? {
        let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(output_name) = file_name.strip_suffix(TEMPLATE_SUFFIX) else {
            continue;
        };

        let template_path = pack_src.join(&relative);
        let source = std::fs::read_to_string(&template_path)
            .map_err(|e| pack_fs::Error::io(&template_path, e))?;
        let rendered = env
            .render_str(&source, minijinja::context! { packages => packages })
            .map_err(|e| Error::TemplateRender {
                path: template_path.clone(),
                message: e.to_string(),
            })?;

        let output_path = template_path.with_file_name(output_name);
        debug!(template = %template_path.display(), output = %output_path.display(), "rendered");
        pack_fs::write_atomic(&output_path, rendered.as_bytes())?;
        pack_fs::remove_best_effort(&template_path)?;
    }

    info!(extensions = records.len(), "pack sources generated");
    Ok(())
}
