//! Localization (NLS) bundle collection and merging.
//!
//! Each extension may carry `package.nls.json` plus per-locale variants
//! (`package.nls.zh-cn.json`, ...). The pack keeps one file per locale
//! suffix; folding an extension's bundle into the pack's is a shallow
//! key union where the incoming file's keys win.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// One localization file collected from an extension directory.
#[derive(Debug, Clone)]
pub struct NlsFile {
    /// File name, e.g. `package.nls.zh-cn.json`.
    pub file_name: String,
    /// Parsed key/value table.
    pub content: Value,
}

/// Collect every file in `dir` whose name starts with `prefix`, sorted
/// by file name.
pub fn collect_nls_files(dir: &Path, prefix: &str) -> Result<Vec<NlsFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| pack_fs::Error::io(dir, e))? {
        let entry = entry.map_err(|e| pack_fs::Error::io(dir, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.starts_with(prefix) {
            continue;
        }
        let content = pack_fs::read_json(&entry.path())?;
        files.push(NlsFile { file_name, content });
    }
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// Shallow key union: every top-level key of `incoming` is inserted into
/// `target`, overwriting on conflict. Non-object inputs are ignored.
pub fn merge_nls(target: &mut Value, incoming: &Value) {
    let (Some(target_map), Some(incoming_map)) = (target.as_object_mut(), incoming.as_object())
    else {
        return;
    };
    for (key, value) in incoming_map {
        target_map.insert(key.clone(), value.clone());
    }
}
