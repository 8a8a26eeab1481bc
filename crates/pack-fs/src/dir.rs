//! Directory operations shared by the pipeline stages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Recursively copy `src` into `dst`, overwriting existing files.
///
/// Directories are created as needed. `src` must exist and be a
/// directory.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(Error::NotADirectory {
            path: src.to_path_buf(),
        });
    }
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;
    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| Error::io(&from, e))?;
        if file_type.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }
    Ok(())
}

/// Remove a file or directory tree, ignoring a missing path.
pub fn remove_best_effort(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Remove a directory tree if present and recreate it empty.
pub fn recreate_dir(path: &Path) -> Result<()> {
    remove_best_effort(path)?;
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// List the names of immediate subdirectories, sorted for determinism.
pub fn scan_subdirs(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// List all files under `dir` recursively, as paths relative to `dir`,
/// sorted for determinism.
pub fn walk_files(dir: &Path) -> Result<Vec<PathBuf>> {
    fn walk(root: &Path, current: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(current).map_err(|e| Error::io(current, e))? {
            let entry = entry.map_err(|e| Error::io(current, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
            if file_type.is_dir() {
                walk(root, &path, out)?;
            } else {
                // strip_prefix cannot fail: path is under root
                if let Ok(rel) = path.strip_prefix(root) {
                    out.push(rel.to_path_buf());
                }
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files)?;
    files.sort();
    Ok(files)
}
