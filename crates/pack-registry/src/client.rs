//! Registry client backed by the package-manager executable.
//!
//! `npm view` resolves the latest published version, `npm pack`
//! downloads the tarball (which is then extracted with flate2 + tar),
//! and `npm publish` pushes a directory. The executable name is
//! configurable so yarn-compatible managers work too.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::Registry;

/// Registry client that shells out to an npm-compatible executable.
#[derive(Debug, Clone)]
pub struct NpmClient {
    tool: String,
    registry_url: String,
}

impl NpmClient {
    pub fn new(tool: impl Into<String>, registry_url: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            registry_url: registry_url.into(),
        }
    }

    async fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<std::process::Output> {
        let mut cmd = Command::new(&self.tool);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd.output().await.map_err(|e| Error::Spawn {
            tool: self.tool.clone(),
            source: e,
        })
    }

    fn command_failed(&self, args: &[&str], output: &std::process::Output) -> Error {
        Error::CommandFailed {
            tool: self.tool.clone(),
            args: args.join(" "),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

#[async_trait]
impl Registry for NpmClient {
    async fn latest_version(&self, package: &str) -> Result<Option<String>> {
        let args = ["view", package, "version", "--registry", &self.registry_url];
        let output = self.run(&args, None).await?;
        if !output.status.success() {
            // `view` fails for a package that was never published.
            tracing::debug!(package, "version lookup returned no published version");
            return Ok(None);
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            return Ok(None);
        }
        Ok(Some(version))
    }

    async fn fetch(&self, package: &str, dest: &Path) -> Result<()> {
        let download_dir = tempfile::tempdir().map_err(|e| Error::io(dest, e))?;
        let download_path = download_dir.path().to_string_lossy().into_owned();
        let args = [
            "pack",
            package,
            "--registry",
            &self.registry_url,
            "--pack-destination",
            &download_path,
        ];
        let output = self.run(&args, None).await?;
        if !output.status.success() {
            return Err(self.command_failed(&args, &output));
        }

        // `pack` prints the tarball filename on its last stdout line.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let file_name = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(str::trim)
            .ok_or_else(|| Error::InvalidTarball {
                package: package.to_string(),
            })?;
        let tarball = download_dir.path().join(file_name);

        tracing::debug!(package, tarball = %tarball.display(), "extracting package tarball");
        extract_tarball(&tarball, dest, package)
    }

    async fn publish(&self, dir: &Path) -> Result<()> {
        let args = ["publish", "--registry", &self.registry_url];
        let output = self.run(&args, Some(dir)).await?;
        if !output.status.success() {
            return Err(self.command_failed(&args, &output));
        }
        Ok(())
    }
}

/// Extract an npm tarball into `dest`, stripping the leading `package/`
/// path component every registry tarball carries. An existing `dest` is
/// cleared so files from an earlier extraction cannot survive.
fn extract_tarball(tarball: &Path, dest: &Path, package: &str) -> Result<()> {
    let bytes = std::fs::read(tarball).map_err(|e| Error::io(tarball, e))?;

    // Gzip magic bytes; registries answer errors with XML or JSON bodies.
    if bytes.len() < 2 || bytes[0] != 0x1f || bytes[1] != 0x8b {
        return Err(Error::InvalidTarball {
            package: package.to_string(),
        });
    }

    if dest.is_dir() {
        std::fs::remove_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    }
    std::fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

    let gz = flate2::read::GzDecoder::new(Cursor::new(&bytes));
    let mut archive = tar::Archive::new(gz);
    let entries = archive.entries().map_err(|e| Error::Extract {
        package: package.to_string(),
        message: e.to_string(),
    })?;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::Extract {
            package: package.to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path().map_err(|e| Error::Extract {
            package: package.to_string(),
            message: e.to_string(),
        })?;
        let relative: PathBuf = path.components().skip(1).collect();
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        entry.unpack(&target).map_err(|e| Error::Extract {
            package: package.to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}
