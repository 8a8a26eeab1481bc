//! Package registry interface for the extension pack builder.
//!
//! The pipeline consumes the registry through the [`Registry`] trait:
//! query the latest published version, fetch and extract a package's
//! tarball, publish a directory. The production implementation
//! [`NpmClient`] shells out to the configured package-manager
//! executable; tests substitute an in-process mock.

pub mod client;
pub mod error;

use std::path::Path;

use async_trait::async_trait;

pub use client::NpmClient;
pub use error::{Error, Result};

/// The package-registry capability the pipeline depends on.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Latest published version of `package`, or `None` if the package
    /// has never been published.
    async fn latest_version(&self, package: &str) -> Result<Option<String>>;

    /// Download the latest tarball of `package` and extract its
    /// contents into `dest`, which is created (and cleared) first.
    async fn fetch(&self, package: &str, dest: &Path) -> Result<()>;

    /// Publish the package rooted at `dir`.
    async fn publish(&self, dir: &Path) -> Result<()>;
}
