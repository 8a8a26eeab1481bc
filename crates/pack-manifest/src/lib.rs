//! Manifest model and merge logic for the extension pack builder.
//!
//! An extension declares its contributions in a `package.json` manifest.
//! This crate loads those manifests, folds them into the pack's merged
//! manifest, merges localization (NLS) bundles, and derives registry
//! names, entry-point symbols, and bumped versions.

pub mod accumulator;
pub mod error;
pub mod manifest;
pub mod merge;
pub mod naming;
pub mod nls;
pub mod version;

/// The canonical filename for extension and pack manifests.
pub const MANIFEST_FILENAME: &str = "package.json";

pub use accumulator::ManifestAccumulator;
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use merge::deep_merge;
pub use naming::{camel_case, registry_name};
pub use nls::{NlsFile, collect_nls_files, merge_nls};
pub use version::next_version;
