use std::path::PathBuf;

/// Errors that can occur in the manifest layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying filesystem/JSON error.
    #[error(transparent)]
    Fs(#[from] pack_fs::Error),

    /// Manifest file not found at the expected path.
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Manifest is not a JSON object.
    #[error("manifest at {0} is not a JSON object")]
    NotAnObject(PathBuf),

    /// A required manifest field is missing or has the wrong type.
    #[error("manifest at {path} is missing required field '{field}'")]
    MissingField { path: PathBuf, field: String },

    /// Version string the bump scheme cannot process.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
