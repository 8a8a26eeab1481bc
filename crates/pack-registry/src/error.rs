use std::path::PathBuf;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the package registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The package-manager executable could not be started.
    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The package-manager command exited non-zero.
    #[error("'{tool} {args}' failed (exit code {exit_code:?}): {stderr}")]
    CommandFailed {
        tool: String,
        args: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The downloaded file is not a gzip tarball.
    #[error("downloaded file for '{package}' is not a gzip tarball")]
    InvalidTarball { package: String },

    /// Tarball extraction failed.
    #[error("failed to extract tarball for '{package}': {message}")]
    Extract { package: String, message: String },

    /// I/O error reading or writing package files.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
