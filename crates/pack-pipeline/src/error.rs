use std::path::PathBuf;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// One failed item in a batch stage.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    /// Extension or package name.
    pub name: String,
    /// What went wrong for this item.
    pub message: String,
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

fn list_failures(failures: &[ItemFailure]) -> String {
    failures
        .iter()
        .map(ItemFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] pack_fs::Error),

    #[error(transparent)]
    Manifest(#[from] pack_manifest::Error),

    #[error(transparent)]
    Registry(#[from] pack_registry::Error),

    #[error("failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("failed to fetch {} package(s): {}", .failures.len(), list_failures(.failures))]
    FetchFailed { failures: Vec<ItemFailure> },

    #[error("failed to publish {} extension(s): {}", .failures.len(), list_failures(.failures))]
    PublishFailed { failures: Vec<ItemFailure> },

    #[error("failed to render template {path}: {message}")]
    TemplateRender { path: PathBuf, message: String },

    #[error("pipeline stage panicked: {0}")]
    StageJoin(#[from] tokio::task::JoinError),
}
