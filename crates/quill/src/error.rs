//! CLI error types.

use quill_config::ConfigError;
use quill_headings::TocError;
use quill_post::PostError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Post(#[from] PostError),

    #[error("{0}")]
    Toc(#[from] TocError),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}
