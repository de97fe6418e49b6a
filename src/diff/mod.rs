//! Diff engine: the git CLI wrapper, the raw-diff provider seam, and the
//! bounded summarizer.

pub mod git;
pub mod summary;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use git::GitCli;
pub use summary::{SummaryError, SummaryLimits, summarize, summarize_with};

/// Errors from the diff engine.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("git command failed: {0}")]
    GitError(String),

    #[error("failed to read diff file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("directory walk failed: {0}")]
    WalkError(String),
}

/// Produces the unified diff of a repository's working tree against its index.
#[async_trait]
pub trait RawDiffProvider: Send + Sync {
    async fn raw_diff(&self, repo: &Path) -> Result<String, DiffError>;
}

/// Read a unified diff from stdin.
pub async fn read_diff_stdin() -> Result<String, DiffError> {
    use tokio::io::AsyncReadExt;
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

/// Read a unified diff from a file.
pub async fn read_diff_file(path: &Path) -> Result<String, DiffError> {
    Ok(tokio::fs::read_to_string(path).await?)
}
