//! Repository discovery and selection across a workspace.
//!
//! A workspace is one or more folders. Each folder that is itself a git
//! working tree contributes a root candidate plus any repositories nested
//! beneath it; the selector then narrows the candidates to one.

pub mod locator;
pub mod selector;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::diff::DiffError;

pub use locator::{discover_repositories, validate_repository_accessible};
pub use selector::{
    ChoiceItem, NamedChooser, RepositoryChooser, TerminalChooser, select_repository,
};

/// Errors from discovery and selection.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("no workspace folder found")]
    NoWorkspace,

    #[error("no git repository found in workspace")]
    NoRepositoryFound,

    #[error("git repository at {} is not accessible", path.display())]
    RepositoryInaccessible { path: PathBuf },

    #[error("repository selection cancelled")]
    SelectionCancelled,

    #[error("repository picker failed: {0}")]
    Chooser(String),
}

/// Version-control queries the locator needs.
#[async_trait]
pub trait RepositoryProbe: Send + Sync {
    /// Whether `path` lies inside a version-controlled tree.
    async fn is_repository(&self, path: &Path) -> bool;

    /// Lightweight status query; fails on permission problems or a corrupt repo.
    async fn check_status(&self, path: &Path) -> Result<(), DiffError>;

    /// Marker directories found anywhere beneath `root`.
    async fn nested_markers(&self, root: &Path) -> Result<Vec<PathBuf>, DiffError>;
}
