//! Workspace and repository types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One folder opened in the operator's workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    /// Absolute path of the folder.
    pub path: PathBuf,
    /// Human label, usually the final path component.
    pub name: String,
}

impl WorkspaceFolder {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Build a folder whose label is the last component of `path`.
    ///
    /// Falls back to the full display path for roots like `/`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = folder_label(&path);
        Self { path, name }
    }
}

fn folder_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A directory identified as version-controlled and eligible as a diff source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCandidate {
    /// Absolute path of the repository's working tree.
    pub path: PathBuf,
    /// Folder name for roots, `<folder>/<relative path>` for nested repos.
    pub name: String,
    /// Whether this is the workspace folder itself.
    pub is_root: bool,
}

impl RepositoryCandidate {
    /// Short description shown next to the label in the picker.
    pub fn kind(&self) -> &'static str {
        if self.is_root {
            "workspace root"
        } else {
            "nested repository"
        }
    }
}

impl fmt::Display for RepositoryCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind())
    }
}
