//! Candidate discovery.

use std::path::{Component, Path};

use super::{RepositoryProbe, WorkspaceError};
use crate::models::{RepositoryCandidate, WorkspaceFolder};

/// Discover candidate repositories across the workspace folders.
///
/// Roots come first per folder, followed by that folder's nested
/// repositories in walk order. A folder that fails the root probe is
/// skipped entirely, so repositories nested inside a non-repository folder
/// are not found. A failed nested search only drops that folder's nested
/// results.
pub async fn discover_repositories(
    folders: &[WorkspaceFolder],
    probe: &dyn RepositoryProbe,
) -> Result<Vec<RepositoryCandidate>, WorkspaceError> {
    if folders.is_empty() {
        return Err(WorkspaceError::NoWorkspace);
    }

    let mut candidates = Vec::new();

    for folder in folders {
        if !probe.is_repository(&folder.path).await {
            tracing::debug!(folder = %folder.path.display(), "not a git repository, skipping");
            continue;
        }

        candidates.push(RepositoryCandidate {
            path: folder.path.clone(),
            name: folder.name.clone(),
            is_root: true,
        });

        match probe.nested_markers(&folder.path).await {
            Ok(markers) => {
                candidates.extend(
                    markers
                        .iter()
                        .filter_map(|marker| nested_candidate(folder, marker)),
                );
            }
            Err(e) => {
                tracing::debug!(
                    folder = %folder.path.display(),
                    "nested repository search failed: {e}"
                );
            }
        }
    }

    if candidates.is_empty() {
        return Err(WorkspaceError::NoRepositoryFound);
    }

    tracing::debug!(count = candidates.len(), "repositories discovered");
    Ok(candidates)
}

/// Turn a marker directory into a nested candidate.
///
/// Returns `None` for the folder's own marker and for markers outside it.
fn nested_candidate(folder: &WorkspaceFolder, marker: &Path) -> Option<RepositoryCandidate> {
    let repo_dir = marker.parent()?;
    let relative = repo_dir.strip_prefix(&folder.path).ok()?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    let relative_label = parts.join("/");

    Some(RepositoryCandidate {
        path: folder.path.join(relative),
        name: format!("{}/{}", folder.name, relative_label),
        is_root: false,
    })
}

/// Check that the chosen repository answers a status query.
pub async fn validate_repository_accessible(
    path: &Path,
    probe: &dyn RepositoryProbe,
) -> Result<(), WorkspaceError> {
    probe.check_status(path).await.map_err(|e| {
        tracing::debug!(repo = %path.display(), "status check failed: {e}");
        WorkspaceError::RepositoryInaccessible {
            path: path.to_path_buf(),
        }
    })
}
