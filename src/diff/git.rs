//! Git CLI wrapper.
//!
//! Shells out to `git` via `tokio::process::Command` for the repository
//! probe, the status check and the raw diff. Nested repositories are found
//! by walking the tree for `.git` directories.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use walkdir::WalkDir;

use super::{DiffError, RawDiffProvider};
use crate::workspace::RepositoryProbe;

/// Marker directory that identifies a git working tree.
const GIT_DIR: &str = ".git";

/// [`RepositoryProbe`] and [`RawDiffProvider`] backed by the `git` binary.
#[derive(Debug, Clone, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

/// Run `git <args>` in `dir` and return stdout, failing on a non-zero exit.
async fn run_git(dir: &Path, args: &[&str]) -> Result<Vec<u8>, DiffError> {
    let output = tokio::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| DiffError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiffError::GitError(format!(
            "git {} failed ({}): {}",
            args.first().copied().unwrap_or_default(),
            output.status,
            stderr.trim()
        )));
    }

    Ok(output.stdout)
}

/// Run `git diff` (working tree against the index) and return its output.
///
/// Prefixes are forced to `a/` and `b/` so the summarizer can rely on
/// them regardless of `diff.noprefix` or `diff.mnemonicPrefix`. Output
/// that isn't valid UTF-8 is decoded lossily.
pub async fn git_diff(repo: &Path) -> Result<String, DiffError> {
    let stdout = run_git(
        repo,
        &["diff", "--no-color", "--no-ext-diff", "--src-prefix=a/", "--dst-prefix=b/"],
    )
    .await?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Find every `.git` directory beneath `root`, including `root/.git`.
///
/// Entries are visited sorted by file name and the walk does not descend
/// into `.git` directories. Any unreadable entry fails the whole search.
pub fn find_git_dirs(root: &Path) -> Result<Vec<PathBuf>, DiffError> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| DiffError::WalkError(e.to_string()))?;
        if entry.file_type().is_dir() && entry.file_name() == GIT_DIR {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    Ok(found)
}

#[async_trait]
impl RepositoryProbe for GitCli {
    async fn is_repository(&self, path: &Path) -> bool {
        tokio::process::Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn check_status(&self, path: &Path) -> Result<(), DiffError> {
        run_git(path, &["status", "--porcelain"]).await.map(|_| ())
    }

    async fn nested_markers(&self, root: &Path) -> Result<Vec<PathBuf>, DiffError> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || find_git_dirs(&root))
            .await
            .map_err(|e| DiffError::WalkError(format!("search task failed: {e}")))?
    }
}

#[async_trait]
impl RawDiffProvider for GitCli {
    async fn raw_diff(&self, repo: &Path) -> Result<String, DiffError> {
        git_diff(repo).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::process::Command;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {args:?} failed in {}", dir.display());
    }

    /// Initialise a repo at `dir` with one committed file, `file.txt`.
    pub fn init_repo(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.email", "test@test.com"]);
        git(dir, &["config", "user.name", "Test"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        std::fs::write(dir.join("file.txt"), "hello\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-q", "-m", "init"]);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::init_repo;
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn probe_accepts_repo_and_rejects_plain_dir() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("repo");
        let plain = dir.path().join("plain");
        init_repo(&repo);
        std::fs::create_dir_all(&plain).unwrap();

        let git = GitCli::new();
        assert!(git.is_repository(&repo).await);
        assert!(!git.is_repository(&plain).await);
    }

    #[tokio::test]
    async fn probe_rejects_missing_dir() {
        let git = GitCli::new();
        assert!(!git.is_repository(Path::new("/tmp/diffbrief_missing_dir")).await);
    }

    #[tokio::test]
    async fn status_fails_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitCli::new().check_status(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("git status failed"), "got: {err}");
    }

    #[tokio::test]
    async fn git_diff_shows_working_tree_changes() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        std::fs::write(dir.path().join("file.txt"), "hello\nworld\n").unwrap();

        let diff = git_diff(dir.path()).await.unwrap();
        assert!(diff.starts_with("diff --git a/file.txt b/file.txt"), "got: {diff}");
        assert!(diff.contains("+world"));
    }

    #[tokio::test]
    async fn git_diff_clean_tree_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        assert_eq!(git_diff(dir.path()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn git_diff_in_non_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = git_diff(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("git"), "got: {err}");
    }

    #[test]
    fn find_git_dirs_sorted_and_not_descending() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for p in [".git/modules/x/.git", "zeta/.git", "alpha/.git", "alpha/deep/.git", "docs"] {
            std::fs::create_dir_all(root.join(p)).unwrap();
        }
        // A gitfile (as used by worktrees) is not a marker directory.
        std::fs::create_dir_all(root.join("worktree")).unwrap();
        std::fs::write(root.join("worktree/.git"), "gitdir: ../.git/worktrees/w\n").unwrap();

        let found = find_git_dirs(root).unwrap();
        let rel: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec![".git", "alpha/.git", "alpha/deep/.git", "zeta/.git"]);
    }

    #[test]
    fn find_git_dirs_missing_root_errors() {
        let result = find_git_dirs(Path::new("/tmp/diffbrief_no_such_root"));
        assert!(matches!(result, Err(DiffError::WalkError(_))));
    }
}
