//! CLI command definitions and terminal output helpers.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;

use std::path::PathBuf;

use colored::Colorize;
use diffbrief::models::{RepositoryCandidate, WorkspaceFolder};

/// About text with ANSI styling for clap help output.
pub const ABOUT_STYLED: &str =
    "\x1b[1mdiffbrief\x1b[0m \x1b[2m· Bounded, redacted summaries of uncommitted git changes.\x1b[0m";

/// Turn CLI folder arguments into workspace folders, defaulting to `cwd`.
pub fn workspace_folders(folders: &[PathBuf], cwd: PathBuf) -> Vec<WorkspaceFolder> {
    if folders.is_empty() {
        return vec![WorkspaceFolder::from_path(cwd)];
    }
    folders
        .iter()
        .map(|f| {
            let path = std::fs::canonicalize(f).unwrap_or_else(|_| f.clone());
            WorkspaceFolder::from_path(path)
        })
        .collect()
}

/// One line per candidate, roots in bold.
pub fn render_candidates(candidates: &[RepositoryCandidate]) -> String {
    candidates
        .iter()
        .map(|c| {
            let name = if c.is_root {
                c.name.bold().to_string()
            } else {
                c.name.normal().to_string()
            };
            format!(
                "  {}  {}  {}",
                name,
                format!("({})", c.kind()).dimmed(),
                c.path.display().to_string().dimmed(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
