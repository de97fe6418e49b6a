//! Shared types used across all modules.
//!
//! Workspace folders and repository candidates live here so the locator,
//! the selector and the pipeline agree on one shape without reaching into
//! each other's internals.

pub mod workspace;

pub use workspace::{RepositoryCandidate, WorkspaceFolder};
