//! End-to-end diff summary: locate → select → validate → fetch → redact → summarize.

use thiserror::Error;
use tracing::Instrument;

use crate::diff::{DiffError, RawDiffProvider, SummaryError, SummaryLimits};
use crate::models::{RepositoryCandidate, WorkspaceFolder};
use crate::security::Redactor;
use crate::workspace::{self, RepositoryChooser, RepositoryProbe, WorkspaceError};

/// Errors from a pipeline run. Each step's error passes through untouched.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("no changes detected in {}", repo.name)]
    NoChanges { repo: RepositoryCandidate },
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct DiffBrief {
    /// Repository the diff was taken from.
    pub repository: RepositoryCandidate,
    /// The bounded, redacted summary.
    pub summary: String,
    /// Substitutions made by the redactor.
    pub redactions: usize,
}

/// Wires the external collaborators to the redactor and summarizer.
pub struct DiffPipeline<'a> {
    probe: &'a dyn RepositoryProbe,
    chooser: &'a dyn RepositoryChooser,
    provider: &'a dyn RawDiffProvider,
    redactor: Redactor,
    limits: SummaryLimits,
}

impl<'a> DiffPipeline<'a> {
    pub fn new(
        probe: &'a dyn RepositoryProbe,
        chooser: &'a dyn RepositoryChooser,
        provider: &'a dyn RawDiffProvider,
    ) -> Self {
        Self {
            probe,
            chooser,
            provider,
            redactor: Redactor::default(),
            limits: SummaryLimits::default(),
        }
    }

    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn with_limits(mut self, limits: SummaryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Run the pipeline and return only the summary text.
    pub async fn produce_diff_summary(
        &self,
        folders: &[WorkspaceFolder],
    ) -> Result<String, PipelineError> {
        self.run(folders).await.map(|brief| brief.summary)
    }

    /// Run the pipeline. No partial output: either a full brief or the first error.
    pub async fn run(&self, folders: &[WorkspaceFolder]) -> Result<DiffBrief, PipelineError> {
        let span = tracing::info_span!("diff_pipeline", folders = folders.len());
        self.run_steps(folders).instrument(span).await
    }

    async fn run_steps(&self, folders: &[WorkspaceFolder]) -> Result<DiffBrief, PipelineError> {
        let candidates = workspace::discover_repositories(folders, self.probe).await?;
        let chosen = workspace::select_repository(candidates, self.chooser)?;
        workspace::validate_repository_accessible(&chosen.path, self.probe).await?;

        let raw = self.provider.raw_diff(&chosen.path).await?;
        if raw.trim().is_empty() {
            return Err(PipelineError::NoChanges { repo: chosen });
        }
        tracing::debug!(repo = %chosen.name, bytes = raw.len(), "raw diff fetched");

        let (redacted, report) = self.redactor.redact_with_report(&raw);
        if report.total() > 0 {
            tracing::debug!(hits = ?report.hits, "secrets redacted");
        }

        let summary = crate::diff::summarize_with(&redacted, &self.limits)?;
        Ok(DiffBrief {
            repository: chosen,
            summary,
            redactions: report.total(),
        })
    }
}
