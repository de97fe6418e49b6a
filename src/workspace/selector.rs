//! Narrowing the candidate set to one repository.

use std::path::Path;

use colored::Colorize;

use super::WorkspaceError;
use crate::models::RepositoryCandidate;

/// One option shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    pub label: String,
    pub description: String,
    pub detail: String,
}

impl From<&RepositoryCandidate> for ChoiceItem {
    fn from(candidate: &RepositoryCandidate) -> Self {
        Self {
            label: candidate.name.clone(),
            description: candidate.kind().to_string(),
            detail: candidate.path.display().to_string(),
        }
    }
}

/// Asks the operator to pick one option.
///
/// Returns the index of the chosen item, or `None` when the prompt was
/// dismissed.
pub trait RepositoryChooser: Send + Sync {
    fn choose(&self, items: &[ChoiceItem]) -> Result<Option<usize>, WorkspaceError>;
}

/// Resolve one repository from the discovered candidates.
///
/// A single candidate is returned without consulting the chooser. Options
/// are presented in discovery order.
pub fn select_repository(
    mut candidates: Vec<RepositoryCandidate>,
    chooser: &dyn RepositoryChooser,
) -> Result<RepositoryCandidate, WorkspaceError> {
    match candidates.len() {
        0 => Err(WorkspaceError::NoRepositoryFound),
        1 => Ok(candidates.remove(0)),
        len => {
            let items: Vec<ChoiceItem> = candidates.iter().map(ChoiceItem::from).collect();
            let index = chooser
                .choose(&items)?
                .ok_or(WorkspaceError::SelectionCancelled)?;
            if index >= len {
                return Err(WorkspaceError::Chooser(format!(
                    "choice {index} out of range for {len} repositories"
                )));
            }
            let chosen = candidates.swap_remove(index);
            tracing::debug!(repo = %chosen.name, "repository selected");
            Ok(chosen)
        }
    }
}

/// Interactive picker on the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalChooser;

impl RepositoryChooser for TerminalChooser {
    fn choose(&self, items: &[ChoiceItem]) -> Result<Option<usize>, WorkspaceError> {
        eprintln!("{}", "Multiple Git Repositories Found".bold());

        let labels: Vec<String> = items
            .iter()
            .map(|item| format!("{} ({})  {}", item.label, item.description, item.detail))
            .collect();

        // Blocks the calling worker thread; the pipeline awaits nothing else meanwhile.
        dialoguer::Select::new()
            .with_prompt("Select a git repository to analyze")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| WorkspaceError::Chooser(e.to_string()))
    }
}

/// Non-interactive picker matching a candidate by name or path.
#[derive(Debug, Clone)]
pub struct NamedChooser {
    wanted: String,
}

impl NamedChooser {
    pub fn new(wanted: impl Into<String>) -> Self {
        Self {
            wanted: wanted.into(),
        }
    }
}

impl RepositoryChooser for NamedChooser {
    fn choose(&self, items: &[ChoiceItem]) -> Result<Option<usize>, WorkspaceError> {
        let wanted = self.wanted.trim_end_matches('/');
        let position = items
            .iter()
            .position(|item| item.label == wanted)
            .or_else(|| {
                items
                    .iter()
                    .position(|item| Path::new(&item.detail) == Path::new(wanted))
            });
        match position {
            Some(index) => Ok(Some(index)),
            None => Err(WorkspaceError::Chooser(format!(
                "no discovered repository matches '{}'",
                self.wanted
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Chooser that records what it was shown and answers with a fixed index.
    struct Scripted {
        answer: Option<usize>,
        shown: Mutex<Vec<Vec<ChoiceItem>>>,
    }

    impl Scripted {
        fn answering(answer: Option<usize>) -> Self {
            Self {
                answer,
                shown: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.shown.lock().unwrap().len()
        }
    }

    impl RepositoryChooser for Scripted {
        fn choose(&self, items: &[ChoiceItem]) -> Result<Option<usize>, WorkspaceError> {
            self.shown.lock().unwrap().push(items.to_vec());
            Ok(self.answer)
        }
    }

    fn candidate(path: &str, name: &str, is_root: bool) -> RepositoryCandidate {
        RepositoryCandidate {
            path: PathBuf::from(path),
            name: name.to_string(),
            is_root,
        }
    }

    fn workspace() -> Vec<RepositoryCandidate> {
        vec![
            candidate("/w/app", "app", true),
            candidate("/w/api", "api", true),
            candidate("/w/app/vendor/lib", "app/vendor/lib", false),
        ]
    }

    #[test]
    fn single_candidate_skips_chooser() {
        let chooser = Scripted::answering(None);
        let only = candidate("/w/app", "app", true);
        let chosen = select_repository(vec![only.clone()], &chooser).unwrap();
        assert_eq!(chosen, only);
        assert_eq!(chooser.calls(), 0);
    }

    #[test]
    fn options_keep_discovery_order_and_labels() {
        let chooser = Scripted::answering(Some(2));
        let chosen = select_repository(workspace(), &chooser).unwrap();
        assert_eq!(chosen.name, "app/vendor/lib");

        let shown = chooser.shown.lock().unwrap();
        assert_eq!(
            shown[0],
            vec![
                ChoiceItem {
                    label: "app".into(),
                    description: "workspace root".into(),
                    detail: "/w/app".into(),
                },
                ChoiceItem {
                    label: "api".into(),
                    description: "workspace root".into(),
                    detail: "/w/api".into(),
                },
                ChoiceItem {
                    label: "app/vendor/lib".into(),
                    description: "nested repository".into(),
                    detail: "/w/app/vendor/lib".into(),
                },
            ]
        );
    }

    #[test]
    fn dismissed_prompt_is_cancellation() {
        let err = select_repository(workspace(), &Scripted::answering(None)).unwrap_err();
        assert!(matches!(err, WorkspaceError::SelectionCancelled));
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let err = select_repository(workspace(), &Scripted::answering(Some(7))).unwrap_err();
        assert!(matches!(err, WorkspaceError::Chooser(_)));
    }

    #[test]
    fn empty_candidates_rejected() {
        let err = select_repository(Vec::new(), &Scripted::answering(Some(0))).unwrap_err();
        assert!(matches!(err, WorkspaceError::NoRepositoryFound));
    }

    #[test]
    fn named_chooser_matches_name_then_path() {
        let by_name = select_repository(workspace(), &NamedChooser::new("api")).unwrap();
        assert_eq!(by_name.path, PathBuf::from("/w/api"));

        let by_path =
            select_repository(workspace(), &NamedChooser::new("/w/app/vendor/lib/")).unwrap();
        assert_eq!(by_path.name, "app/vendor/lib");

        let missing = select_repository(workspace(), &NamedChooser::new("nope")).unwrap_err();
        assert!(missing.to_string().contains("no discovered repository matches 'nope'"));
    }
}
