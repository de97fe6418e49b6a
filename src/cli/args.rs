//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

/// Bounded, redacted summaries of uncommitted git changes.
#[derive(Parser, Debug)]
#[command(
    name = "diffbrief",
    version = diffbrief::constants::VERSION,
    about = super::ABOUT_STYLED,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Summarize the working-tree diff of a repository in the workspace.
    Summary(SummaryArgs),

    /// Redact secrets from a unified diff read from a file or stdin.
    Redact(RedactArgs),

    /// List the git repositories discovered in the workspace.
    Repos(ReposArgs),

    /// Validate provider settings and the configured API key.
    Check,

    /// Print version and build information.
    Version,
}

/// Arguments for the `summary` subcommand.
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Workspace folders to search (default: current directory).
    pub folders: Vec<PathBuf>,

    /// Pick a repository by label or path instead of prompting.
    #[arg(long, value_name = "NAME|PATH")]
    pub repo: Option<String>,

    /// Run the outbound checks on the summary before printing it.
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Additional redaction rules TOML file.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

/// Arguments for the `redact` subcommand.
#[derive(Parser, Debug)]
pub struct RedactArgs {
    /// Diff file to read (default: stdin).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Additional redaction rules TOML file.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

/// Arguments for the `repos` subcommand.
#[derive(Parser, Debug)]
pub struct ReposArgs {
    /// Workspace folders to search (default: current directory).
    pub folders: Vec<PathBuf>,

    /// Print candidates as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_defaults() {
        let cli = Cli::try_parse_from(["diffbrief", "summary"]).unwrap();
        match cli.command {
            Command::Summary(args) => {
                assert!(args.folders.is_empty());
                assert!(args.repo.is_none());
                assert!(!args.check);
                assert!(args.rules.is_none());
            }
            _ => panic!("expected Summary command"),
        }
    }

    #[test]
    fn summary_with_folders_and_repo() {
        let cli = Cli::try_parse_from([
            "diffbrief", "summary", "/w/api", "/w/web", "--repo", "api/libs/core", "--check",
        ])
        .unwrap();
        match cli.command {
            Command::Summary(args) => {
                assert_eq!(args.folders, vec![PathBuf::from("/w/api"), PathBuf::from("/w/web")]);
                assert_eq!(args.repo.as_deref(), Some("api/libs/core"));
                assert!(args.check);
            }
            _ => panic!("expected Summary command"),
        }
    }

    #[test]
    fn redact_reads_file_flag() {
        let cli = Cli::try_parse_from(["diffbrief", "redact", "--file", "changes.diff"]).unwrap();
        match cli.command {
            Command::Redact(args) => assert_eq!(args.file, Some(PathBuf::from("changes.diff"))),
            _ => panic!("expected Redact command"),
        }
    }

    #[test]
    fn repos_json_flag() {
        let cli = Cli::try_parse_from(["diffbrief", "repos", "--json"]).unwrap();
        match cli.command {
            Command::Repos(args) => assert!(args.json),
            _ => panic!("expected Repos command"),
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["diffbrief", "review"]).is_err());
    }
}
