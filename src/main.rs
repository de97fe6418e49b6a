//! diffbrief: bounded, redacted summaries of uncommitted git changes.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! error propagation and user-facing messages.

mod cli;

use diffbrief::config;
use diffbrief::constants;
use diffbrief::credentials;
use diffbrief::diff;
use diffbrief::env;
use diffbrief::logging;
use diffbrief::models;
use diffbrief::pipeline;
use diffbrief::security;
use diffbrief::validation;
use diffbrief::workspace;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use cli::args::{Cli, Command, RedactArgs, ReposArgs, SummaryArgs};
use config::Config;
use credentials::CredentialHandle;
use diff::GitCli;
use env::Env;
use models::WorkspaceFolder;
use pipeline::DiffPipeline;
use security::Redactor;
use workspace::{NamedChooser, RepositoryChooser, TerminalChooser};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let folder_args: &[PathBuf] = match &cli.command {
        Command::Summary(args) => &args.folders,
        Command::Repos(args) => &args.folders,
        _ => &[],
    };
    let folders = cli::workspace_folders(folder_args, cwd);
    let workspace_root = folders.first().map(|f| f.path.clone());

    let config = Config::load(workspace_root.as_deref(), &env)
        .context("failed to load configuration")?;
    logging::init(&env, &config.logging.level).context("failed to set up logging")?;
    tracing::debug!(?config, "configuration loaded");

    let credentials = CredentialHandle::new(config.limits);
    if let Some(ref key) = config.provider.api_key {
        if let Err(e) = credentials.store(key) {
            tracing::warn!("ignoring configured API key: {e}");
        }
    }

    match cli.command {
        Command::Summary(args) => {
            run_summary(args, &folders, &config, workspace_root.as_deref()).await
        }
        Command::Redact(args) => run_redact(args, &config, workspace_root.as_deref()).await,
        Command::Repos(args) => run_repos(args, &folders).await,
        Command::Check => run_check(&config, &credentials),
        Command::Version => run_version(),
    }
}

/// Print version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Redactor with the built-in rules plus any rules file from the CLI or config.
///
/// A relative `[redaction] additional_rules` path resolves against the
/// first workspace folder.
fn build_redactor(
    cli_rules: Option<&Path>,
    config: &Config,
    root: Option<&Path>,
) -> Result<Redactor> {
    let path = match cli_rules {
        Some(p) => Some(p.to_path_buf()),
        None => config.redaction.additional_rules.as_ref().map(|p| {
            let p = PathBuf::from(p);
            match root {
                Some(root) if p.is_relative() => root.join(p),
                _ => p,
            }
        }),
    };

    let Some(path) = path else {
        return Ok(Redactor::default());
    };

    let extra = security::rules::load_rules_from_file(&path)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("failed to load redaction rules from {}", path.display()))?;
    tracing::debug!(count = extra.len(), path = %path.display(), "loaded extra redaction rules");
    Ok(Redactor::with_extra_rules(extra))
}

/// Locate, pick, diff, redact and summarize, then print the summary to stdout.
async fn run_summary(
    args: SummaryArgs,
    folders: &[WorkspaceFolder],
    config: &Config,
    root: Option<&Path>,
) -> Result<()> {
    let git = GitCli::new();
    let chooser: Box<dyn RepositoryChooser> = match args.repo {
        Some(wanted) => Box::new(NamedChooser::new(wanted)),
        None => Box::new(TerminalChooser),
    };
    let redactor = build_redactor(args.rules.as_deref(), config, root)?;

    let brief = DiffPipeline::new(&git, chooser.as_ref(), &git)
        .with_redactor(redactor)
        .with_limits(config.summary)
        .run(folders)
        .await?;

    if args.check {
        config
            .limits
            .validate_diff(&brief.summary)
            .context("summary failed outbound checks")?;
    }

    eprintln!(
        "  {} {}",
        brief.repository.to_string().bold(),
        format!("· {} redaction(s)", brief.redactions).dimmed(),
    );
    println!("{}", brief.summary);
    Ok(())
}

/// Redact a diff from a file or stdin and print it to stdout.
async fn run_redact(args: RedactArgs, config: &Config, root: Option<&Path>) -> Result<()> {
    let raw = match args.file {
        Some(ref path) => diff::read_diff_file(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => diff::read_diff_stdin()
            .await
            .context("failed to read diff from stdin")?,
    };

    let redactor = build_redactor(args.rules.as_deref(), config, root)?;
    let (redacted, report) = redactor.redact_with_report(&raw);
    print!("{redacted}");

    if report.total() > 0 {
        let detail: Vec<String> = report
            .hits
            .iter()
            .map(|(id, n)| format!("{id}: {n}"))
            .collect();
        eprintln!(
            "  {} {}",
            format!("{} redaction(s)", report.total()).yellow(),
            format!("({})", detail.join(", ")).dimmed(),
        );
    }
    Ok(())
}

/// List discovered repository candidates.
async fn run_repos(args: ReposArgs, folders: &[WorkspaceFolder]) -> Result<()> {
    let git = GitCli::new();
    let candidates = workspace::discover_repositories(folders, &git).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    println!("{}", cli::render_candidates(&candidates));
    Ok(())
}

/// Validate provider settings and the API key.
fn run_check(config: &Config, credentials: &CredentialHandle) -> Result<()> {
    let provider = &config.provider;
    validation::validate_provider(
        provider.api_url.as_deref(),
        provider.model.as_deref(),
        Some(provider.temperature),
    )
    .context("invalid provider settings")?;
    println!("  {} provider settings are valid", "✔".green().bold());

    if !credentials.has_api_key() {
        bail!(
            "no usable API key; set {} or [provider] api_key",
            constants::ENV_API_KEY
        );
    }
    println!("  {} API key is configured", "✔".green().bold());
    Ok(())
}
