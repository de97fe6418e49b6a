//! Diagnostic logging to stderr.
//!
//! stdout carries the summary, so every log line goes to stderr. The
//! filter comes from `DIFFBRIEF_LOG` when set, otherwise from the
//! `[logging] level` config value.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::constants::ENV_LOG;
use crate::env::Env;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// The filter directive in effect: the env var wins over the config level.
pub fn filter_directive(env: &Env, configured: &str) -> String {
    env.get(ENV_LOG)
        .unwrap_or_else(|| configured.trim().to_string())
}

pub fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(env: &Env, configured: &str) -> Result<(), LoggingError> {
    let filter = build_filter(&filter_directive(env, configured))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
