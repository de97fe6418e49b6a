//! Length limits and format checks for text handed to a remote model.
//!
//! The summarizer does not enforce any of this on its own output; callers
//! run these checks before sending a summary anywhere (the CLI does so with
//! `--check`). Format checks that are only advisory log a warning instead
//! of failing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    MAX_API_KEY_LENGTH, MAX_COMMIT_MESSAGE_LENGTH, MAX_DIFF_LENGTH, MAX_MODEL_NAME_LENGTH,
    MAX_SANITIZED_INPUT_LENGTH,
};

/// Validation failures.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} cannot be empty")]
    Blank(&'static str),

    #[error("{what} is too long ({len} > {max})")]
    TooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("git diff contains potentially dangerous content")]
    DangerousContent,

    #[error("invalid API URL format: {0}")]
    InvalidUrl(String),

    #[error("API URL must use HTTP or HTTPS protocol, got '{0}'")]
    UnsupportedScheme(String),

    #[error("temperature must be between 0 and 2, got {0}")]
    TemperatureOutOfRange(f64),
}

static API_KEY_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[a-zA-Z0-9_-]{20,}$",
        r"^sk-[a-zA-Z0-9_-]{20,}$",
        r"^gsk_[a-zA-Z0-9_-]{20,}$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("API key shape should compile"))
    .collect()
});

static DANGEROUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)eval\s*\(",
        r"(?i)exec\s*\(",
        r"(?i)system\s*\(",
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)data:text/html",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("dangerous-content pattern should compile"))
    .collect()
});

static CONVENTIONAL_COMMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|chore|refactor|docs|test|perf|ci|build|style|revert)(\(.+\))?: .+")
        .expect("conventional commit pattern should compile")
});

/// Upper bounds applied to outbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConstraints {
    pub max_diff_length: usize,
    pub max_api_key_length: usize,
    pub max_commit_message_length: usize,
}

impl Default for ValidationConstraints {
    fn default() -> Self {
        Self {
            max_diff_length: MAX_DIFF_LENGTH,
            max_api_key_length: MAX_API_KEY_LENGTH,
            max_commit_message_length: MAX_COMMIT_MESSAGE_LENGTH,
        }
    }
}

fn check_length(what: &'static str, text: &str, max: usize) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { what, len, max });
    }
    Ok(())
}

impl ValidationConstraints {
    /// Reject missing, blank or oversized keys; warn on unfamiliar shapes.
    pub fn validate_api_key(&self, key: &str) -> Result<(), ValidationError> {
        if key.is_empty() {
            return Err(ValidationError::Missing("API key"));
        }
        if key.trim().is_empty() {
            return Err(ValidationError::Blank("API key"));
        }
        check_length("API key", key, self.max_api_key_length)?;
        if !looks_like_api_key(key) {
            tracing::warn!("API key format may be invalid");
        }
        Ok(())
    }

    /// Reject empty or oversized diffs and diffs carrying script-like content.
    pub fn validate_diff(&self, diff: &str) -> Result<(), ValidationError> {
        if diff.is_empty() {
            return Err(ValidationError::Missing("git diff"));
        }
        check_length("git diff", diff, self.max_diff_length)?;
        if DANGEROUS_PATTERNS.iter().any(|re| re.is_match(diff)) {
            return Err(ValidationError::DangerousContent);
        }
        Ok(())
    }

    /// Reject blank or oversized messages; warn when not a conventional commit.
    pub fn validate_commit_message(&self, message: &str) -> Result<(), ValidationError> {
        if message.is_empty() {
            return Err(ValidationError::Missing("commit message"));
        }
        if message.trim().is_empty() {
            return Err(ValidationError::Blank("commit message"));
        }
        check_length("commit message", message, self.max_commit_message_length)?;
        if !is_conventional_commit(message) {
            tracing::warn!("commit message does not follow conventional commit format");
        }
        Ok(())
    }

    /// Single-line commit message without quotes, capped to the configured length.
    pub fn sanitize_commit_message(&self, message: &str) -> String {
        message
            .trim()
            .chars()
            .filter(|c| !matches!(c, '"' | '\'' | '`' | '\\'))
            .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
            .take(self.max_commit_message_length)
            .collect()
    }
}

/// Whether `key` matches one of the familiar API key shapes.
pub fn looks_like_api_key(key: &str) -> bool {
    let key = key.trim();
    API_KEY_SHAPES.iter().any(|re| re.is_match(key))
}

/// Whether `message` starts with a conventional commit type.
pub fn is_conventional_commit(message: &str) -> bool {
    CONVENTIONAL_COMMIT.is_match(message.trim())
}

/// Trim, drop control characters (C0, DEL and C1) and cap the length.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|&c| !(c <= '\u{1F}' || ('\u{7F}'..='\u{9F}').contains(&c)))
        .take(MAX_SANITIZED_INPUT_LENGTH)
        .collect()
}

/// Provider endpoint must parse and use http or https.
pub fn validate_api_url(raw: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(raw).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::UnsupportedScheme(other.to_string())),
    }
}

pub fn validate_model(model: &str) -> Result<(), ValidationError> {
    if model.trim().is_empty() {
        return Err(ValidationError::Blank("model name"));
    }
    check_length("model name", model, MAX_MODEL_NAME_LENGTH)
}

pub fn validate_temperature(temperature: f64) -> Result<(), ValidationError> {
    if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
        return Err(ValidationError::TemperatureOutOfRange(temperature));
    }
    Ok(())
}

/// Validate whichever provider settings are present.
pub fn validate_provider(
    api_url: Option<&str>,
    model: Option<&str>,
    temperature: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(url) = api_url {
        validate_api_url(url)?;
    }
    if let Some(model) = model {
        validate_model(model)?;
    }
    if let Some(t) = temperature {
        validate_temperature(t)?;
    }
    Ok(())
}
