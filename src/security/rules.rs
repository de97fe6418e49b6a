//! Redaction rule table.
//!
//! Three built-in rules cover email addresses, credential assignments and
//! `sk-` style API keys. Additional rules can be loaded from a TOML file:
//!
//! ```toml
//! [[rules]]
//! id = "aws-access-key"
//! description = "AWS access key id"
//! pattern = "AKIA[0-9A-Z]{16}"
//! replacement = "[AWS_KEY]"
//! ```

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

/// Replacement used by file rules that don't name one.
const DEFAULT_REPLACEMENT: &str = "[REDACTED]";

/// A single pattern → replacement rule with a pre-compiled regex.
#[derive(Debug, Clone)]
pub struct RedactionRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Pre-compiled pattern.
    pub compiled_regex: Regex,
    /// Replacement text; `$1`-style group references are expanded.
    pub replacement: String,
}

impl RedactionRule {
    /// Compile a rule from its parts.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            id: id.into(),
            description: description.into(),
            compiled_regex: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Apply the rule to one line, returning the new text and the number of hits.
    pub fn apply(&self, line: &str) -> (String, usize) {
        let hits = self.compiled_regex.find_iter(line).count();
        if hits == 0 {
            return (line.to_string(), 0);
        }
        let replaced = self
            .compiled_regex
            .replace_all(line, self.replacement.as_str())
            .into_owned();
        (replaced, hits)
    }
}

static BUILTIN_RULES: LazyLock<Vec<RedactionRule>> = LazyLock::new(|| {
    [
        (
            "email",
            "Email address",
            r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            "[EMAIL]",
        ),
        (
            "credential-assignment",
            "Password, token, key or secret assigned a long base64-like value",
            r#"(?i)(password|token|key|secret)\s*[:=]\s*["']?[a-zA-Z0-9+/]{20,}["']?"#,
            "${1}: [REDACTED]",
        ),
        (
            "api-key",
            "sk- prefixed API key",
            r"sk-[a-zA-Z0-9]{20,}",
            "[API_KEY]",
        ),
    ]
    .into_iter()
    .map(|(id, description, pattern, replacement)| {
        RedactionRule::new(id, description, pattern, replacement)
            .expect("built-in redaction pattern should compile")
    })
    .collect()
});

/// The built-in rules, in the order they are applied.
pub fn default_rules() -> Vec<RedactionRule> {
    BUILTIN_RULES.clone()
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    id: String,
    #[serde(default)]
    description: String,
    pattern: String,
    #[serde(default)]
    replacement: Option<String>,
}

/// Load additional rules from a TOML file.
///
/// Rules whose pattern fails to compile are skipped with a warning.
pub fn load_rules_from_file(path: &Path) -> Result<Vec<RedactionRule>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read rules file: {e}"))?;
    parse_rules(&content)
}

fn parse_rules(content: &str) -> Result<Vec<RedactionRule>, String> {
    let file: RulesFile =
        toml::from_str(content).map_err(|e| format!("failed to parse rules file: {e}"))?;

    Ok(file
        .rules
        .into_iter()
        .filter_map(|entry| {
            let replacement = entry
                .replacement
                .unwrap_or_else(|| DEFAULT_REPLACEMENT.to_string());
            match RedactionRule::new(&entry.id, entry.description, &entry.pattern, replacement) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!(rule = %entry.id, "skipping redaction rule: invalid regex: {e}");
                    None
                }
            }
        })
        .collect())
}
