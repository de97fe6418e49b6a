//! Secret redaction for diff text.
//!
//! Only added lines (those starting with `+`, `+++` headers included) are
//! rewritten. Every other line passes through byte-identical and the line
//! count never changes. Rules run sequentially on each line, so once a
//! substring is replaced by an earlier rule later rules see the placeholder.

pub mod rules;

use std::collections::BTreeMap;

use rules::RedactionRule;

/// Per-rule replacement counts from a redaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionReport {
    /// Rule id → number of replacements.
    pub hits: BTreeMap<String, usize>,
    /// Number of added lines that changed.
    pub lines_changed: usize,
}

impl RedactionReport {
    pub fn total(&self) -> usize {
        self.hits.values().sum()
    }
}

/// Applies a rule table to the added lines of a diff.
#[derive(Debug, Clone)]
pub struct Redactor {
    rules: Vec<RedactionRule>,
}

impl Default for Redactor {
    fn default() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }
}

impl Redactor {
    /// Built-in rules followed by `extra`, in that order.
    pub fn with_extra_rules(extra: Vec<RedactionRule>) -> Self {
        let mut redactor = Self::default();
        redactor.rules.extend(extra);
        redactor
    }

    pub fn rules(&self) -> &[RedactionRule] {
        &self.rules
    }

    /// Redact a diff.
    pub fn redact(&self, diff: &str) -> String {
        self.redact_with_report(diff).0
    }

    /// Redact a diff and report how many substitutions each rule made.
    pub fn redact_with_report(&self, diff: &str) -> (String, RedactionReport) {
        let mut report = RedactionReport::default();

        let lines: Vec<String> = diff
            .split('\n')
            .map(|line| {
                if !line.starts_with('+') {
                    return line.to_string();
                }
                let mut current = line.to_string();
                for rule in &self.rules {
                    let (next, hits) = rule.apply(&current);
                    if hits > 0 {
                        *report.hits.entry(rule.id.clone()).or_default() += hits;
                        current = next;
                    }
                }
                if current != line {
                    report.lines_changed += 1;
                }
                current
            })
            .collect();

        (lines.join("\n"), report)
    }
}

/// Redact a diff with the built-in rules.
pub fn redact(diff: &str) -> String {
    Redactor::default().redact(diff)
}
