//! Bounded per-file summary of a unified diff.
//!
//! Each file section becomes a block `Changes in <file>:` followed by at
//! most `max_lines_per_file` raw lines of its diff. Lines stop being
//! accepted once either cap is reached; the next `diff --git` marker still
//! opens a fresh block.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DIFF_FILE_MARKER, MAX_CHANGED_LINES, MAX_LINES_PER_FILE, UNKNOWN_FILE};

/// Errors from the summarizer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no changes detected")]
    EmptyDiff,

    #[error("summary limit {0} must be at least 1")]
    ZeroLimit(&'static str),
}

/// Caps applied to every file block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLimits {
    /// Lines kept per file block.
    pub max_lines_per_file: usize,
    /// Added/removed lines counted per file block before input is dropped.
    pub max_changed_lines: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_lines_per_file: MAX_LINES_PER_FILE,
            max_changed_lines: MAX_CHANGED_LINES,
        }
    }
}

impl SummaryLimits {
    /// A zero cap would drop every block, so both caps must be positive.
    pub fn validate(&self) -> Result<(), SummaryError> {
        if self.max_lines_per_file == 0 {
            return Err(SummaryError::ZeroLimit("max_lines_per_file"));
        }
        if self.max_changed_lines == 0 {
            return Err(SummaryError::ZeroLimit("max_changed_lines"));
        }
        Ok(())
    }
}

/// Accumulates the lines of the file section currently being read.
#[derive(Default)]
struct FileBlock<'a> {
    file: &'a str,
    lines: Vec<&'a str>,
    changed: usize,
}

impl<'a> FileBlock<'a> {
    fn starting(file: &'a str) -> Self {
        Self {
            file,
            ..Self::default()
        }
    }

    fn push(&mut self, line: &'a str, limits: &SummaryLimits) {
        if self.lines.len() >= limits.max_lines_per_file
            || self.changed >= limits.max_changed_lines
        {
            return;
        }
        self.lines.push(line);
        if line.starts_with('+') || line.starts_with('-') {
            self.changed += 1;
        }
    }

    fn render(&self) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        Some(format!("Changes in {}:\n{}", self.file, self.lines.join("\n")))
    }
}

/// File name from a `diff --git a/x b/x` line: the text after the first ` b/`.
fn file_name_from_marker(line: &str) -> &str {
    line.split(" b/")
        .nth(1)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_FILE)
}

/// Summarize a diff with the default caps.
pub fn summarize(diff: &str) -> Result<String, SummaryError> {
    summarize_with(diff, &SummaryLimits::default())
}

/// Summarize a diff with explicit caps.
///
/// Input without any `diff --git` marker collapses into a single block
/// whose file name is empty.
pub fn summarize_with(diff: &str, limits: &SummaryLimits) -> Result<String, SummaryError> {
    if diff.trim().is_empty() {
        return Err(SummaryError::EmptyDiff);
    }
    limits.validate()?;

    let mut blocks: Vec<String> = Vec::new();
    let mut current = FileBlock::starting("");

    for line in diff.split('\n') {
        if line.starts_with(DIFF_FILE_MARKER) {
            blocks.extend(current.render());
            current = FileBlock::starting(file_name_from_marker(line));
        } else {
            current.push(line, limits);
        }
    }
    blocks.extend(current.render());

    tracing::debug!(files = blocks.len(), "diff summarized");
    Ok(blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_and_blank_input_fail() {
        assert_eq!(summarize(""), Err(SummaryError::EmptyDiff));
        assert_eq!(summarize("  \n\t\n"), Err(SummaryError::EmptyDiff));
    }

    #[test]
    fn single_file_block() {
        let diff = "diff --git a/x.ts b/x.ts\n+const secret = \"abcdefghijklmnopqrstuvwxyz123\";\n-old";
        let out = summarize(diff).unwrap();
        assert_eq!(
            out,
            "Changes in x.ts:\n+const secret = \"abcdefghijklmnopqrstuvwxyz123\";\n-old"
        );
    }

    #[test]
    fn trailing_newline_leaves_empty_last_line() {
        let out = summarize("diff --git a/x.ts b/x.ts\n-old\n").unwrap();
        assert_eq!(out, "Changes in x.ts:\n-old\n");
    }

    #[test]
    fn multiple_files_joined_by_blank_line() {
        let diff = "\
diff --git a/src/a.rs b/src/a.rs
index 111..222 100644
--- a/src/a.rs
+++ b/src/a.rs
@@ -1 +1 @@
-a
+b
diff --git a/src/b.rs b/src/b.rs
@@ -0,0 +1 @@
+c";
        let out = summarize(diff).unwrap();
        assert_eq!(
            out,
            "Changes in src/a.rs:\nindex 111..222 100644\n--- a/src/a.rs\n+++ b/src/a.rs\n@@ -1 +1 @@\n-a\n+b\n\nChanges in src/b.rs:\n@@ -0,0 +1 @@\n+c"
        );
    }

    #[test]
    fn block_is_capped_at_twenty_lines() {
        let mut diff = String::from("diff --git a/big.txt b/big.txt\n");
        for i in 0..50 {
            diff.push_str(&format!("+line {i}\n"));
        }
        let out = summarize(&diff).unwrap();
        let body: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(body.len(), 20);
        assert_eq!(body[19], "+line 19");
        assert!(!out.contains("+line 20"));
    }

    #[test]
    fn fresh_block_after_truncated_file() {
        let mut diff = String::from("diff --git a/big.rs b/big.rs\n");
        for i in 0..150 {
            diff.push_str(&format!("-removed {i}\n"));
        }
        diff.push_str("diff --git a/small.rs b/small.rs\n+only change");
        let out = summarize(&diff).unwrap();

        let blocks: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Changes in big.rs:\n"));
        assert_eq!(blocks[0].lines().count(), 21);
        assert_eq!(blocks[1], "Changes in small.rs:\n+only change");
    }

    #[test]
    fn changed_line_cap_binds_when_lower() {
        let limits = SummaryLimits {
            max_lines_per_file: 20,
            max_changed_lines: 2,
        };
        let diff = "diff --git a/f b/f\n context\n+a\n context\n-b\n+c\n context";
        let out = summarize_with(diff, &limits).unwrap();
        assert_eq!(out, "Changes in f:\n context\n+a\n context\n-b");
    }

    #[test]
    fn zero_caps_are_rejected() {
        let diff = "diff --git a/x b/x\n+y";
        for (limits, field) in [
            (
                SummaryLimits {
                    max_lines_per_file: 0,
                    max_changed_lines: 100,
                },
                "max_lines_per_file",
            ),
            (
                SummaryLimits {
                    max_lines_per_file: 20,
                    max_changed_lines: 0,
                },
                "max_changed_lines",
            ),
        ] {
            assert_eq!(summarize_with(diff, &limits), Err(SummaryError::ZeroLimit(field)));
        }
    }

    #[test]
    fn marker_without_b_segment_is_unknown_file() {
        let out = summarize("diff --git foo\n+x").unwrap();
        assert_eq!(out, "Changes in unknown file:\n+x");
    }

    #[test]
    fn marker_with_empty_b_segment_is_unknown_file() {
        let out = summarize("diff --git a/x b/\n+y").unwrap();
        assert_eq!(out, "Changes in unknown file:\n+y");
    }

    #[test]
    fn file_name_is_second_b_segment_only() {
        assert_eq!(file_name_from_marker("diff --git a/dir b/x b/dir b/x"), "x");
    }

    #[test]
    fn hunk_without_marker_has_empty_file_name() {
        let out = summarize("@@ -1 +1 @@\n-a\n+b").unwrap();
        assert_eq!(out, "Changes in :\n@@ -1 +1 @@\n-a\n+b");
    }

    #[test]
    fn file_with_no_body_is_skipped() {
        let diff = "diff --git a/empty b/empty\ndiff --git a/full b/full\n+x";
        let out = summarize(diff).unwrap();
        assert_eq!(out, "Changes in full:\n+x");
    }
}
