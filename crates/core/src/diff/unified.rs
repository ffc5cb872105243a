//! Parser for unified-diff text.
//!
//! This is a transliteration of unified-diff syntax into [`DiffLine`]
//! records, not a diff algorithm. Line numbers come from the most recent
//! hunk header and advance as body lines are consumed.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::line::DiffLine;

/// The numbers carried by an `@@ -a,b +c,d @@` line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: usize,
    /// Defaults to 1 when the header omits it.
    pub old_count: usize,
    pub new_start: usize,
    /// Defaults to 1 when the header omits it.
    pub new_count: usize,
}

fn hunk_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@")
            .expect("hunk header pattern is valid")
    })
}

/// Parse a hunk header line. Returns `None` if the line does not match or a
/// number does not fit in `usize`.
pub fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let caps = hunk_header_regex().captures(line)?;
    let number = |idx: usize| -> Option<usize> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };
    Some(HunkHeader {
        old_start: number(1)?,
        old_count: number(2)?,
        new_start: number(3)?,
        new_count: number(4)?,
    })
}

/// Lines of the current hunk body not yet consumed.
#[derive(Debug, Default)]
struct HunkBudget {
    old: usize,
    new: usize,
}

impl HunkBudget {
    fn inside(&self) -> bool {
        self.old > 0 || self.new > 0
    }
}

/// Parse unified-diff text into line records.
///
/// Both counters start at 1. A matching `@@` header resets them to the
/// header's start values; a non-matching one is still emitted as a header
/// but leaves the counters alone. `+`, `-` and ` ` lines become additions,
/// deletions and context. Everything else is dropped, including `---`/`+++`
/// file headers outside a hunk body and `\ No newline at end of file`.
pub fn parse_unified_diff(diff_text: &str) -> Vec<DiffLine> {
    debug!("parsing unified diff ({} bytes)", diff_text.len());

    let mut lines = Vec::new();
    let mut old_line_num: usize = 1;
    let mut new_line_num: usize = 1;
    let mut budget = HunkBudget::default();

    for raw in diff_text.split('\n') {
        if raw.starts_with("@@") {
            match parse_hunk_header(raw) {
                Some(header) => {
                    old_line_num = header.old_start;
                    new_line_num = header.new_start;
                    budget = HunkBudget {
                        old: header.old_count,
                        new: header.new_count,
                    };
                }
                None => {
                    warn!(line = raw, "unrecognised hunk header, keeping line numbers");
                    budget = HunkBudget::default();
                }
            }
            lines.push(DiffLine::header(raw));
            continue;
        }

        let is_file_header = raw.starts_with("---") || raw.starts_with("+++");
        if is_file_header && !budget.inside() {
            continue;
        }

        if let Some(content) = raw.strip_prefix('+') {
            lines.push(DiffLine::addition(content, new_line_num));
            new_line_num = new_line_num.saturating_add(1);
            budget.new = budget.new.saturating_sub(1);
        } else if let Some(content) = raw.strip_prefix('-') {
            lines.push(DiffLine::deletion(content, old_line_num));
            old_line_num = old_line_num.saturating_add(1);
            budget.old = budget.old.saturating_sub(1);
        } else if let Some(content) = raw.strip_prefix(' ') {
            lines.push(DiffLine::context(content, old_line_num, new_line_num));
            old_line_num = old_line_num.saturating_add(1);
            new_line_num = new_line_num.saturating_add(1);
            budget.old = budget.old.saturating_sub(1);
            budget.new = budget.new.saturating_sub(1);
        }
    }

    debug!(count = lines.len(), "parsed unified diff lines");
    lines
}
