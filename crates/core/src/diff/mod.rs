//! Diff rendering: turning diff text or pairs of revisions into line records.
//!
//! The renderer is a set of pure functions:
//! 1. **Unified parsing** -- a one-pass reading of existing unified-diff text.
//! 2. **Positional diffing** -- index-by-index comparison of two texts.
//! 3. **Line diffing** -- an edit-minimal alternative backed by `diffy`.
//! 4. **Classification** -- picking a display category from a file name.
//!
//! None of these fail: malformed input degrades to partial output.

pub mod classify;
pub mod line;
pub mod line_diff;
pub mod positional;
pub mod unified;

use serde::{Deserialize, Serialize};

pub use classify::{classify_file, FileCategory, FileClassifier};
pub use line::{DiffLine, DiffLineKind, DiffStats};
pub use line_diff::compute_line_diff;
pub use positional::compute_positional_diff;
pub use unified::{parse_hunk_header, parse_unified_diff, HunkHeader};

/// Which algorithm to use when diffing two full texts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Index-aligned comparison; any insertion shifts every later line.
    #[default]
    Positional,
    /// Edit-minimal line diff.
    Line,
}

impl std::fmt::Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Line => write!(f, "line"),
        }
    }
}

/// Diff two texts with the chosen algorithm.
pub fn render_texts(mode: DiffMode, old_text: &str, new_text: &str) -> Vec<DiffLine> {
    match mode {
        DiffMode::Positional => compute_positional_diff(old_text, new_text),
        DiffMode::Line => compute_line_diff(old_text, new_text),
    }
}
