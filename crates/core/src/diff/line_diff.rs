//! Edit-minimal line diff backed by `diffy`.
//!
//! `diffy` produces a unified patch with enough context to cover the whole
//! file; the patch text is then read back through
//! [`parse_unified_diff`](super::parse_unified_diff), so the records follow
//! the same rules as any other unified diff.

use diffy::DiffOptions;
use tracing::debug;

use super::line::DiffLine;
use super::unified::parse_unified_diff;

/// Diff two texts with a minimal line-level edit script.
///
/// Identical inputs produce no records (a patch without hunks).
pub fn compute_line_diff(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    let context_len = old_text.lines().count().max(new_text.lines().count());
    let mut options = DiffOptions::new();
    options.set_context_len(context_len);
    let patch = options.create_patch(old_text, new_text);

    let lines = parse_unified_diff(&patch.to_string());
    debug!(count = lines.len(), "computed line diff");
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::line::{DiffLineKind, DiffStats};

    #[test]
    fn test_insertion_does_not_shift_alignment() {
        let lines = compute_line_diff("one\ntwo\nthree\n", "zero\none\ntwo\nthree\n");
        let body: Vec<_> = lines
            .iter()
            .filter(|l| l.kind() != DiffLineKind::Header)
            .cloned()
            .collect();
        assert_eq!(
            body,
            vec![
                DiffLine::addition("zero", 1),
                DiffLine::context("one", 1, 2),
                DiffLine::context("two", 2, 3),
                DiffLine::context("three", 3, 4),
            ]
        );
    }

    #[test]
    fn test_full_context_is_kept() {
        let old = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj\n";
        let new = "a\nb\nc\nd\ne\nf\ng\nh\ni\nJ\n";
        let lines = compute_line_diff(old, new);
        let headers = lines
            .iter()
            .filter(|l| l.kind() == DiffLineKind::Header)
            .count();
        assert_eq!(headers, 1);
        assert_eq!(lines[1], DiffLine::context("a", 1, 1));
        let stats = DiffStats::from_lines(&lines);
        assert_eq!(stats.additions, 1);
        assert_eq!(stats.deletions, 1);
    }

    #[test]
    fn test_identical_texts_have_no_changes() {
        let lines = compute_line_diff("same\n", "same\n");
        assert!(DiffStats::from_lines(&lines).is_unchanged());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(DiffStats::from_lines(&compute_line_diff("", "")).is_unchanged());
        let created = compute_line_diff("", "x\ny\n");
        assert_eq!(DiffStats::from_lines(&created).additions, 2);
    }
}
