//! Three-way merge and conflict detection.
//!
//! Uses `diffy` to merge a base with the current ("ours") and incoming
//! ("theirs") revisions. A clean merge yields the merged text; otherwise the
//! diff3-style marked output is split into conflict sections.

use diffy::{ConflictStyle, MergeOptions};
use tracing::{debug, info, warn};

use super::markers::parse_conflict_markers;
use super::model::ConflictFile;

/// Result of a three-way merge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both sides merged without overlap.
    Clean(String),
    /// Overlapping edits; `marked_text` holds the conflict markers that
    /// `file`'s section line ranges refer to.
    Conflicted {
        file: ConflictFile,
        marked_text: String,
    },
}

/// Merge `current` and `incoming` against their common `base`.
pub fn three_way_merge(path: &str, base: &str, current: &str, incoming: &str) -> MergeOutcome {
    info!(path, "performing three-way merge");

    // Fast paths: one side unchanged, or both sides identical.
    if current == base || current == incoming {
        debug!(path, "current unchanged or identical to incoming, incoming wins cleanly");
        return MergeOutcome::Clean(incoming.to_string());
    }
    if incoming == base {
        debug!(path, "incoming unchanged, current wins cleanly");
        return MergeOutcome::Clean(current.to_string());
    }

    let mut options = MergeOptions::new();
    options.set_conflict_style(ConflictStyle::Diff3);

    match options.merge(base, current, incoming) {
        Ok(merged) => {
            debug!(path, "clean merge");
            MergeOutcome::Clean(merged)
        }
        Err(marked_text) => {
            let file = parse_conflict_markers(path, &marked_text);
            if file.conflicts().is_empty() {
                warn!(path, "merge reported conflicts but no markers were found");
            }
            info!(path, sections = file.conflicts().len(), "merge produced conflicts");
            MergeOutcome::Conflicted { file, marked_text }
        }
    }
}

/// The conflicted file for a three-way merge, or `None` if it merges cleanly.
pub fn detect_conflicts(
    path: &str,
    base: &str,
    current: &str,
    incoming: &str,
) -> Option<ConflictFile> {
    match three_way_merge(path, base, current, incoming) {
        MergeOutcome::Clean(_) => None,
        MergeOutcome::Conflicted { file, .. } if file.conflicts().is_empty() => None,
        MergeOutcome::Conflicted { file, .. } => Some(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_files() {
        let base = "line1\nline2\nline3\n";
        let outcome = three_way_merge("f", base, base, base);
        assert_eq!(outcome, MergeOutcome::Clean(base.to_string()));
    }

    #[test]
    fn test_only_current_changed() {
        let base = "line1\nline2\nline3\n";
        let current = "line1\nmodified\nline3\n";
        let outcome = three_way_merge("f", base, current, base);
        assert_eq!(outcome, MergeOutcome::Clean(current.to_string()));
    }

    #[test]
    fn test_only_incoming_changed() {
        let base = "line1\nline2\nline3\n";
        let incoming = "line1\nline2\nmodified\n";
        let outcome = three_way_merge("f", base, base, incoming);
        assert_eq!(outcome, MergeOutcome::Clean(incoming.to_string()));
    }

    #[test]
    fn test_non_overlapping_changes() {
        let base = "aaa\nbbb\nccc\nddd\neee\n";
        let current = "AAA\nbbb\nccc\nddd\neee\n";
        let incoming = "aaa\nbbb\nccc\nddd\nEEE\n";
        match three_way_merge("f", base, current, incoming) {
            MergeOutcome::Clean(merged) => {
                assert!(merged.contains("AAA"));
                assert!(merged.contains("EEE"));
            }
            other => panic!("expected clean merge, got {:?}", other),
        }
        assert!(detect_conflicts("f", base, current, incoming).is_none());
    }

    #[test]
    fn test_conflicting_changes() {
        let base = "line1\noriginal\nline3\n";
        let current = "line1\nours_version\nline3\n";
        let incoming = "line1\ntheirs_version\nline3\n";

        let outcome = three_way_merge("src/a.rs", base, current, incoming);
        let MergeOutcome::Conflicted { file, marked_text } = outcome else {
            panic!("expected conflicts");
        };
        assert!(marked_text.contains("<<<<<<<"));
        assert!(marked_text.contains(">>>>>>>"));
        assert_eq!(file.path(), "src/a.rs");
        assert_eq!(file.conflicts().len(), 1);

        let section = &file.conflicts()[0];
        assert_eq!(section.current_content, "ours_version");
        assert_eq!(section.incoming_content, "theirs_version");
        assert_eq!(section.base_content.as_deref(), Some("original"));
        assert_eq!(section.start_line, 2);
        assert!(section.end_line > section.start_line);
    }

    #[test]
    fn test_detect_conflicts_returns_unresolved_file() {
        let file = detect_conflicts("x", "a\n", "b\n", "c\n").unwrap();
        assert!(!file.is_resolved());
        assert_eq!(file.conflicts()[0].id, "conflict-1");
    }

    #[test]
    fn test_same_change_both_sides() {
        let outcome = three_way_merge("f", "old\n", "new\n", "new\n");
        assert_eq!(outcome, MergeOutcome::Clean("new\n".to_string()));
    }
}
