//! The renderable line record shared by every diff operation.

use serde::{Deserialize, Serialize};

/// What a diff row represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    Context,
    Addition,
    Deletion,
    Header,
}

impl DiffLineKind {
    /// The unified-diff marker for this kind.
    pub fn marker(&self) -> char {
        match self {
            Self::Context => ' ',
            Self::Addition => '+',
            Self::Deletion => '-',
            Self::Header => '@',
        }
    }
}

impl std::fmt::Display for DiffLineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Context => write!(f, "context"),
            Self::Addition => write!(f, "addition"),
            Self::Deletion => write!(f, "deletion"),
            Self::Header => write!(f, "header"),
        }
    }
}

/// One renderable row of a diff view.
///
/// Fields are private so that line numbers always agree with `kind`: build
/// records through the per-kind constructors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    kind: DiffLineKind,
    /// Line text with the diff marker stripped.
    content: String,
    old_line_number: Option<usize>,
    new_line_number: Option<usize>,
}

impl DiffLine {
    /// A hunk header; carries no line numbers.
    pub fn header(content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Header,
            content: content.into(),
            old_line_number: None,
            new_line_number: None,
        }
    }

    /// An unchanged line present on both sides.
    pub fn context(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: DiffLineKind::Context,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
        }
    }

    /// A line that only exists in the new revision.
    pub fn addition(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: DiffLineKind::Addition,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line),
        }
    }

    /// A line that only exists in the old revision.
    pub fn deletion(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: DiffLineKind::Deletion,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: None,
        }
    }

    pub fn kind(&self) -> DiffLineKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn old_line_number(&self) -> Option<usize> {
        self.old_line_number
    }

    pub fn new_line_number(&self) -> Option<usize> {
        self.new_line_number
    }
}

/// Added/removed line counts over a sequence of records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines
            .iter()
            .fold(Self::default(), |mut stats, line| {
                match line.kind {
                    DiffLineKind::Addition => stats.additions += 1,
                    DiffLineKind::Deletion => stats.deletions += 1,
                    DiffLineKind::Context | DiffLineKind::Header => {}
                }
                stats
            })
    }

    /// `true` when nothing was added or removed.
    pub fn is_unchanged(&self) -> bool {
        self.additions == 0 && self.deletions == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_respect_line_number_invariant() {
        let header = DiffLine::header("@@ -1 +1 @@");
        assert_eq!(header.old_line_number(), None);
        assert_eq!(header.new_line_number(), None);

        let context = DiffLine::context("same", 3, 4);
        assert_eq!(context.old_line_number(), Some(3));
        assert_eq!(context.new_line_number(), Some(4));

        let addition = DiffLine::addition("new", 7);
        assert_eq!(addition.old_line_number(), None);
        assert_eq!(addition.new_line_number(), Some(7));

        let deletion = DiffLine::deletion("old", 2);
        assert_eq!(deletion.old_line_number(), Some(2));
        assert_eq!(deletion.new_line_number(), None);
    }

    #[test]
    fn test_stats_count_only_changes() {
        let lines = vec![
            DiffLine::header("@@ -1,2 +1,2 @@"),
            DiffLine::context("a", 1, 1),
            DiffLine::deletion("b", 2),
            DiffLine::addition("c", 2),
            DiffLine::addition("d", 3),
        ];
        let stats = DiffStats::from_lines(&lines);
        assert_eq!(stats.additions, 2);
        assert_eq!(stats.deletions, 1);
        assert!(!stats.is_unchanged());
        assert!(DiffStats::from_lines(&[]).is_unchanged());
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let json = serde_json::to_value(DiffLine::addition("x", 5)).unwrap();
        assert_eq!(json["kind"], "addition");
        assert_eq!(json["newLineNumber"], 5);
        assert!(json["oldLineNumber"].is_null());
    }

    #[test]
    fn test_kind_markers() {
        assert_eq!(DiffLineKind::Addition.marker(), '+');
        assert_eq!(DiffLineKind::Deletion.marker(), '-');
        assert_eq!(DiffLineKind::Context.marker(), ' ');
        assert_eq!(DiffLineKind::Context.to_string(), "context");
    }
}
