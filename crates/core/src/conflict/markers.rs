//! Parser for Git-style conflict markers.
//!
//! Recognises two-way blocks
//!
//! ```text
//! <<<<<<< ours
//! current lines
//! =======
//! incoming lines
//! >>>>>>> theirs
//! ```
//!
//! and diff3 blocks with a `||||||| base` part before the `=======`.

use tracing::{debug, warn};

use super::model::{ConflictFile, ConflictSection};

const CURRENT_MARKER: &str = "<<<<<<<";
const BASE_MARKER: &str = "|||||||";
const SEPARATOR: &str = "=======";
const INCOMING_MARKER: &str = ">>>>>>>";

/// `true` if `line` is `marker`, optionally followed by a space and a label.
fn is_marker(line: &str, marker: &str) -> bool {
    match line.strip_prefix(marker) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Part {
    Current,
    Base,
    Incoming,
}

#[derive(Debug)]
struct OpenBlock<'a> {
    start_line: usize,
    part: Part,
    current: Vec<&'a str>,
    base: Option<Vec<&'a str>>,
    incoming: Vec<&'a str>,
}

impl<'a> OpenBlock<'a> {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            part: Part::Current,
            current: Vec::new(),
            base: None,
            incoming: Vec::new(),
        }
    }

    fn push(&mut self, line: &'a str) {
        match self.part {
            Part::Current => self.current.push(line),
            Part::Base => self.base.get_or_insert_with(Vec::new).push(line),
            Part::Incoming => self.incoming.push(line),
        }
    }

    fn close(self, id: String, end_line: usize) -> ConflictSection {
        let mut section = ConflictSection::new(
            id,
            self.start_line,
            end_line,
            self.current.join("\n"),
            self.incoming.join("\n"),
        );
        section.base_content = self.base.map(|lines| lines.join("\n"));
        section
    }
}

/// Split conflict-marked `text` into a [`ConflictFile`].
///
/// Section ids are `conflict-1`, `conflict-2`, ... in file order, and
/// `start_line`/`end_line` are the 1-indexed lines of the opening and
/// closing markers. A block that is never closed is dropped; a marker
/// opening inside an open block abandons the earlier one.
pub fn parse_conflict_markers(path: &str, text: &str) -> ConflictFile {
    let mut sections = Vec::new();
    let mut open: Option<OpenBlock<'_>> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;

        if is_marker(raw, CURRENT_MARKER) {
            if let Some(stale) = open.take() {
                warn!(
                    path,
                    start_line = stale.start_line,
                    "conflict block reopened before it was closed, dropping it"
                );
            }
            open = Some(OpenBlock::new(line_no));
            continue;
        }

        let Some(block) = open.as_mut() else {
            continue;
        };

        if block.part == Part::Current && is_marker(raw, BASE_MARKER) {
            block.part = Part::Base;
        } else if block.part != Part::Incoming && raw == SEPARATOR {
            block.part = Part::Incoming;
        } else if block.part == Part::Incoming && is_marker(raw, INCOMING_MARKER) {
            if let Some(block) = open.take() {
                let id = format!("conflict-{}", sections.len() + 1);
                sections.push(block.close(id, line_no));
            }
        } else {
            block.push(raw);
        }
    }

    if let Some(stale) = open {
        warn!(
            path,
            start_line = stale.start_line,
            "unterminated conflict block, dropping it"
        );
    }

    debug!(path, count = sections.len(), "parsed conflict markers");
    ConflictFile::new(path, sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_way_block() {
        let text = "fn main() {\n<<<<<<< HEAD\n    run();\n=======\n    start();\n    wait();\n>>>>>>> feature\n}\n";
        let file = parse_conflict_markers("src/main.rs", text);
        assert_eq!(file.path(), "src/main.rs");
        assert_eq!(file.conflicts().len(), 1);

        let section = &file.conflicts()[0];
        assert_eq!(section.id, "conflict-1");
        assert_eq!(section.start_line, 2);
        assert_eq!(section.end_line, 7);
        assert_eq!(section.current_content, "    run();");
        assert_eq!(section.incoming_content, "    start();\n    wait();");
        assert_eq!(section.base_content, None);
        assert!(!file.is_resolved());
    }

    #[test]
    fn test_diff3_block_captures_base() {
        let text = "<<<<<<< ours\nX\n||||||| original\nb\n=======\nY\n>>>>>>> theirs\n";
        let file = parse_conflict_markers("a.txt", text);
        let section = &file.conflicts()[0];
        assert_eq!(section.current_content, "X");
        assert_eq!(section.base_content.as_deref(), Some("b"));
        assert_eq!(section.incoming_content, "Y");
        assert_eq!(section.end_line, 7);
    }

    #[test]
    fn test_multiple_blocks_get_sequential_ids() {
        let text = "<<<<<<<\na\n=======\nb\n>>>>>>>\nmid\n<<<<<<< HEAD\nc\n=======\nd\n>>>>>>> x\n";
        let file = parse_conflict_markers("f", text);
        let ids: Vec<_> = file.conflicts().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["conflict-1", "conflict-2"]);
        assert_eq!(file.conflicts()[1].start_line, 7);
    }

    #[test]
    fn test_empty_sides() {
        let text = "<<<<<<< HEAD\n=======\nadded\n>>>>>>> b\n";
        let file = parse_conflict_markers("f", text);
        assert_eq!(file.conflicts()[0].current_content, "");
        assert_eq!(file.conflicts()[0].incoming_content, "added");
    }

    #[test]
    fn test_lookalike_lines_are_content() {
        let text = "<<<<<<< HEAD\nTitle\n========\n=======\n>>>>>>>> not a marker\n>>>>>>> b\n";
        let file = parse_conflict_markers("README.md", text);
        let section = &file.conflicts()[0];
        assert_eq!(section.current_content, "Title\n========");
        assert_eq!(section.incoming_content, ">>>>>>>> not a marker");
    }

    #[test]
    fn test_unterminated_block_is_dropped() {
        let text = "<<<<<<< HEAD\na\n=======\nb\n";
        let file = parse_conflict_markers("f", text);
        assert!(file.conflicts().is_empty());
    }

    #[test]
    fn test_reopened_block_abandons_previous() {
        let text = "<<<<<<< HEAD\nlost\n<<<<<<< HEAD\nkept\n=======\nother\n>>>>>>> b\n";
        let file = parse_conflict_markers("f", text);
        assert_eq!(file.conflicts().len(), 1);
        assert_eq!(file.conflicts()[0].current_content, "kept");
        assert_eq!(file.conflicts()[0].start_line, 3);
    }

    #[test]
    fn test_no_markers() {
        let file = parse_conflict_markers("clean.rs", "fn main() {}\n");
        assert!(file.conflicts().is_empty());
        assert!(file.is_resolved());
    }

    #[test]
    fn test_crlf_input() {
        let text = "<<<<<<< HEAD\r\na\r\n=======\r\nb\r\n>>>>>>> x\r\n";
        let file = parse_conflict_markers("win.txt", text);
        assert_eq!(file.conflicts()[0].current_content, "a");
        assert_eq!(file.conflicts()[0].incoming_content, "b");
    }
}
