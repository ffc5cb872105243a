//! Index-aligned comparison of two texts.
//!
//! Line `i` of the old text is compared with line `i` of the new text and
//! nothing else. An inserted or deleted line therefore shifts the alignment
//! and every later line registers as changed. Callers that want an
//! edit-minimal result use [`compute_line_diff`](super::compute_line_diff).

use tracing::debug;

use super::line::DiffLine;

/// Compare `old_text` and `new_text` line by line at equal indices.
///
/// Texts are split on `\n`, so an empty text is one empty line and a
/// trailing newline yields a trailing empty line. A missing line compares
/// as the empty string: an old empty line against a new text that has
/// already ended is context, not a deletion.
///
/// When both sides have a line at `i` and they differ, the deletion is
/// emitted before the addition.
pub fn compute_positional_diff(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    let old_lines: Vec<&str> = old_text.split('\n').collect();
    let new_lines: Vec<&str> = new_text.split('\n').collect();
    let max_lines = old_lines.len().max(new_lines.len());

    let mut lines = Vec::with_capacity(max_lines);
    for i in 0..max_lines {
        let line_number = i + 1;
        let old_line = old_lines.get(i).copied();
        let new_line = new_lines.get(i).copied();

        if old_line.unwrap_or("") == new_line.unwrap_or("") {
            lines.push(DiffLine::context(
                old_line.or(new_line).unwrap_or(""),
                line_number,
                line_number,
            ));
            continue;
        }

        match (old_line, new_line) {
            (Some(o), None) => lines.push(DiffLine::deletion(o, line_number)),
            (None, Some(n)) => lines.push(DiffLine::addition(n, line_number)),
            (Some(o), Some(n)) => {
                lines.push(DiffLine::deletion(o, line_number));
                lines.push(DiffLine::addition(n, line_number));
            }
            // Both absent cannot happen below max_lines.
            (None, None) => {}
        }
    }

    debug!(
        old = old_lines.len(),
        new = new_lines.len(),
        count = lines.len(),
        "computed positional diff"
    );
    lines
}
