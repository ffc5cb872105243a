//! Shared styling utilities for the CLI.

use console::Style;

use mergeview_core::diff::{DiffLine, DiffLineKind};

/// Create a success-styled string (green with checkmark).
pub fn success(msg: &str) -> String {
    let style = Style::new().green();
    format!("{} {}", style.apply_to("✓"), msg)
}

/// Create a warning-styled string (yellow).
pub fn warn(msg: &str) -> String {
    let style = Style::new().yellow();
    format!("{} {}", style.apply_to("⚠"), msg)
}

/// Create a header-styled string (bold, white).
pub fn header(msg: &str) -> String {
    let style = Style::new().bold();
    style.apply_to(msg).to_string()
}

/// Create a dim-styled string.
pub fn dim(msg: &str) -> String {
    let style = Style::new().dim();
    style.apply_to(msg).to_string()
}

fn gutter(number: Option<usize>) -> String {
    number
        .map(|n| format!("{:>5}", n))
        .unwrap_or_else(|| " ".repeat(5))
}

/// Format one diff row: optional old/new gutters, marker, content.
pub fn diff_line(line: &DiffLine, line_numbers: bool) -> String {
    let style = match line.kind() {
        DiffLineKind::Addition => Style::new().green(),
        DiffLineKind::Deletion => Style::new().red(),
        DiffLineKind::Header => Style::new().cyan(),
        DiffLineKind::Context => Style::new(),
    };

    let body = match line.kind() {
        DiffLineKind::Header => line.content().to_string(),
        kind => format!("{}{}", kind.marker(), line.content()),
    };

    if line_numbers {
        let gutters = format!(
            "{} {} │",
            gutter(line.old_line_number()),
            gutter(line.new_line_number())
        );
        format!("{} {}", dim(&gutters), style.apply_to(body))
    } else {
        style.apply_to(body).to_string()
    }
}

/// A fixed-width text progress bar.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let style = if filled == width {
        Style::new().green()
    } else {
        Style::new().yellow()
    };
    format!(
        "[{}{}] {:>5.1}%",
        style.apply_to("█".repeat(filled)),
        " ".repeat(width - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_line_plain() {
        console::set_colors_enabled(false);
        assert_eq!(diff_line(&DiffLine::addition("x", 3), false), "+x");
        assert_eq!(diff_line(&DiffLine::header("@@ -1 +1 @@"), false), "@@ -1 +1 @@");
        assert_eq!(
            diff_line(&DiffLine::context("same", 2, 4), true),
            "    2     4 │  same"
        );
    }

    #[test]
    fn test_progress_bar_bounds() {
        console::set_colors_enabled(false);
        assert_eq!(progress_bar(0.0, 4), "[    ]   0.0%");
        assert_eq!(progress_bar(100.0, 4), "[████] 100.0%");
    }
}
