//! Diff rendering subcommands.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use mergeview_core::config::AppConfig;
use mergeview_core::diff::{
    parse_unified_diff, render_texts, DiffLine, DiffMode, DiffStats, FileClassifier,
};

use super::style;

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_lines(lines: &[DiffLine], line_numbers: bool) {
    for line in lines {
        println!("{}", style::diff_line(line, line_numbers));
    }

    let stats = DiffStats::from_lines(lines);
    println!();
    if stats.is_unchanged() {
        println!("{}", style::dim("no changes"));
    } else {
        println!(
            "{}",
            style::dim(&format!(
                "{} addition(s), {} deletion(s)",
                stats.additions, stats.deletions
            ))
        );
    }
}

/// Render the diff between two files.
pub fn run_diff(config: &AppConfig, old: &Path, new: &Path, mode: Option<DiffMode>) -> Result<()> {
    let old_text = read_text(old)?;
    let new_text = read_text(new)?;
    let mode = mode.unwrap_or(config.render.mode);

    let classifier = FileClassifier::from_config(&config.classify);
    let category = classifier.classify(&new.to_string_lossy());

    println!(
        "{}",
        style::header(&format!(
            "{} → {} ({}, {} diff)",
            old.display(),
            new.display(),
            category,
            mode
        ))
    );
    println!();

    let lines = render_texts(mode, &old_text, &new_text);
    print_lines(&lines, config.render.line_numbers);
    Ok(())
}

/// Render a unified diff read from `path`, or stdin when `path` is `-` or
/// absent.
pub fn run_patch(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let text = match path {
        Some(p) if p != Path::new("-") => read_text(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read diff from stdin")?;
            buf
        }
    };

    let lines = parse_unified_diff(&text);
    print_lines(&lines, config.render.line_numbers);
    Ok(())
}

/// Print the display category of each file name.
pub fn run_classify(config: &AppConfig, names: &[String]) -> Result<()> {
    let classifier = FileClassifier::from_config(&config.classify);
    for name in names {
        println!("{}\t{}", classifier.classify(name), name);
    }
    Ok(())
}
