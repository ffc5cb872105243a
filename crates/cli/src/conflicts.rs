//! Conflict management subcommands.
//!
//! The CLI is the host for a resolution session: it loads descriptors,
//! drives selection and resolution, and persists the changeset once the
//! engine signals that it can be finalized.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use dialoguer::{Editor, Select};
use tracing::info;

use mergeview_core::conflict::{
    three_way_merge, ConflictChangeset, ConflictSection, MergeOutcome, Resolution,
    ResolutionEvent, ResolutionSession,
};

use super::style;

const PROGRESS_WIDTH: usize = 30;

fn load(path: &Path) -> Result<ConflictChangeset> {
    ConflictChangeset::load_from_file(path)
        .with_context(|| format!("failed to load conflict descriptors from {}", path.display()))
}

fn resolution_label(section: &ConflictSection) -> String {
    section
        .resolution
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unresolved".to_string())
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

/// Show per-file resolution counts and overall progress.
pub fn run_status(descriptors: &Path) -> Result<()> {
    let changeset = load(descriptors)?;

    if changeset.is_empty() {
        println!();
        println!("{}", style::success("No conflicted files"));
        println!();
        return Ok(());
    }

    println!();
    println!(
        "{}",
        style::header(&format!("Conflicted Files ({})", changeset.files().len()))
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Resolved", "Sections", "Status"]);

    for file in changeset.files() {
        let status = if file.is_resolved() {
            "resolved"
        } else {
            "pending"
        };
        table.add_row(vec![
            Cell::new(file.path()),
            Cell::new(file.resolved_count()),
            Cell::new(file.conflicts().len()),
            Cell::new(status),
        ]);
    }

    println!("{}", table);
    println!();

    let progress = changeset.progress();
    println!(
        "  Progress : {} ({}/{})",
        style::progress_bar(progress.percent(), PROGRESS_WIDTH),
        progress.resolved_count,
        progress.total_count
    );
    if changeset.can_finalize() {
        println!("  {}", style::success("All conflicts resolved, ready to finalize"));
    } else {
        println!("  {}", style::warn("Unresolved conflicts remain"));
    }
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn print_section(section: &ConflictSection) {
    println!(
        "{}",
        style::header(&format!(
            "[{}] lines {}-{} ({})",
            section.id,
            section.start_line,
            section.end_line,
            resolution_label(section)
        ))
    );
    println!("{}", style::dim("--- current"));
    println!("{}", section.current_content);
    if let Some(base) = &section.base_content {
        println!("{}", style::dim("--- base"));
        println!("{}", base);
    }
    println!("{}", style::dim("--- incoming"));
    println!("{}", section.incoming_content);
}

/// Show every section of one file with its resolution preview.
pub fn run_show(descriptors: &Path, path: &str) -> Result<()> {
    let changeset = load(descriptors)?;
    let file = changeset
        .file(path)
        .with_context(|| format!("no conflicted file '{}' in {}", path, descriptors.display()))?;

    println!();
    println!(
        "{}",
        style::header(&format!(
            "{} ({}/{} resolved)",
            file.path(),
            file.resolved_count(),
            file.conflicts().len()
        ))
    );
    println!();

    for section in file.conflicts() {
        print_section(section);
        if section.is_resolved() {
            println!("{}", style::dim("--- preview"));
            println!("{}", section.render_resolution());
        }
        println!();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

enum Choice {
    Resolve(Resolution),
    Skip,
    Abort,
}

const CHOICES: &[&str] = &[
    "Use current",
    "Use incoming",
    "Use both",
    "Edit manually",
    "Skip",
    "Abort",
];

fn prompt_choice(section: &ConflictSection) -> Result<Choice> {
    let selection = Select::new()
        .with_prompt(format!("Resolve {}", section.id))
        .items(CHOICES)
        .default(0)
        .interact()
        .context("failed to read resolution choice")?;

    Ok(match selection {
        0 => Choice::Resolve(Resolution::UseCurrent),
        1 => Choice::Resolve(Resolution::UseIncoming),
        2 => Choice::Resolve(Resolution::UseBoth),
        3 => Choice::Resolve(Resolution::Manual),
        4 => Choice::Skip,
        _ => Choice::Abort,
    })
}

fn prompt_manual(section: &ConflictSection) -> Result<Option<String>> {
    let seed = section
        .manual_content
        .clone()
        .unwrap_or_else(|| format!("{}\n{}", section.current_content, section.incoming_content));
    Editor::new()
        .edit(&seed)
        .context("failed to run editor for manual resolution")
}

/// Walk every unresolved section interactively, then persist the result.
pub fn run_resolve(descriptors: &Path, output: Option<&Path>) -> Result<()> {
    let mut session = ResolutionSession::new(load(descriptors)?);
    let output = output.unwrap_or(descriptors);

    let paths: Vec<String> = session
        .changeset()
        .files()
        .iter()
        .filter(|f| !f.is_resolved())
        .map(|f| f.path().to_string())
        .collect();

    for path in &paths {
        session.select_file(path);
        let ids: Vec<String> = session
            .active_file()
            .map(|f| f.conflicts().iter().map(|s| s.id.clone()).collect())
            .unwrap_or_default();

        println!();
        println!("{}", style::header(&format!("== {}", path)));

        for id in &ids {
            session.select_section(id);
            let Some(section) = session.active_section().cloned() else {
                continue;
            };
            if section.is_resolved() {
                continue;
            }

            println!();
            print_section(&section);

            let event = match prompt_choice(&section)? {
                Choice::Resolve(Resolution::Manual) => {
                    let content = prompt_manual(&section)?;
                    session.resolve(id, Resolution::Manual, content)
                }
                Choice::Resolve(resolution) => session.resolve(id, resolution, None),
                Choice::Skip => continue,
                Choice::Abort => {
                    let event = session.cancel();
                    info!(event = event.label(), "resolution aborted");
                    println!("{}", style::warn("Aborted. No changes were written."));
                    return Ok(());
                }
            };

            if let Some(event) = event {
                info!(event = event.label(), path = path.as_str(), section = id.as_str());
            }
            if let Some(preview) = session.active_preview() {
                println!("{}", style::dim("--- preview"));
                println!("{}", preview);
            }
        }
    }

    println!();
    match session.request_finalize() {
        Some(ResolutionEvent::FinalizeRequested { changeset }) => {
            changeset
                .save_to_file(output)
                .context("failed to write resolved descriptors")?;
            println!(
                "{}",
                style::success(&format!(
                    "All conflicts resolved. Written to {}",
                    output.display()
                ))
            );
        }
        _ => {
            let progress = session.progress();
            session
                .changeset()
                .save_to_file(output)
                .context("failed to write partial resolution")?;
            println!(
                "{}",
                style::warn(&format!(
                    "{}/{} conflicts resolved. Progress saved to {}",
                    progress.resolved_count,
                    progress.total_count,
                    output.display()
                ))
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// detect
// ---------------------------------------------------------------------------

/// Three-way merge three files and print the conflict descriptor JSON.
pub fn run_detect(path: &str, base: &Path, current: &Path, incoming: &Path) -> Result<()> {
    let read = |p: &Path| {
        std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
    };
    let base_text = read(base)?;
    let current_text = read(current)?;
    let incoming_text = read(incoming)?;

    match three_way_merge(path, &base_text, &current_text, &incoming_text) {
        MergeOutcome::Clean(_) => {
            eprintln!("{}", style::success(&format!("{} merges cleanly", path)));
        }
        MergeOutcome::Conflicted { file, .. } => {
            let changeset = ConflictChangeset::new(vec![file]);
            let json = changeset
                .to_json()
                .context("failed to encode conflict descriptors")?;
            println!("{}", json);
        }
    }

    Ok(())
}
