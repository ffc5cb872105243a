//! mergeview command-line host.
//!
//! Renders diffs from files or unified-diff text and drives conflict
//! resolution sessions over JSON conflict descriptors. Also generates and
//! validates configuration files.

mod conflicts;
mod diff;
mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mergeview_core::config::AppConfig;
use mergeview_core::diff::DiffMode;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// mergeview command-line host.
#[derive(Parser, Debug)]
#[command(
    name = "mergeview",
    version,
    about = "Render diffs and resolve merge conflicts section by section"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override: trace, debug, info, warn, error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the diff between two files.
    Diff {
        /// Old revision.
        old: PathBuf,

        /// New revision.
        new: PathBuf,

        /// Diff algorithm; defaults to the configured render mode.
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Render a unified diff from a file, or stdin when omitted or `-`.
    Patch {
        file: Option<PathBuf>,
    },

    /// Print the display category of each file name.
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Inspect and resolve merge conflicts.
    Conflicts {
        #[command(subcommand)]
        action: ConflictsAction,
    },

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./mergeview.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,
}

#[derive(Subcommand, Debug)]
enum ConflictsAction {
    /// Per-file resolution counts and overall progress.
    Status {
        /// Conflict descriptor JSON file.
        descriptors: PathBuf,
    },
    /// Show every section of one conflicted file.
    Show {
        /// Conflict descriptor JSON file.
        descriptors: PathBuf,

        /// File path as recorded in the descriptors.
        path: String,
    },
    /// Resolve unresolved sections interactively.
    Resolve {
        /// Conflict descriptor JSON file.
        descriptors: PathBuf,

        /// Where to write the result; defaults to the input file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Three-way merge three revisions and print conflict descriptors.
    Detect {
        /// Path recorded in the descriptor.
        #[arg(long)]
        path: String,

        #[arg(long)]
        base: PathBuf,

        #[arg(long)]
        current: PathBuf,

        #[arg(long)]
        incoming: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Positional,
    Line,
}

impl From<ModeArg> for DiffMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Positional => DiffMode::Positional,
            ModeArg::Line => DiffMode::Line,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is needed before logging so `log.level` can seed the filter.
    // `validate` reports its own load errors, so fall back to defaults there.
    let config = match &cli.command {
        Commands::Init { .. } | Commands::Validate => Ok(AppConfig::default()),
        _ => load_config(cli.config.as_deref()),
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.log.level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match config.and_then(|config| run(cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Diff { old, new, mode } => {
            diff::run_diff(&config, &old, &new, mode.map(DiffMode::from))
        }
        Commands::Patch { file } => diff::run_patch(&config, file.as_deref()),
        Commands::Classify { names } => diff::run_classify(&config, &names),
        Commands::Conflicts { action } => cmd_conflicts(action),
        Commands::Init { output } => cmd_init(&output),
        Commands::Validate => cmd_validate(cli.config.as_deref()),
    }
}

fn cmd_conflicts(action: ConflictsAction) -> Result<()> {
    match action {
        ConflictsAction::Status { descriptors } => conflicts::run_status(&descriptors),
        ConflictsAction::Show { descriptors, path } => conflicts::run_show(&descriptors, &path),
        ConflictsAction::Resolve {
            descriptors,
            output,
        } => conflicts::run_resolve(&descriptors, output.as_deref()),
        ConflictsAction::Detect {
            path,
            base,
            current,
            incoming,
        } => conflicts::run_detect(&path, &base, &current, &incoming),
    }
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

/// An explicit `--config` must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load_and_validate(path).context("failed to load configuration file");
    }

    match AppConfig::default_path() {
        Some(path) if path.exists() => AppConfig::load_and_validate(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        _ => {
            debug!("no configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(AppConfig::default_path)
        .context("no --config given and no platform config directory available")
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"# mergeview configuration
# Every section is optional.

[log]
level = "warn"            # trace | debug | info | warn | error

[classify]
# Extra extensions (no leading dot) layered over the built-in tables.
code_extensions = []
document_extensions = []

[render]
mode = "positional"       # positional | line
line_numbers = true
"#;

fn cmd_init(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "file already exists: {}. Use a different path or remove the existing file.",
            output.display()
        );
    }

    std::fs::write(output, DEFAULT_CONFIG).context("failed to write config file")?;

    println!("{}", style::success(&format!("Default configuration written to {}", output.display())));
    println!();
    println!("Next steps:");
    println!("  1. Add any project-specific extensions under [classify]");
    println!(
        "  2. Validate with: mergeview validate --config {}",
        output.display()
    );

    Ok(())
}

fn cmd_validate(explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit)?;
    println!("Validating configuration: {}", path.display());
    println!();

    let config = AppConfig::load_from_file(&path).context("failed to parse configuration")?;
    println!("  [OK] TOML structure is valid");

    match config.validate() {
        Ok(()) => {
            println!("  [OK] All values are valid");
        }
        Err(e) => {
            println!("  [FAIL] Validation error: {}", e);
            anyhow::bail!("configuration validation failed");
        }
    }

    println!();
    println!("Configuration summary:");
    println!("  Log level       : {}", config.log.level);
    println!("  Render mode     : {}", config.render.mode);
    println!(
        "  Line numbers    : {}",
        if config.render.line_numbers { "on" } else { "off" }
    );
    println!(
        "  Code extensions : {}",
        list_or_none(&config.classify.code_extensions)
    );
    println!(
        "  Doc extensions  : {}",
        list_or_none(&config.classify.document_extensions)
    );
    println!();
    println!("Configuration is valid.");

    Ok(())
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(built-in only)".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.render.mode, DiffMode::Positional);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mergeview.toml");
        cmd_init(&path).unwrap();
        assert!(cmd_init(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_mode_arg_maps_to_diff_mode() {
        assert_eq!(DiffMode::from(ModeArg::Line), DiffMode::Line);
        assert_eq!(DiffMode::from(ModeArg::Positional), DiffMode::Positional);
    }

    #[test]
    fn test_cli_parses_conflicts_resolve() {
        let cli = Cli::parse_from(["mergeview", "conflicts", "resolve", "c.json", "-o", "out.json"]);
        match cli.command {
            Commands::Conflicts {
                action: ConflictsAction::Resolve { descriptors, output },
            } => {
                assert_eq!(descriptors, PathBuf::from("c.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
