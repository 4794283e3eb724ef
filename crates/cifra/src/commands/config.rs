//! `cifra config` command implementation.
//!
//! The settings surface: `show` prints the effective configuration and
//! `set` validates one edit and immediately persists the full record.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use cifra_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Settings commands.
#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the effective settings.
    Show(ConfigArgs),
    /// Change one setting and save the configuration.
    Set(SetArgs),
}

/// Shared configuration location argument.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover cifra.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Arguments for `config set`.
#[derive(Args)]
pub(crate) struct SetArgs {
    /// Setting key (open_marker, close_marker, highlight_color, bold,
    /// font_size, tab_language).
    key: String,

    /// New value. An empty close_marker restores derivation from
    /// open_marker.
    value: String,

    /// Path to configuration file (default: auto-discover cifra.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConfigCommand {
    /// Execute the config command.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid keys or values, or when persisting
    /// the record fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Show(args) => show(args),
            Self::Set(args) => set(args),
        }
    }
}

fn show(args: ConfigArgs) -> Result<(), CliError> {
    let config = Config::load(args.config.as_deref());

    let close = match &config.close_marker {
        Some(marker) => format!("{marker:?}"),
        None => format!("{:?} (derived)", config.close_marker()),
    };

    let mut stdout = std::io::stdout().lock();
    if let Some(path) = &config.config_path {
        writeln!(stdout, "# {}", path.display())?;
    }
    writeln!(stdout, "open_marker = {:?}", config.open_marker)?;
    writeln!(stdout, "close_marker = {close}")?;
    writeln!(stdout, "highlight_color = {:?}", config.highlight_color)?;
    writeln!(stdout, "bold = {}", config.bold)?;
    writeln!(stdout, "font_size = {}", config.font_size)?;
    writeln!(stdout, "tab_language = {:?}", config.tab_language)?;
    Ok(())
}

fn set(args: SetArgs) -> Result<(), CliError> {
    let output = Output::new();
    let mut config = Config::load(args.config.as_deref());

    config.set(&args.key, &args.value)?;

    // Persist the full record where it was loaded from, or create a
    // cifra.toml in the current directory on first use.
    let path = config
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("cifra.toml"));
    config.save(&path)?;

    output.success(&format!("Saved {} to {}", args.key, path.display()));
    Ok(())
}
