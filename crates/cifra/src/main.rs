//! Cifra CLI - Chord sheet post-processor.
//!
//! Provides commands for:
//! - `process`: Post-process a rendered document (chord highlighting and
//!   tablature rendering)
//! - `config show` / `config set`: Inspect and edit settings

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigCommand, ProcessArgs};
use output::Output;

/// Cifra - Chord sheet post-processor.
#[derive(Parser)]
#[command(name = "cifra", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post-process a rendered document.
    Process(ProcessArgs),
    /// Show or edit settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Config(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
