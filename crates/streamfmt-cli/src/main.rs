//! streamfmt CLI entry point.
//!
//! Provides command-line tools for working with stream formatter templates:
//! - `streamfmt render` - Render a template or definition against a context
//! - `streamfmt check` - Validate and lint templates
//! - `streamfmt properties` - List the documented properties
//! - `streamfmt presets` - List or print built-in presets

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_presets, run_properties, run_render, CheckArgs, PresetsArgs, PropertiesArgs,
    RenderArgs,
};
use tracing_subscriber::EnvFilter;

/// Stream formatter template tools.
#[derive(Debug, Parser)]
#[command(name = "streamfmt")]
#[command(about = "Stream formatter template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template or formatter definition against a context
    Render(RenderArgs),
    /// Check templates for syntax errors and lint warnings
    Check(CheckArgs),
    /// List the documented stream, provider and addon properties
    Properties(PropertiesArgs),
    /// List built-in presets, or print one as a definition
    Presets(PresetsArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` when it is set.
fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Check(args) => run_check(args),
        Commands::Properties(args) => run_properties(args),
        Commands::Presets(args) => run_presets(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
