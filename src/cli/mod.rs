//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod animate;
pub mod chart;
pub mod config;

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

/// Hexagonal star charts for any place and time
#[derive(Parser)]
#[command(name = "star-hex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw a star chart for a location and local time
    Chart(chart::ChartArgs),

    /// Animate the sky over the following hours
    Animate(animate::AnimateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Rewrite the two-letter `-ms` flag to `--max_stars`
///
/// clap short flags are a single character, so `-ms` would otherwise parse
/// as `-m -s`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-ms") => OsString::from("--max_stars"),
            Some(s) if s.starts_with("-ms=") => OsString::from(format!("--max_stars={}", &s[4..])),
            _ => arg,
        })
        .collect()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub fn run() -> crate::error::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging();

    match cli.command {
        Commands::Chart(args) => chart::run(args),
        Commands::Animate(args) => animate::run(args),
        Commands::Config(args) => config::run(args),
    }
}
