use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    version,
    about = "Local-first markdown note manager with tags, reminders and revision history"
)]
pub struct Cli {
    /// Path to the data directory
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Editor command used when composing content interactively
    #[clap(long)]
    pub editor: Option<String>,

    /// Subcommands for the memostash application
    #[clap(subcommand)]
    pub command: Commands,
}
