//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::import::ImportArgs;

#[derive(Parser)]
#[command(name = "issue-import")]
#[command(author, version, about = "Import issues from other project management tools")]
#[command(
    long_about = "Reads an export file from another project management tool and produces a normalized JSON result of issues, users, labels, and statuses ready for loading into the tracker."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an export file into the normalized issue format
    Import(ImportArgs),

    /// List available import sources
    Sources,
}
