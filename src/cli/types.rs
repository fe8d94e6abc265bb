//! CLI type definitions.
//!
//! Clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::{fix::FixArgs, init::InitArgs};

/// Top-level CLI.
#[derive(Parser)]
#[command(name = "greenloop")]
#[command(about = "AI-assisted TDD repair loop for Maven projects", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format.
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter .greenloop/config.yaml
    Init(InitArgs),

    /// Run the repair loop against one class until its tests pass
    Fix(FixArgs),
}
