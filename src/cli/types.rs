//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "curriculum")]
#[command(about = "Evaluate a behavior curriculum and suggest the next trainer state", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Read settings from this YAML file instead of the default locations
    #[arg(long, global = true, env = "CURRICULUM_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the curriculum against a session
    Run(RunArgs),

    /// Print the curriculum package version
    Version,

    /// Print the version of the curriculum definition model
    DslVersion,
}
