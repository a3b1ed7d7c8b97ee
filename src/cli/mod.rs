//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Firmware FSM extractor CLI
#[derive(Parser, Debug)]
#[command(name = "fsm-viz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "FSM_VIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the state machine and render it with the layout tool
    Render {
        /// Source file containing the dispatch construct
        #[arg(default_value = "dcc_firmware.pde")]
        input: PathBuf,

        /// Graph description output path (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format passed to the layout tool (overrides config)
        #[arg(long)]
        format: Option<String>,

        /// Only write the graph description
        #[arg(long)]
        no_image: bool,
    },

    /// Extract the state machine and print it
    Show {
        /// Source file containing the dispatch construct
        #[arg(default_value = "dcc_firmware.pde")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "dot")]
        format: OutputFormat,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// DOT format (Graphviz)
    Dot,
    /// JSON output
    Json,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub async fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Render {
            input,
            output,
            format,
            no_image,
        } => commands::render::execute(input, output, format, !no_image, &config).await,
        Commands::Show { input, format } => commands::show::execute(input, format, &config).await,
    }
}
