//! Command-line argument definitions for the symlib CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the pipeline stage; the configuration
//! file and logging verbosity apply to every subcommand.

use clap::{Parser, Subcommand};

/// Command-line arguments for the symlib symbol library tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// The pipeline stage to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the file stem of every variant to render
    Plan {
        /// Path to the component catalog (TOML)
        #[arg(help = "Path to the component catalog")]
        catalog: String,

        /// Write the list to this file instead of standard output
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Extract rendered variants and build the symbol library
    Build {
        /// Path to the component catalog (TOML)
        #[arg(help = "Path to the component catalog")]
        catalog: String,

        /// Directory holding the rendered variant artwork
        #[arg(short, long)]
        input: String,

        /// Directory the per-variant symbol files are written to
        #[arg(short, long, default_value = "symbols")]
        output: String,

        /// Path of the combined library file
        #[arg(short, long, default_value = "symbols.svg")]
        library: String,
    },
}
