use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `chaispas` binary.
#[derive(Debug, Parser)]
#[command(name = "chaispas", version, about = "Can't decide? Let chaispas pick for you.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ./chaispas.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pick one of the given choices and record the decision
    Decide {
        /// At least two choices
        #[arg(required = true)]
        choices: Vec<String>,

        /// Override the configured reveal delay (milliseconds)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Show summary statistics over the decision log
    Stats,

    /// Show the most recent decisions, newest first
    History {
        /// How many to show (defaults to the configured timeline length)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Write the raw decision log as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace the decision log with a previously exported one
    Import {
        file: PathBuf,
    },

    /// Delete every recorded decision
    Clear,
}
