//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scaffold, test and run Grind75 practice problems
#[derive(Parser, Debug)]
#[command(name = "grind75")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// Enable diagnostic traces (same as GRIND75_DEBUG=1)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new problem solution from templates
    New {
        /// Problem number, e.g. 42
        #[arg(allow_hyphen_values = true)]
        problem_number: String,
        /// Problem name, e.g. "Binary Search"
        problem_name: String,
    },

    /// Run tests for a problem (or `all` for every problem)
    Test {
        /// Problem number, or `all`
        #[arg(allow_hyphen_values = true)]
        problem_number: String,
    },

    /// Show a problem's solution file
    Run {
        /// Problem number
        #[arg(allow_hyphen_values = true)]
        problem_number: String,
        /// Execute the solution with the toolchain instead
        #[arg(long)]
        exec: bool,
    },

    /// Write default templates into the template directory
    Init {
        /// Overwrite existing template files
        #[arg(short, long)]
        force: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}
