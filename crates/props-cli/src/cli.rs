//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use props_core::SourceOrder;

/// props - Resolve layered .properties/.env configuration
#[derive(Parser, Debug)]
#[command(name = "props")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load resolver options from a TOML or JSON file
    #[arg(long, global = true, env = "PROPS_OPTIONS", value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Merge order of the files within one scope (lexicographic or listing)
    #[arg(long, global = true, value_name = "ORDER")]
    pub order: Option<SourceOrder>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Scope directories shared by the resolving commands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScopeArgs {
    /// Directories to scan, lowest precedence first (default: current directory)
    #[arg(value_name = "SCOPE")]
    pub scopes: Vec<PathBuf>,

    /// Do not overlay environment variables
    #[arg(long)]
    pub no_env: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the merged configuration
    ///
    /// Examples:
    ///   props resolve                  # Current directory plus environment
    ///   props resolve . library        # library/ overrides the root
    ///   props resolve --json --no-env  # Files only, as JSON
    Resolve {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Print secret-looking values instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },

    /// Print a single value
    Get {
        /// Key to look up
        key: String,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Value to print when the key is absent
        #[arg(short, long)]
        default: Option<String>,
    },

    /// List candidate source files and what happened to each
    Sources {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report which publishing credentials are available (never their values)
    Credentials {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
