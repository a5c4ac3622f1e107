//! CLI argument definitions for Pomelo.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pomelo",
    version,
    about = "An SBOM generator for Maven/Java projects",
    long_about = "Pomelo scans directory trees (e.g. extracted container \
                  images) for pom.xml files and reconstructs each project's \
                  effective dependency set without running Maven."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a directory tree for pom.xml files and emit packages
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Allow fetching parent POMs from the remote repository
        #[arg(long)]
        use_network: bool,

        /// Base URL of the remote Maven repository
        #[arg(long)]
        maven_url: Option<String>,

        /// Maximum parent-chain depth (0 means unbounded)
        #[arg(long)]
        max_parent_depth: Option<i32>,

        /// Path to a pomelo.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Path to a pomelo.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
