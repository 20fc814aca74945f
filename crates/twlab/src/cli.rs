//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use twlab_core::config::consts::CONFIG_FILE_NAME;
use twlab_core::env::ENVIRONMENT_VAR;

#[derive(Parser)]
#[command(name = "twlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file, relative to the content root
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Directory that relative paths are resolved against (default: cwd)
    #[arg(long, global = true, env = "TWLAB_CONTENT_ROOT")]
    pub content_root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download tailwindcss into the local cache
    Install {
        /// Version to install (e.g., "4.1.18")
        #[arg(long)]
        version: Option<String>,
    },

    /// Show where tailwindcss is cached and whether it is installed
    Status {
        #[arg(long)]
        version: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run tailwindcss in watch mode until interrupted
    Watch {
        #[arg(long)]
        version: Option<String>,

        /// Input stylesheet
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Generated stylesheet
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Host environment name; watch mode only runs in "Development"
        #[arg(long, env = ENVIRONMENT_VAR)]
        environment: Option<String>,

        /// Arguments to pass to tailwindcss (after --)
        #[arg(last = true, allow_hyphen_values = true)]
        extra_args: Vec<String>,
    },
}
