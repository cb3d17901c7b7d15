use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "setup-app",
    version,
    about = "Clone and install the application once per persistent home directory (container first-run bootstrap)."
)]
pub(crate) struct Cli {
    /// Check the marker and log what a first run would do, without changing anything
    #[arg(long, global = true)]
    pub(crate) dry_run: bool,

    /// Load additional environment variables from a dotenv file (existing variables win)
    #[arg(long = "env-file", global = true, value_name = "PATH")]
    pub(crate) env_file: Option<PathBuf>,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum, global = true)]
    pub(crate) color: Option<setup_app::ColorMode>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Run the first-run bootstrap (default)
    Run,
    /// Report setup state without changing anything
    Status {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Run diagnostics to check environment and configuration
    Doctor,
}
