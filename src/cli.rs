use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::utils::version;

#[derive(Parser)]
#[command(author, version = version(), about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    /// Path to config file (default: `$XDG_CONFIG_HOME/lightbox/config.json`).
    ///
    /// This can also be set with the `LIGHTBOX_CONFIG` environment variable. If both are set,
    /// the command line argument takes precedence.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Validate the config file.
    Validate,
    /// Replay a gesture script against the overlay and print the host callbacks.
    Replay {
        /// Path to the JSON script.
        script: PathBuf,
        /// Print the full replay, including the final state and frame, as JSON.
        #[arg(short, long)]
        json: bool,
    },
    /// Generate shell completions.
    Completions { shell: Shell },
}
