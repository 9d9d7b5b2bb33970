//! Clap argument types for the chiptally binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "chiptally",
    version,
    about = "Chip movement tracker for live Texas Hold'em"
)]
pub struct ChiptallyCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive dealer session
    Table {
        /// SQLite database path (overrides configuration)
        #[arg(long)]
        db: Option<String>,

        /// Auto-advance delay in milliseconds (overrides configuration)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print lifetime table statistics
    Stats {
        /// SQLite database path (overrides configuration)
        #[arg(long)]
        db: Option<String>,
    },

    /// Print the resolved configuration with value sources
    Cfg,

    /// Clear the persisted table state (lifetime statistics survive)
    Reset {
        /// SQLite database path (overrides configuration)
        #[arg(long)]
        db: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
