//! Command-line interface for tictactoe_api.

use clap::{Parser, Subcommand};

/// Tic-tac-toe REST API against a random-move computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_api")]
#[command(about = "Tic-tac-toe REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Port to bind to (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// SQLite database file (overrides DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,

        /// Public base URL for game locations (overrides HOST_ADDR)
        #[arg(long)]
        host_address: Option<String>,

        /// Keep games in memory instead of the database
        #[arg(long)]
        memory: bool,
    },

    /// Apply pending database migrations and exit
    Migrate {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// SQLite database file (overrides DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,
    },
}
