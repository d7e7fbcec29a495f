use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keyward bootstrap CLI
#[derive(Parser, Debug)]
#[command(name = "keyward")]
#[command(about = "Seed, reset and inspect the Keyward user store", long_about = None)]
pub struct Cli {
    /// PostgreSQL connection URL.
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/keyward"
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed roles and the initial users into an empty store
    Seed {
        /// JSON file with user seeds (defaults to the built-in administrator)
        #[arg(long)]
        users: Option<PathBuf>,
    },

    /// Clear all roles and users, then seed again (refused in production)
    Reset {
        /// JSON file with user seeds (defaults to the built-in administrator)
        #[arg(long)]
        users: Option<PathBuf>,
    },

    /// Show what is stored compared with the seed definitions
    Status,

    /// Print the version
    Version,
}
