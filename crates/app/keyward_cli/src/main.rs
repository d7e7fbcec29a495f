// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _logger = logging::init()?;

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    match &args.command {
        Commands::Seed { users } => commands::seed(&args.database_url, users.as_deref()).await?,
        Commands::Reset { users } => commands::reset(&args.database_url, users.as_deref()).await?,
        Commands::Status => commands::status(&args.database_url).await?,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
