use keyward_core::bootstrap::BootstrapError;
use keyward_core::config::ConfigError;
use keyward_core::seed::SeedError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Json: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("Config: {}", .0)]
    Config(#[from] ConfigError),

    #[error("{}", .0)]
    Seed(#[from] SeedError),

    #[error("{}", .0)]
    Bootstrap(#[from] BootstrapError),

    #[error("Database: {}", .0)]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration: {}", .0)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
