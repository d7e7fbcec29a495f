//! Subcommand implementations.
//!
//! Seed files are validated and production guards checked before any
//! database connection is opened.

use std::path::Path;
use std::sync::Arc;

use keyward_core::auth::PasswordHasher;
use keyward_core::bootstrap::{Bootstrap, SeedOutcome, ensure_reset_allowed};
use keyward_core::config::Environment;
use keyward_core::directory::PgDirectory;
use keyward_core::seed::{
    RoleSeed, UserSeed, role_seed_data, user_seed_data, validate_roles, validate_users,
};
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;

use crate::Result;

/// Built-in users, or the users listed in `path`.
pub fn load_user_seeds(path: Option<&Path>) -> Result<Vec<UserSeed>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(user_seed_data()),
    }
}

pub async fn seed(database_url: &str, users: Option<&Path>) -> Result<()> {
    let (roles, users) = checked_seeds(users)?;
    let bootstrap = connect(database_url, Environment::from_env()).await?;

    let (role_outcome, user_outcome) = bootstrap.seed_all(&roles, &users).await?;
    report("roles", role_outcome);
    report("users", user_outcome);
    Ok(())
}

pub async fn reset(database_url: &str, users: Option<&Path>) -> Result<()> {
    let environment = Environment::from_env();
    ensure_reset_allowed(environment, "all data")?;
    let (roles, users) = checked_seeds(users)?;
    let bootstrap = connect(database_url, environment).await?;

    let (roles_removed, users_removed) = bootstrap.reset_all().await?;
    warn!("removed {roles_removed} roles and {users_removed} users");

    let (role_outcome, user_outcome) = bootstrap.seed_all(&roles, &users).await?;
    report("roles", role_outcome);
    report("users", user_outcome);
    Ok(())
}

pub async fn status(database_url: &str) -> Result<()> {
    let bootstrap = connect(database_url, Environment::from_env()).await?;
    let stats = bootstrap
        .statistics(&role_seed_data(), &user_seed_data())
        .await?;

    info!(
        "roles: {} stored, {} defined ({} system), initialized: {}",
        stats.stored_roles.len(),
        stats.seed_role_count,
        stats.system_role_count,
        stats.roles_initialized
    );
    for role in &stats.stored_roles {
        info!("  {} {} - {}", role.role_id, role.name, role.description);
    }

    info!(
        "users: {} stored, {} defined, initialized: {}",
        stats.stored_users.len(),
        stats.seed_user_count,
        stats.users_initialized
    );
    for user in &stats.stored_users {
        let roles: Vec<String> = user.roles.iter().map(|r| r.id().to_string()).collect();
        info!(
            "  {} <{}> roles [{}]{}",
            user.username,
            user.email,
            roles.join(","),
            if user.disabled { " (disabled)" } else { "" }
        );
    }
    Ok(())
}

fn checked_seeds(users: Option<&Path>) -> Result<(Vec<RoleSeed>, Vec<UserSeed>)> {
    let roles = role_seed_data();
    let users = load_user_seeds(users)?;
    validate_roles(&roles)?;
    validate_users(&users)?;
    Ok((roles, users))
}

async fn connect(database_url: &str, environment: Environment) -> Result<Bootstrap<PgDirectory>> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await?;
    keyward_core::migrate::migrate(&pool).await?;
    Ok(Bootstrap::new(
        Arc::new(PgDirectory::new(pool)),
        PasswordHasher::new(),
        environment,
    ))
}

fn report(what: &str, outcome: SeedOutcome) {
    match outcome {
        SeedOutcome::Inserted(n) => info!("seeded {n} {what}"),
        SeedOutcome::Skipped { existing } => {
            info!("{what} already initialized ({existing} present), skipped")
        }
    }
}
