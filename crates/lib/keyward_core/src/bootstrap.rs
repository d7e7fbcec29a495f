//! Bootstrap: seeding, resetting and inspecting a fresh store.
//!
//! Unlike authentication, nothing here swallows storage errors: a failed
//! seed is fatal to the bootstrap run and is surfaced to the caller.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::accounts::{AccountError, UserAccounts};
use crate::auth::password::PasswordHasher;
use crate::config::Environment;
use crate::directory::{DirectoryError, RoleStore, UserStore};
use crate::models::{NewUser, Principal, RoleRecord};
use crate::roles::ROLE_COUNT;
use crate::seed::{RoleSeed, SeedError, UserSeed, validate_roles, validate_users};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("seed validation failed: {0}")]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Storage(#[from] DirectoryError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("refusing to reset {0} in production")]
    ProductionGuard(&'static str),
}

/// What a seeding step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    /// The store already held records; nothing was written.
    Skipped { existing: u64 },
}

/// Store contents compared with the seed definitions.
#[derive(Debug, Clone)]
pub struct SeedStatistics {
    pub roles_initialized: bool,
    pub users_initialized: bool,
    pub stored_roles: Vec<RoleRecord>,
    pub stored_users: Vec<Principal>,
    pub seed_role_count: usize,
    pub system_role_count: usize,
    pub seed_user_count: usize,
}

/// Fails with [`BootstrapError::ProductionGuard`] in production.
pub fn ensure_reset_allowed(
    environment: Environment,
    what: &'static str,
) -> Result<(), BootstrapError> {
    if environment.is_production() {
        return Err(BootstrapError::ProductionGuard(what));
    }
    Ok(())
}

pub struct Bootstrap<S> {
    store: Arc<S>,
    accounts: UserAccounts,
    environment: Environment,
}

impl<S> Bootstrap<S>
where
    S: UserStore + RoleStore + 'static,
{
    pub fn new(store: Arc<S>, hasher: PasswordHasher, environment: Environment) -> Self {
        Self {
            accounts: UserAccounts::new(store.clone(), hasher),
            store,
            environment,
        }
    }

    /// Validate and insert roles, unless the store already has some.
    pub async fn seed_roles(&self, seeds: &[RoleSeed]) -> Result<SeedOutcome, BootstrapError> {
        validate_roles(seeds)?;

        let existing = self.store.count_roles().await?;
        if existing > 0 {
            info!(existing, "roles already present, skipping role seed");
            return Ok(SeedOutcome::Skipped { existing });
        }

        let records = seeds
            .iter()
            .map(|seed| RoleRecord {
                role_id: seed.role_id,
                name: seed.name.clone(),
                description: seed.description.clone(),
                is_system: seed.is_system,
                created_at: seed.created_at,
            })
            .collect();
        let inserted = self.store.insert_roles(records).await?;
        for role in &inserted {
            info!(role_id = role.role_id, name = %role.name, "role seeded");
        }
        Ok(SeedOutcome::Inserted(inserted.len()))
    }

    /// Validate and create users, unless the store already has some.
    /// Each password is hashed exactly once on the way in.
    ///
    /// Duplicates within `seeds` are rejected up front. Inserts are not
    /// transactional: if storage fails partway, the users created so far
    /// remain and later runs report `Skipped`; use [`Self::reset_users`].
    pub async fn seed_users(&self, seeds: &[UserSeed]) -> Result<SeedOutcome, BootstrapError> {
        validate_users(seeds)?;

        let existing = self.store.count_users().await?;
        if existing > 0 {
            info!(existing, "users already present, skipping user seed");
            return Ok(SeedOutcome::Skipped { existing });
        }

        for seed in seeds {
            let user = self.accounts.create(NewUser::from(seed)).await?;
            info!(username = %user.username, email = %user.email, "user seeded");
        }
        Ok(SeedOutcome::Inserted(seeds.len()))
    }

    pub async fn seed_all(
        &self,
        roles: &[RoleSeed],
        users: &[UserSeed],
    ) -> Result<(SeedOutcome, SeedOutcome), BootstrapError> {
        let roles = self.seed_roles(roles).await?;
        let users = self.seed_users(users).await?;
        Ok((roles, users))
    }

    pub async fn reset_roles(&self) -> Result<u64, BootstrapError> {
        ensure_reset_allowed(self.environment, "roles")?;
        let removed = self.store.clear_roles().await?;
        warn!(removed, "roles reset");
        Ok(removed)
    }

    pub async fn reset_users(&self) -> Result<u64, BootstrapError> {
        ensure_reset_allowed(self.environment, "users")?;
        let removed = self.store.clear_users().await?;
        warn!(removed, "users reset");
        Ok(removed)
    }

    /// Clear users and roles. Returns `(roles_removed, users_removed)`.
    pub async fn reset_all(&self) -> Result<(u64, u64), BootstrapError> {
        ensure_reset_allowed(self.environment, "all data")?;
        let roles = self.reset_roles().await?;
        let users = self.reset_users().await?;
        Ok((roles, users))
    }

    pub async fn statistics(
        &self,
        role_seeds: &[RoleSeed],
        user_seeds: &[UserSeed],
    ) -> Result<SeedStatistics, BootstrapError> {
        let stored_roles = self.store.list_roles().await?;
        let stored_users = self.store.list_users().await?;
        Ok(SeedStatistics {
            roles_initialized: stored_roles.len() >= ROLE_COUNT,
            users_initialized: !stored_users.is_empty(),
            stored_roles,
            stored_users,
            seed_role_count: role_seeds.len(),
            system_role_count: role_seeds.iter().filter(|seed| seed.is_system).count(),
            seed_user_count: user_seeds.len(),
        })
    }
}
