//! PostgreSQL directory backed by the `users` and `roles` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::{DirectoryError, RoleStore, UserDirectory, UserStore};
use crate::models::{NewUserRecord, Principal, RoleRecord, User, UserChanges};
use crate::roles::Role;

const USER_COLUMNS: &str = "id, name, username, password_hash, email, phone, disabled, roles, \
                            created_at, updated_at";

/// Directory over a PostgreSQL pool. Run [`crate::migrate::migrate`] first.
#[derive(Debug, Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    username: String,
    password_hash: String,
    email: String,
    phone: String,
    disabled: bool,
    roles: Vec<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let roles = row
            .roles
            .iter()
            .filter_map(|&id| {
                let role = Role::from_id(id);
                if role.is_none() {
                    warn!(role_id = id, username = %row.username, "ignoring unknown stored role");
                }
                role
            })
            .collect();
        User {
            id: row.id.to_string(),
            name: row.name,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            phone: row.phone,
            disabled: row.disabled,
            roles,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    role_id: i32,
    name: String,
    description: String,
    is_system: bool,
    created_at: DateTime<Utc>,
}

impl From<RoleRow> for RoleRecord {
    fn from(row: RoleRow) -> Self {
        RoleRecord {
            role_id: row.role_id,
            name: row.name,
            description: row.description,
            is_system: row.is_system,
            created_at: row.created_at,
        }
    }
}

fn role_ids(roles: &[Role]) -> Vec<i32> {
    roles.iter().map(|role| role.id()).collect()
}

fn parse_id(id: &str) -> Result<Uuid, DirectoryError> {
    Uuid::parse_str(id).map_err(|_| DirectoryError::NotFound(format!("user {id}")))
}

fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

impl PgDirectory {
    async fn fetch_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }
}

#[async_trait]
impl UserDirectory for PgDirectory {
    async fn find_for_auth(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        self.fetch_by_username(username).await
    }

    async fn find_profile(&self, username: &str) -> Result<Option<Principal>, DirectoryError> {
        Ok(self
            .fetch_by_username(username)
            .await?
            .map(Principal::from))
    }

    async fn exists(&self, username: &str) -> Result<bool, DirectoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

#[async_trait]
impl UserStore for PgDirectory {
    async fn insert_user(&self, record: NewUserRecord) -> Result<User, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, username, password_hash, email, phone, disabled, roles) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {USER_COLUMNS}"
        ))
        .bind(&record.name)
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(record.disabled)
        .bind(role_ids(&record.roles))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<User, DirectoryError> {
        let uuid = parse_id(id)?;
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET \
               name = COALESCE($2, name), \
               password_hash = COALESCE($3, password_hash), \
               email = COALESCE($4, email), \
               phone = COALESCE($5, phone), \
               disabled = COALESCE($6, disabled), \
               roles = COALESCE($7, roles), \
               updated_at = now() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(uuid)
        .bind(changes.name)
        .bind(changes.password_hash)
        .bind(changes.email)
        .bind(changes.phone)
        .bind(changes.disabled)
        .bind(changes.roles.as_deref().map(role_ids))
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::from)
            .ok_or_else(|| DirectoryError::NotFound(format!("user {id}")))
    }

    async fn list_users(&self) -> Result<Vec<Principal>, DirectoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| Principal::from(User::from(row)))
            .collect())
    }

    async fn count_users(&self) -> Result<u64, DirectoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count(n))
    }

    async fn clear_users(&self) -> Result<u64, DirectoryError> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RoleStore for PgDirectory {
    async fn insert_roles(&self, roles: Vec<RoleRecord>) -> Result<Vec<RoleRecord>, DirectoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(roles.len());
        for role in &roles {
            let row = sqlx::query_as::<_, RoleRow>(
                "INSERT INTO roles (role_id, name, description, is_system, created_at) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING role_id, name, description, is_system, created_at",
            )
            .bind(role.role_id)
            .bind(&role.name)
            .bind(&role.description)
            .bind(role.is_system)
            .bind(role.created_at)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row.into());
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, DirectoryError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT role_id, name, description, is_system, created_at FROM roles ORDER BY role_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RoleRecord::from).collect())
    }

    async fn count_roles(&self) -> Result<u64, DirectoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count(n))
    }

    async fn clear_roles(&self) -> Result<u64, DirectoryError> {
        let result = sqlx::query("DELETE FROM roles").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
