//! In-memory directory for development and tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DirectoryError, RoleStore, UserDirectory, UserStore};
use crate::models::{NewUserRecord, Principal, RoleRecord, User, UserChanges};

/// Users and roles held in process memory. Ids are UUIDv7 so creation
/// order and id order agree.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    users: RwLock<Vec<User>>,
    roles: RwLock<Vec<RoleRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_unique(
    users: &[User],
    id: Option<&str>,
    username: &str,
    email: &str,
) -> Result<(), DirectoryError> {
    let others = users.iter().filter(|u| Some(u.id.as_str()) != id);
    for user in others {
        if user.username == username {
            return Err(DirectoryError::Conflict(format!(
                "username '{username}' already exists"
            )));
        }
        if user.email == email {
            return Err(DirectoryError::Conflict(format!(
                "email '{email}' already exists"
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_for_auth(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_profile(&self, username: &str) -> Result<Option<Principal>, DirectoryError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username)
            .map(User::to_principal))
    }

    async fn exists(&self, username: &str) -> Result<bool, DirectoryError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.username == username))
    }
}

#[async_trait]
impl UserStore for MemoryDirectory {
    async fn insert_user(&self, record: NewUserRecord) -> Result<User, DirectoryError> {
        let mut users = self.users.write().await;
        ensure_unique(&users, None, &record.username, &record.email)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7().to_string(),
            name: record.name,
            username: record.username,
            password_hash: record.password_hash,
            email: record.email,
            phone: record.phone,
            disabled: record.disabled,
            roles: record.roles,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<User, DirectoryError> {
        let mut users = self.users.write().await;
        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Err(DirectoryError::NotFound(format!("user {id}")));
        };

        let mut updated = users[index].clone();
        if let Some(name) = changes.name {
            updated.name = name;
        }
        if let Some(hash) = changes.password_hash {
            updated.password_hash = hash;
        }
        if let Some(email) = changes.email {
            updated.email = email;
        }
        if let Some(phone) = changes.phone {
            updated.phone = phone;
        }
        if let Some(disabled) = changes.disabled {
            updated.disabled = disabled;
        }
        if let Some(roles) = changes.roles {
            updated.roles = roles;
        }
        ensure_unique(&users, Some(id), &updated.username, &updated.email)?;
        updated.updated_at = Utc::now();

        users[index] = updated.clone();
        Ok(updated)
    }

    async fn list_users(&self) -> Result<Vec<Principal>, DirectoryError> {
        let users = self.users.read().await;
        Ok(users.iter().map(User::to_principal).collect())
    }

    async fn count_users(&self) -> Result<u64, DirectoryError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn clear_users(&self) -> Result<u64, DirectoryError> {
        let mut users = self.users.write().await;
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }
}

#[async_trait]
impl RoleStore for MemoryDirectory {
    async fn insert_roles(&self, roles: Vec<RoleRecord>) -> Result<Vec<RoleRecord>, DirectoryError> {
        let mut stored = self.roles.write().await;
        for (i, role) in roles.iter().enumerate() {
            let clashes = stored.iter().chain(&roles[..i]).any(|r| r.role_id == role.role_id);
            if clashes {
                return Err(DirectoryError::Conflict(format!(
                    "role {} already exists",
                    role.role_id
                )));
            }
        }
        stored.extend(roles.iter().cloned());
        Ok(roles)
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, DirectoryError> {
        let mut roles = self.roles.read().await.clone();
        roles.sort_by_key(|r| r.role_id);
        Ok(roles)
    }

    async fn count_roles(&self) -> Result<u64, DirectoryError> {
        Ok(self.roles.read().await.len() as u64)
    }

    async fn clear_roles(&self) -> Result<u64, DirectoryError> {
        let mut roles = self.roles.write().await;
        let removed = roles.len() as u64;
        roles.clear();
        Ok(removed)
    }
}
