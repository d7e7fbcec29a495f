//! Canonical bootstrap records.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::NewUser;
use crate::roles::Role;

/// Role seed record. `role_id` is a raw integer so that malformed seed sets
/// (unknown or repeated ids) can be represented and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSeed {
    pub role_id: i32,
    pub name: String,
    pub description: String,
    #[serde(default = "default_true")]
    pub is_system: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// User seed record with a plaintext password. Missing string fields
/// deserialize as empty so validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default = "default_true")]
    pub is_system: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl From<&UserSeed> for NewUser {
    fn from(seed: &UserSeed) -> Self {
        NewUser {
            name: seed.name.clone(),
            username: seed.username.clone(),
            password: seed.password.clone(),
            email: seed.email.clone(),
            phone: seed.phone.clone(),
            disabled: seed.disabled,
            roles: seed.roles.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn seed_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// One system role record per registered role.
pub fn role_seed_data() -> Vec<RoleSeed> {
    Role::ALL
        .into_iter()
        .map(|role| RoleSeed {
            role_id: role.id(),
            name: role.name().to_string(),
            description: role.description().to_string(),
            is_system: true,
            created_at: seed_epoch(),
        })
        .collect()
}

/// The initial administrator, enabled and holding every role.
pub fn user_seed_data() -> Vec<UserSeed> {
    vec![UserSeed {
        name: "Sam Chen".to_string(),
        username: "samchen".to_string(),
        password: "123456".to_string(),
        email: "samchen@sinabuddy.com".to_string(),
        phone: "13837147910".to_string(),
        disabled: false,
        roles: Role::ALL.to_vec(),
        is_system: true,
        created_at: seed_epoch(),
    }]
}

pub fn role_seed_by_id(role_id: i32) -> Option<RoleSeed> {
    role_seed_data().into_iter().find(|seed| seed.role_id == role_id)
}

pub fn user_seed_by_username(username: &str) -> Option<UserSeed> {
    user_seed_data()
        .into_iter()
        .find(|seed| seed.username == username)
}
