use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role row as persisted by a role store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub role_id: i32,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
}
