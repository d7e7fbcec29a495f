//! Role registry: the six fixed business roles and their canonical names.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of roles that exist system-wide.
pub const ROLE_COUNT: usize = 6;

/// Name reported for ids outside the registry.
pub const UNKNOWN_ROLE_NAME: &str = "unknown role";

/// A system role. Serialized as its integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum Role {
    Sales = 1,
    Document = 2,
    Shipping = 3,
    Supply = 4,
    Manager = 5,
    Admin = 6,
}

/// Raised when an integer does not name a registered role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown role id {0}")]
pub struct UnknownRole(pub i32);

impl Role {
    /// All roles, ordered by id.
    pub const ALL: [Role; ROLE_COUNT] = [
        Role::Sales,
        Role::Document,
        Role::Shipping,
        Role::Supply,
        Role::Manager,
        Role::Admin,
    ];

    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Sales => "Sales",
            Role::Document => "Document",
            Role::Shipping => "Shipping",
            Role::Supply => "Supply",
            Role::Manager => "Manager",
            Role::Admin => "Admin",
        }
    }

    /// Human-readable summary of the role's responsibilities.
    pub const fn description(self) -> &'static str {
        match self {
            Role::Sales => "Business development, customer care and order follow-up",
            Role::Document => "Document preparation, file review and customs declarations",
            Role::Shipping => "Ocean freight booking, sailing schedules and transport coordination",
            Role::Supply => "Sourcing, supplier management and inventory coordination",
            Role::Manager => "Team management, business oversight and approvals",
            Role::Admin => "System configuration, user management and role assignment",
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl TryFrom<i32> for Role {
    type Error = UnknownRole;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(UnknownRole(id))
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name for a role id, or [`UNKNOWN_ROLE_NAME`] when the id is not registered.
pub fn name_of(role_id: i32) -> &'static str {
    Role::from_id(role_id).map_or(UNKNOWN_ROLE_NAME, Role::name)
}

/// All six roles in id order.
pub fn all_roles() -> [Role; ROLE_COUNT] {
    Role::ALL
}
