//! Domain models.
//!
//! `auth` holds what flows through a login; `user` and `role` hold the
//! records owned by the directory adapters.

pub mod auth;
pub mod role;
pub mod user;

pub use auth::{LoginResponse, LogoutAck, Principal, TokenPayload};
pub use role::RoleRecord;
pub use user::{NewUser, NewUserRecord, User, UserChanges, UserUpdate};
