//! Route paths.

pub const GET_HEALTH: &str = "/health";
pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const GET_AUTH_PROFILE: &str = "/auth/profile";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";
pub const POST_AUTH_REFRESH: &str = "/auth/refresh";
