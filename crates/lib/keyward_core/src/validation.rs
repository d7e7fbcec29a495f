//! Field rules shared by seed validation and the user write path.

use std::sync::LazyLock;

use regex::Regex;

use crate::roles::Role;

pub const MIN_USERNAME_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("valid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 11-digit mobile number starting with `1[3-9]`.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && PHONE_RE.is_match(phone)
}

pub fn username_long_enough(username: &str) -> bool {
    username.chars().count() >= MIN_USERNAME_LEN
}

pub fn password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Borrowed view of the fields checked on a complete user record.
#[derive(Debug, Clone, Copy)]
pub struct UserFields<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub roles: &'a [Role],
}

/// Every rule violated by `fields`, each prefixed with the username.
///
/// Checks are independent: a record may produce several messages.
pub fn user_violations(fields: &UserFields<'_>) -> Vec<String> {
    let mut violations = Vec::new();
    let label = if fields.username.is_empty() {
        "unknown user"
    } else {
        fields.username
    };

    if [
        fields.name,
        fields.username,
        fields.password,
        fields.email,
        fields.phone,
    ]
    .iter()
    .any(|value| value.is_empty())
    {
        violations.push(format!("{label}: missing required fields"));
    }
    if !fields.username.is_empty() && !username_long_enough(fields.username) {
        violations.push(format!(
            "{label}: username length below {MIN_USERNAME_LEN}"
        ));
    }
    if !fields.password.is_empty() && !password_long_enough(fields.password) {
        violations.push(format!(
            "{label}: password length below {MIN_PASSWORD_LEN}"
        ));
    }
    if !fields.email.is_empty() && !is_valid_email(fields.email) {
        violations.push(format!("{label}: invalid email format"));
    }
    if !fields.phone.is_empty() && !is_valid_phone(fields.phone) {
        violations.push(format!("{label}: invalid phone format"));
    }
    if fields.roles.is_empty() {
        violations.push(format!("{label}: at least one role is required"));
    }

    violations
}
