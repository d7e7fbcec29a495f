//! Seed validation: completeness and shape checks run before any seed
//! record reaches a store.

pub mod data;

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

pub use data::{
    RoleSeed, UserSeed, role_seed_by_id, role_seed_data, user_seed_by_username, user_seed_data,
};

use crate::roles::{ROLE_COUNT, Role};
use crate::validation::{UserFields, user_violations};

/// Seed data is incomplete or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("missing role seed data: {}", join_names(.missing))]
    IncompleteSeed { missing: Vec<Role> },

    #[error("expected {expected} roles, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("user seed validation failed: {}", .0.join("; "))]
    InvalidUsers(Vec<String>),
}

fn join_names(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|role| role.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a candidate role set against the registry.
///
/// Absent ids win over the count check. Repeated ids that still cover all
/// six roles are reported as [`SeedError::WrongCount`].
pub fn validate_roles(candidates: &[RoleSeed]) -> Result<(), SeedError> {
    let present: BTreeSet<i32> = candidates.iter().map(|seed| seed.role_id).collect();
    let missing: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|role| !present.contains(&role.id()))
        .collect();

    if !missing.is_empty() {
        return Err(SeedError::IncompleteSeed { missing });
    }
    if candidates.len() != ROLE_COUNT {
        return Err(SeedError::WrongCount {
            expected: ROLE_COUNT,
            actual: candidates.len(),
        });
    }
    Ok(())
}

/// Check every candidate user, collecting all violations across all
/// candidates into one error.
///
/// Usernames and emails must also be unique within the set, so a seed run
/// never stops on a storage conflict halfway through.
pub fn validate_users(candidates: &[UserSeed]) -> Result<(), SeedError> {
    let mut usernames = HashSet::new();
    let mut emails = HashSet::new();
    let mut violations = Vec::new();

    for seed in candidates {
        violations.extend(user_violations(&UserFields {
            name: &seed.name,
            username: &seed.username,
            password: &seed.password,
            email: &seed.email,
            phone: &seed.phone,
            roles: &seed.roles,
        }));
        if !seed.username.is_empty() && !usernames.insert(seed.username.as_str()) {
            violations.push(format!("{}: duplicate username", seed.username));
        }
        if !seed.email.is_empty() && !emails.insert(seed.email.as_str()) {
            let label = if seed.username.is_empty() {
                "unknown user"
            } else {
                seed.username.as_str()
            };
            violations.push(format!("{label}: duplicate email {}", seed.email));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SeedError::InvalidUsers(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_seed(role_id: i32) -> RoleSeed {
        RoleSeed {
            role_id,
            name: crate::roles::name_of(role_id).to_string(),
            description: String::new(),
            is_system: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn built_in_seeds_pass() {
        assert_eq!(validate_roles(&role_seed_data()), Ok(()));
        assert_eq!(validate_users(&user_seed_data()), Ok(()));
    }

    #[test]
    fn missing_roles_are_named() {
        let seeds: Vec<RoleSeed> = [1, 2, 3, 4].into_iter().map(role_seed).collect();
        let err = validate_roles(&seeds).unwrap_err();
        assert_eq!(
            err,
            SeedError::IncompleteSeed {
                missing: vec![Role::Manager, Role::Admin]
            }
        );
        assert_eq!(err.to_string(), "missing role seed data: Manager, Admin");
    }

    #[test]
    fn missing_wins_over_count() {
        let seeds: Vec<RoleSeed> = [1, 2, 3, 4, 5, 5].into_iter().map(role_seed).collect();
        assert!(matches!(
            validate_roles(&seeds),
            Err(SeedError::IncompleteSeed { .. })
        ));
    }

    #[test]
    fn duplicate_covering_all_ids_is_wrong_count() {
        let seeds: Vec<RoleSeed> = [1, 2, 3, 4, 5, 6, 6].into_iter().map(role_seed).collect();
        assert_eq!(
            validate_roles(&seeds),
            Err(SeedError::WrongCount {
                expected: 6,
                actual: 7
            })
        );
    }

    #[test]
    fn extra_unknown_id_is_wrong_count() {
        let seeds: Vec<RoleSeed> = (1..=7).map(role_seed).collect();
        let err = validate_roles(&seeds).unwrap_err();
        assert_eq!(err.to_string(), "expected 6 roles, got 7");
    }

    #[test]
    fn empty_role_set_reports_all_missing() {
        let err = validate_roles(&[]).unwrap_err();
        assert_eq!(
            err,
            SeedError::IncompleteSeed {
                missing: Role::ALL.to_vec()
            }
        );
    }

    #[test]
    fn short_username_cited() {
        let mut seeds = user_seed_data();
        seeds[0].username = "samch".into();
        let err = validate_users(&seeds).unwrap_err();
        assert!(err.to_string().contains("username length"), "{err}");
    }

    #[test]
    fn violations_across_users_are_all_reported() {
        let mut first = user_seed_data().remove(0);
        first.username = "short".into();
        let mut second = user_seed_data().remove(0);
        second.username = "operator".into();
        second.email = "operator@example.com".into();
        second.phone = "999".into();
        second.roles.clear();

        let Err(SeedError::InvalidUsers(violations)) = validate_users(&[first, second]) else {
            panic!("expected InvalidUsers");
        };
        assert_eq!(
            violations,
            vec![
                "short: username length below 6".to_string(),
                "operator: invalid phone format".to_string(),
                "operator: at least one role is required".to_string(),
            ]
        );
    }

    #[test]
    fn duplicates_within_the_set_are_reported() {
        let first = user_seed_data().remove(0);
        let mut same_name = first.clone();
        same_name.email = "other@example.com".into();
        let mut same_email = first.clone();
        same_email.username = "operator".into();

        let Err(SeedError::InvalidUsers(violations)) =
            validate_users(&[first, same_name, same_email])
        else {
            panic!("expected InvalidUsers");
        };
        assert_eq!(
            violations,
            vec![
                "samchen: duplicate username".to_string(),
                "operator: duplicate email samchen@sinabuddy.com".to_string(),
            ]
        );
    }
}
