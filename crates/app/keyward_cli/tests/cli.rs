use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn keyward() -> Command {
    let mut cmd = Command::cargo_bin("keyward").unwrap();
    cmd.env_remove("APP_ENV")
        .env_remove("NODE_ENV")
        .env("RUST_LOG", "info")
        // Nothing listens here; commands that get this far must fail.
        .env("DATABASE_URL", "postgres://127.0.0.1:1/keyward");
    cmd
}

#[test]
fn version() {
    keyward()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn reset_is_refused_in_production() {
    keyward()
        .env("APP_ENV", "production")
        .arg("reset")
        .assert()
        .failure()
        .stdout(predicate::str::contains("refusing to reset all data in production"));
}

#[test]
fn node_env_production_also_guards_reset() {
    keyward()
        .env("NODE_ENV", "production")
        .arg("reset")
        .assert()
        .failure()
        .stdout(predicate::str::contains("refusing"));
}

#[test]
fn seed_rejects_invalid_users_before_connecting() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"name":"Sam","username":"samch","password":"123456",
            "email":"not-an-email","phone":"13837147910","roles":[6]}}]"#
    )
    .unwrap();

    keyward()
        .arg("seed")
        .arg("--users")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("samch: username length below 6"))
        .stdout(predicate::str::contains("samch: invalid email format"))
        .stdout(predicate::str::contains("Database").not());
}

#[test]
fn seed_with_missing_users_file_fails() {
    keyward()
        .args(["seed", "--users", "/nonexistent/keyward-users.json"])
        .assert()
        .failure();
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    keyward()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
