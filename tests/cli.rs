//! Tests for the `ledger` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use ledger_cli::config::paths::LedgerPaths;
use ledger_cli::config::settings::DEFAULT_INDEX_KEY;
use ledger_cli::models::{Account, Credential, Ledger};
use ledger_cli::storage::{CredentialIndex, UserStore};

const USER: &str = "12345678";
const USER_KEY: i64 = 6;

fn ledger(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn register_user(data_dir: &TempDir) -> LedgerPaths {
    let paths = LedgerPaths::with_base_dir(data_dir.path().to_path_buf());
    paths.ensure_directories().unwrap();

    let mut index = CredentialIndex::new();
    index
        .insert(Credential::new(USER, "123456", "Marie", USER_KEY))
        .unwrap();
    index.save(paths.ident_file(), DEFAULT_INDEX_KEY).unwrap();

    let ledger = Ledger {
        accounts: vec![Account::new("Compte A")],
        ..Ledger::default()
    };
    UserStore::new(paths.clone())
        .persist(&ledger, USER, USER_KEY)
        .unwrap();

    paths
}

#[test]
fn init_writes_settings() {
    let data_dir = TempDir::new().unwrap();

    ledger(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("users").join("backup").is_dir());
}

#[test]
fn encrypt_then_decrypt_restores_file() {
    let data_dir = TempDir::new().unwrap();
    let file = data_dir.path().join("notes.txt");
    fs::write(&file, "CPT*Compte A\nCPT*Compte B").unwrap();

    ledger(&data_dir)
        .args(["encrypt", "--key", "7"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted"));
    assert!(!fs::read_to_string(&file).unwrap().contains("Compte"));

    ledger(&data_dir)
        .args(["decrypt", "--key", "7"])
        .arg(&file)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&file).unwrap(), "CPT*Compte A\nCPT*Compte B");
}

#[test]
fn verify_unknown_user_fails() {
    let data_dir = TempDir::new().unwrap();

    ledger(&data_dir)
        .args(["verify", "00000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn verify_detects_tampering() {
    let data_dir = TempDir::new().unwrap();
    let paths = register_user(&data_dir);

    ledger(&data_dir)
        .args(["verify", USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("integrity OK"));

    fs::write(paths.user_file(USER), "tampered").unwrap();

    ledger(&data_dir)
        .args(["verify", USER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Integrity error"));
}

#[test]
fn users_and_show_list_registered_data() {
    let data_dir = TempDir::new().unwrap();
    register_user(&data_dir);

    ledger(&data_dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains(USER).and(predicate::str::contains("Marie")));

    ledger(&data_dir)
        .args(["show", USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compte A"));

    ledger(&data_dir)
        .args(["show", USER, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"accounts\""));
}

#[test]
fn users_without_index() {
    let data_dir = TempDir::new().unwrap();

    ledger(&data_dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("No users found."));
}
