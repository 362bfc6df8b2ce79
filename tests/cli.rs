use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn banklite(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("banklite").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("BANKLITE_DATA_DIR")
        .arg("--data-dir")
        .arg(dir);
    cmd
}

fn store_json(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("data").join("bank.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn menu_session_persists_across_runs() {
    let temp = TempDir::new().unwrap();

    banklite(temp.path())
        .write_stdin("1\nAlice\n150\n3\n1\n200\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created successfully! ID: 1"))
        .stdout(predicate::str::contains("Error: Insufficient balance in account 1"))
        .stdout(predicate::str::contains("Exiting BankLite. Goodbye!"));

    let store = store_json(temp.path());
    assert_eq!(store[0]["id"], 1);
    assert_eq!(store[0]["name"], "Alice");
    assert_eq!(store[0]["balance"], 150.0);
    assert_eq!(store[0]["transactions"].as_array().unwrap().len(), 1);

    banklite(temp.path())
        .arg("menu")
        .write_stdin("4\n1\n5\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: ₹150.00"))
        .stdout(predicate::str::contains(" - Account created with ₹150.00"));
}

#[test]
fn subcommands_move_money() {
    let temp = TempDir::new().unwrap();

    banklite(temp.path())
        .args(["account", "create", "Alice", "--balance", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1"));
    banklite(temp.path())
        .args(["account", "create", "Bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 2"));

    banklite(temp.path())
        .args(["deposit", "1", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: ₹150.00"));

    banklite(temp.path())
        .args(["transfer", "1", "2", "40.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transfer successful."));

    banklite(temp.path())
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("₹109.75"))
        .stdout(predicate::str::contains("₹40.25"));

    banklite(temp.path())
        .args(["account", "history", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Received ₹40.25 from Account 1"));

    banklite(temp.path()).arg("verify").assert().success();
}

#[test]
fn failed_operations_exit_nonzero_and_change_nothing() {
    let temp = TempDir::new().unwrap();
    banklite(temp.path())
        .args(["account", "create", "Alice", "--balance", "150"])
        .assert()
        .success();
    let before = store_json(temp.path());

    banklite(temp.path())
        .args(["withdraw", "1", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Insufficient balance in account 1: need ₹200.00, have ₹150.00",
        ));

    banklite(temp.path())
        .args(["deposit", "1", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));

    banklite(temp.path())
        .args(["deposit", "999", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: 999"));

    banklite(temp.path())
        .args(["transfer", "1", "1", "10"])
        .assert()
        .failure();

    assert_eq!(store_json(temp.path()), before);
}

#[test]
fn corrupt_store_is_fatal_until_restored() {
    let temp = TempDir::new().unwrap();
    banklite(temp.path())
        .args(["account", "create", "Alice", "--balance", "10"])
        .assert()
        .success();
    banklite(temp.path())
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: backup-"));

    fs::write(temp.path().join("data").join("bank.json"), "not json").unwrap();

    banklite(temp.path())
        .args(["account", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt store"));

    banklite(temp.path())
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 account(s) restored"));

    banklite(temp.path())
        .args(["account", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn export_json_to_stdout() {
    let temp = TempDir::new().unwrap();
    banklite(temp.path())
        .args(["account", "create", "Alice", "--balance", "12.5"])
        .assert()
        .success();

    let output = banklite(temp.path())
        .args(["export", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let export: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(export["metadata"]["account_count"], 1);
    assert_eq!(export["accounts"][0]["balance"], 12.5);
}

#[test]
fn audit_log_records_mutations() {
    let temp = TempDir::new().unwrap();
    banklite(temp.path())
        .args(["account", "create", "Alice", "--balance", "10"])
        .assert()
        .success();
    banklite(temp.path())
        .args(["deposit", "1", "5"])
        .assert()
        .success();

    banklite(temp.path())
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE account 1 (Alice)"))
        .stdout(predicate::str::contains("DEPOSIT account 1"));
}
