use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const SNAPSHOT: &str = r#"{
    "accounts": [
        {"id": 1, "name": "Cash", "accountGroup": "Cash", "openingBalance": "1,000"},
        {"id": 2, "name": "Owner Capital", "accountGroup": "Capital", "openingBalance": 0}
    ],
    "transactions": [
        {"accountId": 1, "debit": 200, "credit": 0, "txnDate": "2025-03-10"},
        {"accountId": 2, "debit": 0, "credit": 1200, "txnDate": "2025-03-10"},
        {"accountId": 1, "debit": 999, "credit": 0, "txnDate": "2024-12-31"}
    ],
    "receipts": [{"amount": "500", "voucherDate": "2025-04-01"}],
    "payments": [{"amount": 120, "paymentDate": "2025-04-02"}],
    "expenses": [{"amount": 80, "date": "2025-04-03", "category": "Utilities", "taxRate": 5}],
    "bankReconciliation": {"closingBalance": 1300, "difference": 0},
    "assets": [{"id": "A1", "name": "Rowing Machine", "category": "Cardio",
                "purchaseCost": 12000, "usefulLifeYears": 5, "purchaseDate": "2024-01-01"}],
    "salaryAdvances": [{"id": 7, "employeeName": "Omar", "amount": 900, "installments": 3,
                        "amountRepaid": 300, "startDate": "2025-02-01"}],
    "members": [{"id": 1, "name": "Aisha", "plan": "Gold", "status": "active"}]
}"#;

fn gymbios(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gymbios").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_snapshot(dir: &Path) -> String {
    let path = dir.join("snapshot.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn trial_balance_text() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    gymbios(dir.path())
        .args(["report", "trial-balance", "--year", "2025", "--snapshot", &snap])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trial Balance"))
        .stdout(predicate::str::contains("Owner Capital"))
        .stdout(predicate::str::contains("AED 1,200.00"));
}

#[test]
fn trial_balance_json_filters_by_period() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    let output = gymbios(dir.path())
        .args(["report", "trial-balance", "--year", "2025", "--format", "json", "--snapshot", &snap])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["name"], "Cash");
    assert_eq!(rows[0]["netBalance"], "1200");
    assert_eq!(rows[1]["netBalance"], "1200");
}

#[test]
fn pnl_falls_back_to_vouchers() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    let output = gymbios(dir.path())
        .args(["report", "pnl", "--year", "2025", "--format", "json", "--snapshot", &snap])
        .output()
        .unwrap();
    assert!(output.status.success());
    let pnl: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(pnl["totalRevenue"], "500");
    assert_eq!(pnl["totalExpense"], "200");
    assert_eq!(pnl["netProfit"], "300");
    assert_eq!(pnl["revenueSource"], "vouchers");
}

#[test]
fn report_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    let out = dir.path().join("reports").join("tb.csv");
    gymbios(dir.path())
        .args(["report", "trial-balance", "--year", "2025", "--format", "csv", "--snapshot", &snap])
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let csv = fs::read_to_string(out).unwrap();
    assert!(csv.starts_with("id,name,account_group"));
}

#[test]
fn from_without_to_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    gymbios(dir.path())
        .args(["report", "pnl", "--from", "2025-01-01", "--snapshot", &snap])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from requires --to"));
}

#[test]
fn missing_source_reports_hint() {
    let dir = tempfile::tempdir().unwrap();
    gymbios(dir.path())
        .args(["report", "cashflow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API URL configured"));
}

#[test]
fn unreadable_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    gymbios(dir.path())
        .args(["report", "all", "--snapshot", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn assets_as_of_date() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    gymbios(dir.path())
        .args(["assets", "--as-of", "2025-01-01", "--snapshot", &snap])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asset Register as of 2025-01-01"))
        .stdout(predicate::str::contains("Rowing Machine"))
        .stdout(predicate::str::contains("AED 9,600.00"));
}

#[test]
fn advances_with_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    gymbios(dir.path())
        .args(["advances", "--schedule", "--snapshot", &snap])
        .assert()
        .success()
        .stdout(predicate::str::contains("Omar"))
        .stdout(predicate::str::contains("1/3"))
        .stdout(predicate::str::contains("2025-03-01"));
}

#[test]
fn members_are_cached_until_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let snap = write_snapshot(dir.path());
    let run = |extra: &[&str]| {
        let output = gymbios(dir.path())
            .args(["members", "-v", "--snapshot", &snap])
            .args(extra)
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Aisha"));
        String::from_utf8_lossy(&output.stderr).contains("cache hit")
    };
    assert!(!run(&[]));
    assert!(run(&[]));
    assert!(!run(&["--refresh"]));
}

#[test]
fn status_without_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    gymbios(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("run `gymbios init`"))
        .stdout(predicate::str::contains("Currency:   AED"))
        .stdout(predicate::str::contains("Timeout:    30s"));
}
