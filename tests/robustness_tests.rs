mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

const INVOICES: &str = r#"[
    {"reference": "INV-1", "amount": "10", "type": "standard"},
    {"reference": "INV-Z", "amount": "0", "type": "standard",
     "payments": [{"reference": "INV-Z", "amount": "1"}]},
    {"reference": "INV-X", "amount": "10", "type": "proforma"}
]"#;

#[test]
fn test_malformed_csv_handling() {
    let dir = tempdir().unwrap();
    let invoices = dir.path().join("invoices.json");
    let payments = dir.path().join("payments.csv");
    common::write_invoices(&invoices, INVOICES).unwrap();
    common::write_payments(
        &payments,
        &[
            ("INV-1", "1.0"),
            ("INV-1", "not_a_number"),
            ("INV-1", ""),
            ("INV-1", "2.0"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("invoicepay"));
    cmd.arg(&payments).arg("--invoices").arg(&invoices);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading payment"))
        .stdout(predicate::str::contains("INV-1,1.0,invoice is now partially paid"))
        .stdout(predicate::str::contains(
            "INV-1,2.0,\"another partial payment received, still not fully paid\"",
        ));
}

#[test]
fn test_processing_errors_do_not_stop_the_run() {
    let dir = tempdir().unwrap();
    let invoices = dir.path().join("invoices.json");
    let payments = dir.path().join("payments.csv");
    common::write_invoices(&invoices, INVOICES).unwrap();
    common::write_payments(
        &payments,
        &[
            ("UNKNOWN", "5"),
            ("INV-Z", "1"),
            ("INV-X", "5"),
            ("INV-1", "10"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("invoicepay"));
    cmd.arg(&payments).arg("--invoices").arg(&invoices);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "There is no invoice matching this payment",
        ))
        .stderr(predicate::str::contains("it has an amount of 0 and it has payments"))
        .stderr(predicate::str::contains("Unsupported invoice type: proforma"))
        .stdout(predicate::str::contains("INV-1,10,invoice is now fully paid"))
        .stdout(predicate::str::contains("UNKNOWN").not());
}

#[test]
fn test_missing_payments_file_fails() {
    let mut cmd = Command::new(cargo_bin!("invoicepay"));
    cmd.arg("does/not/exist.csv");

    cmd.assert().failure();
}
