// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{conn, run};
use dompet::calc::balance;
use dompet::commands::importer::parse_document;
use dompet::db;
use dompet::error::LedgerError;
use dompet::models::FundSource;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

const BACKUP: &str = r#"{
  "transactions": [
    {"id":"1704855000000","type":"income","amount":1000000,"category":"Gaji","source":"Bank","date":"2024-01-10T03:30:00.000Z"},
    {"id":"1704855000001","type":"expense","amount":300000,"category":"Makanan","source":"Bank","date":"2024-01-15T03:30:00.000Z","description":"belanja"}
  ],
  "budgets": [{"category":"Makanan","limit":500000,"month":"2024-01"}],
  "transfers": [{"id":"t1","from":"Bank","to":"E-Wallet","amount":200000,"date":"2024-01-16T00:00:00.000Z"}],
  "exportDate": "2024-01-31T00:00:00.000Z"
}"#;

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn import_replaces_collections() {
    let mut conn = conn();
    run(
        &mut conn,
        &["tx", "add", "--type", "income", "--amount", "5", "--category", "Bonus"],
    )
    .unwrap();
    let file = file_with(BACKUP);
    let path = file.path().to_str().unwrap().to_string();
    run(&mut conn, &["import", "data", "--path", &path, "--yes"]).unwrap();

    let state = db::load_state(&conn).unwrap();
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(state.budgets.len(), 1);
    assert_eq!(state.transfers.len(), 1);
    assert_eq!(
        balance(&state.transactions, &state.transfers, FundSource::Bank),
        Decimal::from(500_000)
    );
    assert_eq!(
        balance(&state.transactions, &state.transfers, FundSource::EWallet),
        Decimal::from(200_000)
    );
    // categories are not part of a backup
    assert_eq!(state.categories.len(), 8);
}

#[test]
fn import_requires_confirmation() {
    let mut conn = conn();
    let file = file_with(BACKUP);
    let path = file.path().to_str().unwrap().to_string();
    assert!(run(&mut conn, &["import", "data", "--path", &path]).is_err());
    assert!(db::load_state(&conn).unwrap().transactions.is_empty());
}

#[test]
fn missing_list_fails_without_partial_import() {
    let mut conn = conn();
    let file = file_with(r#"{"transactions": [], "budgets": []}"#);
    let path = file.path().to_str().unwrap().to_string();
    let err = run(&mut conn, &["import", "data", "--path", &path, "--yes"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidImport(_))
    ));
    assert!(db::get_raw(&conn, db::TRANSACTIONS_KEY).unwrap().is_none());
}

#[test]
fn parse_document_rejects_bad_input() {
    assert!(parse_document("not json").is_err());
    assert!(parse_document("[]").is_err());
    assert!(parse_document(r#"{"transactions":{},"budgets":[],"transfers":[]}"#).is_err());
    // a malformed record aborts the whole import
    let bad = r#"{"transactions":[{"id":"x","type":"gift","amount":1,"category":"a","source":"Bank","date":"2024-01-01"}],"budgets":[],"transfers":[]}"#;
    assert!(parse_document(bad).is_err());
    let ok = r#"{"transactions":[{"id":"x","type":"income","amount":1,"category":"Gaji","source":"Cash","date":"2024-01-01"}],"budgets":[],"transfers":[]}"#;
    let set = parse_document(ok).unwrap();
    assert_eq!(set.transactions[0].date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
}

#[test]
fn oversized_amounts_are_refused() {
    let doc = r#"{"transactions":[{"id":"x","type":"income","amount":50000000000000000000000000000,"category":"Gaji","source":"Bank","date":"2024-01-01"}],"budgets":[],"transfers":[]}"#;
    assert!(matches!(
        parse_document(doc),
        Err(LedgerError::InvalidImport(_))
    ));
}
