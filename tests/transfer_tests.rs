// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{conn, run, transfer};
use dompet::calc::balance;
use dompet::commands::transfers;
use dompet::db;
use dompet::error::LedgerError;
use dompet::models::FundSource;
use rust_decimal::Decimal;

fn funded() -> rusqlite::Connection {
    let mut conn = conn();
    run(
        &mut conn,
        &[
            "tx", "add", "--type", "income", "--amount", "700000", "--category", "Gaji",
            "--source", "Bank",
        ],
    )
    .unwrap();
    conn
}

#[test]
fn transfer_updates_both_sources() {
    let mut conn = funded();
    run(
        &mut conn,
        &["transfer", "add", "--from", "Bank", "--to", "Cash", "--amount", "200.000"],
    )
    .unwrap();
    let state = db::load_state(&conn).unwrap();
    assert_eq!(state.transfers.len(), 1);
    let b = |s| balance(&state.transactions, &state.transfers, s);
    assert_eq!(b(FundSource::Bank), Decimal::from(500_000));
    assert_eq!(b(FundSource::Cash), Decimal::from(200_000));
    assert_eq!(b(FundSource::EWallet), Decimal::ZERO);
}

#[test]
fn transfer_cannot_overdraw() {
    let mut conn = funded();
    let err = run(
        &mut conn,
        &["transfer", "add", "--from", "Bank", "--to", "e-wallet", "--amount", "700001"],
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::InsufficientBalance {
            fund: FundSource::Bank,
            available: Decimal::from(700_000)
        })
    );
    assert!(db::load_state(&conn).unwrap().transfers.is_empty());
}

#[test]
fn transfer_rejects_same_source_and_zero() {
    let mut conn = funded();
    let err = run(
        &mut conn,
        &["transfer", "add", "--from", "Bank", "--to", "bank", "--amount", "10"],
    )
    .unwrap_err();
    assert_eq!(err.downcast_ref::<LedgerError>(), Some(&LedgerError::SameSource));

    let err = run(
        &mut conn,
        &["transfer", "add", "--from", "Bank", "--to", "Cash", "--amount", "0"],
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::NonPositiveAmount)
    );
}

#[test]
fn recent_lists_newest_first() {
    let mut state = dompet::state::AppState::default();
    for (i, ts) in [
        "2024-01-01T00:00:00.000Z",
        "2024-03-01T00:00:00.000Z",
        "2024-02-01T00:00:00.000Z",
    ]
    .iter()
    .enumerate()
    {
        let mut t = transfer(FundSource::Bank, FundSource::Cash, 10 + i as i64, ts);
        t.id = format!("t{}", i);
        state.transfers.push(t);
    }
    let rows = transfers::recent(&state, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "t1");
    assert_eq!(rows[1].id, "t2");
}
