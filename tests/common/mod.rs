// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use dompet::models::{FundSource, Transaction, Transfer, TxKind};
use dompet::{cli, commands, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn conn() -> Connection {
    db::open_in_memory().unwrap()
}

/// Runs a CLI invocation (without the binary name) against `conn`.
pub fn run(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["dompet"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().try_get_matches_from(argv)?;
    match matches.subcommand() {
        Some(("tx", m)) => commands::transactions::handle(conn, m),
        Some(("transfer", m)) => commands::transfers::handle(conn, m),
        Some(("budget", m)) => commands::budgets::handle(conn, m),
        Some(("category", m)) => commands::categories::handle(conn, m),
        Some(("report", m)) => commands::reports::handle(conn, m),
        Some(("export", m)) => commands::exporter::handle(conn, m),
        Some(("import", m)) => commands::importer::handle(conn, m),
        Some(("config", m)) => commands::settings::handle(conn, m),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

pub fn at(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
}

pub fn tx(kind: TxKind, amount: i64, category: &str, source: FundSource, ts: &str) -> Transaction {
    Transaction {
        id: format!("{}-{}-{}", category, amount, ts),
        kind,
        amount: Decimal::from(amount),
        category: category.to_string(),
        source,
        date: at(ts),
        description: None,
    }
}

pub fn transfer(from: FundSource, to: FundSource, amount: i64, ts: &str) -> Transfer {
    Transfer {
        id: format!("{}-{}-{}", from, to, ts),
        from,
        to,
        amount: Decimal::from(amount),
        date: at(ts),
    }
}
