// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::required;
use crate::db;
use crate::models::{Budget, Transaction, Transfer, timestamp};
use crate::state::AppState;

/// Backup document shared by `export data` and `import data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub transfers: Vec<Transfer>,
    #[serde(with = "timestamp")]
    pub export_date: DateTime<Utc>,
}

pub fn snapshot(state: &AppState, now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        transactions: state.transactions.clone(),
        budgets: state.budgets.clone(),
        transfers: state.transfers.clone(),
        export_date: now,
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("data", sub)) => export_data(conn, sub),
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_data(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let doc = snapshot(&state, Utc::now());
    let body = serde_json::to_string_pretty(&doc)?;
    match sub.get_one::<String>("out").map(|s| s.trim()) {
        Some(out) if !out.is_empty() => {
            std::fs::write(out, body).with_context(|| format!("Write {}", out))?;
            println!(
                "Exported {} transactions, {} budgets, {} transfers to {}",
                doc.transactions.len(),
                doc.budgets.len(),
                doc.transfers.len(),
                out
            );
        }
        _ => println!("{}", body),
    }
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let state = db::load_state(conn)?;
    let mut rows: Vec<&Transaction> = state.transactions.iter().collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        wtr.write_record([
            "id",
            "date",
            "type",
            "amount",
            "category",
            "source",
            "description",
        ])?;
        for t in rows {
            wtr.write_record([
                t.id.clone(),
                t.date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                t.kind.to_string(),
                t.amount.normalize().to_string(),
                t.category.clone(),
                t.source.to_string(),
                t.description.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<serde_json::Value> = rows
            .iter()
            .map(|t| {
                json!({
                    "id": t.id,
                    "date": t.date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    "type": t.kind.to_string(),
                    "amount": t.amount.normalize().to_string(),
                    "category": t.category,
                    "source": t.source.to_string(),
                    "description": t.description,
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)
            .with_context(|| format!("Write {}", out))?;
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
