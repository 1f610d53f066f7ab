// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use super::{amount, commit, optional, required, timestamp_or_now};
use crate::db;
use crate::models::{FundSource, Transaction, TxKind};
use crate::state::{Action, AppState};
use crate::utils::{format_currency, maybe_print_json, parse_month, pretty_table};
use crate::validate;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut state = db::load_state(conn)?;
    let settings = db::load_settings(conn)?;

    let kind: TxKind = required(sub, "type")?.parse()?;
    let amount = amount(sub, "amount")?;
    let category = required(sub, "category")?.to_string();
    let source: FundSource = required(sub, "source")?.parse()?;
    let date = timestamp_or_now(sub)?;
    let description = optional(sub, "description").map(str::to_string);

    validate::transaction(&state, kind, amount, &category)?;

    let tx = Transaction {
        id: Uuid::new_v4().to_string(),
        kind,
        amount,
        category,
        source,
        date,
        description,
    };
    let summary = format!(
        "Recorded {} {} ({}) from {} on {}",
        tx.kind,
        format_currency(&tx.amount, settings.locale),
        tx.category,
        tx.source,
        tx.date.with_timezone(&Local).date_naive()
    );
    commit(conn, &mut state, Action::AddTransaction(tx))?;
    println!("{}", summary);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut state = db::load_state(conn)?;
    let id = required(sub, "id")?.to_string();
    if !commit(conn, &mut state, Action::RemoveTransaction { id: id.clone() })? {
        bail!("Transaction '{}' not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = db::load_state(conn)?;
    let settings = db::load_settings(conn)?;
    let data = query_rows(&state, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = if r.kind == TxKind::Income { "+" } else { "-" };
                vec![
                    r.date.clone(),
                    r.category.clone(),
                    r.source.to_string(),
                    format!("{}{}", sign, format_currency(&r.amount, settings.locale)),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Category", "Source", "Amount", "Description", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: rust_decimal::Decimal,
    pub category: String,
    pub source: FundSource,
    pub description: String,
}

/// Transactions newest first, optionally narrowed to one month (local dates).
pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = optional(sub, "month").map(parse_month).transpose()?;
    let mut picked: Vec<&Transaction> = state
        .transactions
        .iter()
        .filter(|t| match month {
            Some(m) => m.contains(t.date.with_timezone(&Local).date_naive()),
            None => true,
        })
        .collect();
    picked.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        picked.truncate(*limit);
    }
    Ok(picked
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            kind: t.kind,
            amount: t.amount,
            category: t.category.clone(),
            source: t.source,
            description: t.description.clone().unwrap_or_default(),
        })
        .collect())
}
