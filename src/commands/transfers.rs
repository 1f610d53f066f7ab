// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use super::{amount, commit, required, timestamp_or_now};
use crate::calc::balance;
use crate::db;
use crate::models::{FundSource, Transfer};
use crate::state::{Action, AppState};
use crate::utils::{format_currency, maybe_print_json, pretty_table};
use crate::validate;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;

    let from: FundSource = required(sub, "from")?.parse()?;
    let to: FundSource = required(sub, "to")?.parse()?;
    let amount = amount(sub, "amount")?;
    validate::transfer(&state, from, to, amount)?;

    let from_before = balance(&state.transactions, &state.transfers, from);
    let to_before = balance(&state.transactions, &state.transfers, to);
    let transfer = Transfer {
        id: Uuid::new_v4().to_string(),
        from,
        to,
        amount,
        date: timestamp_or_now(sub)?,
    };
    commit(conn, &mut state, Action::AddTransfer(transfer))?;

    println!(
        "Transferred {} from {} to {}",
        format_currency(&amount, locale),
        from,
        to
    );
    println!(
        "  {}: {} -> {}",
        from,
        format_currency(&from_before, locale),
        format_currency(&(from_before - amount), locale)
    );
    println!(
        "  {}: {} -> {}",
        to,
        format_currency(&to_before, locale),
        format_currency(&(to_before + amount), locale)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransferRow {
    pub id: String,
    pub date: String,
    pub from: FundSource,
    pub to: FundSource,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: rust_decimal::Decimal,
}

/// Most recent transfers first.
pub fn recent(state: &AppState, limit: usize) -> Vec<TransferRow> {
    let mut picked: Vec<&Transfer> = state.transfers.iter().collect();
    picked.sort_by(|a, b| b.date.cmp(&a.date));
    picked
        .into_iter()
        .take(limit)
        .map(|t| TransferRow {
            id: t.id.clone(),
            date: t.date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            from: t.from,
            to: t.to,
            amount: t.amount,
        })
        .collect()
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(5);
    let state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;
    let data = recent(&state, limit);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|t| {
                vec![
                    t.date.clone(),
                    t.from.to_string(),
                    t.to.to_string(),
                    format_currency(&t.amount, locale),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "From", "To", "Amount"], rows));
    }
    Ok(())
}
