// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use super::required;
use crate::db::{self, BUDGETS_KEY, TRANSACTIONS_KEY, TRANSFERS_KEY};
use crate::error::LedgerError;
use crate::models::{Budget, MAX_AMOUNT, Transaction, Transfer};

/// Collections decoded from a backup, all or nothing.
#[derive(Debug)]
pub struct ImportSet {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub transfers: Vec<Transfer>,
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("data", sub)) => import_data(conn, sub),
        _ => Ok(()),
    }
}

fn field<T: DeserializeOwned>(doc: &mut Value, name: &'static str) -> Result<Vec<T>, LedgerError> {
    let raw = doc
        .get_mut(name)
        .filter(|v| v.is_array())
        .map(Value::take)
        .ok_or_else(|| LedgerError::InvalidImport(format!("missing '{}' list", name)))?;
    serde_json::from_value(raw).map_err(|e| LedgerError::InvalidImport(format!("{}: {}", name, e)))
}

/// Validates a backup document without touching the store.
pub fn parse_document(text: &str) -> Result<ImportSet, LedgerError> {
    let mut doc: Value = serde_json::from_str(text)
        .map_err(|e| LedgerError::InvalidImport(format!("not valid JSON: {}", e)))?;
    if !doc.is_object() {
        return Err(LedgerError::InvalidImport("expected a JSON object".into()));
    }
    for name in ["transactions", "budgets", "transfers"] {
        if !doc.get(name).is_some_and(Value::is_array) {
            return Err(LedgerError::InvalidImport(format!("missing '{}' list", name)));
        }
    }
    let set = ImportSet {
        transactions: field(&mut doc, "transactions")?,
        budgets: field(&mut doc, "budgets")?,
        transfers: field(&mut doc, "transfers")?,
    };
    let amounts = set
        .transactions
        .iter()
        .map(|t| t.amount)
        .chain(set.budgets.iter().map(|b| b.limit))
        .chain(set.transfers.iter().map(|t| t.amount));
    for amount in amounts {
        if amount.abs() > MAX_AMOUNT {
            return Err(LedgerError::InvalidImport(format!(
                "amount {} exceeds the maximum of {}",
                amount, MAX_AMOUNT
            )));
        }
    }
    Ok(set)
}

/// Replaces all three collections in one SQLite transaction.
pub fn apply(conn: &mut Connection, set: &ImportSet) -> Result<()> {
    let tx = conn.transaction()?;
    db::save_collection(&tx, TRANSACTIONS_KEY, &set.transactions)?;
    db::save_collection(&tx, BUDGETS_KEY, &set.budgets)?;
    db::save_collection(&tx, TRANSFERS_KEY, &set.transfers)?;
    tx.commit()?;
    info!(
        transactions = set.transactions.len(),
        budgets = set.budgets.len(),
        transfers = set.transfers.len(),
        "import applied"
    );
    Ok(())
}

fn import_data(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?;
    let text = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let set = parse_document(&text)?;
    if !sub.get_flag("yes") {
        bail!(
            "Importing {} replaces all transactions, budgets and transfers; rerun with --yes",
            path
        );
    }
    apply(conn, &set)?;
    println!(
        "Imported {} transactions, {} budgets, {} transfers from {}",
        set.transactions.len(),
        set.budgets.len(),
        set.transfers.len(),
        path
    );
    Ok(())
}
