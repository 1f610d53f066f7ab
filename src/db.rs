// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence. Every collection is one JSON blob under its own key.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{DB_FILE, Settings};
use crate::state::{AppState, Collection};

pub const TRANSACTIONS_KEY: &str = "budgeting_transactions";
pub const BUDGETS_KEY: &str = "budgeting_budgets";
pub const TRANSFERS_KEY: &str = "budgeting_transfers";
pub const CATEGORIES_KEY: &str = "budgeting_expenses";
pub const SETTINGS_KEY: &str = "budgeting_settings";

pub fn db_path(data_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE))
}

pub fn open_or_init(data_dir: &Path) -> Result<Connection> {
    let path = db_path(data_dir)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn put_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Absent or unreadable data loads as an empty collection.
pub fn load_collection<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Vec<T>> {
    let Some(raw) = get_raw(conn, key)? else {
        debug!(key, "no stored data");
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!(key, count = items.len(), "loaded collection");
            Ok(items)
        }
        Err(err) => {
            warn!(key, error = %err, "stored data is malformed, treating as empty");
            Ok(Vec::new())
        }
    }
}

pub fn save_collection<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)
        .with_context(|| format!("Serialize collection {}", key))?;
    put_raw(conn, key, &json)?;
    debug!(key, count = items.len(), "saved collection");
    Ok(())
}

/// Loads every collection. Seeds the default categories on first use.
pub fn load_state(conn: &Connection) -> Result<AppState> {
    let mut state = AppState {
        transactions: load_collection(conn, TRANSACTIONS_KEY)?,
        budgets: load_collection(conn, BUDGETS_KEY)?,
        transfers: load_collection(conn, TRANSFERS_KEY)?,
        categories: load_collection(conn, CATEGORIES_KEY)?,
    };
    if state.categories.is_empty() {
        state.categories = AppState::with_default_categories().categories;
        save_collection(conn, CATEGORIES_KEY, &state.categories)?;
    }
    Ok(state)
}

pub fn save(conn: &Connection, state: &AppState, collection: Collection) -> Result<()> {
    match collection {
        Collection::Transactions => save_collection(conn, TRANSACTIONS_KEY, &state.transactions),
        Collection::Budgets => save_collection(conn, BUDGETS_KEY, &state.budgets),
        Collection::Transfers => save_collection(conn, TRANSFERS_KEY, &state.transfers),
        Collection::Categories => save_collection(conn, CATEGORIES_KEY, &state.categories),
    }
}

pub fn load_settings(conn: &Connection) -> Result<Settings> {
    let Some(raw) = get_raw(conn, SETTINGS_KEY)? else {
        return Ok(Settings::default());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(error = %err, "stored settings are malformed, using defaults");
        Settings::default()
    }))
}

pub fn save_settings(conn: &Connection, settings: &Settings) -> Result<()> {
    put_raw(conn, SETTINGS_KEY, &serde_json::to_string(settings)?)
}
