// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod transfers;
pub mod budgets;
pub mod categories;
pub mod reports;
pub mod importer;
pub mod exporter;
pub mod settings;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::info;

use crate::db;
use crate::models::YearMonth;
use crate::state::{Action, AppState};
use crate::utils::{local_timestamp, parse_date, parse_formatted_number, parse_month};

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn optional<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub(crate) fn amount(sub: &clap::ArgMatches, name: &str) -> Result<Decimal> {
    Ok(parse_formatted_number(required(sub, name)?))
}

pub(crate) fn month_or_current(sub: &clap::ArgMatches) -> Result<YearMonth> {
    match optional(sub, "month") {
        Some(m) => parse_month(m),
        None => Ok(YearMonth::current()),
    }
}

pub(crate) fn timestamp_or_now(sub: &clap::ArgMatches) -> Result<DateTime<Utc>> {
    match optional(sub, "date") {
        Some(d) => Ok(local_timestamp(parse_date(d)?)),
        None => Ok(Utc::now()),
    }
}

/// Applies `action` to `state` and persists the collection it touched.
pub(crate) fn commit(conn: &Connection, state: &mut AppState, action: Action) -> Result<bool> {
    let collection = action.collection();
    let changed = state.apply(action);
    if changed {
        db::save(conn, state, collection)?;
        info!(?collection, "state updated");
    }
    Ok(changed)
}
