// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::optional;
use crate::db;
use crate::utils::{Locale, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let s = db::load_settings(conn)?;
    let rows = vec![
        vec!["locale".to_string(), s.locale.to_string()],
        vec!["chart-months".to_string(), s.chart_months.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut s = db::load_settings(conn)?;
    if let Some(locale) = optional(sub, "locale") {
        s.locale = locale.parse::<Locale>()?;
    }
    if let Some(months) = sub.get_one::<u32>("chart-months") {
        s.chart_months = *months;
    }
    db::save_settings(conn, &s)?;
    println!("Settings saved (locale {}, chart months {})", s.locale, s.chart_months);
    Ok(())
}
