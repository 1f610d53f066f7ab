// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{month_or_current, optional};
use crate::calc::{
    RangePreset, Totals, balance, chart_series, date_range_totals, monthly_totals, total_balance,
};
use crate::config::MAX_CHART_MONTHS;
use crate::db;
use crate::models::FundSource;
use crate::utils::{format_currency, maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("range", sub)) => range(conn, sub)?,
        Some(("chart", sub)) => chart(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct BalanceRow {
    source: String,
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;
    let mut data: Vec<BalanceRow> = FundSource::ALL
        .iter()
        .map(|s| BalanceRow {
            source: s.to_string(),
            balance: balance(&state.transactions, &state.transfers, *s),
        })
        .collect();
    data.push(BalanceRow {
        source: "Total".into(),
        balance: total_balance(&state.transactions, &state.transfers),
    });
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| vec![r.source.clone(), format_currency(&r.balance, locale)])
            .collect();
        println!("{}", pretty_table(&["Source", "Balance"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct Summary {
    label: String,
    #[serde(flatten)]
    totals: Totals,
    #[serde(with = "rust_decimal::serde::float")]
    net: Decimal,
}

fn print_summary(sub: &clap::ArgMatches, summary: &Summary, conn: &Connection) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let locale = db::load_settings(conn)?.locale;
    if !maybe_print_json(json_flag, jsonl_flag, summary)? {
        let rows = vec![vec![
            summary.label.clone(),
            format_currency(&summary.totals.income, locale),
            format_currency(&summary.totals.expenses, locale),
            format_currency(&summary.net, locale),
        ]];
        println!(
            "{}",
            pretty_table(&["Period", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;
    let month = month_or_current(sub)?;
    let totals = monthly_totals(&state.transactions, month.year(), month.month0());
    let summary = Summary {
        label: format!("{} {}", locale.month_long(month.month0()), month.year()),
        totals,
        net: totals.net(),
    };
    print_summary(sub, &summary, conn)
}

fn range(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let (start, end) = match (optional(sub, "from"), optional(sub, "to")) {
        (Some(from), Some(to)) => (parse_date(from)?, parse_date(to)?),
        _ => {
            let preset: RangePreset = optional(sub, "preset").unwrap_or("this-month").parse()?;
            preset.range(Local::now().date_naive())
        }
    };
    let totals = date_range_totals(&state.transactions, start, end);
    let summary = Summary {
        label: format!("{} .. {}", start, end),
        totals,
        net: totals.net(),
    };
    print_summary(sub, &summary, conn)
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = db::load_state(conn)?;
    let settings = db::load_settings(conn)?;
    let months = sub
        .get_one::<u32>("months")
        .copied()
        .unwrap_or(settings.chart_months)
        .clamp(1, MAX_CHART_MONTHS);
    let series = chart_series(&state.transactions, months, settings.locale);
    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let rows = series
            .months
            .iter()
            .zip(series.income_data.iter().zip(series.expense_data.iter()))
            .map(|(m, (inc, exp))| vec![m.clone(), format!("{:.2}", inc), format!("{:.2}", exp)])
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income (jt)", "Expenses (jt)"], rows)
        );
    }
    Ok(())
}
