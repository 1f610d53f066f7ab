// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{amount, commit, month_or_current, optional, required};
use crate::calc::{category_spending, total_balance};
use crate::db;
use crate::models::{Budget, YearMonth};
use crate::state::{Action, AppState};
use crate::utils::{format_currency, maybe_print_json, parse_month, pretty_table};
use crate::validate;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;
    let month = month_or_current(sub)?;
    let category = required(sub, "category")?.to_string();
    let limit = amount(sub, "amount")?;
    validate::budget(&state, &category, limit)?;

    let summary = format!(
        "Budget set for {} / {} = {} (total balance {})",
        month,
        category,
        format_currency(&limit, locale),
        format_currency(&total_balance(&state.transactions, &[]), locale)
    );
    commit(
        conn,
        &mut state,
        Action::SetBudget(Budget {
            category,
            limit,
            month,
        }),
    )?;
    println!("{}", summary);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut state = db::load_state(conn)?;
    let month = month_or_current(sub)?;
    let category = required(sub, "category")?.to_string();
    let action = Action::RemoveBudget {
        category: category.clone(),
        month,
    };
    if !commit(conn, &mut state, action)? {
        bail!("No budget for {} in {}", category, month);
    }
    println!("Removed budget {} / {}", month, category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;
    let month = optional(sub, "month").map(parse_month).transpose()?;
    let mut budgets: Vec<&Budget> = state
        .budgets
        .iter()
        .filter(|b| month.is_none_or(|m| b.month == m))
        .collect();
    budgets.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.category.cmp(&b.category)));
    let data = budgets
        .into_iter()
        .map(|b| {
            vec![
                b.month.to_string(),
                b.category.clone(),
                format_currency(&b.limit, locale),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Category", "Limit"], data));
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub month: YearMonth,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    /// Share of the limit used, in percent, two decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub percent: Decimal,
    pub over_budget: bool,
}

pub fn status_rows(state: &AppState, month: YearMonth) -> Vec<BudgetStatus> {
    state
        .budgets_for(month)
        .map(|b| {
            let spent = category_spending(&state.transactions, &b.category, b.month);
            let percent = if b.limit.is_zero() {
                Decimal::ZERO
            } else {
                (spent / b.limit * Decimal::ONE_HUNDRED).round_dp(2)
            };
            BudgetStatus {
                category: b.category.clone(),
                month: b.month,
                limit: b.limit,
                spent,
                percent,
                over_budget: spent > b.limit,
            }
        })
        .collect()
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = db::load_state(conn)?;
    let locale = db::load_settings(conn)?.locale;
    let month = month_or_current(sub)?;
    let data = status_rows(&state, month);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    format_currency(&s.spent, locale),
                    format_currency(&s.limit, locale),
                    format!("{}%", s.percent),
                    if s.over_budget { "OVER".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Limit", "Used", ""], rows)
        );
    }
    Ok(())
}
