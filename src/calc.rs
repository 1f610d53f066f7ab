// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures: per-source balances, monthly and date-range totals,
//! category spending and trailing month chart series.
//!
//! Everything here is a pure fold over the collections passed in. Dates are
//! bucketed by the local calendar day; the `*_in` variants take an explicit
//! time zone.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::models::{FundSource, Transaction, Transfer, TxKind, YearMonth};
use crate::utils::Locale;

/// Income and expense sums for one scope. Never netted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
}

impl Totals {
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }

    fn add(&mut self, tx: &Transaction) {
        match tx.kind {
            TxKind::Income => self.income += tx.amount,
            TxKind::Expense => self.expenses += tx.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub months: Vec<String>,
    #[serde(with = "float_vec")]
    pub income_data: Vec<Decimal>,
    #[serde(with = "float_vec")]
    pub expense_data: Vec<Decimal>,
}

mod float_vec {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::Serializer;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(
        values: &[Decimal],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for v in values {
            seq.serialize_element(&v.to_f64().unwrap_or_default())?;
        }
        seq.end()
    }
}

pub const CHART_SCALE: i64 = 1_000_000;

pub fn balance(transactions: &[Transaction], transfers: &[Transfer], source: FundSource) -> Decimal {
    let from_transactions: Decimal = transactions
        .iter()
        .filter(|t| t.source == source)
        .map(Transaction::signed_amount)
        .sum();

    let from_transfers: Decimal = transfers
        .iter()
        .map(|t| {
            if t.from == source {
                -t.amount
            } else if t.to == source {
                t.amount
            } else {
                Decimal::ZERO
            }
        })
        .sum();

    from_transactions + from_transfers
}

/// Balance across every fund source. Transfers cancel out here.
pub fn total_balance(transactions: &[Transaction], transfers: &[Transfer]) -> Decimal {
    FundSource::ALL
        .iter()
        .map(|s| balance(transactions, transfers, *s))
        .sum()
}

pub fn monthly_totals(transactions: &[Transaction], year: i32, month0: u32) -> Totals {
    monthly_totals_in(transactions, year, month0, &Local)
}

pub fn monthly_totals_in<Tz: TimeZone>(
    transactions: &[Transaction],
    year: i32,
    month0: u32,
    tz: &Tz,
) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        let day = tx.date.with_timezone(tz).date_naive();
        if day.year() == year && day.month0() == month0 {
            totals.add(tx);
        }
    }
    totals
}

/// Totals for the whole days `start..=end`. An inverted range is empty.
pub fn date_range_totals(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> Totals {
    date_range_totals_in(transactions, start, end, &Local)
}

pub fn date_range_totals_in<Tz: TimeZone>(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    tz: &Tz,
) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        let day = tx.date.with_timezone(tz).date_naive();
        if start <= day && day <= end {
            totals.add(tx);
        }
    }
    totals
}

/// Expense total for `category` (exact, case-sensitive) within `month`.
pub fn category_spending(transactions: &[Transaction], category: &str, month: YearMonth) -> Decimal {
    category_spending_in(transactions, category, month, &Local)
}

pub fn category_spending_in<Tz: TimeZone>(
    transactions: &[Transaction],
    category: &str,
    month: YearMonth,
    tz: &Tz,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            t.kind == TxKind::Expense
                && t.category == category
                && month.contains(t.date.with_timezone(tz).date_naive())
        })
        .map(|t| t.amount)
        .sum()
}

pub fn chart_series(transactions: &[Transaction], months_count: u32, locale: Locale) -> ChartSeries {
    chart_series_at(transactions, months_count, YearMonth::current(), locale, &Local)
}

/// Trailing `months_count` months ending at `anchor`, oldest first, with
/// totals expressed in millions.
pub fn chart_series_at<Tz: TimeZone>(
    transactions: &[Transaction],
    months_count: u32,
    anchor: YearMonth,
    locale: Locale,
    tz: &Tz,
) -> ChartSeries {
    let scale = Decimal::from(CHART_SCALE);
    let mut series = ChartSeries {
        months: Vec::new(),
        income_data: Vec::new(),
        expense_data: Vec::new(),
    };
    for back in (0..months_count).rev() {
        let month = anchor.minus_months(back);
        let totals = monthly_totals_in(transactions, month.year(), month.month0(), tz);
        series.months.push(locale.month_short(month.month0()).to_string());
        series.income_data.push(totals.income / scale);
        series.expense_data.push(totals.expenses / scale);
    }
    series
}

/// Quick picks for the date-range report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Today,
    ThisWeek,
    ThisMonth,
    LastMonth,
}

impl RangePreset {
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            RangePreset::Today => (today, today),
            RangePreset::ThisWeek => {
                // weeks start on Sunday
                let back = today.weekday().num_days_from_sunday() as i64;
                (today - Duration::days(back), today)
            }
            RangePreset::ThisMonth => (YearMonth::of(today).first_day(), today),
            RangePreset::LastMonth => {
                let last = YearMonth::of(today).minus_months(1);
                (last.first_day(), last.last_day())
            }
        }
    }
}

impl FromStr for RangePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "today" => Ok(RangePreset::Today),
            "this-week" => Ok(RangePreset::ThisWeek),
            "this-month" => Ok(RangePreset::ThisMonth),
            "last-month" => Ok(RangePreset::LastMonth),
            other => Err(anyhow!(
                "Unknown preset '{}', expected today, this-week, this-month or last-month",
                other
            )),
        }
    }
}
