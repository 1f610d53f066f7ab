// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::YearMonth;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d]").expect("static regex"));

/// Display locale for numbers and month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Id,
    En,
}

const MONTHS_SHORT_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];
const MONTHS_SHORT_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_LONG_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];
const MONTHS_LONG_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl Locale {
    pub fn group_separator(&self) -> char {
        match self {
            Locale::Id => '.',
            Locale::En => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::Id => ',',
            Locale::En => '.',
        }
    }

    /// Short month label; `month0` is 0-based.
    pub fn month_short(&self, month0: u32) -> &'static str {
        let names = match self {
            Locale::Id => &MONTHS_SHORT_ID,
            Locale::En => &MONTHS_SHORT_EN,
        };
        names[(month0 % 12) as usize]
    }

    pub fn month_long(&self, month0: u32) -> &'static str {
        let names = match self {
            Locale::Id => &MONTHS_LONG_ID,
            Locale::En => &MONTHS_LONG_EN,
        };
        names[(month0 % 12) as usize]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Id => f.write_str("id"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" => Ok(Locale::Id),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(anyhow!("Unknown locale '{}', expected id or en", other)),
        }
    }
}

fn group_digits(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Keeps only the digits of `input` and groups them by thousands.
/// Returns an empty string when there are no digits.
pub fn format_number(input: &str, locale: Locale) -> String {
    let digits = NON_DIGIT.replace_all(input, "");
    if digits.is_empty() {
        return String::new();
    }
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    group_digits(trimmed, locale.group_separator())
}

/// Reads back a number produced by [`format_number`]. Anything without
/// digits (or too large to represent) is zero.
pub fn parse_formatted_number(input: &str) -> Decimal {
    let digits = NON_DIGIT.replace_all(input, "");
    Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}

pub fn format_amount(amount: &Decimal, locale: Locale) -> String {
    let rounded = amount.round_dp(3).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };
    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_digits(&int_part, locale.group_separator()));
    if let Some(f) = frac_part {
        out.push(locale.decimal_separator());
        out.push_str(&f);
    }
    out
}

pub fn format_currency(amount: &Decimal, locale: Locale) -> String {
    format!("Rp {}", format_amount(amount, locale))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    s.parse::<YearMonth>()
}

/// Timestamp for a transaction entered on `date`, keeping the current
/// local time of day the way a date picker does.
pub fn local_timestamp(date: NaiveDate) -> DateTime<Utc> {
    let now = Local::now();
    let at = date.and_time(now.time());
    Local
        .from_local_datetime(&at)
        .earliest()
        .or_else(|| {
            date.and_hms_opt(12, 0, 0)
                .and_then(|noon| Local.from_local_datetime(&noon).earliest())
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now.with_timezone(&Utc))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_digits_and_drops_noise() {
        assert_eq!(format_number("1500000", Locale::Id), "1.500.000");
        assert_eq!(format_number("Rp 12a34", Locale::Id), "1.234");
        assert_eq!(format_number("001000", Locale::En), "1,000");
        assert_eq!(format_number("000", Locale::Id), "0");
        assert_eq!(format_number("abc", Locale::Id), "");
        assert_eq!(format_number("999", Locale::Id), "999");
    }

    #[test]
    fn parse_formatted_number_reads_grouped_input() {
        assert_eq!(parse_formatted_number("1.500.000"), Decimal::from(1_500_000));
        assert_eq!(parse_formatted_number("1,500,000"), Decimal::from(1_500_000));
        assert_eq!(parse_formatted_number(""), Decimal::ZERO);
        assert_eq!(parse_formatted_number("Rp -"), Decimal::ZERO);
        assert_eq!(
            parse_formatted_number("99999999999999999999999999999999999"),
            Decimal::ZERO
        );
    }

    #[test]
    fn format_currency_keeps_sign_and_fraction() {
        assert_eq!(
            format_currency(&Decimal::from(1_000_000), Locale::Id),
            "Rp 1.000.000"
        );
        assert_eq!(
            format_currency(&Decimal::from(-50_000), Locale::Id),
            "Rp -50.000"
        );
        assert_eq!(format_currency(&Decimal::ZERO, Locale::Id), "Rp 0");
        assert_eq!(
            format_currency(&Decimal::new(123456789, 4), Locale::En),
            "Rp 12,345.679"
        );
        assert_eq!(format_currency(&Decimal::new(15, 1), Locale::Id), "Rp 1,5");
    }

    #[test]
    fn month_names_follow_locale() {
        assert_eq!(Locale::Id.month_short(7), "Agu");
        assert_eq!(Locale::En.month_short(7), "Aug");
        assert_eq!(Locale::Id.month_long(0), "Januari");
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
