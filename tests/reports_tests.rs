// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{conn, run};
use dompet::calc::chart_series;
use dompet::db;
use dompet::models::YearMonth;
use dompet::utils::Locale;

#[test]
fn reports_run_on_empty_store() {
    let mut conn = conn();
    for args in [
        vec!["report", "balances"],
        vec!["report", "monthly", "--json"],
        vec!["report", "range"],
        vec!["report", "range", "--preset", "last-month"],
        vec!["report", "range", "--from", "2024-01-01", "--to", "2024-01-31", "--jsonl"],
        vec!["report", "chart", "--months", "3"],
    ] {
        run(&mut conn, &args).unwrap();
    }
}

#[test]
fn range_rejects_bad_input() {
    let mut conn = conn();
    assert!(run(&mut conn, &["report", "range", "--preset", "yesterday"]).is_err());
    assert!(run(&mut conn, &["report", "range", "--from", "2024-01-01"]).is_err());
    assert!(
        run(
            &mut conn,
            &["report", "range", "--from", "2024-01-01", "--to", "01/02/2024"],
        )
        .is_err()
    );
}

#[test]
fn config_set_persists_settings() {
    let mut conn = conn();
    assert_eq!(db::load_settings(&conn).unwrap().chart_months, 6);
    run(
        &mut conn,
        &["config", "set", "--locale", "en", "--chart-months", "12"],
    )
    .unwrap();
    let s = db::load_settings(&conn).unwrap();
    assert_eq!(s.locale, Locale::En);
    assert_eq!(s.chart_months, 12);
    assert!(run(&mut conn, &["config", "set", "--chart-months", "0"]).is_err());
    assert!(run(&mut conn, &["config", "set", "--chart-months", "121"]).is_err());
    assert!(
        run(
            &mut conn,
            &["config", "set", "--chart-months", "18446744073709551615"],
        )
        .is_err()
    );
    assert_eq!(db::load_settings(&conn).unwrap().chart_months, 12);
    assert!(run(&mut conn, &["config", "set", "--locale", "fr"]).is_err());
    run(&mut conn, &["config", "show"]).unwrap();
}

#[test]
fn chart_months_are_bounded() {
    let mut conn = conn();
    run(&mut conn, &["report", "chart", "--months", "120"]).unwrap();
    assert!(run(&mut conn, &["report", "chart", "--months", "0"]).is_err());
    assert!(run(&mut conn, &["report", "chart", "--months", "121"]).is_err());
}

#[test]
fn stored_oversized_chart_setting_is_clamped() {
    let mut conn = conn();
    db::put_raw(&conn, db::SETTINGS_KEY, r#"{"locale":"id","chartMonths":4000000000}"#).unwrap();
    run(&mut conn, &["report", "chart"]).unwrap();
}

#[test]
fn chart_ends_at_the_current_month() {
    let series = chart_series(&[], 6, Locale::Id);
    let current = YearMonth::current();
    assert_eq!(series.months.len(), 6);
    assert_eq!(
        series.months.last().map(String::as_str),
        Some(Locale::Id.month_short(current.month0()))
    );
    assert_eq!(
        series.months.first().map(String::as_str),
        Some(Locale::Id.month_short(current.minus_months(5).month0()))
    );
}
