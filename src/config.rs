// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::utils::Locale;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("id.dompet", "Dompet", "dompet"));

pub const DATA_DIR_ENV: &str = "DOMPET_DATA_DIR";
pub const LOG_ENV: &str = "DOMPET_LOG";
pub const DB_FILE: &str = "dompet.sqlite";
pub const DEFAULT_CHART_MONTHS: u32 = 6;
pub const MAX_CHART_MONTHS: u32 = 120;

/// User preferences persisted next to the collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub locale: Locale,
    pub chart_months: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            chart_months: DEFAULT_CHART_MONTHS,
        }
    }
}

/// Flag first, then `DOMPET_DATA_DIR`, then the platform data dir.
pub fn data_dir(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = flag.map(str::trim).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

/// Filter directive for the log subscriber.
pub fn log_filter(verbose: bool) -> String {
    if verbose {
        return "dompet=debug".to_string();
    }
    env::var(LOG_ENV).unwrap_or_else(|_| "warn".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_everything() {
        let dir = data_dir(Some(" /tmp/dompet-test ")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/dompet-test"));
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"locale":"en"}"#).unwrap();
        assert_eq!(s.locale, Locale::En);
        assert_eq!(s.chart_months, DEFAULT_CHART_MONTHS);
    }
}
