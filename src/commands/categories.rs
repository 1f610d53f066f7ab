// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use uuid::Uuid;

use super::{commit, required};
use crate::db;
use crate::error::LedgerError;
use crate::state::{Action, AppState};
use crate::utils::pretty_table;
use crate::validate;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut state = db::load_state(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = validate::category_name(&state, required(sub, "name")?, None)?.to_string();
            commit(
                conn,
                &mut state,
                Action::AddCategory {
                    id: Uuid::new_v4().to_string(),
                    name: name.clone(),
                },
            )?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let data = state
                .categories
                .iter()
                .map(|c| {
                    vec![
                        c.name.clone(),
                        if c.is_default { "default".into() } else { "custom".into() },
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Kind"], data));
        }
        Some(("rename", sub)) => {
            let old = required(sub, "from")?.to_string();
            let id = editable(&state, &old)?;
            let new = validate::category_name(&state, required(sub, "to")?, Some(id.as_str()))?.to_string();
            commit(
                conn,
                &mut state,
                Action::RenameCategory {
                    old: old.clone(),
                    new: new.clone(),
                },
            )?;
            println!("Renamed category '{}' -> '{}'", old, new);
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?.to_string();
            editable(&state, &name)?;
            commit(conn, &mut state, Action::RemoveCategory { name: name.clone() })?;
            println!("Removed category '{}'", name);
        }
        Some(("reset", _)) => {
            commit(conn, &mut state, Action::ResetDefaultCategories)?;
            println!("Default categories restored");
        }
        _ => {}
    }
    Ok(())
}

/// Id of the custom category called exactly `name`.
fn editable(state: &AppState, name: &str) -> Result<String, LedgerError> {
    match state.categories.iter().find(|c| c.name == name) {
        None => Err(LedgerError::CategoryNotFound(name.to_string())),
        Some(c) if c.is_default => Err(LedgerError::DefaultCategoryLocked(name.to_string())),
        Some(c) => Ok(c.id.clone()),
    }
}
