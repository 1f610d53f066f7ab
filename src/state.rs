// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory collections and the actions that change them.
//!
//! Category names are referenced by transactions and budgets by value only.
//! Renaming or removing a category never rewrites existing records.

use serde::{Deserialize, Serialize};

use crate::models::{
    Budget, ExpenseCategory, Transaction, Transfer, YearMonth, default_expense_categories,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub transfers: Vec<Transfer>,
    pub categories: Vec<ExpenseCategory>,
}

/// The persisted collection an action writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Budgets,
    Transfers,
    Categories,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTransaction(Transaction),
    RemoveTransaction { id: String },
    SetTransactions(Vec<Transaction>),
    AddTransfer(Transfer),
    SetTransfers(Vec<Transfer>),
    SetBudget(Budget),
    RemoveBudget { category: String, month: YearMonth },
    SetBudgets(Vec<Budget>),
    AddCategory { id: String, name: String },
    RemoveCategory { name: String },
    RenameCategory { old: String, new: String },
    SetCategories(Vec<ExpenseCategory>),
    ResetDefaultCategories,
}

impl Action {
    pub fn collection(&self) -> Collection {
        match self {
            Action::AddTransaction(_)
            | Action::RemoveTransaction { .. }
            | Action::SetTransactions(_) => Collection::Transactions,
            Action::AddTransfer(_) | Action::SetTransfers(_) => Collection::Transfers,
            Action::SetBudget(_) | Action::RemoveBudget { .. } | Action::SetBudgets(_) => {
                Collection::Budgets
            }
            Action::AddCategory { .. }
            | Action::RemoveCategory { .. }
            | Action::RenameCategory { .. }
            | Action::SetCategories(_)
            | Action::ResetDefaultCategories => Collection::Categories,
        }
    }
}

impl AppState {
    pub fn with_default_categories() -> Self {
        Self {
            categories: default_expense_categories(),
            ..Self::default()
        }
    }

    pub fn find_category(&self, name: &str) -> Option<&ExpenseCategory> {
        let lower = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == lower)
    }

    pub fn budgets_for(&self, month: YearMonth) -> impl Iterator<Item = &Budget> {
        self.budgets.iter().filter(move |b| b.month == month)
    }

    /// Applies `action`, returning whether anything changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::AddTransaction(tx) => {
                self.transactions.push(tx);
                true
            }
            Action::RemoveTransaction { id } => {
                let before = self.transactions.len();
                self.transactions.retain(|t| t.id != id);
                self.transactions.len() != before
            }
            Action::SetTransactions(list) => {
                self.transactions = list;
                true
            }
            Action::AddTransfer(t) => {
                self.transfers.push(t);
                true
            }
            Action::SetTransfers(list) => {
                self.transfers = list;
                true
            }
            Action::SetBudget(budget) => {
                match self
                    .budgets
                    .iter_mut()
                    .find(|b| b.category == budget.category && b.month == budget.month)
                {
                    Some(existing) => *existing = budget,
                    None => self.budgets.push(budget),
                }
                true
            }
            Action::RemoveBudget { category, month } => {
                let before = self.budgets.len();
                self.budgets
                    .retain(|b| !(b.category == category && b.month == month));
                self.budgets.len() != before
            }
            Action::SetBudgets(list) => {
                self.budgets = list;
                true
            }
            Action::AddCategory { id, name } => {
                if self.find_category(&name).is_some() {
                    return false;
                }
                self.categories.push(ExpenseCategory {
                    id,
                    name,
                    is_default: false,
                });
                true
            }
            Action::RemoveCategory { name } => {
                let before = self.categories.len();
                self.categories
                    .retain(|c| !(c.name == name && !c.is_default));
                self.categories.len() != before
            }
            Action::RenameCategory { old, new } => {
                match self.categories.iter_mut().find(|c| c.name == old) {
                    Some(c) if !c.is_default => {
                        c.name = new;
                        true
                    }
                    _ => false,
                }
            }
            Action::SetCategories(list) => {
                self.categories = list;
                true
            }
            Action::ResetDefaultCategories => {
                let custom: Vec<ExpenseCategory> = self
                    .categories
                    .drain(..)
                    .filter(|c| !c.is_default)
                    .collect();
                self.categories = default_expense_categories();
                self.categories.extend(custom);
                true
            }
        }
    }
}
