// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::FundSource;

/// Input rejected before it reaches the ledger.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount must not exceed {}", crate::models::MAX_AMOUNT)]
    AmountTooLarge,
    #[error("transfer source and destination must differ")]
    SameSource,
    #[error("insufficient balance in {fund}: available {available}")]
    InsufficientBalance {
        fund: FundSource,
        available: Decimal,
    },
    #[error("budget cannot exceed total balance ({total})")]
    BudgetExceedsBalance { total: Decimal },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("default category '{0}' cannot be changed")]
    DefaultCategoryLocked(String),
    #[error("category '{0}' not found")]
    CategoryNotFound(String),
    #[error("invalid import: {0}")]
    InvalidImport(String),
}
