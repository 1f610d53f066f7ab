// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::calc::{balance, total_balance};
use crate::error::LedgerError;
use crate::models::{FundSource, INCOME_CATEGORIES, MAX_AMOUNT, TxKind};
use crate::state::AppState;

pub fn transaction(
    state: &AppState,
    kind: TxKind,
    amount: Decimal,
    category: &str,
) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::MissingField("amount"));
    }
    if amount.is_sign_negative() {
        return Err(LedgerError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge);
    }
    if category.trim().is_empty() {
        return Err(LedgerError::MissingField("category"));
    }
    let known = match kind {
        TxKind::Income => INCOME_CATEGORIES.contains(&category),
        TxKind::Expense => state.categories.iter().any(|c| c.name == category),
    };
    if !known {
        return Err(LedgerError::UnknownCategory(category.to_string()));
    }
    Ok(())
}

/// Transfers may not overdraw the origin source.
pub fn transfer(
    state: &AppState,
    from: FundSource,
    to: FundSource,
    amount: Decimal,
) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge);
    }
    if from == to {
        return Err(LedgerError::SameSource);
    }
    let available = balance(&state.transactions, &state.transfers, from);
    if amount > available {
        return Err(LedgerError::InsufficientBalance {
            fund: from,
            available,
        });
    }
    Ok(())
}

/// A budget limit is capped by the balance held across all sources,
/// computed from transactions alone.
pub fn budget(state: &AppState, category: &str, limit: Decimal) -> Result<(), LedgerError> {
    if category.trim().is_empty() {
        return Err(LedgerError::MissingField("category"));
    }
    if limit <= Decimal::ZERO {
        return Err(LedgerError::MissingField("limit"));
    }
    if limit > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge);
    }
    if !state.categories.iter().any(|c| c.name == category) {
        return Err(LedgerError::UnknownCategory(category.to_string()));
    }
    let total = total_balance(&state.transactions, &[]);
    if limit > total {
        return Err(LedgerError::BudgetExceedsBalance { total });
    }
    Ok(())
}

/// Returns the trimmed name when it is usable as a new category name.
/// `except_id` skips the category being renamed.
pub fn category_name<'a>(
    state: &AppState,
    name: &'a str,
    except_id: Option<&str>,
) -> Result<&'a str, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::MissingField("name"));
    }
    let lower = name.to_lowercase();
    let clash = state
        .categories
        .iter()
        .any(|c| c.name.to_lowercase() == lower && Some(c.id.as_str()) != except_id);
    if clash {
        return Err(LedgerError::DuplicateCategory(name.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::{TimeZone, Utc};

    fn funded_state() -> AppState {
        let mut state = AppState::with_default_categories();
        state.transactions.push(Transaction {
            id: "t1".into(),
            kind: TxKind::Income,
            amount: Decimal::from(500_000),
            category: "Gaji".into(),
            source: FundSource::Bank,
            date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            description: None,
        });
        state
    }

    #[test]
    fn transfer_rules() {
        let state = funded_state();
        let bank = FundSource::Bank;
        let cash = FundSource::Cash;
        assert_eq!(
            transfer(&state, bank, bank, Decimal::from(10)),
            Err(LedgerError::SameSource)
        );
        assert_eq!(
            transfer(&state, bank, cash, Decimal::ZERO),
            Err(LedgerError::NonPositiveAmount)
        );
        assert_eq!(
            transfer(&state, cash, bank, Decimal::from(1)),
            Err(LedgerError::InsufficientBalance {
                fund: cash,
                available: Decimal::ZERO
            })
        );
        assert!(transfer(&state, bank, cash, Decimal::from(500_000)).is_ok());
    }

    #[test]
    fn budget_capped_by_total_balance() {
        let state = funded_state();
        assert!(budget(&state, "Makanan", Decimal::from(500_000)).is_ok());
        assert_eq!(
            budget(&state, "Makanan", Decimal::from(500_001)),
            Err(LedgerError::BudgetExceedsBalance {
                total: Decimal::from(500_000)
            })
        );
        assert_eq!(
            budget(&state, "", Decimal::from(1)),
            Err(LedgerError::MissingField("category"))
        );
    }

    #[test]
    fn transaction_categories_depend_on_kind() {
        let state = funded_state();
        assert!(transaction(&state, TxKind::Income, Decimal::from(1), "Bonus").is_ok());
        assert!(transaction(&state, TxKind::Expense, Decimal::from(1), "Hiburan").is_ok());
        assert_eq!(
            transaction(&state, TxKind::Expense, Decimal::from(1), "Bonus"),
            Err(LedgerError::UnknownCategory("Bonus".into()))
        );
        assert_eq!(
            transaction(&state, TxKind::Income, Decimal::ZERO, "Gaji"),
            Err(LedgerError::MissingField("amount"))
        );
    }

    #[test]
    fn amounts_above_the_ceiling_are_rejected() {
        let state = funded_state();
        let huge = MAX_AMOUNT + Decimal::ONE;
        assert!(transaction(&state, TxKind::Income, MAX_AMOUNT, "Gaji").is_ok());
        assert_eq!(
            transaction(&state, TxKind::Income, huge, "Gaji"),
            Err(LedgerError::AmountTooLarge)
        );
        assert_eq!(
            transfer(&state, FundSource::Bank, FundSource::Cash, huge),
            Err(LedgerError::AmountTooLarge)
        );
        assert_eq!(
            budget(&state, "Makanan", huge),
            Err(LedgerError::AmountTooLarge)
        );
    }

    #[test]
    fn category_names_are_unique_ignoring_case() {
        let state = funded_state();
        assert_eq!(
            category_name(&state, " tagihan ", None),
            Err(LedgerError::DuplicateCategory("tagihan".into()))
        );
        assert_eq!(category_name(&state, "  Kopi ", None), Ok("Kopi"));
        assert_eq!(
            category_name(&state, "  ", None),
            Err(LedgerError::MissingField("name"))
        );
        // renaming a category to a new casing of itself is allowed
        assert_eq!(category_name(&state, "TAGIHAN", Some("5")), Ok("TAGIHAN"));
    }
}
