//! Validation utilities and pure ledger rules for the Stock Ledger platform
//!
//! The decision logic here is deliberately separated from the persistence
//! layer so the rules can be unit tested without a database.

use rust_decimal::Decimal;
use uuid::Uuid;

// ============================================================================
// Quantity Validations
// ============================================================================

/// Validate a stock-in/stock-out quantity (must be strictly positive)
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a stock-take physical count (zero is a valid observation)
pub fn validate_physical_count(count: Decimal) -> Result<(), &'static str> {
    if count < Decimal::ZERO {
        return Err("Physical count cannot be negative");
    }
    Ok(())
}

/// Validate an optional per-unit cost
pub fn validate_cost_per_unit(cost: Option<Decimal>) -> Result<(), &'static str> {
    if let Some(c) = cost {
        if c < Decimal::ZERO {
            return Err("Cost per unit cannot be negative");
        }
    }
    Ok(())
}

/// Validate a store code: lowercase alphanumeric plus hyphens, non-empty
pub fn validate_store_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > 32 {
        return Err("Store code must be 1-32 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Store code may only contain lowercase letters, digits and hyphens");
    }
    Ok(())
}

// ============================================================================
// Batch Lot Rules
// ============================================================================

/// Whether a stock-in merges into an existing lot or creates a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchDisposition {
    /// Same batch key already tracked; add to that lot
    MergeInto(Uuid),
    /// No batch number, or first receipt for this batch key
    CreateNew,
}

/// Decide lot handling for a stock-in.
///
/// `existing_lot` is the lot already recorded for the same
/// (store, product, warehouse, batch_number) key, if any. Receipts without a
/// batch number are never merged: each one is its own lot.
pub fn batch_disposition(
    batch_number: Option<&str>,
    existing_lot: Option<Uuid>,
) -> BatchDisposition {
    match (batch_number, existing_lot) {
        (Some(_), Some(lot_id)) => BatchDisposition::MergeInto(lot_id),
        _ => BatchDisposition::CreateNew,
    }
}

/// Adjustment recorded by a stock-take: observed count minus current balance
pub fn stock_take_delta(physical_count: Decimal, current_balance: Decimal) -> Decimal {
    physical_count - current_balance
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(dec("0.1")).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(dec("-5")).is_err());
    }

    #[test]
    fn physical_count_allows_zero() {
        assert!(validate_physical_count(Decimal::ZERO).is_ok());
        assert!(validate_physical_count(dec("-0.01")).is_err());
    }

    #[test]
    fn cost_per_unit_optional_but_non_negative() {
        assert!(validate_cost_per_unit(None).is_ok());
        assert!(validate_cost_per_unit(Some(Decimal::ZERO)).is_ok());
        assert!(validate_cost_per_unit(Some(dec("-1"))).is_err());
    }

    #[test]
    fn store_code_format() {
        assert!(validate_store_code("bkk-01").is_ok());
        assert!(validate_store_code("").is_err());
        assert!(validate_store_code("BKK").is_err());
        assert!(validate_store_code("has space").is_err());
    }

    #[test]
    fn batch_merges_only_when_lot_exists() {
        let lot = Uuid::new_v4();
        assert_eq!(
            batch_disposition(Some("B1"), Some(lot)),
            BatchDisposition::MergeInto(lot)
        );
        assert_eq!(
            batch_disposition(Some("B1"), None),
            BatchDisposition::CreateNew
        );
    }

    #[test]
    fn unbatched_receipts_never_merge() {
        // A lot id without a batch number means the lookup was over-broad;
        // the decision still creates a new lot.
        assert_eq!(
            batch_disposition(None, Some(Uuid::new_v4())),
            BatchDisposition::CreateNew
        );
        assert_eq!(batch_disposition(None, None), BatchDisposition::CreateNew);
    }

    #[test]
    fn take_delta_signs() {
        assert_eq!(stock_take_delta(dec("20"), dec("12")), dec("8"));
        assert_eq!(stock_take_delta(dec("5"), dec("12")), dec("-7"));
        assert_eq!(stock_take_delta(dec("12"), dec("12")), Decimal::ZERO);
    }
}
