//! Stock ledger models
//!
//! The balance row is the unit of contention: one row per
//! (store, product, warehouse) key, mutated in place by every ledger
//! operation. Transactions are the append-only history behind it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockEntryType {
    /// Receipt, increasing balance
    In,
    /// Issue/consumption, decreasing balance
    Out,
    /// Physical count reconciliation, setting balance to an observed value
    Take,
}

impl StockEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockEntryType::In => "in",
            StockEntryType::Out => "out",
            StockEntryType::Take => "take",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(StockEntryType::In),
            "out" => Some(StockEntryType::Out),
            "take" => Some(StockEntryType::Take),
            _ => None,
        }
    }
}

/// Current stock balance for a (store, product, warehouse) key
///
/// Never deleted once created; quantity stays >= 0 after every committed
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBalance {
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub last_transaction_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only ledger entry
///
/// `resulting_quantity` is the balance quantity at the moment the entry was
/// committed; replaying deltas from zero reproduces the current balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: Uuid,
    /// Insertion order, strictly increasing across the store
    pub seq: i64,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub entry_type: StockEntryType,
    /// Signed: positive for IN, negative for OUT, either sign for TAKE
    pub quantity_delta: Decimal,
    pub resulting_quantity: Decimal,
    pub batch_number: Option<String>,
    pub note: Option<String>,
    pub cost_per_unit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// A batch-tracked receipt of stock
///
/// Stock-ins with the same batch number merge into one lot for traceability;
/// stock-ins without one always create a fresh lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLot {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub batch_number: Option<String>,
    pub quantity: Decimal,
    pub unit: String,
    pub cost_per_unit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A balance below its product's configured minimum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockItem {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub sku: String,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub min_stock: Decimal,
}

/// Result of a mutating ledger operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMutation {
    pub balance: StockBalance,
    pub transaction: StockTransaction,
}
