//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable or stockable product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub sku: String,
    pub name: String,
    /// Stock-keeping unit of measure (e.g. "kg", "pcs")
    pub unit: String,
    /// Balances below this quantity appear in the low-stock report
    pub min_stock: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
