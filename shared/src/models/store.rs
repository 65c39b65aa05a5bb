//! Store (tenant) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered store on the platform
///
/// The store is the tenancy boundary: every product, warehouse, balance and
/// transaction belongs to exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    /// Short human-entered code used in URLs (e.g. "bkk-01")
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
