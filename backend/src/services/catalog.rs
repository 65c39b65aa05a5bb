//! Catalog lookup service for stores, products and warehouses
//!
//! The ledger only consumes this for tenancy validation: every product and
//! warehouse reference must belong to the requesting store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Product, Store, Warehouse};

/// Catalog service for resolving store-scoped entities
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct StoreRow {
    id: Uuid,
    code: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(r: StoreRow) -> Self {
        Store {
            id: r.id,
            code: r.code,
            name: r.name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    store_id: Uuid,
    sku: String,
    name: String,
    unit: String,
    min_stock: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            store_id: r.store_id,
            sku: r.sku,
            name: r.name,
            unit: r.unit,
            min_stock: r.min_stock,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct WarehouseRow {
    id: Uuid,
    store_id: Uuid,
    code: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WarehouseRow> for Warehouse {
    fn from(r: WarehouseRow) -> Self {
        Warehouse {
            id: r.id,
            store_id: r.store_id,
            code: r.code,
            name: r.name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Resolve a store by its URL code
    pub async fn get_store_by_code(&self, code: &str) -> AppResult<Store> {
        shared::validation::validate_store_code(code).map_err(|msg| AppError::Validation {
            field: "store_code".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, StoreRow>(
            "SELECT id, code, name, created_at, updated_at FROM stores WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Store".to_string()))?;

        Ok(row.into())
    }

    /// Get a product, verifying it belongs to the store
    pub async fn get_product(&self, store_id: Uuid, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, store_id, sku, name, unit, min_stock, created_at, updated_at
            FROM products
            WHERE id = $1 AND store_id = $2
            "#,
        )
        .bind(product_id)
        .bind(store_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Get a warehouse, verifying it belongs to the store
    pub async fn get_warehouse(&self, store_id: Uuid, warehouse_id: Uuid) -> AppResult<Warehouse> {
        let row = sqlx::query_as::<_, WarehouseRow>(
            r#"
            SELECT id, store_id, code, name, created_at, updated_at
            FROM warehouses
            WHERE id = $1 AND store_id = $2
            "#,
        )
        .bind(warehouse_id)
        .bind(store_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))?;

        Ok(row.into())
    }
}
