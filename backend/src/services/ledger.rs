//! Stock ledger service: stock-in, stock-out and stock-take against
//! per-(store, product, warehouse) balances with an append-only history.
//!
//! Every mutation runs in a single database transaction so the balance
//! update and the history entry commit together or not at all. Per-key
//! serialization rides on Postgres row locks: the additive balance upsert,
//! the guarded decrement and the FOR UPDATE read all take the key's row
//! lock, so concurrent operations on the same key apply one at a time while
//! different keys proceed in parallel. A caller that abandons a request
//! before commit leaves no trace; the open transaction rolls back on drop.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    LowStockItem, StockBalance, StockEntryType, StockLot, StockMutation, StockTransaction,
};
use crate::services::catalog::CatalogService;
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::{
    batch_disposition, stock_take_delta, validate_cost_per_unit, validate_physical_count,
    validate_quantity, BatchDisposition,
};

/// Stock ledger service
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
    catalog: CatalogService,
    conflict_retries: u32,
    conflict_backoff: Duration,
}

/// Input for a stock-in (receipt)
#[derive(Debug, Clone, Deserialize)]
pub struct StockInInput {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub note: Option<String>,
    pub batch_number: Option<String>,
    pub cost_per_unit: Option<Decimal>,
}

/// Input for a stock-out (issue/consumption)
#[derive(Debug, Clone, Deserialize)]
pub struct StockOutInput {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub note: Option<String>,
}

/// Input for a stock-take (physical count reconciliation)
#[derive(Debug, Clone, Deserialize)]
pub struct StockTakeInput {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub physical_count: Decimal,
    pub unit: String,
    pub note: Option<String>,
}

/// Filters for the transaction history query
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
    pub entry_type: Option<StockEntryType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Row for balance queries
#[derive(Debug, FromRow)]
struct BalanceRow {
    store_id: Uuid,
    product_id: Uuid,
    warehouse_id: Uuid,
    quantity: Decimal,
    unit: String,
    last_transaction_id: Option<Uuid>,
    updated_at: DateTime<Utc>,
}

impl From<BalanceRow> for StockBalance {
    fn from(r: BalanceRow) -> Self {
        StockBalance {
            store_id: r.store_id,
            product_id: r.product_id,
            warehouse_id: r.warehouse_id,
            quantity: r.quantity,
            unit: r.unit,
            last_transaction_id: r.last_transaction_id,
            updated_at: r.updated_at,
        }
    }
}

/// Row for transaction queries
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    seq: i64,
    store_id: Uuid,
    product_id: Uuid,
    warehouse_id: Uuid,
    entry_type: String,
    quantity_delta: Decimal,
    resulting_quantity: Decimal,
    batch_number: Option<String>,
    note: Option<String>,
    cost_per_unit: Option<Decimal>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for StockTransaction {
    type Error = AppError;

    fn try_from(r: TransactionRow) -> Result<Self, Self::Error> {
        let entry_type = StockEntryType::from_str(&r.entry_type).ok_or_else(|| {
            AppError::Internal(format!("Unknown stock entry type '{}'", r.entry_type))
        })?;
        Ok(StockTransaction {
            id: r.id,
            seq: r.seq,
            store_id: r.store_id,
            product_id: r.product_id,
            warehouse_id: r.warehouse_id,
            entry_type,
            quantity_delta: r.quantity_delta,
            resulting_quantity: r.resulting_quantity,
            batch_number: r.batch_number,
            note: r.note,
            cost_per_unit: r.cost_per_unit,
            created_at: r.created_at,
        })
    }
}

/// Row for lot queries
#[derive(Debug, FromRow)]
struct LotRow {
    id: Uuid,
    store_id: Uuid,
    product_id: Uuid,
    warehouse_id: Uuid,
    batch_number: Option<String>,
    quantity: Decimal,
    unit: String,
    cost_per_unit: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LotRow> for StockLot {
    fn from(r: LotRow) -> Self {
        StockLot {
            id: r.id,
            store_id: r.store_id,
            product_id: r.product_id,
            warehouse_id: r.warehouse_id,
            batch_number: r.batch_number,
            quantity: r.quantity,
            unit: r.unit,
            cost_per_unit: r.cost_per_unit,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Row for the low-stock report
#[derive(Debug, FromRow)]
struct LowStockRow {
    product_id: Uuid,
    warehouse_id: Uuid,
    sku: String,
    product_name: String,
    quantity: Decimal,
    unit: String,
    min_stock: Decimal,
}

impl From<LowStockRow> for LowStockItem {
    fn from(r: LowStockRow) -> Self {
        LowStockItem {
            product_id: r.product_id,
            warehouse_id: r.warehouse_id,
            sku: r.sku,
            product_name: r.product_name,
            quantity: r.quantity,
            unit: r.unit,
            min_stock: r.min_stock,
        }
    }
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool, config: &LedgerConfig) -> Self {
        let catalog = CatalogService::new(db.clone());
        Self {
            db,
            catalog,
            conflict_retries: config.conflict_retries,
            conflict_backoff: Duration::from_millis(config.conflict_backoff_ms),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Record a stock receipt, merging into an existing batch lot when the
    /// batch key matches.
    pub async fn stock_in(&self, store_id: Uuid, input: StockInInput) -> AppResult<StockMutation> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_cost_per_unit(input.cost_per_unit).map_err(|msg| AppError::Validation {
            field: "cost_per_unit".to_string(),
            message: msg.to_string(),
        })?;
        self.ensure_scope(store_id, input.product_id, input.warehouse_id, &input.unit)
            .await?;

        let mut attempt = 0;
        loop {
            match self.stock_in_once(store_id, &input).await {
                Err(e) if e.is_retryable_conflict() && attempt < self.conflict_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, "stock_in hit a serialization conflict, retrying");
                    tokio::time::sleep(self.conflict_backoff * attempt).await;
                }
                other => return other.map_err(|e| e.surface_conflict("stock_in")),
            }
        }
    }

    /// Issue stock. The sufficiency check and the decrement are one guarded
    /// UPDATE, so a concurrent stock-out can never drive the balance negative.
    pub async fn stock_out(
        &self,
        store_id: Uuid,
        input: StockOutInput,
    ) -> AppResult<StockMutation> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;
        self.ensure_scope(store_id, input.product_id, input.warehouse_id, &input.unit)
            .await?;

        let mut attempt = 0;
        loop {
            match self.stock_out_once(store_id, &input).await {
                Err(e) if e.is_retryable_conflict() && attempt < self.conflict_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, "stock_out hit a serialization conflict, retrying");
                    tokio::time::sleep(self.conflict_backoff * attempt).await;
                }
                other => return other.map_err(|e| e.surface_conflict("stock_out")),
            }
        }
    }

    /// Reconcile a balance against a physical count. The recorded delta is
    /// the adjustment magnitude (may be positive, negative or zero).
    pub async fn stock_take(
        &self,
        store_id: Uuid,
        input: StockTakeInput,
    ) -> AppResult<StockMutation> {
        validate_physical_count(input.physical_count).map_err(|msg| AppError::Validation {
            field: "physical_count".to_string(),
            message: msg.to_string(),
        })?;
        self.ensure_scope(store_id, input.product_id, input.warehouse_id, &input.unit)
            .await?;

        let mut attempt = 0;
        loop {
            match self.stock_take_once(store_id, &input).await {
                Err(e) if e.is_retryable_conflict() && attempt < self.conflict_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, "stock_take hit a serialization conflict, retrying");
                    tokio::time::sleep(self.conflict_backoff * attempt).await;
                }
                other => return other.map_err(|e| e.surface_conflict("stock_take")),
            }
        }
    }

    async fn stock_in_once(&self, store_id: Uuid, input: &StockInInput) -> AppResult<StockMutation> {
        let mut tx = self.db.begin().await?;

        // The additive upsert takes the key's row lock, serializing every
        // concurrent operation on the same (store, product, warehouse).
        let resulting_quantity = sqlx::query_scalar::<_, Decimal>(
            r#"
            INSERT INTO stock_balances (store_id, product_id, warehouse_id, quantity, unit)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (store_id, product_id, warehouse_id)
            DO UPDATE SET quantity = stock_balances.quantity + $4, updated_at = NOW()
            RETURNING quantity
            "#,
        )
        .bind(store_id)
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .bind(input.quantity)
        .bind(&input.unit)
        .fetch_one(&mut *tx)
        .await?;

        // Lot handling happens under the balance lock, so the lookup cannot
        // race with another receipt for the same batch key.
        let existing_lot = match input.batch_number.as_deref() {
            Some(batch) => {
                sqlx::query_scalar::<_, Uuid>(
                    r#"
                    SELECT id FROM stock_lots
                    WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
                      AND batch_number = $4
                    FOR UPDATE
                    "#,
                )
                .bind(store_id)
                .bind(input.product_id)
                .bind(input.warehouse_id)
                .bind(batch)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        match batch_disposition(input.batch_number.as_deref(), existing_lot) {
            BatchDisposition::MergeInto(lot_id) => {
                sqlx::query(
                    r#"
                    UPDATE stock_lots
                    SET quantity = quantity + $2,
                        cost_per_unit = COALESCE($3, cost_per_unit),
                        updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(lot_id)
                .bind(input.quantity)
                .bind(input.cost_per_unit)
                .execute(&mut *tx)
                .await?;
            }
            BatchDisposition::CreateNew => {
                sqlx::query(
                    r#"
                    INSERT INTO stock_lots
                        (store_id, product_id, warehouse_id, batch_number, quantity, unit, cost_per_unit)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(store_id)
                .bind(input.product_id)
                .bind(input.warehouse_id)
                .bind(&input.batch_number)
                .bind(input.quantity)
                .bind(&input.unit)
                .bind(input.cost_per_unit)
                .execute(&mut *tx)
                .await?;
            }
        }

        let transaction = self
            .record_entry(
                &mut tx,
                store_id,
                input.product_id,
                input.warehouse_id,
                StockEntryType::In,
                input.quantity,
                resulting_quantity,
                input.batch_number.as_deref(),
                input.note.as_deref(),
                input.cost_per_unit,
            )
            .await?;

        let balance = self
            .stamp_balance(
                &mut tx,
                store_id,
                input.product_id,
                input.warehouse_id,
                transaction.id,
            )
            .await?;

        tx.commit().await?;

        Ok(StockMutation {
            balance,
            transaction,
        })
    }

    async fn stock_out_once(
        &self,
        store_id: Uuid,
        input: &StockOutInput,
    ) -> AppResult<StockMutation> {
        let mut tx = self.db.begin().await?;

        // Check-and-decrement in one statement: the quantity guard is
        // evaluated against the locked row, never against a stale read.
        let updated = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE stock_balances
            SET quantity = quantity - $4, updated_at = NOW()
            WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
              AND quantity >= $4
            RETURNING quantity
            "#,
        )
        .bind(store_id)
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .bind(input.quantity)
        .fetch_optional(&mut *tx)
        .await?;

        let resulting_quantity = match updated {
            Some(q) => q,
            None => {
                let available = sqlx::query_scalar::<_, Decimal>(
                    r#"
                    SELECT quantity FROM stock_balances
                    WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
                    "#,
                )
                .bind(store_id)
                .bind(input.product_id)
                .bind(input.warehouse_id)
                .fetch_optional(&mut *tx)
                .await?
                .unwrap_or(Decimal::ZERO);

                return Err(AppError::InsufficientStock {
                    requested: input.quantity,
                    available,
                });
            }
        };

        let transaction = self
            .record_entry(
                &mut tx,
                store_id,
                input.product_id,
                input.warehouse_id,
                StockEntryType::Out,
                -input.quantity,
                resulting_quantity,
                None,
                input.note.as_deref(),
                None,
            )
            .await?;

        let balance = self
            .stamp_balance(
                &mut tx,
                store_id,
                input.product_id,
                input.warehouse_id,
                transaction.id,
            )
            .await?;

        tx.commit().await?;

        Ok(StockMutation {
            balance,
            transaction,
        })
    }

    async fn stock_take_once(
        &self,
        store_id: Uuid,
        input: &StockTakeInput,
    ) -> AppResult<StockMutation> {
        let mut tx = self.db.begin().await?;

        // Seed the row at zero for a never-touched key so the FOR UPDATE
        // read below always finds a row to lock. Two first-time counts on
        // the same key serialize on this insert instead of colliding on the
        // primary key.
        sqlx::query(
            r#"
            INSERT INTO stock_balances (store_id, product_id, warehouse_id, quantity, unit)
            VALUES ($1, $2, $3, 0, $4)
            ON CONFLICT (store_id, product_id, warehouse_id) DO NOTHING
            "#,
        )
        .bind(store_id)
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .bind(&input.unit)
        .execute(&mut *tx)
        .await?;

        let previous = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT quantity FROM stock_balances
            WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
            FOR UPDATE
            "#,
        )
        .bind(store_id)
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .fetch_one(&mut *tx)
        .await?;

        let delta = stock_take_delta(input.physical_count, previous);

        sqlx::query(
            r#"
            UPDATE stock_balances
            SET quantity = $4, updated_at = NOW()
            WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
            "#,
        )
        .bind(store_id)
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .bind(input.physical_count)
        .execute(&mut *tx)
        .await?;

        let transaction = self
            .record_entry(
                &mut tx,
                store_id,
                input.product_id,
                input.warehouse_id,
                StockEntryType::Take,
                delta,
                input.physical_count,
                None,
                input.note.as_deref(),
                None,
            )
            .await?;

        let balance = self
            .stamp_balance(
                &mut tx,
                store_id,
                input.product_id,
                input.warehouse_id,
                transaction.id,
            )
            .await?;

        tx.commit().await?;

        Ok(StockMutation {
            balance,
            transaction,
        })
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get the current balance for a key. An unknown but valid key yields a
    /// zero-quantity default, never an error.
    pub async fn get_balance(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        warehouse_id: Uuid,
    ) -> AppResult<StockBalance> {
        let product = self.catalog.get_product(store_id, product_id).await?;
        self.catalog.get_warehouse(store_id, warehouse_id).await?;

        let row = sqlx::query_as::<_, BalanceRow>(
            r#"
            SELECT store_id, product_id, warehouse_id, quantity, unit, last_transaction_id, updated_at
            FROM stock_balances
            WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(warehouse_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(match row {
            Some(r) => r.into(),
            None => StockBalance {
                store_id,
                product_id,
                warehouse_id,
                quantity: Decimal::ZERO,
                unit: product.unit,
                last_transaction_id: None,
                updated_at: Utc::now(),
            },
        })
    }

    /// Paginated transaction history, newest first with insertion-order
    /// tie-break for entries sharing a timestamp.
    pub async fn get_transaction_history(
        &self,
        store_id: Uuid,
        filter: HistoryFilter,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<StockTransaction>> {
        let pagination = pagination.clamped();
        let entry_type = filter.entry_type.map(|t| t.as_str());

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM stock_transactions
            WHERE store_id = $1
              AND ($2::uuid IS NULL OR product_id = $2)
              AND ($3::uuid IS NULL OR warehouse_id = $3)
              AND ($4::varchar IS NULL OR entry_type = $4)
              AND ($5::date IS NULL OR created_at >= $5::date)
              AND ($6::date IS NULL OR created_at < $6::date + 1)
            "#,
        )
        .bind(store_id)
        .bind(filter.product_id)
        .bind(filter.warehouse_id)
        .bind(entry_type)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, seq, store_id, product_id, warehouse_id, entry_type, quantity_delta,
                   resulting_quantity, batch_number, note, cost_per_unit, created_at
            FROM stock_transactions
            WHERE store_id = $1
              AND ($2::uuid IS NULL OR product_id = $2)
              AND ($3::uuid IS NULL OR warehouse_id = $3)
              AND ($4::varchar IS NULL OR entry_type = $4)
              AND ($5::date IS NULL OR created_at >= $5::date)
              AND ($6::date IS NULL OR created_at < $6::date + 1)
            ORDER BY created_at DESC, seq ASC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(store_id)
        .bind(filter.product_id)
        .bind(filter.warehouse_id)
        .bind(entry_type)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(i64::from(pagination.per_page))
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let data = rows
            .into_iter()
            .map(StockTransaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse {
            pagination: PaginationMeta::new(&pagination, total_items as u64),
            data,
        })
    }

    /// List batch lots for a store, newest first
    pub async fn get_lots(
        &self,
        store_id: Uuid,
        product_id: Option<Uuid>,
        warehouse_id: Option<Uuid>,
    ) -> AppResult<Vec<StockLot>> {
        let rows = sqlx::query_as::<_, LotRow>(
            r#"
            SELECT id, store_id, product_id, warehouse_id, batch_number, quantity, unit,
                   cost_per_unit, created_at, updated_at
            FROM stock_lots
            WHERE store_id = $1
              AND ($2::uuid IS NULL OR product_id = $2)
              AND ($3::uuid IS NULL OR warehouse_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Balances below their product's configured minimum
    pub async fn get_low_stock_report(
        &self,
        store_id: Uuid,
        warehouse_id: Option<Uuid>,
    ) -> AppResult<Vec<LowStockItem>> {
        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT b.product_id, b.warehouse_id, p.sku, p.name AS product_name,
                   b.quantity, b.unit, p.min_stock
            FROM stock_balances b
            JOIN products p ON p.id = b.product_id
            WHERE b.store_id = $1
              AND ($2::uuid IS NULL OR b.warehouse_id = $2)
              AND b.quantity < p.min_stock
            ORDER BY p.name, b.warehouse_id
            "#,
        )
        .bind(store_id)
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Validate that the product and warehouse belong to the store, and that
    /// the supplied unit matches the product's stock-keeping unit.
    async fn ensure_scope(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        warehouse_id: Uuid,
        unit: &str,
    ) -> AppResult<()> {
        let product = self.catalog.get_product(store_id, product_id).await?;
        self.catalog.get_warehouse(store_id, warehouse_id).await?;

        if product.unit != unit {
            return Err(AppError::Validation {
                field: "unit".to_string(),
                message: format!(
                    "Unit '{}' does not match product unit '{}'",
                    unit, product.unit
                ),
            });
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn record_entry(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        store_id: Uuid,
        product_id: Uuid,
        warehouse_id: Uuid,
        entry_type: StockEntryType,
        quantity_delta: Decimal,
        resulting_quantity: Decimal,
        batch_number: Option<&str>,
        note: Option<&str>,
        cost_per_unit: Option<Decimal>,
    ) -> AppResult<StockTransaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO stock_transactions
                (store_id, product_id, warehouse_id, entry_type, quantity_delta,
                 resulting_quantity, batch_number, note, cost_per_unit)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, seq, store_id, product_id, warehouse_id, entry_type, quantity_delta,
                      resulting_quantity, batch_number, note, cost_per_unit, created_at
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(warehouse_id)
        .bind(entry_type.as_str())
        .bind(quantity_delta)
        .bind(resulting_quantity)
        .bind(batch_number)
        .bind(note)
        .bind(cost_per_unit)
        .fetch_one(&mut **tx)
        .await?;

        row.try_into()
    }

    /// Point the balance at the entry that produced it and return the final
    /// committed row.
    async fn stamp_balance(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        store_id: Uuid,
        product_id: Uuid,
        warehouse_id: Uuid,
        transaction_id: Uuid,
    ) -> AppResult<StockBalance> {
        let row = sqlx::query_as::<_, BalanceRow>(
            r#"
            UPDATE stock_balances
            SET last_transaction_id = $4
            WHERE store_id = $1 AND product_id = $2 AND warehouse_id = $3
            RETURNING store_id, product_id, warehouse_id, quantity, unit, last_transaction_id, updated_at
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(warehouse_id)
        .bind(transaction_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row.into())
    }
}
