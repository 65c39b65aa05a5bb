//! HTTP handlers for stock ledger endpoints
//!
//! All endpoints are scoped by the store code in the path; the store is
//! resolved first and every referenced product/warehouse is validated to
//! belong to it.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{StockBalance, StockEntryType, StockMutation, StockTransaction};
use crate::services::catalog::CatalogService;
use crate::services::ledger::{
    HistoryFilter, LedgerService, StockInInput, StockOutInput, StockTakeInput,
};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination};

fn ledger(state: &AppState) -> LedgerService {
    LedgerService::new(state.db.clone(), &state.config.ledger)
}

/// Record a stock receipt
pub async fn stock_in(
    State(state): State<AppState>,
    Path(store_code): Path<String>,
    Json(input): Json<StockInInput>,
) -> AppResult<Json<StockMutation>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;
    let mutation = ledger(&state).stock_in(store.id, input).await?;
    Ok(Json(mutation))
}

/// Issue stock
pub async fn stock_out(
    State(state): State<AppState>,
    Path(store_code): Path<String>,
    Json(input): Json<StockOutInput>,
) -> AppResult<Json<StockMutation>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;
    let mutation = ledger(&state).stock_out(store.id, input).await?;
    Ok(Json(mutation))
}

/// Reconcile a balance against a physical count
pub async fn stock_take(
    State(state): State<AppState>,
    Path(store_code): Path<String>,
    Json(input): Json<StockTakeInput>,
) -> AppResult<Json<StockMutation>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;
    let mutation = ledger(&state).stock_take(store.id, input).await?;
    Ok(Json(mutation))
}

/// Get the current balance for a (product, warehouse) key
pub async fn get_stock_balance(
    State(state): State<AppState>,
    Path((store_code, product_id, warehouse_id)): Path<(String, Uuid, Uuid)>,
) -> AppResult<Json<StockBalance>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;
    let balance = ledger(&state)
        .get_balance(store.id, product_id, warehouse_id)
        .await?;
    Ok(Json(balance))
}

/// Query parameters for the transaction history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
    pub entry_type: Option<StockEntryType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List transactions for a store, newest first
pub async fn list_stock_transactions(
    State(state): State<AppState>,
    Path(store_code): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<PaginatedResponse<StockTransaction>>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;

    let defaults = Pagination::default();
    let pagination = Pagination {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };
    let filter = HistoryFilter {
        product_id: query.product_id,
        warehouse_id: query.warehouse_id,
        entry_type: query.entry_type,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let page = ledger(&state)
        .get_transaction_history(store.id, filter, pagination)
        .await?;
    Ok(Json(page))
}

/// Query parameters for the lot listing
#[derive(Debug, Deserialize)]
pub struct LotsQuery {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
}

/// List batch lots for a store
pub async fn list_stock_lots(
    State(state): State<AppState>,
    Path(store_code): Path<String>,
    Query(query): Query<LotsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;
    let lots = ledger(&state)
        .get_lots(store.id, query.product_id, query.warehouse_id)
        .await?;
    Ok(Json(serde_json::json!({ "lots": lots })))
}

/// Query parameters for the low-stock report
#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub warehouse_id: Option<Uuid>,
}

/// Balances below their product's minimum stock threshold
pub async fn get_low_stock_report(
    State(state): State<AppState>,
    Path(store_code): Path<String>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let store = CatalogService::new(state.db.clone())
        .get_store_by_code(&store_code)
        .await?;
    let items = ledger(&state)
        .get_low_stock_report(store.id, query.warehouse_id)
        .await?;
    Ok(Json(serde_json::json!({ "items": items })))
}
