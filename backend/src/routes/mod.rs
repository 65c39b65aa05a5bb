//! Route definitions for the Retail Stock Ledger service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stock ledger
        .nest("/stock", stock_routes())
}

/// Stock ledger routes, scoped by store code
fn stock_routes() -> Router<AppState> {
    Router::new()
        // Mutations
        .route("/:store_code/in", post(handlers::stock_in))
        .route("/:store_code/out", post(handlers::stock_out))
        .route("/:store_code/take", post(handlers::stock_take))
        // Reads
        .route(
            "/:store_code/balance/:product_id/:warehouse_id",
            get(handlers::get_stock_balance),
        )
        .route(
            "/:store_code/transactions",
            get(handlers::list_stock_transactions),
        )
        .route("/:store_code/lots", get(handlers::list_stock_lots))
        .route("/:store_code/low-stock", get(handlers::get_low_stock_report))
}
