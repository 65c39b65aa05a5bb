//! Database models for the Retail Stock Ledger service
//!
//! Re-exports models from the shared crate; persistence-specific row types
//! live next to the services that query them.

pub use shared::models::*;
