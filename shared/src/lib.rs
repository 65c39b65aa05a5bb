//! Shared types and models for the Retail Stock Ledger platform
//!
//! This crate contains types shared between the backend service and other
//! components of the system. It carries no I/O dependencies so the ledger
//! rules it defines can be unit tested in isolation.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
