//! Domain models for the Retail Stock Ledger platform

mod product;
mod stock;
mod store;
mod warehouse;

pub use product::*;
pub use stock::*;
pub use store::*;
pub use warehouse::*;
