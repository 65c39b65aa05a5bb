//! HTTP handlers

mod health;
mod stock;

pub use health::*;
pub use stock::*;
