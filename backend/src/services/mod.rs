//! Business logic services

pub mod catalog;
pub mod ledger;
