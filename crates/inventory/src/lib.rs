//! Inventory domain module.
//!
//! This crate contains the beer record and its stock rules, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod beer;

pub use beer::{
    validate_amount, Beer, BeerType, NewBeer, StockAdjustment, MAX_TEXT_LEN,
};
