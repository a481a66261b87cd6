//! Inventory records for hotel consumables.
//!
//! This crate holds the typed records the forecasting engine reads: item
//! master data, dated stock counts and scheduled deliveries. It contains
//! validation and the write-time unit derivation only (no IO, no storage).

pub mod area;
pub mod item;
pub mod movement;
pub mod packaging;

pub use area::Area;
pub use item::{Item, ItemDetails};
pub use movement::{Delivery, StockSnapshot};
pub use packaging::Packaging;
