//! `stockcast-core`: shared building blocks for the inventory records and the
//! forecasting engine.
//!
//! This crate contains **pure domain** primitives (no storage, no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DeliveryId, ItemId, SnapshotId};
pub use value_object::ValueObject;
