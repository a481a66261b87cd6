//! Stock movements: physical counts and inbound deliveries.
//!
//! Both records carry a denormalized `total_units`, derived from the item's
//! packaging when the record is written and never recomputed afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::{DeliveryId, DomainResult, Entity, ItemId, SnapshotId};

use crate::item::Item;

/// A dated physical count for one item.
///
/// Snapshots are append-only; a correction is a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub id: SnapshotId,
    pub item_id: ItemId,
    pub date: NaiveDate,
    pub qty_case: u32,
    pub qty_box: u32,
    pub total_units: i64,
    #[serde(default)]
    pub note: String,
}

impl StockSnapshot {
    /// Record a count, deriving `total_units` from the item's current packaging.
    pub fn record(
        id: SnapshotId,
        item: &Item,
        date: NaiveDate,
        qty_case: u32,
        qty_box: u32,
        note: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            item_id: item.id,
            date,
            qty_case,
            qty_box,
            total_units: item.packaging().total_units(qty_case, qty_box)?,
            note: note.into(),
        })
    }
}

impl Entity for StockSnapshot {
    type Id = SnapshotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A dated record of stock ordered and expected (or already received).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub item_id: ItemId,
    pub order_date: NaiveDate,
    pub arrival_date: NaiveDate,
    pub qty_case: u32,
    pub qty_box: u32,
    pub total_units: i64,
    #[serde(default)]
    pub note: String,
}

impl Delivery {
    /// Schedule a delivery, deriving `total_units` from the item's current packaging.
    pub fn schedule(
        id: DeliveryId,
        item: &Item,
        order_date: NaiveDate,
        arrival_date: NaiveDate,
        qty_case: u32,
        qty_box: u32,
        note: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            item_id: item.id,
            order_date,
            arrival_date,
            qty_case,
            qty_box,
            total_units: item.packaging().total_units(qty_case, qty_box)?,
            note: note.into(),
        })
    }
}

impl Entity for Delivery {
    type Id = DeliveryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
