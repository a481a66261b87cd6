//! Item master data.

use serde::{Deserialize, Serialize};

use stockcast_core::{DomainError, DomainResult, Entity, ItemId};

use crate::area::Area;
use crate::packaging::Packaging;

/// Editable master-data fields of an item.
///
/// Used both to create an item and to revise an existing one. Numeric fields
/// default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDetails {
    pub name: String,
    pub area: Area,
    /// Display label for a single unit (e.g. "本", "pcs").
    pub unit: String,
    /// Expected consumption per occupied room per day. Zero disables the
    /// occupancy model for this item.
    pub per_room_rate: f64,
    #[serde(flatten)]
    pub packaging: Packaging,
    /// Units that must remain on hand after projected demand is met.
    pub safety_stock: u32,
}

impl ItemDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_area(mut self, area: Area) -> Self {
        self.area = area;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_per_room_rate(mut self, per_room_rate: f64) -> Self {
        self.per_room_rate = per_room_rate;
        self
    }

    pub fn with_packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }

    pub fn with_safety_stock(mut self, safety_stock: u32) -> Self {
        self.safety_stock = safety_stock;
        self
    }

    /// Check the master-data invariants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if !(self.per_room_rate.is_finite() && self.per_room_rate >= 0.0) {
            return Err(DomainError::validation(
                "per_room_rate must be a finite non-negative number",
            ));
        }
        Ok(())
    }
}

/// Master record for a consumable good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl Item {
    /// Build a validated item.
    pub fn new(id: ItemId, details: ItemDetails) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self { id, details })
    }

    /// Replace the editable fields, keeping identity.
    ///
    /// Existing snapshots and deliveries keep the `total_units` they were
    /// written with.
    pub fn revise(&mut self, details: ItemDetails) -> DomainResult<()> {
        details.validate()?;
        self.details = details;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn area(&self) -> Area {
        self.details.area
    }

    pub fn unit(&self) -> &str {
        &self.details.unit
    }

    pub fn per_room_rate(&self) -> f64 {
        self.details.per_room_rate
    }

    pub fn packaging(&self) -> Packaging {
        self.details.packaging
    }

    pub fn case_size(&self) -> u32 {
        self.details.packaging.case_size
    }

    pub fn safety_stock(&self) -> u32 {
        self.details.safety_stock
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
