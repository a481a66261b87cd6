//! Serialized record sets: `{ "items": [...], "snapshots": [...], "deliveries": [...] }`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use stockcast_inventory::{Delivery, Item, StockSnapshot};

use crate::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub items: Vec<Item>,
    pub snapshots: Vec<StockSnapshot>,
    pub deliveries: Vec<Delivery>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Dataset(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
