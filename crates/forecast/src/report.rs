//! Forecast output table.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::ItemId;
use stockcast_inventory::Area;

use crate::blend::RateSource;
use crate::replenishment::OrderDisplay;

/// Reorder recommendation for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub item_id: ItemId,
    pub name: String,
    pub area: Area,
    pub unit: String,
    /// Latest counted units, zero if the item was never counted.
    pub current_stock: i64,
    pub last_count_date: Option<NaiveDate>,
    pub safety_stock: u32,
    pub incoming_units: i64,
    /// Observed units/day before any occupancy scaling.
    pub empirical_rate: Option<f64>,
    /// `target / reference` occupancy applied to the observed rate (1.0 when unscaled).
    pub occupancy_factor: f64,
    pub theoretical_rate: Option<f64>,
    pub daily_rate: f64,
    pub rate_source: RateSource,
    pub projected_demand: f64,
    pub order_qty: f64,
    pub order_display: OrderDisplay,
    pub order_qty_display: String,
}

impl ForecastRow {
    pub fn needs_order(&self) -> bool {
        self.order_qty > 0.0
    }
}

/// Which kind of record pointed at a missing item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Snapshot,
    Delivery,
    LatestStock,
}

/// Non-fatal data-integrity finding, reported alongside the rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityWarning {
    /// A record references an item id with no master record; it was skipped.
    MissingMasterData { record: RecordKind, item_id: ItemId },
    /// An item's area has no configured profile; no theoretical rate for it.
    MissingAreaProfile { item_id: ItemId, area: Area },
}

impl core::fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IntegrityWarning::MissingMasterData { record, item_id } => {
                write!(f, "{record:?} references unknown item {item_id}")
            }
            IntegrityWarning::MissingAreaProfile { item_id, area } => {
                write!(f, "item {item_id} uses area {area} which has no profile")
            }
        }
    }
}

/// Home-screen counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub items_needing_order: usize,
    pub scheduled_deliveries: usize,
    pub total_items: usize,
}

/// Result of one forecast run.
///
/// `rows` are ordered by item id; use [`ForecastReport::urgent`] or
/// [`ForecastReport::ranked`] for purchasing views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub today: NaiveDate,
    pub lookback_days: u32,
    pub horizon_days: u32,
    pub rows: Vec<ForecastRow>,
    pub warnings: Vec<IntegrityWarning>,
}

impl ForecastReport {
    pub fn row(&self, item_id: ItemId) -> Option<&ForecastRow> {
        self.rows
            .binary_search_by(|r| r.item_id.cmp(&item_id))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Every item, largest order first; items needing nothing go last.
    pub fn ranked(&self) -> Vec<&ForecastRow> {
        let mut rows: Vec<&ForecastRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| rank(a, b));
        rows
    }

    /// Only items that need an order, largest first.
    pub fn urgent(&self) -> Vec<&ForecastRow> {
        let mut rows: Vec<&ForecastRow> = self.rows.iter().filter(|r| r.needs_order()).collect();
        rows.sort_by(|a, b| rank(a, b));
        rows
    }

    pub fn summary(&self, scheduled_deliveries: usize) -> ForecastSummary {
        ForecastSummary {
            items_needing_order: self.rows.iter().filter(|r| r.needs_order()).count(),
            scheduled_deliveries,
            total_items: self.rows.len(),
        }
    }
}

fn rank(a: &ForecastRow, b: &ForecastRow) -> Ordering {
    b.needs_order()
        .cmp(&a.needs_order())
        .then_with(|| b.order_qty.total_cmp(&a.order_qty))
        .then_with(|| a.item_id.cmp(&b.item_id))
}
