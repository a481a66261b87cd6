//! Read boundary between the engine and the record store.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::{ItemId, SnapshotId};
use stockcast_inventory::Item;

use crate::config::ForecastWindow;
use crate::error::ForecastError;
use crate::replenishment::horizon_end;

/// A snapshot reduced to what the usage estimator needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotObservation {
    pub snapshot_id: SnapshotId,
    pub item_id: ItemId,
    pub date: NaiveDate,
    pub total_units: i64,
}

/// Units arriving for one item inside the horizon, summed over deliveries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingUnits {
    pub item_id: ItemId,
    pub total_units: i64,
}

/// Most recent count of one item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestStock {
    pub item_id: ItemId,
    pub current_stock: i64,
    pub last_date: NaiveDate,
}

/// Read-only access to the records a forecast needs.
///
/// Implemented by the record store; the engine never writes through it.
pub trait RecordReader: Send + Sync {
    fn items(&self) -> Result<Vec<Item>, ForecastError>;

    /// Snapshots dated on or after `cutoff`.
    fn snapshots_since(&self, cutoff: NaiveDate) -> Result<Vec<SnapshotObservation>, ForecastError>;

    /// Deliveries arriving in `(start_exclusive, end_inclusive]`, aggregated per item.
    fn deliveries_in_window(
        &self,
        start_exclusive: NaiveDate,
        end_inclusive: NaiveDate,
    ) -> Result<Vec<IncomingUnits>, ForecastError>;

    /// Latest snapshot per item (items never counted are absent).
    fn latest_stock(&self) -> Result<Vec<LatestStock>, ForecastError>;
}

impl<R> RecordReader for Arc<R>
where
    R: RecordReader + ?Sized,
{
    fn items(&self) -> Result<Vec<Item>, ForecastError> {
        (**self).items()
    }

    fn snapshots_since(&self, cutoff: NaiveDate) -> Result<Vec<SnapshotObservation>, ForecastError> {
        (**self).snapshots_since(cutoff)
    }

    fn deliveries_in_window(
        &self,
        start_exclusive: NaiveDate,
        end_inclusive: NaiveDate,
    ) -> Result<Vec<IncomingUnits>, ForecastError> {
        (**self).deliveries_in_window(start_exclusive, end_inclusive)
    }

    fn latest_stock(&self) -> Result<Vec<LatestStock>, ForecastError> {
        (**self).latest_stock()
    }
}

/// Everything one run reads, fetched once up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastInput {
    pub items: Vec<Item>,
    pub snapshots: Vec<SnapshotObservation>,
    pub incoming: Vec<IncomingUnits>,
    pub latest_stock: Vec<LatestStock>,
}

impl ForecastInput {
    /// Perform the four reads for a run anchored at `today`.
    pub fn read<R>(reader: &R, today: NaiveDate, window: ForecastWindow) -> Result<Self, ForecastError>
    where
        R: RecordReader + ?Sized,
    {
        Ok(Self {
            items: reader.items()?,
            snapshots: reader.snapshots_since(lookback_cutoff(today, window.lookback_days))?,
            incoming: reader.deliveries_in_window(today, horizon_end(today, window.horizon_days))?,
            latest_stock: reader.latest_stock()?,
        })
    }
}

/// First date inside the lookback window: `today - lookback_days`.
pub fn lookback_cutoff(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(chrono::Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}
