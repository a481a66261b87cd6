//! Empirical consumption rate from irregular manual counts.
//!
//! Model:
//! - Order counts by date (same-day counts by snapshot id, i.e. write order).
//! - Each consecutive pair of counts with a positive day gap and a positive
//!   stock decrease yields one sample `consumed / gap`.
//! - Pairs where stock rose (an unrecorded delivery or a correction) are
//!   dropped, not clipped.
//! - The rate is the mean of the samples; no samples means "unavailable".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::SnapshotId;

/// One count of an item, as seen by the estimator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageObservation {
    pub snapshot_id: SnapshotId,
    pub date: NaiveDate,
    pub total_units: i64,
}

/// Per-interval consumption samples (units/day), in date order.
pub fn daily_usage_samples(observations: &[UsageObservation]) -> Vec<f64> {
    let mut ordered = observations.to_vec();
    ordered.sort_by_key(|o| (o.date, o.snapshot_id));

    ordered
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let gap = (curr.date - prev.date).num_days();
            if gap <= 0 {
                return None;
            }
            let consumed = prev.total_units - curr.total_units;
            if consumed <= 0 {
                return None;
            }
            Some(consumed as f64 / gap as f64)
        })
        .collect()
}

/// Average daily consumption, or `None` when no interval is usable.
///
/// `None` is distinct from `Some(0.0)`: it means "no evidence", and the
/// blender falls back to the theoretical model.
pub fn estimate_daily_usage(observations: &[UsageObservation]) -> Option<f64> {
    let samples = daily_usage_samples(observations);
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}
