//! Order quantity and its purchasing-unit rendering.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Absorbs float noise from `rate × horizon`: needs at or below it count as
/// covered, and unit displays subtract it before rounding up.
const QUANTITY_TOLERANCE: f64 = 1e-9;

/// Last arrival date counted as incoming: `today + horizon_days`.
pub fn horizon_end(today: NaiveDate, horizon_days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Whether a delivery arriving on `arrival` covers the horizon: strictly
/// after today, on or before the horizon end.
pub fn arrives_within(arrival: NaiveDate, today: NaiveDate, horizon_days: u32) -> bool {
    arrival > today && arrival <= horizon_end(today, horizon_days)
}

/// Units to order: demand plus safety buffer not already covered by stock on
/// hand and incoming deliveries. Never negative; residues within float noise
/// of zero are zero.
pub fn order_quantity(
    projected_demand: f64,
    safety_stock: u32,
    current_stock: i64,
    incoming_units: i64,
) -> f64 {
    let need =
        projected_demand + f64::from(safety_stock) - current_stock as f64 - incoming_units as f64;
    if need > QUANTITY_TOLERANCE { need } else { 0.0 }
}

/// How an order quantity is shown to a purchaser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderDisplay {
    NoOrder,
    /// Case equivalents, rounded to one decimal. Fractions are kept on
    /// purpose; a person decides how many cases to actually buy.
    Cases { cases: f64 },
    /// Whole units, when the item has no case size.
    Units { units: u64, unit: String },
}

impl OrderDisplay {
    pub fn for_quantity(order_qty: f64, case_size: u32, unit: &str) -> Self {
        if !(order_qty > 0.0) {
            return OrderDisplay::NoOrder;
        }
        if case_size > 0 {
            return OrderDisplay::Cases {
                cases: round_to_tenth(order_qty / f64::from(case_size)),
            };
        }
        OrderDisplay::Units {
            units: (order_qty - QUANTITY_TOLERANCE).ceil().max(1.0) as u64,
            unit: unit.trim().to_string(),
        }
    }
}

impl core::fmt::Display for OrderDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderDisplay::NoOrder => f.write_str("no order needed"),
            OrderDisplay::Cases { cases } => write!(f, "{cases:.1} CS equivalent"),
            OrderDisplay::Units { units, unit } if unit.is_empty() => write!(f, "{units}"),
            OrderDisplay::Units { units, unit } => write!(f, "{units} {unit}"),
        }
    }
}

/// Round half away from zero to one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
