//! Occupancy assumptions.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use stockcast_core::ValueObject;

use crate::error::ForecastError;

/// Fraction of rooms occupied, always stored normalized to `0.0..=1.0`.
///
/// Inputs may arrive as a fraction (`0.93`) or a percentage (`93`). Values up
/// to and including `1.0` are read as fractions; values in `(1.0, 100.0]` as
/// percentages.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Occupancy(pub(crate) f64);

impl ValueObject for Occupancy {}

impl Occupancy {
    pub const FULL: Occupancy = Occupancy(1.0);
    pub const EMPTY: Occupancy = Occupancy(0.0);

    pub fn from_fraction(fraction: f64) -> Result<Self, ForecastError> {
        if !(fraction.is_finite() && (0.0..=1.0).contains(&fraction)) {
            return Err(ForecastError::invalid_parameter(format!(
                "occupancy fraction must be within 0.0..=1.0, got {fraction}"
            )));
        }
        Ok(Self(fraction))
    }

    pub fn from_percent(percent: f64) -> Result<Self, ForecastError> {
        if !(percent.is_finite() && (0.0..=100.0).contains(&percent)) {
            return Err(ForecastError::invalid_parameter(format!(
                "occupancy percentage must be within 0..=100, got {percent}"
            )));
        }
        Ok(Self(percent / 100.0))
    }

    /// Accept either representation and normalize it to a fraction.
    pub fn normalize(value: f64) -> Result<Self, ForecastError> {
        if value.is_finite() && value > 1.0 {
            Self::from_percent(value)
        } else {
            Self::from_fraction(value)
        }
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl TryFrom<f64> for Occupancy {
    type Error = ForecastError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::normalize(value)
    }
}

impl From<Occupancy> for f64 {
    fn from(value: Occupancy) -> Self {
        value.0
    }
}

impl FromStr for Occupancy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (number, is_percent) = match raw.strip_suffix('%') {
            Some(n) => (n.trim(), true),
            None => (raw, false),
        };
        let value: f64 = number.parse().map_err(|_| {
            ForecastError::invalid_parameter(format!("occupancy is not a number: {raw:?}"))
        })?;
        if is_percent {
            Self::from_percent(value)
        } else {
            Self::normalize(value)
        }
    }
}

impl core::fmt::Display for Occupancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}
