//! Run configuration and the area table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stockcast_core::ValueObject;
use stockcast_inventory::Area;

use crate::error::ForecastError;
use crate::occupancy::Occupancy;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 60;
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

pub const ENV_LOOKBACK_DAYS: &str = "STOCKCAST_LOOKBACK_DAYS";
pub const ENV_HORIZON_DAYS: &str = "STOCKCAST_HORIZON_DAYS";
/// Per-area occupancy percentages: `STD=80,HAK=50` (bare `1` is 1%, not 100%).
pub const ENV_OCCUPANCY: &str = "STOCKCAST_OCCUPANCY";
pub const ENV_EMPIRICAL_ADJUSTMENT: &str = "STOCKCAST_EMPIRICAL_ADJUSTMENT";

/// Room count and typical occupancy of one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaProfile {
    #[serde(default)]
    pub label: String,
    pub room_count: u32,
    /// Occupancy the historical consumption is assumed to reflect.
    pub reference_occupancy: Occupancy,
}

impl ValueObject for AreaProfile {}

impl AreaProfile {
    pub fn new(label: impl Into<String>, room_count: u32, reference_occupancy: Occupancy) -> Self {
        Self {
            label: label.into(),
            room_count,
            reference_occupancy,
        }
    }
}

/// Area code → profile, injected into the engine per deployment.
///
/// Serialized as a JSON object keyed by area code:
/// `{"STD": {"room_count": 225, "reference_occupancy": 93}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaTable(BTreeMap<Area, AreaProfile>);

impl AreaTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_profile(mut self, area: Area, profile: AreaProfile) -> Self {
        self.0.insert(area, profile);
        self
    }

    pub fn without(mut self, area: Area) -> Self {
        self.0.remove(&area);
        self
    }

    pub fn profile(&self, area: Area) -> Option<&AreaProfile> {
        self.0.get(&area)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Area, &AreaProfile)> {
        self.0.iter().map(|(a, p)| (*a, p))
    }

    pub fn from_json(json: &str) -> Result<Self, ForecastError> {
        serde_json::from_str(json)
            .map_err(|e| ForecastError::invalid_parameter(format!("area table: {e}")))
    }
}

impl Default for AreaTable {
    /// The property's layout: 238 rooms in total, 225 standard, 13 in the
    /// Hakata wing.
    fn default() -> Self {
        Self::empty()
            .with_profile(Area::All, AreaProfile::new("全客室", 238, Occupancy(0.90)))
            .with_profile(Area::Standard, AreaProfile::new("Standard", 225, Occupancy(0.93)))
            .with_profile(Area::Hakata, AreaProfile::new("Hakata", 13, Occupancy(0.70)))
    }
}

/// How the empirical rate reacts to an occupancy override.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmpiricalAdjustment {
    /// Use the observed rate as is.
    Unscaled,
    /// Re-project the observed rate by `target / reference` occupancy.
    #[default]
    OccupancyScaled,
}

impl core::str::FromStr for EmpiricalAdjustment {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unscaled" => Ok(Self::Unscaled),
            "occupancy_scaled" | "scaled" => Ok(Self::OccupancyScaled),
            other => Err(ForecastError::invalid_parameter(format!(
                "unknown empirical adjustment: {other:?}"
            ))),
        }
    }
}

/// Parameters for one forecast run.
///
/// Window lengths are kept signed so that a negative value coming from a
/// caller is reported as [`ForecastError::InvalidParameter`] rather than
/// wrapping silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Trailing days of snapshot history used for the empirical rate.
    pub lookback_days: i64,
    /// Days of demand to cover and of deliveries to count.
    pub horizon_days: i64,
    /// Expected occupancy per area; areas not listed use their reference value.
    pub occupancy_overrides: BTreeMap<Area, Occupancy>,
    pub empirical_adjustment: EmpiricalAdjustment,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            occupancy_overrides: BTreeMap::new(),
            empirical_adjustment: EmpiricalAdjustment::default(),
        }
    }
}

/// Validated window lengths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastWindow {
    pub lookback_days: u32,
    pub horizon_days: u32,
}

impl ForecastConfig {
    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn with_occupancy(mut self, area: Area, occupancy: Occupancy) -> Self {
        self.occupancy_overrides.insert(area, occupancy);
        self
    }

    pub fn with_empirical_adjustment(mut self, adjustment: EmpiricalAdjustment) -> Self {
        self.empirical_adjustment = adjustment;
        self
    }

    /// Validate the window lengths.
    pub fn window(&self) -> Result<ForecastWindow, ForecastError> {
        Ok(ForecastWindow {
            lookback_days: positive_days("lookback_days", self.lookback_days)?,
            horizon_days: positive_days("horizon_days", self.horizon_days)?,
        })
    }

    /// Load from `STOCKCAST_*` environment variables, defaulting unset ones.
    pub fn from_env() -> Result<Self, ForecastError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ForecastError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOOKBACK_DAYS) {
            config.lookback_days = parse_days(ENV_LOOKBACK_DAYS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HORIZON_DAYS) {
            config.horizon_days = parse_days(ENV_HORIZON_DAYS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_OCCUPANCY) {
            config.occupancy_overrides = parse_occupancy_overrides(&raw)?;
        }
        if let Some(raw) = lookup(ENV_EMPIRICAL_ADJUSTMENT) {
            config.empirical_adjustment = raw.parse()?;
        }

        config.window()?;
        Ok(config)
    }
}

fn positive_days(name: &str, days: i64) -> Result<u32, ForecastError> {
    if days <= 0 {
        return Err(ForecastError::invalid_parameter(format!(
            "{name} must be positive, got {days}"
        )));
    }
    u32::try_from(days)
        .map_err(|_| ForecastError::invalid_parameter(format!("{name} is too large: {days}")))
}

fn parse_days(key: &str, raw: &str) -> Result<i64, ForecastError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ForecastError::invalid_parameter(format!("{key} is not an integer: {raw:?}")))
}

/// Parse `"STD=80,HAK=50%"` into per-area overrides.
///
/// Values are percentages (0..=100) with an optional `%` suffix, so `STD=1`
/// means 1% occupancy.
fn parse_occupancy_overrides(raw: &str) -> Result<BTreeMap<Area, Occupancy>, ForecastError> {
    let mut overrides = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (code, value) = entry.split_once('=').ok_or_else(|| {
            ForecastError::invalid_parameter(format!("occupancy override must be AREA=VALUE: {entry:?}"))
        })?;
        let area: Area = code
            .parse()
            .map_err(|e| ForecastError::invalid_parameter(format!("{ENV_OCCUPANCY}: {e}")))?;
        let value = value.trim();
        let percent: f64 = value.strip_suffix('%').unwrap_or(value).trim().parse().map_err(|_| {
            ForecastError::invalid_parameter(format!("{ENV_OCCUPANCY}: {code} is not a percentage: {value:?}"))
        })?;
        overrides.insert(area, Occupancy::from_percent(percent)?);
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_dashboard_window() {
        let config = ForecastConfig::default();
        let window = config.window().unwrap();
        assert_eq!(window.lookback_days, 60);
        assert_eq!(window.horizon_days, 30);
        assert!(config.occupancy_overrides.is_empty());
        assert_eq!(config.empirical_adjustment, EmpiricalAdjustment::OccupancyScaled);
    }

    #[test]
    fn rejects_non_positive_windows() {
        for days in [0, -7] {
            let err = ForecastConfig::default().with_horizon_days(days).window().unwrap_err();
            assert!(matches!(err, ForecastError::InvalidParameter(ref m) if m.contains("horizon_days")));

            let err = ForecastConfig::default().with_lookback_days(days).window().unwrap_err();
            assert!(matches!(err, ForecastError::InvalidParameter(ref m) if m.contains("lookback_days")));
        }
    }

    #[test]
    fn default_area_table_has_every_area() {
        let table = AreaTable::default();
        for area in Area::VARIANTS {
            assert!(table.profile(area).is_some(), "missing profile for {area}");
        }
        let std = table.profile(Area::Standard).unwrap();
        assert_eq!(std.room_count, 225);
        assert_eq!(std.reference_occupancy.fraction(), 0.93);
    }

    #[test]
    fn area_table_loads_from_json() {
        let table = AreaTable::from_json(
            r#"{"ALL": {"room_count": 100, "reference_occupancy": 80}, "HAK": {"label": "Annex", "room_count": 10, "reference_occupancy": 0.5}}"#,
        )
        .unwrap();
        assert_eq!(table.profile(Area::All).unwrap().reference_occupancy.fraction(), 0.8);
        assert_eq!(table.profile(Area::Hakata).unwrap().label, "Annex");
        assert!(table.profile(Area::Standard).is_none());

        assert!(AreaTable::from_json(r#"{"LOBBY": {"room_count": 1, "reference_occupancy": 1}}"#).is_err());
    }

    #[test]
    fn loads_from_environment_lookup() {
        let config = ForecastConfig::from_lookup(lookup(&[
            (ENV_LOOKBACK_DAYS, "90"),
            (ENV_HORIZON_DAYS, " 14 "),
            (ENV_OCCUPANCY, "STD=80, hak=50%,"),
            (ENV_EMPIRICAL_ADJUSTMENT, "unscaled"),
        ]))
        .unwrap();

        assert_eq!(config.lookback_days, 90);
        assert_eq!(config.horizon_days, 14);
        assert_eq!(config.occupancy_overrides[&Area::Standard].fraction(), 0.8);
        assert_eq!(config.occupancy_overrides[&Area::Hakata].fraction(), 0.5);
        assert_eq!(config.empirical_adjustment, EmpiricalAdjustment::Unscaled);
    }

    #[test]
    fn environment_occupancy_is_always_a_percentage() {
        let config = ForecastConfig::from_lookup(lookup(&[(ENV_OCCUPANCY, "STD=1,HAK=0.5")])).unwrap();
        assert_eq!(config.occupancy_overrides[&Area::Standard].fraction(), 0.01);
        assert_eq!(config.occupancy_overrides[&Area::Hakata].fraction(), 0.005);
    }

    #[test]
    fn environment_lookup_rejects_malformed_values() {
        let cases: [(&str, &str); 6] = [
            (ENV_HORIZON_DAYS, "-3"),
            (ENV_LOOKBACK_DAYS, "sixty"),
            (ENV_OCCUPANCY, "STD"),
            (ENV_OCCUPANCY, "POOL=50"),
            (ENV_OCCUPANCY, "STD=120"),
            (ENV_EMPIRICAL_ADJUSTMENT, "weighted"),
        ];
        for (key, value) in cases {
            let result = ForecastConfig::from_lookup(lookup(&[(key, value)]));
            assert!(
                matches!(result, Err(ForecastError::InvalidParameter(_))),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = ForecastConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ForecastConfig::default());
    }
}
