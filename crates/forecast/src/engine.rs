//! Forecast run orchestration.
//!
//! The engine validates parameters, indexes the input by item once, then
//! forecasts every item through the pure [`forecast_item`] function.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use stockcast_core::ItemId;
use stockcast_inventory::Item;

use crate::blend::blend;
use crate::config::{AreaProfile, AreaTable, EmpiricalAdjustment, ForecastConfig, ForecastWindow};
use crate::error::ForecastError;
use crate::occupancy::Occupancy;
use crate::reader::{ForecastInput, LatestStock, RecordReader, lookback_cutoff};
use crate::replenishment::{OrderDisplay, order_quantity};
use crate::report::{ForecastReport, ForecastRow, IntegrityWarning, RecordKind};
use crate::theoretical::{occupancy_factor, theoretical_daily_usage};
use crate::usage::{UsageObservation, estimate_daily_usage};

/// Records that concern a single item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemEvidence<'a> {
    /// Counts inside the lookback window, any order.
    pub history: &'a [UsageObservation],
    pub latest: Option<&'a LatestStock>,
    pub incoming_units: i64,
}

/// Assumptions shared by every item of one area in a run.
#[derive(Debug, Clone, Copy)]
pub struct Scenario<'a> {
    pub horizon_days: u32,
    /// `None` when the area is not configured; no theoretical rate then.
    pub profile: Option<&'a AreaProfile>,
    /// Expected occupancy; `None` means the profile's reference occupancy.
    pub target_occupancy: Option<Occupancy>,
    pub empirical_adjustment: EmpiricalAdjustment,
}

/// Forecast one item. Pure: same inputs, same row.
pub fn forecast_item(item: &Item, evidence: &ItemEvidence<'_>, scenario: &Scenario<'_>) -> ForecastRow {
    let empirical_rate = estimate_daily_usage(evidence.history);

    let (theoretical_rate, factor) = match scenario.profile {
        Some(profile) => {
            let target = scenario
                .target_occupancy
                .unwrap_or(profile.reference_occupancy);
            let factor = match scenario.empirical_adjustment {
                EmpiricalAdjustment::Unscaled => 1.0,
                EmpiricalAdjustment::OccupancyScaled => {
                    occupancy_factor(target, profile.reference_occupancy)
                }
            };
            (theoretical_daily_usage(profile, target, item.per_room_rate()), factor)
        }
        None => (None, 1.0),
    };

    let projection = blend(
        empirical_rate.map(|rate| rate * factor),
        theoretical_rate,
        scenario.horizon_days,
    );

    let current_stock = evidence.latest.map_or(0, |l| l.current_stock);
    let order_qty = order_quantity(
        projection.projected_demand,
        item.safety_stock(),
        current_stock,
        evidence.incoming_units,
    );
    let order_display = OrderDisplay::for_quantity(order_qty, item.case_size(), item.unit());

    ForecastRow {
        item_id: item.id,
        name: item.name().to_string(),
        area: item.area(),
        unit: item.unit().to_string(),
        current_stock,
        last_count_date: evidence.latest.map(|l| l.last_date),
        safety_stock: item.safety_stock(),
        incoming_units: evidence.incoming_units,
        empirical_rate,
        occupancy_factor: factor,
        theoretical_rate,
        daily_rate: projection.daily_rate,
        rate_source: projection.source,
        projected_demand: projection.projected_demand,
        order_qty,
        order_qty_display: order_display.to_string(),
        order_display,
    }
}

/// Forecasting engine configured with the deployment's area table.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    areas: AreaTable,
}

impl ForecastEngine {
    pub fn new(areas: AreaTable) -> Self {
        Self { areas }
    }

    pub fn areas(&self) -> &AreaTable {
        &self.areas
    }

    /// Reject malformed parameters before any computation.
    pub fn validate(&self, config: &ForecastConfig) -> Result<ForecastWindow, ForecastError> {
        let window = config.window()?;
        for area in config.occupancy_overrides.keys() {
            if self.areas.profile(*area).is_none() {
                return Err(ForecastError::invalid_parameter(format!(
                    "occupancy override for unconfigured area {area}"
                )));
            }
        }
        Ok(window)
    }

    /// Read the records from `reader` once, then run.
    pub fn run_from<R>(
        &self,
        reader: &R,
        today: NaiveDate,
        config: &ForecastConfig,
    ) -> Result<ForecastReport, ForecastError>
    where
        R: RecordReader + ?Sized,
    {
        let window = self.validate(config)?;
        let input = ForecastInput::read(reader, today, window)?;
        self.run(today, config, &input)
    }

    /// Forecast every item in `input` as of `today`.
    pub fn run(
        &self,
        today: NaiveDate,
        config: &ForecastConfig,
        input: &ForecastInput,
    ) -> Result<ForecastReport, ForecastError> {
        let window = self.validate(config)?;
        let cutoff = lookback_cutoff(today, window.lookback_days);
        let mut warnings: BTreeSet<IntegrityWarning> = BTreeSet::new();

        let items: BTreeMap<ItemId, &Item> = input.items.iter().map(|i| (i.id, i)).collect();

        let mut history: BTreeMap<ItemId, Vec<UsageObservation>> = BTreeMap::new();
        for snap in input.snapshots.iter().filter(|s| s.date >= cutoff) {
            if !items.contains_key(&snap.item_id) {
                warnings.insert(missing(RecordKind::Snapshot, snap.item_id));
                continue;
            }
            history.entry(snap.item_id).or_default().push(UsageObservation {
                snapshot_id: snap.snapshot_id,
                date: snap.date,
                total_units: snap.total_units,
            });
        }

        let mut incoming: BTreeMap<ItemId, i64> = BTreeMap::new();
        for delivery in &input.incoming {
            if !items.contains_key(&delivery.item_id) {
                warnings.insert(missing(RecordKind::Delivery, delivery.item_id));
                continue;
            }
            *incoming.entry(delivery.item_id).or_default() += delivery.total_units;
        }

        let mut latest: BTreeMap<ItemId, &LatestStock> = BTreeMap::new();
        for stock in &input.latest_stock {
            if !items.contains_key(&stock.item_id) {
                warnings.insert(missing(RecordKind::LatestStock, stock.item_id));
                continue;
            }
            latest
                .entry(stock.item_id)
                .and_modify(|current| {
                    if stock.last_date > current.last_date {
                        *current = stock;
                    }
                })
                .or_insert(stock);
        }

        let mut rows = Vec::with_capacity(items.len());
        for (item_id, item) in &items {
            let profile = self.areas.profile(item.area());
            if profile.is_none() {
                warnings.insert(IntegrityWarning::MissingAreaProfile {
                    item_id: *item_id,
                    area: item.area(),
                });
            }

            let scenario = Scenario {
                horizon_days: window.horizon_days,
                profile,
                target_occupancy: config.occupancy_overrides.get(&item.area()).copied(),
                empirical_adjustment: config.empirical_adjustment,
            };
            let evidence = ItemEvidence {
                history: history.get(item_id).map(Vec::as_slice).unwrap_or(&[]),
                latest: latest.get(item_id).copied(),
                incoming_units: incoming.get(item_id).copied().unwrap_or(0),
            };

            let row = forecast_item(item, &evidence, &scenario);
            debug!(
                item = %row.item_id,
                name = %row.name,
                source = ?row.rate_source,
                daily_rate = row.daily_rate,
                order_qty = row.order_qty,
                "item forecast"
            );
            rows.push(row);
        }

        for warning in &warnings {
            warn!(%warning, "integrity warning during forecast");
        }

        let report = ForecastReport {
            today,
            lookback_days: window.lookback_days,
            horizon_days: window.horizon_days,
            rows,
            warnings: warnings.into_iter().collect(),
        };

        info!(
            %today,
            items = report.rows.len(),
            needing_order = report.urgent().len(),
            warnings = report.warnings.len(),
            "forecast run complete"
        );

        Ok(report)
    }
}

fn missing(record: RecordKind, item_id: ItemId) -> IntegrityWarning {
    IntegrityWarning::MissingMasterData { record, item_id }
}
