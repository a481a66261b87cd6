//! `stockcast-forecast`
//!
//! **Responsibility:** turn stock counts, scheduled deliveries and item master
//! data into a reorder recommendation per item.
//!
//! The engine is read-only and synchronous:
//! - It never mutates records; all writes belong to the record store.
//! - Records arrive through [`RecordReader`] (or a prebuilt [`ForecastInput`]).
//! - Each item is forecast independently by a pure function; one bad record
//!   degrades to a warning, never a failed run.
//!
//! Pipeline: usage estimator + theoretical model → demand blender →
//! replenishment calculator → [`ForecastReport`].

pub mod blend;
pub mod config;
pub mod engine;
pub mod error;
pub mod occupancy;
pub mod reader;
pub mod replenishment;
pub mod report;
pub mod theoretical;
pub mod usage;

pub use blend::{DemandProjection, RateSource, blend};
pub use config::{AreaProfile, AreaTable, EmpiricalAdjustment, ForecastConfig, ForecastWindow};
pub use engine::{ForecastEngine, ItemEvidence, Scenario, forecast_item};
pub use error::ForecastError;
pub use occupancy::Occupancy;
pub use reader::{ForecastInput, IncomingUnits, LatestStock, RecordReader, SnapshotObservation};
pub use replenishment::{OrderDisplay, order_quantity};
pub use report::{ForecastReport, ForecastRow, ForecastSummary, IntegrityWarning, RecordKind};
pub use theoretical::{occupancy_factor, theoretical_daily_usage};
pub use usage::{UsageObservation, daily_usage_samples, estimate_daily_usage};
