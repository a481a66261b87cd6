//! Infrastructure layer: record storage, item caching, dataset loading and the
//! forecast service that wires a record source to the engine.

pub mod dataset;
pub mod error;
pub mod forecast_service;
pub mod item_cache;
pub mod record_store;

pub use dataset::Dataset;
pub use error::StoreError;
pub use forecast_service::{Dashboard, ForecastService};
pub use item_cache::ItemCache;
pub use record_store::{DEFAULT_HISTORY_LIMIT, ImportSummary, InMemoryRecordStore};
