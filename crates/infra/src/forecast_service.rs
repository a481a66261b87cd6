use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use stockcast_forecast::{
    ForecastConfig, ForecastEngine, ForecastError, ForecastReport, ForecastSummary, RecordReader,
};

use crate::record_store::InMemoryRecordStore;

/// Report plus the home-screen counters computed from the same run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: ForecastSummary,
    pub report: ForecastReport,
}

/// Runs the engine against a shared record source.
#[derive(Debug)]
pub struct ForecastService<R> {
    reader: Arc<R>,
    engine: ForecastEngine,
}

impl<R> ForecastService<R>
where
    R: RecordReader,
{
    pub fn new(reader: Arc<R>, engine: ForecastEngine) -> Self {
        Self { reader, engine }
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    pub fn forecast(&self, today: NaiveDate, config: &ForecastConfig) -> Result<ForecastReport, ForecastError> {
        let started = Instant::now();
        match self.engine.run_from(self.reader.as_ref(), today, config) {
            Ok(report) => {
                info!(
                    %today,
                    lookback_days = report.lookback_days,
                    horizon_days = report.horizon_days,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "forecast served"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(%today, error = %e, "forecast failed");
                Err(e)
            }
        }
    }
}

impl ForecastService<InMemoryRecordStore> {
    pub fn dashboard(&self, today: NaiveDate, config: &ForecastConfig) -> Result<Dashboard, ForecastError> {
        let report = self.forecast(today, config)?;
        let scheduled = self.reader.delivery_schedule()?.len();
        Ok(Dashboard {
            summary: report.summary(scheduled),
            report,
        })
    }
}
