//! `stockcast <dataset.json>`: load a dataset and print the reorder dashboard.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use tracing::info;

use stockcast_forecast::{AreaTable, ForecastConfig, ForecastEngine};
use stockcast_infra::{Dataset, ForecastService, InMemoryRecordStore};

pub const ENV_AREAS_FILE: &str = "STOCKCAST_AREAS_FILE";
pub const ENV_TODAY: &str = "STOCKCAST_TODAY";

/// Everything one invocation needs, resolved from arguments and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dataset: PathBuf,
    pub today: NaiveDate,
    pub areas: AreaTable,
    pub config: ForecastConfig,
}

impl Settings {
    pub fn from_env(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        Self::from_lookup(args, |key| std::env::var(key).ok(), || {
            chrono::Local::now().date_naive()
        })
    }

    pub fn from_lookup<F, T>(
        args: impl IntoIterator<Item = String>,
        lookup: F,
        local_today: T,
    ) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        T: FnOnce() -> NaiveDate,
    {
        let mut args = args.into_iter();
        let Some(dataset) = args.next() else {
            bail!("usage: stockcast <dataset.json>");
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument {extra:?}; usage: stockcast <dataset.json>");
        }

        let today = match lookup(ENV_TODAY) {
            Some(raw) => raw
                .trim()
                .parse::<NaiveDate>()
                .with_context(|| format!("{ENV_TODAY} must be YYYY-MM-DD, got {raw:?}"))?,
            None => local_today(),
        };

        let areas = match lookup(ENV_AREAS_FILE) {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read area table {path}"))?;
                AreaTable::from_json(&raw).with_context(|| format!("invalid area table {path}"))?
            }
            None => AreaTable::default(),
        };

        let config = ForecastConfig::from_lookup(&lookup).context("invalid forecast configuration")?;

        Ok(Self {
            dataset: PathBuf::from(dataset),
            today,
            areas,
            config,
        })
    }
}

/// Import the dataset, forecast, and render the dashboard as pretty JSON.
pub fn run(settings: &Settings) -> anyhow::Result<String> {
    let dataset = Dataset::from_path(&settings.dataset)
        .with_context(|| format!("failed to load {}", settings.dataset.display()))?;

    let store = Arc::new(InMemoryRecordStore::new());
    store.import(dataset).context("failed to import dataset")?;

    for (area, profile) in settings.areas.iter() {
        info!(%area, rooms = profile.room_count, reference = %profile.reference_occupancy, "area profile");
    }

    let service = ForecastService::new(store, ForecastEngine::new(settings.areas.clone()));
    let dashboard = service
        .dashboard(settings.today, &settings.config)
        .context("forecast failed")?;

    serde_json::to_string_pretty(&dashboard).context("failed to render dashboard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn fallback_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    #[test]
    fn requires_exactly_one_dataset_path() {
        let none = HashMap::<String, String>::new();
        let lookup = |k: &str| none.get(k).cloned();
        assert!(Settings::from_lookup(args(&[]), lookup, fallback_day).is_err());
        assert!(Settings::from_lookup(args(&["a.json", "b.json"]), lookup, fallback_day).is_err());

        let settings = Settings::from_lookup(args(&["a.json"]), lookup, fallback_day).unwrap();
        assert_eq!(settings.dataset, PathBuf::from("a.json"));
        assert_eq!(settings.today, fallback_day());
        assert_eq!(settings.config, ForecastConfig::default());
    }

    #[test]
    fn reads_today_and_config_from_environment() {
        let env: HashMap<String, String> = [
            (ENV_TODAY, "2025-02-03"),
            ("STOCKCAST_HORIZON_DAYS", "14"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings =
            Settings::from_lookup(args(&["data.json"]), |k| env.get(k).cloned(), fallback_day).unwrap();
        assert_eq!(settings.today, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        assert_eq!(settings.config.horizon_days, 14);
    }

    #[test]
    fn malformed_today_is_reported() {
        let err = Settings::from_lookup(
            args(&["data.json"]),
            |k| (k == ENV_TODAY).then(|| "03/02/2025".to_string()),
            fallback_day,
        )
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TODAY));
    }

    #[test]
    fn missing_dataset_file_fails_with_context() {
        let settings = Settings {
            dataset: PathBuf::from("/nonexistent/stockcast-dataset.json"),
            today: fallback_day(),
            areas: AreaTable::default(),
            config: ForecastConfig::default(),
        };
        let err = run(&settings).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }
}
