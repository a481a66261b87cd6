use thiserror::Error;

use stockcast_core::DomainError;
use stockcast_forecast::ForecastError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("record table lock poisoned: {0}")]
    Poisoned(&'static str),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Dataset(String),
}

impl From<StoreError> for ForecastError {
    fn from(value: StoreError) -> Self {
        ForecastError::source_failed(value.to_string())
    }
}
