use thiserror::Error;

/// Failures that abort a forecast run.
///
/// Per-item anomalies (missing history, unknown items, no case size) are not
/// errors; they degrade to "unavailable" values or an [`IntegrityWarning`].
///
/// [`IntegrityWarning`]: crate::report::IntegrityWarning
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// A run parameter was rejected before computation started.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The record source failed to produce the input snapshot.
    #[error("record source failed: {0}")]
    Source(String),
}

impl ForecastError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
