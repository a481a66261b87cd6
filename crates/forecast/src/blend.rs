//! Rate selection and demand projection.
//!
//! Precedence, not averaging: an observed positive rate always wins over the
//! occupancy model; the model is only used when there is no usable history.

use serde::{Deserialize, Serialize};

/// Which signal the daily rate came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Empirical,
    Theoretical,
    /// Neither signal was usable; the rate is zero.
    None,
}

/// Chosen daily rate projected over the horizon.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProjection {
    pub daily_rate: f64,
    pub source: RateSource,
    pub projected_demand: f64,
}

/// Pick the rate to trust and project it over `horizon_days`.
pub fn blend(empirical: Option<f64>, theoretical: Option<f64>, horizon_days: u32) -> DemandProjection {
    let (daily_rate, source) = match (usable(empirical), usable(theoretical)) {
        (Some(rate), _) => (rate, RateSource::Empirical),
        (None, Some(rate)) => (rate, RateSource::Theoretical),
        (None, None) => (0.0, RateSource::None),
    };

    DemandProjection {
        daily_rate,
        source,
        projected_demand: daily_rate * f64::from(horizon_days),
    }
}

fn usable(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_theory_without_history() {
        let p = blend(None, Some(5.0), 30);
        assert_eq!(p.daily_rate, 5.0);
        assert_eq!(p.source, RateSource::Theoretical);
        assert_eq!(p.projected_demand, 150.0);
    }

    #[test]
    fn zero_empirical_rate_is_not_trusted() {
        let p = blend(Some(0.0), Some(5.0), 10);
        assert_eq!(p.daily_rate, 5.0);
        assert_eq!(p.source, RateSource::Theoretical);
    }

    #[test]
    fn positive_empirical_rate_always_wins() {
        let p = blend(Some(3.0), Some(100.0), 30);
        assert_eq!(p.daily_rate, 3.0);
        assert_eq!(p.source, RateSource::Empirical);
        assert_eq!(p.projected_demand, 90.0);
    }

    #[test]
    fn no_signal_projects_nothing() {
        for (e, t) in [(None, None), (Some(0.0), Some(0.0)), (None, Some(0.0))] {
            let p = blend(e, t, 30);
            assert_eq!(p.daily_rate, 0.0);
            assert_eq!(p.source, RateSource::None);
            assert_eq!(p.projected_demand, 0.0);
        }
    }
}
