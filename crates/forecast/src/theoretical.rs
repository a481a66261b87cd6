//! Occupancy-driven consumption model.

use crate::config::AreaProfile;
use crate::occupancy::Occupancy;

/// Predicted daily consumption: `rooms × occupancy × per_room_rate`.
///
/// Returns `None` when the item has no per-room rate: there is no theoretical
/// basis, which is different from a prediction of zero.
pub fn theoretical_daily_usage(
    profile: &AreaProfile,
    occupancy: Occupancy,
    per_room_rate: f64,
) -> Option<f64> {
    if !(per_room_rate.is_finite() && per_room_rate > 0.0) {
        return None;
    }
    Some(f64::from(profile.room_count) * occupancy.fraction() * per_room_rate)
}

/// Ratio of the expected occupancy to the one history was recorded under.
///
/// A zero reference carries no information, so the factor is neutral.
pub fn occupancy_factor(target: Occupancy, reference: Occupancy) -> f64 {
    if reference.fraction() > 0.0 {
        target.fraction() / reference.fraction()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(v: f64) -> Occupancy {
        Occupancy::normalize(v).unwrap()
    }

    #[test]
    fn multiplies_rooms_occupancy_and_rate() {
        let profile = AreaProfile::new("Standard", 200, occ(50.0));
        assert_eq!(theoretical_daily_usage(&profile, occ(0.5), 2.0), Some(200.0));
        assert_eq!(theoretical_daily_usage(&profile, Occupancy::FULL, 0.25), Some(50.0));
    }

    #[test]
    fn zero_rate_means_no_model() {
        let profile = AreaProfile::new("Hakata", 13, occ(70.0));
        assert_eq!(theoretical_daily_usage(&profile, occ(70.0), 0.0), None);
    }

    #[test]
    fn empty_hotel_predicts_zero_not_unavailable() {
        let profile = AreaProfile::new("Hakata", 13, occ(70.0));
        assert_eq!(theoretical_daily_usage(&profile, Occupancy::EMPTY, 1.0), Some(0.0));
    }

    #[test]
    fn factor_halves_usage_at_half_occupancy() {
        assert_eq!(occupancy_factor(occ(45.0), occ(90.0)), 0.5);
    }

    #[test]
    fn factor_is_neutral_for_zero_reference_or_equal_occupancy() {
        assert_eq!(occupancy_factor(occ(80.0), Occupancy::EMPTY), 1.0);
        assert_eq!(occupancy_factor(occ(93.0), occ(93.0)), 1.0);
    }
}
