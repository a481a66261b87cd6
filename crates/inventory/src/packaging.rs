//! Packaging metadata and the physical-count → units derivation.

use serde::{Deserialize, Serialize};
use stockcast_core::{DomainError, DomainResult, ValueObject};

/// How an item is packed for purchasing and counting.
///
/// A zero `case_size` means case conversion is unavailable; displays fall
/// back to raw units.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Packaging {
    /// Units contained in one purchasing case.
    pub case_size: u32,
    /// Units contained in one box (or bag).
    pub units_per_box: u32,
    /// Boxes contained in one case.
    pub boxes_per_case: u32,
}

impl ValueObject for Packaging {}

impl Packaging {
    pub fn new(case_size: u32, units_per_box: u32, boxes_per_case: u32) -> Self {
        Self {
            case_size,
            units_per_box,
            boxes_per_case,
        }
    }

    /// Total units for a physical count of `qty_case` cases and `qty_box` boxes.
    ///
    /// Evaluated once, when a snapshot or delivery is written. Readers must use
    /// the stored value: packaging may change after the record was taken.
    /// Counts whose total does not fit in an `i64` are rejected.
    pub fn total_units(&self, qty_case: u32, qty_box: u32) -> DomainResult<i64> {
        let cases = i64::from(qty_case).checked_mul(i64::from(self.case_size));
        let boxes = i64::from(qty_box).checked_mul(i64::from(self.units_per_box));
        cases
            .zip(boxes)
            .and_then(|(cases, boxes)| cases.checked_add(boxes))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "count of {qty_case} case(s) and {qty_box} box(es) exceeds the unit range"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_cases_and_boxes() {
        let p = Packaging::new(48, 6, 8);
        assert_eq!(p.total_units(2, 3), Ok(2 * 48 + 3 * 6));
    }

    #[test]
    fn zero_packaging_counts_nothing() {
        assert_eq!(Packaging::default().total_units(5, 5), Ok(0));
    }

    #[test]
    fn oversized_counts_are_rejected() {
        let p = Packaging::new(u32::MAX, u32::MAX, 0);
        assert!(matches!(
            p.total_units(u32::MAX, u32::MAX),
            Err(DomainError::Validation(_))
        ));

        // 2^62 + 2^62: each product fits, the sum does not.
        let half = 1u32 << 31;
        let p = Packaging::new(half, half, 1);
        assert_eq!(p.total_units(half, 0), Ok(1i64 << 62));
        assert!(p.total_units(half, half).is_err());
    }
}
