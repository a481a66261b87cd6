//! Operational zones that consume an item.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use stockcast_core::DomainError;

/// Area code: which part of the hotel consumes an item.
///
/// The set is closed. Room counts and reference occupancies are *not* stored
/// here; they are deployment configuration (see `stockcast_forecast::AreaTable`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    /// Every guest room in the property.
    #[default]
    #[serde(rename = "ALL")]
    All,
    /// Standard rooms.
    #[serde(rename = "STD")]
    Standard,
    /// Hakata wing.
    #[serde(rename = "HAK")]
    Hakata,
}

impl Area {
    /// All area codes, in display order.
    pub const VARIANTS: [Area; 3] = [Area::All, Area::Standard, Area::Hakata];

    pub fn code(&self) -> &'static str {
        match self {
            Area::All => "ALL",
            Area::Standard => "STD",
            Area::Hakata => "HAK",
        }
    }
}

impl core::fmt::Display for Area {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Area {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Area::VARIANTS
            .into_iter()
            .find(|a| a.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::validation(format!("unknown area code: {code:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("std".parse::<Area>().unwrap(), Area::Standard);
        assert_eq!(" HAK ".parse::<Area>().unwrap(), Area::Hakata);
        assert_eq!("ALL".parse::<Area>().unwrap(), Area::All);
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(matches!("LOBBY".parse::<Area>(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn defaults_to_all_areas() {
        assert_eq!(Area::default(), Area::All);
    }
}
