//! Defines the two time-of-day slots each forecast date is split into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-day bucket, identified by a range of local hours.
///
/// Samples whose hour falls outside both ranges (night and evening) are not
/// bucketed at all.
///
/// # Examples
///
/// ```
/// use weather_matrix::Slot;
///
/// assert_eq!(Slot::from_hour(6), Some(Slot::Morning));
/// assert_eq!(Slot::from_hour(12), Some(Slot::Afternoon));
/// assert_eq!(Slot::from_hour(18), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Hours 06:00 up to (not including) 12:00.
    Morning,
    /// Hours 12:00 up to (not including) 18:00.
    Afternoon,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Morning, Slot::Afternoon];

    pub fn hours(self) -> Range<u32> {
        match self {
            Slot::Morning => 6..12,
            Slot::Afternoon => 12..18,
        }
    }

    pub fn from_hour(hour: u32) -> Option<Slot> {
        Self::ALL.into_iter().find(|slot| slot.hours().contains(&hour))
    }

    /// Short column label, as shown in the matrix header.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Morning => "AM",
            Slot::Afternoon => "PM",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_boundaries() {
        assert_eq!(Slot::from_hour(0), None);
        assert_eq!(Slot::from_hour(5), None);
        assert_eq!(Slot::from_hour(6), Some(Slot::Morning));
        assert_eq!(Slot::from_hour(11), Some(Slot::Morning));
        assert_eq!(Slot::from_hour(12), Some(Slot::Afternoon));
        assert_eq!(Slot::from_hour(17), Some(Slot::Afternoon));
        assert_eq!(Slot::from_hour(18), None);
        assert_eq!(Slot::from_hour(23), None);
    }
}
