//! Defines the geographical types used to address the forecast provider:
//! a plain coordinate pair and a named location built on top of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_matrix::LatLon;
///
/// let gouda = LatLon(52.0115, 4.7104);
/// assert_eq!(gouda.latitude(), 52.0115);
/// assert_eq!(gouda.longitude(), 4.7104);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// A named place for which a forecast row is produced.
///
/// Locations are part of the [`crate::MatrixConfig`] and are never mutated
/// once the configuration is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, also used as the key of the aggregated result map.
    pub name: String,
    /// Coordinate sent to the provider.
    pub coordinate: LatLon,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: LatLon(latitude, longitude),
        }
    }
}

/// The ten Dutch day-trip destinations the matrix reports on when no
/// locations are configured explicitly.
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("Dwingelderveld National Park", 52.8143, 6.4078),
        Location::new("Netherlands Open Air Museum", 52.0056, 5.9115),
        Location::new("Gouda", 52.0115, 4.7104),
        Location::new("Texel Island", 53.0553, 4.7963),
        Location::new("Zaanse Schans", 52.4716, 4.8229),
        Location::new("Giethoorn", 52.7401, 6.0779),
        Location::new("Arnhem (Burgers' Zoo)", 52.0055, 5.8398),
        Location::new("Utrecht", 52.0907, 5.1214),
        Location::new("Madurodam", 52.0994, 4.3006),
        Location::new("Efteling", 51.6504, 5.0439),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations_have_unique_names() {
        let locations = default_locations();
        assert_eq!(locations.len(), 10);
        let mut names: Vec<_> = locations.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10, "Location names are used as map keys");
    }

    #[test]
    fn test_lat_lon_display() {
        assert_eq!(LatLon(52.0115, 4.7104).to_string(), "52.0115,4.7104");
    }
}
