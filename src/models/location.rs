//! Coordinate model used as the key for every data source

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SuitabilityError;
use crate::models::Aspect;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Hemisphere a coordinate lies in; drives the preferred slope aspects
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Coordinate {
    /// Create a validated coordinate
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(SuitabilityError::invalid_coordinate(format!(
                "coordinates must be finite numbers, got: {latitude}, {longitude}"
            )));
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SuitabilityError::invalid_coordinate(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SuitabilityError::invalid_coordinate(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse coordinates from a string like "-16.5,-68.15" or "-16.5 -68.15"
    pub fn parse(input: &str) -> crate::Result<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(SuitabilityError::invalid_coordinate(
                "Coordinates must be in format 'lat,lon'",
            ));
        }

        let lat = parts[0].parse::<f64>().map_err(|_| {
            SuitabilityError::invalid_coordinate(format!("Invalid latitude: {}", parts[0]))
        })?;
        let lon = parts[1].parse::<f64>().map_err(|_| {
            SuitabilityError::invalid_coordinate(format!("Invalid longitude: {}", parts[1]))
        })?;

        Self::new(lat, lon)
    }

    #[must_use]
    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_latitude(self.latitude)
    }

    /// Format coordinate as "lat, lon" with four decimals
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

impl Hemisphere {
    #[must_use]
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    /// Slope orientations that face the sun in this hemisphere
    #[must_use]
    pub fn preferred_aspects(&self) -> &'static [Aspect] {
        match self {
            Hemisphere::South => &[Aspect::N, Aspect::NE, Aspect::E, Aspect::NW],
            Hemisphere::North => &[Aspect::S, Aspect::SE, Aspect::SW, Aspect::E],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(-16.5, -68.15).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());

        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[rstest]
    #[case("-16.5,-68.15", -16.5, -68.15)]
    #[case("-16.5 -68.15", -16.5, -68.15)]
    #[case(" 46.8182, 8.2275 ", 46.8182, 8.2275)]
    fn test_coordinate_parse(#[case] input: &str, #[case] lat: f64, #[case] lon: f64) {
        let coordinate = Coordinate::parse(input).unwrap();
        assert_eq!(coordinate.latitude, lat);
        assert_eq!(coordinate.longitude, lon);
    }

    #[rstest]
    #[case("46.0")]
    #[case("46.0,8.0,0.0")]
    #[case("north,east")]
    #[case("91.0,8.0")]
    fn test_coordinate_parse_rejects(#[case] input: &str) {
        assert!(matches!(
            Coordinate::parse(input),
            Err(SuitabilityError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_hemisphere() {
        assert_eq!(Hemisphere::from_latitude(-16.5), Hemisphere::South);
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(45.0), Hemisphere::North);
    }

    #[test]
    fn test_preferred_aspects() {
        let south = Hemisphere::South.preferred_aspects();
        assert!(south.contains(&Aspect::N));
        assert!(!south.contains(&Aspect::S));

        let north = Hemisphere::North.preferred_aspects();
        assert!(north.contains(&Aspect::S));
        assert!(north.contains(&Aspect::E));
        assert!(!north.contains(&Aspect::N));
    }

    #[test]
    fn test_format_coordinates() {
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();
        assert_eq!(coordinate.format_coordinates(), "-16.5000, -68.1500");
        assert_eq!(coordinate.to_string(), "-16.5000°, -68.1500°");
    }
}
