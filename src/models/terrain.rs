//! Terrain model: elevation, slope and aspect

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain metrics for a coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TerrainMeasurement {
    /// Elevation above sea level in meters
    pub elevation: f64,
    /// Slope angle in degrees
    pub slope: f64,
    /// Slope orientation
    pub aspect: Aspect,
    /// Slope orientation in degrees (0 = North, clockwise)
    pub aspect_degrees: f64,
}

/// Cardinal and intercardinal directions
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SlopeClass {
    Flat,
    Gentle,
    Moderate,
    ModeratelySteep,
    Steep,
    VerySteep,
}

impl Aspect {
    /// Bucket a compass bearing into one of eight 45° sectors
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        let degrees = degrees.rem_euclid(360.0);
        match degrees {
            d if (22.5..67.5).contains(&d) => Aspect::NE,
            d if (67.5..112.5).contains(&d) => Aspect::E,
            d if (112.5..157.5).contains(&d) => Aspect::SE,
            d if (157.5..202.5).contains(&d) => Aspect::S,
            d if (202.5..247.5).contains(&d) => Aspect::SW,
            d if (247.5..292.5).contains(&d) => Aspect::W,
            d if (292.5..337.5).contains(&d) => Aspect::NW,
            // [337.5, 22.5) and NaN
            _ => Aspect::N,
        }
    }
}

impl SlopeClass {
    #[must_use]
    pub fn from_degrees(slope: f64) -> Self {
        match slope {
            s if s < 2.0 => SlopeClass::Flat,
            s if s < 5.0 => SlopeClass::Gentle,
            s if s < 10.0 => SlopeClass::Moderate,
            s if s < 15.0 => SlopeClass::ModeratelySteep,
            s if s < 30.0 => SlopeClass::Steep,
            _ => SlopeClass::VerySteep,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Aspect::N => "N",
            Aspect::NE => "NE",
            Aspect::E => "E",
            Aspect::SE => "SE",
            Aspect::S => "S",
            Aspect::SW => "SW",
            Aspect::W => "W",
            Aspect::NW => "NW",
        };
        write!(f, "{label}")
    }
}

impl fmt::Display for SlopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlopeClass::Flat => write!(f, "Flat"),
            SlopeClass::Gentle => write!(f, "Gentle"),
            SlopeClass::Moderate => write!(f, "Moderate"),
            SlopeClass::ModeratelySteep => write!(f, "Moderately steep"),
            SlopeClass::Steep => write!(f, "Steep"),
            SlopeClass::VerySteep => write!(f, "Very steep"),
        }
    }
}
