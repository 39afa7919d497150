//! Climate statistics aggregated over the analysis window

use serde::{Deserialize, Serialize};
use std::fmt;

/// Climate statistics for a coordinate over the analysis window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClimateMeasurement {
    /// Mean daily air temperature at 2 m in Celsius
    pub temperature_mean: f64,
    /// Lowest daily minimum temperature in Celsius
    pub temperature_min: f64,
    /// Highest daily maximum temperature in Celsius
    pub temperature_max: f64,
    /// Precipitation summed over the window in mm
    pub precipitation_annual: f64,
    /// Mean daily precipitation in mm
    pub precipitation_mean_daily: f64,
    /// Mean daily surface solar radiation in MJ/m²/day
    pub solar_radiation_mean: f64,
    /// Evapotranspiration summed over the window in mm
    pub evapotranspiration_annual: f64,
    /// Precipitation / evapotranspiration ratio
    pub aridity_index: f64,
}

/// UNEP aridity zones
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AridityClass {
    HyperArid,
    Arid,
    SemiArid,
    DrySubHumid,
    Humid,
}

impl AridityClass {
    #[must_use]
    pub fn from_index(aridity_index: f64) -> Self {
        match aridity_index {
            ai if ai < 0.05 => AridityClass::HyperArid,
            ai if ai < 0.2 => AridityClass::Arid,
            ai if ai < 0.5 => AridityClass::SemiArid,
            ai if ai < 0.65 => AridityClass::DrySubHumid,
            _ => AridityClass::Humid,
        }
    }
}

impl fmt::Display for AridityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AridityClass::HyperArid => write!(f, "Hyper-arid"),
            AridityClass::Arid => write!(f, "Arid"),
            AridityClass::SemiArid => write!(f, "Semi-arid"),
            AridityClass::DrySubHumid => write!(f, "Dry sub-humid"),
            AridityClass::Humid => write!(f, "Humid"),
        }
    }
}
