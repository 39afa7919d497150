//! Data models for the suitability engine
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and hemisphere
//! - Climate: aggregated climate statistics for the analysis window
//! - Soil: surface soil properties and their interpretation
//! - Terrain: elevation, slope and aspect

pub mod climate;
pub mod location;
pub mod soil;
pub mod terrain;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export all public types for convenient access
pub use climate::{AridityClass, ClimateMeasurement};
pub use location::{Coordinate, Hemisphere};
pub use soil::{Drainage, Fertility, PhLevel, Retention, SoilMeasurement, SoilTexture};
pub use terrain::{Aspect, SlopeClass, TerrainMeasurement};

/// A field a provider could not supply and that was defaulted to zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataGap {
    /// Data source that omitted the field (e.g. "SoilGrids")
    pub source: String,
    /// Name of the missing field (e.g. "phh2o")
    pub field: String,
}

impl DataGap {
    #[must_use]
    pub fn new<S: Into<String>, F: Into<String>>(source: S, field: F) -> Self {
        Self {
            source: source.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for DataGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.field)
    }
}

/// A provider measurement together with the gaps that were zero-filled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measured<T> {
    pub measurement: T,
    pub gaps: Vec<DataGap>,
}

impl<T> Measured<T> {
    /// Measurement with every field present
    #[must_use]
    pub fn complete(measurement: T) -> Self {
        Self {
            measurement,
            gaps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_gaps(measurement: T, gaps: Vec<DataGap>) -> Self {
        Self { measurement, gaps }
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.gaps.is_empty()
    }
}
