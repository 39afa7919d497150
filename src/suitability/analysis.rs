//! The root analysis record produced for one coordinate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregate::{OverallAssessment, aggregate};
use super::climate::ClimateAssessment;
use super::report::render_report;
use super::soil::SoilAssessment;
use super::terrain::TerrainAssessment;
use super::window::AnalysisWindow;
use crate::models::{
    ClimateMeasurement, Coordinate, DataGap, Measured, SoilMeasurement, TerrainMeasurement,
};

/// Complete, immutable suitability analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityAnalysis {
    pub coordinate: Coordinate,
    pub window: AnalysisWindow,
    pub generated_at: DateTime<Utc>,
    pub climate: ClimateAssessment,
    pub soil: SoilAssessment,
    pub terrain: TerrainAssessment,
    pub overall: OverallAssessment,
    /// Fields that were missing upstream and scored as zero
    pub data_gaps: Vec<DataGap>,
}

impl SuitabilityAnalysis {
    /// Score the three measurements and combine them
    #[must_use]
    pub fn assemble(
        coordinate: Coordinate,
        window: AnalysisWindow,
        generated_at: DateTime<Utc>,
        climate: Measured<ClimateMeasurement>,
        soil: Measured<SoilMeasurement>,
        terrain: Measured<TerrainMeasurement>,
    ) -> Self {
        let mut data_gaps = climate.gaps;
        data_gaps.extend(soil.gaps);
        data_gaps.extend(terrain.gaps);

        let climate = ClimateAssessment::assess(climate.measurement);
        let soil = SoilAssessment::assess(soil.measurement);
        let terrain = TerrainAssessment::assess(terrain.measurement, coordinate.hemisphere());
        let overall = aggregate(&climate.score, &soil.score, &terrain.score);

        Self {
            coordinate,
            window,
            generated_at,
            climate,
            soil,
            terrain,
            overall,
            data_gaps,
        }
    }

    /// True when at least one input was zero-filled
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.data_gaps.is_empty()
    }
}

impl fmt::Display for SuitabilityAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_report(self))
    }
}
