//! Terrain category scorer

use serde::{Deserialize, Serialize};

use super::category::{CategoryScore, SubScores, within};
use crate::models::{Aspect, Hemisphere, SlopeClass, TerrainMeasurement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainScores {
    pub elevation: u8,
    pub slope: u8,
    pub aspect: u8,
}

impl SubScores for TerrainScores {
    const MAX: u32 = 30;

    fn entries(&self) -> Vec<(&'static str, u8)> {
        vec![
            ("elevation", self.elevation),
            ("slope", self.slope),
            ("aspect", self.aspect),
        ]
    }
}

/// Terrain measurement with its interpretation and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainAssessment {
    pub measurement: TerrainMeasurement,
    pub hemisphere: Hemisphere,
    pub slope_class: SlopeClass,
    pub score: CategoryScore<TerrainScores>,
}

impl TerrainAssessment {
    #[must_use]
    pub fn assess(measurement: TerrainMeasurement, hemisphere: Hemisphere) -> Self {
        let score = score_terrain(&measurement, hemisphere);
        Self {
            slope_class: SlopeClass::from_degrees(measurement.slope),
            hemisphere,
            measurement,
            score,
        }
    }
}

#[must_use]
pub fn score_terrain(
    measurement: &TerrainMeasurement,
    hemisphere: Hemisphere,
) -> CategoryScore<TerrainScores> {
    CategoryScore::new(TerrainScores {
        elevation: elevation_score(measurement.elevation),
        slope: slope_score(measurement.slope),
        aspect: aspect_score(measurement.aspect, hemisphere),
    })
}

/// Optimum 2500-4000 m a.s.l.
fn elevation_score(elevation: f64) -> u8 {
    if within(elevation, 2500.0, 4000.0) {
        10
    } else if within(elevation, 2000.0, 4500.0) {
        7
    } else if elevation >= 1500.0 || elevation <= 5000.0 {
        // Disjunction: every finite elevation outside the bands above lands here.
        4
    } else {
        1
    }
}

fn slope_score(slope: f64) -> u8 {
    match slope {
        s if s < 5.0 => 10,
        s if s < 10.0 => 8,
        s if s < 15.0 => 6,
        s if s < 30.0 => 3,
        _ => 1,
    }
}

fn aspect_score(aspect: Aspect, hemisphere: Hemisphere) -> u8 {
    if hemisphere.preferred_aspects().contains(&aspect) {
        10
    } else {
        6
    }
}
