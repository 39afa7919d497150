//! Soil category scorer

use serde::{Deserialize, Serialize};

use super::category::{CategoryScore, SubScores, within};
use crate::models::{Drainage, Fertility, PhLevel, Retention, SoilMeasurement, SoilTexture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilScores {
    pub texture: u8,
    pub ph: u8,
    pub organic_matter: u8,
    pub drainage: u8,
}

impl SubScores for SoilScores {
    const MAX: u32 = 40;

    fn entries(&self) -> Vec<(&'static str, u8)> {
        vec![
            ("texture", self.texture),
            ("pH", self.ph),
            ("organicMatter", self.organic_matter),
            ("drainage", self.drainage),
        ]
    }
}

/// Soil measurement with its interpretation and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilAssessment {
    pub measurement: SoilMeasurement,
    pub fertility: Fertility,
    pub retention: Retention,
    pub ph_level: PhLevel,
    pub score: CategoryScore<SoilScores>,
}

impl SoilAssessment {
    #[must_use]
    pub fn assess(measurement: SoilMeasurement) -> Self {
        let score = score_soil(&measurement);
        Self {
            fertility: measurement.fertility(),
            retention: measurement.retention(),
            ph_level: measurement.ph_level(),
            measurement,
            score,
        }
    }
}

#[must_use]
pub fn score_soil(measurement: &SoilMeasurement) -> CategoryScore<SoilScores> {
    CategoryScore::new(SoilScores {
        texture: texture_score(measurement.texture),
        ph: ph_score(measurement.ph),
        organic_matter: organic_matter_score(measurement.organic_matter),
        drainage: drainage_score(measurement.drainage),
    })
}

/// Loams are preferred
fn texture_score(texture: SoilTexture) -> u8 {
    match texture {
        SoilTexture::Loam | SoilTexture::SandyLoam | SoilTexture::SiltyLoam => 10,
        SoilTexture::Sandy | SoilTexture::ClayLoam => 6,
        SoilTexture::Clayey | SoilTexture::Silty => 3,
    }
}

/// Optimum pH 6.0-8.5
fn ph_score(ph: f64) -> u8 {
    if within(ph, 6.0, 8.5) {
        10
    } else if ph >= 5.5 || ph <= 9.0 {
        // Disjunction: every finite pH outside the optimum lands here.
        6
    } else {
        3
    }
}

/// Organic matter in g/kg; more than 2 % is preferred
fn organic_matter_score(organic_matter: f64) -> u8 {
    if organic_matter > 20.0 {
        10
    } else if organic_matter > 10.0 {
        7
    } else {
        4
    }
}

fn drainage_score(drainage: Drainage) -> u8 {
    match drainage {
        Drainage::Good => 10,
        Drainage::Moderate => 7,
        Drainage::Poor => 3,
    }
}
