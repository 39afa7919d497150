//! Overall suitability: weighted total, 5-tier classification and narrative

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{CategoryScore, SubScores, percent_of};
use super::climate::ClimateScores;
use super::soil::SoilScores;
use super::terrain::TerrainScores;

/// 5-tier classification of the overall percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallTier {
    /// Overall percent >= 80
    HighlySuitable,
    /// Overall percent >= 65
    Suitable,
    /// Overall percent >= 50
    ModeratelySuitable,
    /// Overall percent >= 35
    MarginallySuitable,
    /// Overall percent < 35
    Unsuitable,
}

impl OverallTier {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p >= 80.0 => OverallTier::HighlySuitable,
            p if p >= 65.0 => OverallTier::Suitable,
            p if p >= 50.0 => OverallTier::ModeratelySuitable,
            p if p >= 35.0 => OverallTier::MarginallySuitable,
            _ => OverallTier::Unsuitable,
        }
    }

    /// Fixed recommendation text for this tier
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            OverallTier::HighlySuitable => {
                "Excellent location for quinoa cultivation. Optimal conditions across most variables."
            }
            OverallTier::Suitable => {
                "Good location for quinoa. Some variables can be improved with agronomic management."
            }
            OverallTier::ModeratelySuitable => {
                "Moderately suitable location. Requires careful management and possible soil improvements."
            }
            OverallTier::MarginallySuitable => {
                "Marginally suitable location. High risk of low yields. Consider resistant varieties."
            }
            OverallTier::Unsuitable => {
                "Location not recommended for quinoa. Consider other better-adapted crops."
            }
        }
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            OverallTier::HighlySuitable => "🟢",
            OverallTier::Suitable => "🟡",
            OverallTier::ModeratelySuitable => "🟠",
            OverallTier::MarginallySuitable => "🔴",
            OverallTier::Unsuitable => "⚫",
        }
    }
}

impl fmt::Display for OverallTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallTier::HighlySuitable => write!(f, "Highly suitable"),
            OverallTier::Suitable => write!(f, "Suitable"),
            OverallTier::ModeratelySuitable => write!(f, "Moderately suitable"),
            OverallTier::MarginallySuitable => write!(f, "Marginally suitable"),
            OverallTier::Unsuitable => write!(f, "Unsuitable"),
        }
    }
}

/// Combined assessment across climate, soil and terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub total_score: u32,
    pub max_score: u32,
    pub suitability_percent: f64,
    pub suitability: OverallTier,
    pub recommendation: String,
    pub strengths: Vec<String>,
    pub limitations: Vec<String>,
}

/// Sub-score cut points for one criterion
struct CriterionCheck {
    weak_below: u8,
    strong_from: u8,
    limitation: &'static str,
    strength: &'static str,
}

const TEMPERATURE: CriterionCheck = CriterionCheck {
    weak_below: 7,
    strong_from: 9,
    limitation: "Temperature outside the optimal range",
    strength: "Suitable temperature",
};

const PRECIPITATION: CriterionCheck = CriterionCheck {
    weak_below: 7,
    strong_from: 9,
    limitation: "Insufficient or excessive precipitation",
    strength: "Adequate precipitation",
};

const ELEVATION: CriterionCheck = CriterionCheck {
    weak_below: 7,
    strong_from: 9,
    limitation: "Elevation not ideal",
    strength: "Optimal elevation for quinoa",
};

const SLOPE: CriterionCheck = CriterionCheck {
    weak_below: 6,
    strong_from: 8,
    limitation: "Steep slope",
    strength: "Favorable topography",
};

const PH: CriterionCheck = CriterionCheck {
    weak_below: 6,
    strong_from: 9,
    limitation: "Soil pH not optimal",
    strength: "Suitable soil pH",
};

const DRAINAGE: CriterionCheck = CriterionCheck {
    weak_below: 6,
    strong_from: 9,
    limitation: "Poor drainage",
    strength: "Good soil drainage",
};

/// Combine the three category scores into the overall assessment
#[must_use]
pub fn aggregate(
    climate: &CategoryScore<ClimateScores>,
    soil: &CategoryScore<SoilScores>,
    terrain: &CategoryScore<TerrainScores>,
) -> OverallAssessment {
    let total_score = climate.total + soil.total + terrain.total;
    let max_score = ClimateScores::MAX + SoilScores::MAX + TerrainScores::MAX;
    let suitability_percent = percent_of(total_score, max_score);
    let suitability = OverallTier::from_percent(suitability_percent);

    // Display order is fixed.
    let checks = [
        (climate.scores.temperature, &TEMPERATURE),
        (climate.scores.precipitation, &PRECIPITATION),
        (terrain.scores.elevation, &ELEVATION),
        (terrain.scores.slope, &SLOPE),
        (soil.scores.ph, &PH),
        (soil.scores.drainage, &DRAINAGE),
    ];

    let mut strengths = Vec::new();
    let mut limitations = Vec::new();

    for (score, check) in checks {
        if score < check.weak_below {
            limitations.push(check.limitation.to_string());
        } else if score >= check.strong_from {
            strengths.push(check.strength.to_string());
        }
    }

    OverallAssessment {
        total_score,
        max_score,
        suitability_percent,
        suitability,
        recommendation: suitability.recommendation().to_string(),
        strengths,
        limitations,
    }
}
