//! Per-category score container and the 3-tier category classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed set of 0-10 criterion scores for one category
pub trait SubScores {
    /// Highest achievable category total
    const MAX: u32;

    /// Criterion name and score pairs, in display order
    fn entries(&self) -> Vec<(&'static str, u8)>;

    fn total(&self) -> u32 {
        self.entries()
            .iter()
            .map(|(_, score)| u32::from(*score))
            .sum()
    }
}

/// 3-tier classification applied to each category on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryTier {
    /// Category percent >= 75
    HighlySuitable,
    /// Category percent >= 50
    ModeratelySuitable,
    /// Category percent < 50
    PoorlySuitable,
}

impl CategoryTier {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p >= 75.0 => CategoryTier::HighlySuitable,
            p if p >= 50.0 => CategoryTier::ModeratelySuitable,
            _ => CategoryTier::PoorlySuitable,
        }
    }
}

impl fmt::Display for CategoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryTier::HighlySuitable => write!(f, "Highly suitable"),
            CategoryTier::ModeratelySuitable => write!(f, "Moderately suitable"),
            CategoryTier::PoorlySuitable => write!(f, "Poorly suitable"),
        }
    }
}

/// Scored category: sub-scores, their sum and the category tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore<S> {
    pub scores: S,
    pub total: u32,
    pub max: u32,
    pub suitability_percent: f64,
    pub suitability: CategoryTier,
}

impl<S: SubScores> CategoryScore<S> {
    #[must_use]
    pub fn new(scores: S) -> Self {
        let total = scores.total();
        let max = S::MAX;
        let suitability_percent = percent_of(total, max);

        Self {
            scores,
            total,
            max,
            suitability_percent,
            suitability: CategoryTier::from_percent(suitability_percent),
        }
    }

    /// Criterion name to score mapping
    #[must_use]
    pub fn subscores(&self) -> Vec<(&'static str, u8)> {
        self.scores.entries()
    }
}

/// `100 * total / max`, computed so that exact ratios stay exact
pub(crate) fn percent_of(total: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    100.0 * f64::from(total) / f64::from(max)
}

/// Inclusive band check; NaN is never inside
pub(crate) fn within(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}
