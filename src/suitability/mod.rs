//! Quinoa suitability scoring
//!
//! Pure scorers turn each measurement into a [`CategoryScore`], the
//! aggregator combines the three categories into an [`OverallAssessment`],
//! and [`SuitabilityAnalyzer`] wires the data providers to both.

pub mod aggregate;
pub mod analysis;
pub mod analyzer;
pub mod category;
pub mod climate;
pub mod report;
pub mod soil;
pub mod terrain;
pub mod window;

pub use aggregate::{OverallAssessment, OverallTier, aggregate};
pub use analysis::SuitabilityAnalysis;
pub use analyzer::{AnalysisSettings, SuitabilityAnalyzer};
pub use category::{CategoryScore, CategoryTier, SubScores};
pub use climate::{ClimateAssessment, ClimateScores, score_climate};
pub use report::render_report;
pub use soil::{SoilAssessment, SoilScores, score_soil};
pub use terrain::{TerrainAssessment, TerrainScores, score_terrain};
pub use window::AnalysisWindow;
