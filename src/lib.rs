//! `QuinoaFit` - quinoa crop suitability scoring
//!
//! This library scores a coordinate for quinoa cultivation from climate,
//! soil and terrain data, and explains the result with strengths,
//! limitations and a recommendation.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod suitability;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::SuitabilityError;
pub use models::{ClimateMeasurement, Coordinate, DataGap, Measured, SoilMeasurement, TerrainMeasurement};
pub use providers::{ClimateProvider, LandValidator, SoilProvider, TerrainProvider};
pub use suitability::{
    AnalysisSettings, AnalysisWindow, OverallTier, SuitabilityAnalysis, SuitabilityAnalyzer,
    render_report,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SuitabilityError>;
