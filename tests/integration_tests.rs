//! Integration tests for the QuinoaFit library and CLI

use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use quinoafit::models::{Aspect, Drainage, SoilTexture};
use quinoafit::{
    AnalysisWindow, ClimateMeasurement, ClimateProvider, Coordinate, DataGap, Measured,
    OverallTier, SoilMeasurement, SoilProvider, SuitabilityAnalyzer, SuitabilityError,
    TerrainMeasurement, TerrainProvider, render_report,
};

struct StaticClimate(Measured<ClimateMeasurement>);
struct StaticSoil(Measured<SoilMeasurement>);
struct StaticTerrain(Measured<TerrainMeasurement>);
struct DownSoil;
struct StalledTerrain;

#[async_trait]
impl ClimateProvider for StaticClimate {
    async fn climate_statistics(
        &self,
        _coordinate: Coordinate,
        _window: &AnalysisWindow,
    ) -> quinoafit::Result<Measured<ClimateMeasurement>> {
        Ok(self.0.clone())
    }
}

#[async_trait]
impl SoilProvider for StaticSoil {
    async fn soil_properties(&self, _coordinate: Coordinate) -> quinoafit::Result<Measured<SoilMeasurement>> {
        Ok(self.0.clone())
    }
}

#[async_trait]
impl SoilProvider for DownSoil {
    async fn soil_properties(&self, _coordinate: Coordinate) -> quinoafit::Result<Measured<SoilMeasurement>> {
        Err(SuitabilityError::unavailable("SoilGrids", "HTTP 503"))
    }
}

#[async_trait]
impl TerrainProvider for StaticTerrain {
    async fn terrain(&self, _coordinate: Coordinate) -> quinoafit::Result<Measured<TerrainMeasurement>> {
        Ok(self.0.clone())
    }
}

#[async_trait]
impl TerrainProvider for StalledTerrain {
    async fn terrain(&self, _coordinate: Coordinate) -> quinoafit::Result<Measured<TerrainMeasurement>> {
        futures::future::pending().await
    }
}

fn altiplano_climate() -> ClimateMeasurement {
    ClimateMeasurement {
        temperature_mean: 15.0,
        temperature_min: 1.0,
        temperature_max: 24.0,
        precipitation_annual: 500.0,
        precipitation_mean_daily: 1.37,
        solar_radiation_mean: 18.0,
        evapotranspiration_annual: 1250.0,
        aridity_index: 0.4,
    }
}

fn loam_soil() -> SoilMeasurement {
    SoilMeasurement {
        texture: SoilTexture::Loam,
        ph: 7.0,
        organic_matter: 25.0,
        drainage: Drainage::Good,
        clay: 20.0,
        sand: 40.0,
        silt: 40.0,
        organic_carbon: 14.5,
        nitrogen: 1.2,
        cec: 140.0,
    }
}

fn north_facing_terrain() -> TerrainMeasurement {
    TerrainMeasurement {
        elevation: 3000.0,
        slope: 3.0,
        aspect: Aspect::N,
        aspect_degrees: 5.0,
    }
}

fn analyzer_with(
    climate: Measured<ClimateMeasurement>,
    soil: Measured<SoilMeasurement>,
    terrain: Measured<TerrainMeasurement>,
) -> SuitabilityAnalyzer {
    SuitabilityAnalyzer::new(
        Arc::new(StaticClimate(climate)),
        Arc::new(StaticSoil(soil)),
        Arc::new(StaticTerrain(terrain)),
    )
}

fn ideal_analyzer() -> SuitabilityAnalyzer {
    analyzer_with(
        Measured::complete(altiplano_climate()),
        Measured::complete(loam_soil()),
        Measured::complete(north_facing_terrain()),
    )
}

#[tokio::test]
async fn test_ideal_altiplano_site_scores_full_marks() {
    let analysis = ideal_analyzer().analyze(-16.5, -68.15).await.unwrap();

    assert_eq!(analysis.climate.score.total, 40);
    assert_eq!(analysis.climate.score.suitability_percent, 100.0);
    assert_eq!(analysis.soil.score.total, 40);
    assert_eq!(analysis.soil.score.suitability_percent, 100.0);
    assert_eq!(analysis.terrain.score.total, 30);
    assert_eq!(analysis.terrain.score.suitability_percent, 100.0);

    let overall = &analysis.overall;
    assert_eq!(overall.total_score, 110);
    assert_eq!(overall.max_score, 110);
    assert_eq!(overall.suitability_percent, 100.0);
    assert_eq!(overall.suitability, OverallTier::HighlySuitable);
    assert!(overall.recommendation.starts_with("Excellent location"));
    assert_eq!(overall.strengths.len(), 6);
    assert!(overall.limitations.is_empty());
    assert!(!analysis.is_partial());
}

#[tokio::test]
async fn test_same_site_in_northern_hemisphere_loses_aspect_points() {
    let analysis = ideal_analyzer().analyze(16.5, -68.15).await.unwrap();

    assert!(analysis.terrain.score.scores.aspect < 10);
    assert!(analysis.overall.total_score < 110);
}

#[tokio::test]
async fn test_report_is_stable_for_a_given_analysis() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let coordinate = Coordinate::new(-16.5, -68.15).unwrap();
    let analysis = ideal_analyzer().analyze_at(coordinate, now).await.unwrap();

    let first = render_report(&analysis);
    let second = render_report(&analysis);
    assert_eq!(first, second);
    assert_eq!(first, analysis.to_string());
    assert!(first.contains("Climate window: 2024-02-14 to 2025-02-14"));
    assert!(first.contains("• Score: 110/110"));
    assert!(!first.contains("MISSING DATA"));
}

#[tokio::test]
async fn test_missing_upstream_values_are_flagged() {
    let mut climate = altiplano_climate();
    climate.solar_radiation_mean = 0.0;
    let analyzer = analyzer_with(
        Measured::with_gaps(
            climate,
            vec![DataGap::new("NASA POWER", "solar radiation")],
        ),
        Measured::complete(loam_soil()),
        Measured::complete(north_facing_terrain()),
    );

    let analysis = analyzer.analyze(-16.5, -68.15).await.unwrap();

    assert!(analysis.is_partial());
    assert_eq!(analysis.data_gaps.len(), 1);
    assert!(analysis.overall.total_score < 110);
    assert!(render_report(&analysis).contains("MISSING DATA"));
}

#[tokio::test]
async fn test_one_failed_source_fails_the_whole_analysis() {
    let analyzer = SuitabilityAnalyzer::new(
        Arc::new(StaticClimate(Measured::complete(altiplano_climate()))),
        Arc::new(DownSoil),
        Arc::new(StalledTerrain),
    );

    let result = tokio::time::timeout(Duration::from_secs(5), analyzer.analyze(-16.5, -68.15))
        .await
        .expect("analysis should not wait for the stalled terrain source");

    match result {
        Err(SuitabilityError::ProviderUnavailable { source_name, .. }) => {
            assert_eq!(source_name, "SoilGrids");
        }
        other => panic!("expected provider failure, got {:?}", other.map(|a| a.overall)),
    }
}

#[tokio::test]
async fn test_out_of_range_coordinate_is_rejected() {
    let result = ideal_analyzer().analyze(-91.0, 0.0).await;
    assert!(matches!(
        result,
        Err(SuitabilityError::InvalidCoordinate { .. })
    ));
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_quinoafit"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("quinoa"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("serve"));
}

/// Test that a malformed coordinate is rejected before any network access
#[test]
fn test_cli_rejects_out_of_range_latitude() {
    let output = Command::new(env!("CARGO_BIN_EXE_quinoafit"))
        .args(["analyze", "95,10"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Latitude must be between -90 and 90"));
}
