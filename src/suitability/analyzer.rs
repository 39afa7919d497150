//! Suitability orchestrator: fetches the three data sources concurrently and
//! scores the result

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::analysis::SuitabilityAnalysis;
use super::window::AnalysisWindow;
use crate::config::AnalysisConfig;
use crate::error::SuitabilityError;
use crate::models::Coordinate;
use crate::providers::{ClimateProvider, LandValidator, SoilProvider, TerrainProvider};

/// Window policy for the climate statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Days skipped at the end of the window
    pub recency_offset_days: u32,
    /// Window length in years
    pub window_years: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            recency_offset_days: 15,
            window_years: 1,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisSettings {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            recency_offset_days: config.recency_offset_days,
            window_years: config.window_years,
        }
    }
}

/// Stateless orchestrator over the climate, soil and terrain providers
#[derive(Clone)]
pub struct SuitabilityAnalyzer {
    climate: Arc<dyn ClimateProvider>,
    soil: Arc<dyn SoilProvider>,
    terrain: Arc<dyn TerrainProvider>,
    land: Option<Arc<dyn LandValidator>>,
    settings: AnalysisSettings,
}

impl SuitabilityAnalyzer {
    #[must_use]
    pub fn new(
        climate: Arc<dyn ClimateProvider>,
        soil: Arc<dyn SoilProvider>,
        terrain: Arc<dyn TerrainProvider>,
    ) -> Self {
        Self {
            climate,
            soil,
            terrain,
            land: None,
            settings: AnalysisSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Reject open-ocean coordinates before any data source is queried
    #[must_use]
    pub fn with_land_validator(mut self, validator: Arc<dyn LandValidator>) -> Self {
        self.land = Some(validator);
        self
    }

    #[must_use]
    pub fn settings(&self) -> AnalysisSettings {
        self.settings
    }

    /// Analyze a coordinate using the current time for the climate window
    pub async fn analyze(&self, latitude: f64, longitude: f64) -> crate::Result<SuitabilityAnalysis> {
        let coordinate = Coordinate::new(latitude, longitude)?;
        self.analyze_at(coordinate, Utc::now()).await
    }

    /// Analyze a coordinate with an explicit "now".
    ///
    /// The three providers run concurrently; the first failure aborts the
    /// whole analysis and no partial result is returned.
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn analyze_at(
        &self,
        coordinate: Coordinate,
        now: DateTime<Utc>,
    ) -> crate::Result<SuitabilityAnalysis> {
        let start_time = Instant::now();

        if let Some(land) = &self.land {
            let check = land.validate(coordinate).await?;
            if !check.is_land {
                return Err(SuitabilityError::invalid_coordinate(format!(
                    "{} appears to be open ocean ({} confidence)",
                    coordinate.format_coordinates(),
                    check.confidence
                )));
            }
            debug!("Land check passed with {} confidence", check.confidence);
        }

        let window = AnalysisWindow::trailing(
            now,
            self.settings.recency_offset_days,
            self.settings.window_years,
        );
        info!(
            "Analyzing {} over climate window {}",
            coordinate.format_coordinates(),
            window
        );

        let (climate, soil, terrain) = futures::try_join!(
            self.climate.climate_statistics(coordinate, &window),
            self.soil.soil_properties(coordinate),
            self.terrain.terrain(coordinate),
        )?;

        let analysis =
            SuitabilityAnalysis::assemble(coordinate, window, now, climate, soil, terrain);

        if analysis.is_partial() {
            warn!(
                "Analysis used zero defaults for {} missing field(s): {}",
                analysis.data_gaps.len(),
                analysis
                    .data_gaps
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        info!(
            "Suitability {} ({:.0}%) computed in {:.3}s",
            analysis.overall.suitability,
            analysis.overall.suitability_percent,
            start_time.elapsed().as_secs_f64()
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use crate::providers::{Confidence, LandCheck};
    use crate::suitability::OverallTier;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeClimate {
        seen_window: Mutex<Option<AnalysisWindow>>,
    }

    #[async_trait]
    impl ClimateProvider for FakeClimate {
        async fn climate_statistics(
            &self,
            _coordinate: Coordinate,
            window: &AnalysisWindow,
        ) -> crate::Result<Measured<ClimateMeasurement>> {
            *self.seen_window.lock().unwrap() = Some(*window);
            Ok(Measured::complete(ClimateMeasurement {
                temperature_mean: 15.0,
                temperature_min: 2.0,
                temperature_max: 24.0,
                precipitation_annual: 500.0,
                precipitation_mean_daily: 1.4,
                solar_radiation_mean: 18.0,
                evapotranspiration_annual: 1250.0,
                aridity_index: 0.4,
            }))
        }
    }

    struct FakeSoil {
        gaps: Vec<DataGap>,
    }

    #[async_trait]
    impl SoilProvider for FakeSoil {
        async fn soil_properties(&self, _coordinate: Coordinate) -> crate::Result<Measured<SoilMeasurement>> {
            Ok(Measured::with_gaps(
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
                },
                self.gaps.clone(),
            ))
        }
    }

    struct FakeTerrain;

    #[async_trait]
    impl TerrainProvider for FakeTerrain {
        async fn terrain(&self, _coordinate: Coordinate) -> crate::Result<Measured<TerrainMeasurement>> {
            Ok(Measured::complete(TerrainMeasurement {
                elevation: 3000.0,
                slope: 3.0,
                aspect: Aspect::N,
                aspect_degrees: 0.0,
            }))
        }
    }

    struct FailingTerrain;

    #[async_trait]
    impl TerrainProvider for FailingTerrain {
        async fn terrain(&self, _coordinate: Coordinate) -> crate::Result<Measured<TerrainMeasurement>> {
            Err(SuitabilityError::unavailable("Open-Elevation", "HTTP 503"))
        }
    }

    /// Climate provider that never finishes on its own
    struct HangingClimate;

    #[async_trait]
    impl ClimateProvider for HangingClimate {
        async fn climate_statistics(
            &self,
            _coordinate: Coordinate,
            _window: &AnalysisWindow,
        ) -> crate::Result<Measured<ClimateMeasurement>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(SuitabilityError::unavailable("NASA POWER", "timed out"))
        }
    }

    struct FixedLand {
        is_land: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LandValidator for FixedLand {
        async fn validate(&self, _coordinate: Coordinate) -> crate::Result<LandCheck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LandCheck {
                is_land: self.is_land,
                confidence: Confidence::High,
                country: None,
            })
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 8, 30, 0).unwrap()
    }

    fn analyzer(gaps: Vec<DataGap>) -> (SuitabilityAnalyzer, Arc<FakeClimate>) {
        let climate = Arc::new(FakeClimate {
            seen_window: Mutex::new(None),
        });
        let analyzer = SuitabilityAnalyzer::new(
            climate.clone(),
            Arc::new(FakeSoil { gaps }),
            Arc::new(FakeTerrain),
        );
        (analyzer, climate)
    }

    #[tokio::test]
    async fn test_full_marks_location() {
        let (analyzer, climate) = analyzer(Vec::new());
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();

        let analysis = analyzer.analyze_at(coordinate, now()).await.unwrap();

        assert_eq!(analysis.overall.total_score, 110);
        assert_eq!(analysis.overall.suitability, OverallTier::HighlySuitable);
        assert_eq!(analysis.overall.strengths.len(), 6);
        assert!(analysis.overall.limitations.is_empty());
        assert!(!analysis.is_partial());
        assert_eq!(analysis.generated_at, now());

        let window = climate.seen_window.lock().unwrap().unwrap();
        assert_eq!(window, analysis.window);
        assert_eq!(window.end_compact(), "20240605");
        assert_eq!(window.start_compact(), "20230605");
    }

    #[tokio::test]
    async fn test_hemisphere_changes_aspect_score() {
        let (analyzer, _) = analyzer(Vec::new());
        let coordinate = Coordinate::new(16.5, -68.15).unwrap();

        let analysis = analyzer.analyze_at(coordinate, now()).await.unwrap();

        assert_eq!(analysis.terrain.hemisphere, Hemisphere::North);
        assert_eq!(analysis.terrain.score.scores.aspect, 6);
        assert_eq!(analysis.overall.total_score, 106);
    }

    #[tokio::test]
    async fn test_data_gaps_flag_partial_analysis() {
        let (analyzer, _) = analyzer(vec![DataGap::new("SoilGrids", "nitrogen")]);
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();

        let analysis = analyzer.analyze_at(coordinate, now()).await.unwrap();

        assert!(analysis.is_partial());
        assert_eq!(analysis.data_gaps, vec![DataGap::new("SoilGrids", "nitrogen")]);
    }

    #[tokio::test]
    async fn test_settings_change_window() {
        let (analyzer, climate) = analyzer(Vec::new());
        let analyzer = analyzer.with_settings(AnalysisSettings {
            recency_offset_days: 0,
            window_years: 2,
        });
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();

        analyzer.analyze_at(coordinate, now()).await.unwrap();

        let window = climate.seen_window.lock().unwrap().unwrap();
        assert_eq!(window.end_compact(), "20240620");
        assert_eq!(window.start_compact(), "20220620");
    }

    #[tokio::test]
    async fn test_provider_failure_is_fatal() {
        let analyzer = SuitabilityAnalyzer::new(
            Arc::new(FakeClimate {
                seen_window: Mutex::new(None),
            }),
            Arc::new(FakeSoil { gaps: Vec::new() }),
            Arc::new(FailingTerrain),
        );
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();

        let error = analyzer.analyze_at(coordinate, now()).await.unwrap_err();

        assert!(matches!(
            error,
            SuitabilityError::ProviderUnavailable { ref source_name, .. } if source_name == "Open-Elevation"
        ));
    }

    #[tokio::test]
    async fn test_failure_does_not_wait_for_slow_provider() {
        let analyzer = SuitabilityAnalyzer::new(
            Arc::new(HangingClimate),
            Arc::new(FakeSoil { gaps: Vec::new() }),
            Arc::new(FailingTerrain),
        );
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            analyzer.analyze_at(coordinate, now()),
        )
        .await
        .expect("fail-fast join should not wait for the hanging provider");

        assert!(result.unwrap_err().is_provider_failure());
    }

    #[tokio::test]
    async fn test_invalid_coordinate_rejected() {
        let (analyzer, climate) = analyzer(Vec::new());

        let error = analyzer.analyze(95.0, 0.0).await.unwrap_err();

        assert!(matches!(error, SuitabilityError::InvalidCoordinate { .. }));
        assert!(climate.seen_window.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ocean_rejected_before_providers() {
        let land = Arc::new(FixedLand {
            is_land: false,
            calls: AtomicUsize::new(0),
        });
        let (analyzer, climate) = analyzer(Vec::new());
        let analyzer = analyzer.with_land_validator(land.clone());
        let coordinate = Coordinate::new(0.0, -140.0).unwrap();

        let error = analyzer.analyze_at(coordinate, now()).await.unwrap_err();

        assert!(matches!(error, SuitabilityError::InvalidCoordinate { .. }));
        assert_eq!(land.calls.load(Ordering::SeqCst), 1);
        assert!(climate.seen_window.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_land_passes_through() {
        let land = Arc::new(FixedLand {
            is_land: true,
            calls: AtomicUsize::new(0),
        });
        let (analyzer, _) = analyzer(Vec::new());
        let analyzer = analyzer.with_land_validator(land);
        let coordinate = Coordinate::new(-16.5, -68.15).unwrap();

        assert!(analyzer.analyze_at(coordinate, now()).await.is_ok());
    }
}
