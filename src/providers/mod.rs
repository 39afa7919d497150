//! External data sources
//!
//! The scoring core only sees the provider traits defined here. The HTTP
//! adapters in the submodules implement them against public APIs:
//! - NASA POWER: daily climate series
//! - SoilGrids: surface soil properties
//! - Open-Elevation / USGS: elevation grid for slope and aspect
//! - BigDataCloud: land/sea check

pub mod elevation;
pub mod land_sea;
pub mod nasa_power;
pub mod soilgrids;

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::config::{AppConfig, ProvidersConfig};
use crate::error::SuitabilityError;
use crate::models::{ClimateMeasurement, Coordinate, Measured, SoilMeasurement, TerrainMeasurement};
use crate::suitability::{AnalysisSettings, AnalysisWindow, SuitabilityAnalyzer};

pub use elevation::ElevationClient;
pub use land_sea::LandSeaClient;
pub use nasa_power::NasaPowerClient;
pub use soilgrids::SoilGridsClient;

/// Climate statistics over a date window
#[async_trait]
pub trait ClimateProvider: Send + Sync {
    async fn climate_statistics(
        &self,
        coordinate: Coordinate,
        window: &AnalysisWindow,
    ) -> crate::Result<Measured<ClimateMeasurement>>;
}

/// Surface soil properties
#[async_trait]
pub trait SoilProvider: Send + Sync {
    async fn soil_properties(&self, coordinate: Coordinate) -> crate::Result<Measured<SoilMeasurement>>;
}

/// Elevation, slope and aspect
#[async_trait]
pub trait TerrainProvider: Send + Sync {
    async fn terrain(&self, coordinate: Coordinate) -> crate::Result<Measured<TerrainMeasurement>>;
}

/// Decides whether a coordinate is on land
#[async_trait]
pub trait LandValidator: Send + Sync {
    async fn validate(&self, coordinate: Coordinate) -> crate::Result<LandCheck>;
}

/// How much a land/sea answer can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// Result of a land/sea check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandCheck {
    pub is_land: bool,
    pub confidence: Confidence,
    /// Country code when the reverse geocoder resolved one
    pub country: Option<String>,
}

/// Build the shared HTTP client with transient-failure retries
pub fn build_http_client(config: &ProvidersConfig) -> crate::Result<ClientWithMiddleware> {
    let timeout = Duration::from_secs(config.timeout_seconds.into());

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("QuinoaFit/{}", crate::VERSION))
        .build()
        .map_err(|e| SuitabilityError::config(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Wire the HTTP providers into an analyzer
pub fn analyzer_from_config(config: &AppConfig, check_land: bool) -> crate::Result<SuitabilityAnalyzer> {
    let client = build_http_client(&config.providers)?;
    let providers = &config.providers;

    let analyzer = SuitabilityAnalyzer::new(
        Arc::new(NasaPowerClient::new(client.clone(), &providers.nasa_power_url)),
        Arc::new(SoilGridsClient::new(client.clone(), &providers.soilgrids_url)),
        Arc::new(ElevationClient::new(
            client.clone(),
            &providers.open_elevation_url,
            &providers.usgs_url,
        )),
    )
    .with_settings(AnalysisSettings::from(&config.analysis));

    if check_land {
        Ok(analyzer.with_land_validator(Arc::new(LandSeaClient::new(
            client,
            &providers.bigdatacloud_url,
        ))))
    } else {
        Ok(analyzer)
    }
}

/// Build a request URL from a configured base and query parameters
pub(crate) fn endpoint(source: &str, base: &str, params: &[(&str, String)]) -> crate::Result<Url> {
    Url::parse_with_params(base, params)
        .map_err(|e| SuitabilityError::config(format!("Invalid {source} URL '{base}': {e}")))
}

/// GET a URL and decode its JSON body.
///
/// Transport failures and non-success statuses become `ProviderUnavailable`;
/// a body that does not match `T` becomes `ProviderResponse`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    source: &str,
    url: Url,
) -> crate::Result<T> {
    debug!("{} request URL: {}", source, url);
    let start_time = Instant::now();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SuitabilityError::unavailable(source, format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        error!("{} returned HTTP {}", source, status);
        return Err(SuitabilityError::unavailable(source, format!("HTTP {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SuitabilityError::unavailable(source, format!("failed to read body: {e}")))?;

    debug!(
        "{} responded in {:.3}s ({} bytes)",
        source,
        start_time.elapsed().as_secs_f64(),
        body.len()
    );

    serde_json::from_str(&body).map_err(|e| {
        error!("Failed to parse {} response: {}", source, e);
        SuitabilityError::response(source, e.to_string())
    })
}
