//! NASA POWER daily point client
//!
//! Fetches daily series for the agricultural community and reduces them to
//! window statistics. Days flagged with the `-999` fill value are ignored.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, instrument, warn};

use super::{ClimateProvider, endpoint, fetch_json};
use crate::models::{ClimateMeasurement, Coordinate, DataGap, Measured};
use crate::suitability::AnalysisWindow;

const SOURCE: &str = "NASA POWER";

/// Marker NASA POWER uses for days without data
const FILL_VALUE: f64 = -999.0;

pub const SOLAR_RADIATION: &str = "ALLSKY_SFC_SW_DWN";
pub const TEMPERATURE: &str = "T2M";
pub const TEMPERATURE_MAX: &str = "T2M_MAX";
pub const TEMPERATURE_MIN: &str = "T2M_MIN";
pub const PRECIPITATION: &str = "PRECTOTCORR";
pub const EVAPOTRANSPIRATION: &str = "EVPTRNS";

const PARAMETERS: [&str; 6] = [
    SOLAR_RADIATION,
    TEMPERATURE,
    TEMPERATURE_MAX,
    TEMPERATURE_MIN,
    PRECIPITATION,
    EVAPOTRANSPIRATION,
];

/// Top-level daily point response
#[derive(Debug, Deserialize)]
pub struct PowerResponse {
    pub properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
pub struct PowerProperties {
    /// Parameter name to `YYYYMMDD` to value
    #[serde(default)]
    pub parameter: HashMap<String, BTreeMap<String, Option<f64>>>,
}

/// Summary statistics of one daily series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: usize,
}

impl SeriesStats {
    /// Statistics over valid samples; `None` when no sample is usable
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values
            .into_iter()
            .filter(|v| v.is_finite() && *v != FILL_VALUE)
        {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            mean: sum / count as f64,
            min,
            max,
            sum,
            count,
        })
    }
}

/// Precipitation to evapotranspiration ratio.
///
/// `None` when evapotranspiration is zero or either input is not finite.
#[must_use]
pub fn aridity_index(precipitation_sum: f64, evapotranspiration_sum: f64) -> Option<f64> {
    if !precipitation_sum.is_finite()
        || !evapotranspiration_sum.is_finite()
        || evapotranspiration_sum == 0.0
    {
        return None;
    }
    Some(precipitation_sum / evapotranspiration_sum)
}

/// Reduce a daily point response to the window's climate measurement
#[must_use]
pub fn climate_from_response(response: &PowerResponse) -> Measured<ClimateMeasurement> {
    let mut gaps = Vec::new();
    let mut stats = |parameter: &str| -> Option<SeriesStats> {
        let stats = response
            .properties
            .parameter
            .get(parameter)
            .and_then(|series| SeriesStats::from_values(series.values().flatten().copied()));
        if stats.is_none() {
            gaps.push(DataGap::new(SOURCE, parameter));
        }
        stats
    };

    let solar = stats(SOLAR_RADIATION);
    let temperature = stats(TEMPERATURE);
    let temperature_max = stats(TEMPERATURE_MAX);
    let temperature_min = stats(TEMPERATURE_MIN);
    let precipitation = stats(PRECIPITATION);
    let evapotranspiration = stats(EVAPOTRANSPIRATION);

    let precipitation_sum = precipitation.map_or(0.0, |s| s.sum);
    let evapotranspiration_sum = evapotranspiration.map_or(0.0, |s| s.sum);

    let aridity = match aridity_index(precipitation_sum, evapotranspiration_sum) {
        Some(index) => index,
        None => {
            gaps.push(DataGap::new(SOURCE, "aridity index"));
            0.0
        }
    };

    let measurement = ClimateMeasurement {
        temperature_mean: temperature.map_or(0.0, |s| s.mean),
        temperature_min: temperature_min.map_or(0.0, |s| s.min),
        temperature_max: temperature_max.map_or(0.0, |s| s.max),
        precipitation_annual: precipitation_sum,
        precipitation_mean_daily: precipitation.map_or(0.0, |s| s.mean),
        solar_radiation_mean: solar.map_or(0.0, |s| s.mean),
        evapotranspiration_annual: evapotranspiration_sum,
        aridity_index: aridity,
    };

    Measured::with_gaps(measurement, gaps)
}

/// NASA POWER HTTP client
#[derive(Clone)]
pub struct NasaPowerClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl NasaPowerClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Raw daily series for the given parameters
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn daily_series(
        &self,
        coordinate: Coordinate,
        window: &AnalysisWindow,
        parameters: &[&str],
    ) -> crate::Result<PowerResponse> {
        let url = endpoint(
            SOURCE,
            &self.base_url,
            &[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("start", window.start_compact()),
                ("end", window.end_compact()),
                ("parameters", parameters.join(",")),
                ("community", "AG".to_string()),
                ("format", "JSON".to_string()),
            ],
        )?;

        fetch_json(&self.client, SOURCE, url).await
    }

    /// Aridity index on its own, over the same window
    pub async fn aridity_index(
        &self,
        coordinate: Coordinate,
        window: &AnalysisWindow,
    ) -> crate::Result<Measured<f64>> {
        let climate = self.climate_statistics(coordinate, window).await?;
        Ok(Measured::with_gaps(
            climate.measurement.aridity_index,
            climate.gaps,
        ))
    }
}

#[async_trait]
impl ClimateProvider for NasaPowerClient {
    async fn climate_statistics(
        &self,
        coordinate: Coordinate,
        window: &AnalysisWindow,
    ) -> crate::Result<Measured<ClimateMeasurement>> {
        let response = self.daily_series(coordinate, window, &PARAMETERS).await?;
        let climate = climate_from_response(&response);

        if climate.is_partial() {
            warn!(
                "NASA POWER series incomplete for {}: {} gap(s)",
                coordinate.format_coordinates(),
                climate.gaps.len()
            );
        }
        info!(
            "Climate over {}: {:.1}°C mean, {:.0} mm precipitation",
            window, climate.measurement.temperature_mean, climate.measurement.precipitation_annual
        );

        Ok(climate)
    }
}
