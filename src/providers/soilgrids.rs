//! SoilGrids v2.0 client
//!
//! Queries the 0-5 cm mean of each property. SoilGrids stores integers
//! scaled by `d_factor`, so each mean is divided back to its target unit.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{SoilProvider, endpoint, fetch_json};
use crate::models::{Coordinate, DataGap, Drainage, Measured, SoilMeasurement, SoilTexture};

const SOURCE: &str = "SoilGrids";

const SURFACE_DEPTH: &str = "0-5cm";

/// Van Bemmelen factor, organic carbon to organic matter
const ORGANIC_MATTER_FACTOR: f64 = 1.72;

const PROPERTIES: [&str; 7] = ["clay", "sand", "silt", "soc", "phh2o", "nitrogen", "cec"];

#[derive(Debug, Deserialize)]
pub struct SoilGridsResponse {
    pub properties: SoilGridsProperties,
}

#[derive(Debug, Deserialize)]
pub struct SoilGridsProperties {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
pub struct Layer {
    pub name: String,
    pub unit_measure: UnitMeasure,
    #[serde(default)]
    pub depths: Vec<Depth>,
}

#[derive(Debug, Deserialize)]
pub struct UnitMeasure {
    #[serde(default)]
    pub d_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Depth {
    #[serde(default)]
    pub label: String,
    pub values: DepthValues,
}

#[derive(Debug, Deserialize)]
pub struct DepthValues {
    #[serde(default)]
    pub mean: Option<f64>,
}

impl SoilGridsResponse {
    /// Surface mean of a property in target units
    #[must_use]
    pub fn value(&self, property: &str) -> Option<f64> {
        let layer = self.properties.layers.iter().find(|l| l.name == property)?;
        let mean = layer.depths.first()?.values.mean.filter(|m| m.is_finite())?;

        match layer.unit_measure.d_factor {
            Some(factor) if factor != 0.0 => Some(mean / factor),
            _ => Some(mean),
        }
    }
}

/// Convert a properties response into a soil measurement
#[must_use]
pub fn soil_from_response(response: &SoilGridsResponse) -> Measured<SoilMeasurement> {
    let mut gaps = Vec::new();
    let mut value = |property: &str| -> f64 {
        response.value(property).unwrap_or_else(|| {
            gaps.push(DataGap::new(SOURCE, property));
            0.0
        })
    };

    let clay = value("clay");
    let sand = value("sand");
    let silt = value("silt");
    let organic_carbon = value("soc");
    let ph = value("phh2o");
    let nitrogen = value("nitrogen");
    let cec = value("cec");

    let measurement = SoilMeasurement {
        texture: SoilTexture::classify(sand, silt, clay),
        ph,
        organic_matter: organic_carbon * ORGANIC_MATTER_FACTOR,
        drainage: Drainage::from_sand(sand),
        clay,
        sand,
        silt,
        organic_carbon,
        nitrogen,
        cec,
    };

    Measured::with_gaps(measurement, gaps)
}

/// SoilGrids HTTP client
#[derive(Clone)]
pub struct SoilGridsClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl SoilGridsClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn query(&self, coordinate: Coordinate) -> crate::Result<SoilGridsResponse> {
        let mut params = vec![
            ("lon", coordinate.longitude.to_string()),
            ("lat", coordinate.latitude.to_string()),
        ];
        params.extend(PROPERTIES.iter().map(|p| ("property", (*p).to_string())));
        params.push(("depth", SURFACE_DEPTH.to_string()));
        params.push(("value", "mean".to_string()));

        let url = endpoint(SOURCE, &self.base_url, &params)?;
        fetch_json(&self.client, SOURCE, url).await
    }
}

#[async_trait]
impl SoilProvider for SoilGridsClient {
    async fn soil_properties(&self, coordinate: Coordinate) -> crate::Result<Measured<SoilMeasurement>> {
        let response = self.query(coordinate).await?;
        let soil = soil_from_response(&response);

        if soil.is_partial() {
            warn!(
                "SoilGrids has no value for {} at {}; using 0",
                soil.gaps
                    .iter()
                    .map(|g| g.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                coordinate.format_coordinates()
            );
        }
        info!(
            "Soil: {} texture, pH {:.1}, {:.1} g/kg organic matter",
            soil.measurement.texture, soil.measurement.ph, soil.measurement.organic_matter
        );

        Ok(soil)
    }
}
