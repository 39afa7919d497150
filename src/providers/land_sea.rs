//! Land/sea check via BigDataCloud reverse geocoding
//!
//! When the service cannot be reached the check falls back to a coarse
//! open-ocean heuristic and reports low confidence instead of failing.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{Confidence, LandCheck, LandValidator, endpoint, fetch_json};
use crate::models::Coordinate;

const SOURCE: &str = "BigDataCloud";

/// Latitude beyond which points are rejected outright
const MAX_ABS_LATITUDE: f64 = 85.0;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocode {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub principal_subdivision: Option<String>,
}

impl ReverseGeocode {
    /// Land needs a country code and no hint of open water
    #[must_use]
    pub fn is_land(&self) -> bool {
        let has_country = self.country_code.as_deref().is_some_and(|c| !c.is_empty());

        let locality = self.locality.as_deref().unwrap_or_default().to_lowercase();
        let unnamed_place = self.city.as_deref() == Some("")
            && self.principal_subdivision.as_deref() == Some("");
        let is_ocean = locality.contains("ocean") || locality.contains("sea") || unnamed_place;

        has_country && !is_ocean
    }
}

/// Coarse open-ocean boxes; everything else counts as land
#[must_use]
pub fn likely_on_land(coordinate: Coordinate) -> bool {
    let Coordinate {
        latitude: lat,
        longitude: lon,
    } = coordinate;

    let central_pacific =
        lat > -30.0 && lat < 30.0 && ((lon > 160.0 && lon <= 180.0) || (lon >= -180.0 && lon < -120.0));
    let central_atlantic = lat > -20.0 && lat < 20.0 && lon > -50.0 && lon < -10.0;
    let central_indian = lat > -30.0 && lat < 10.0 && lon > 60.0 && lon < 95.0;
    let southern_ocean = lat < -65.0;
    let arctic = lat > 80.0;

    !(central_pacific || central_atlantic || central_indian || southern_ocean || arctic)
}

/// BigDataCloud land validator
#[derive(Clone)]
pub struct LandSeaClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl LandSeaClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> crate::Result<ReverseGeocode> {
        let url = endpoint(
            SOURCE,
            &self.base_url,
            &[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ],
        )?;
        fetch_json(&self.client, SOURCE, url).await
    }
}

#[async_trait]
impl LandValidator for LandSeaClient {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn validate(&self, coordinate: Coordinate) -> crate::Result<LandCheck> {
        if coordinate.latitude.abs() > MAX_ABS_LATITUDE || coordinate.longitude.abs() > 180.0 {
            return Ok(LandCheck {
                is_land: false,
                confidence: Confidence::High,
                country: None,
            });
        }

        match self.reverse_geocode(coordinate).await {
            Ok(place) => {
                let is_land = place.is_land();
                debug!(
                    "Reverse geocode: country={:?}, locality={:?}, land={}",
                    place.country_name, place.locality, is_land
                );
                Ok(LandCheck {
                    is_land,
                    confidence: Confidence::High,
                    country: place.country_code.filter(|c| !c.is_empty()),
                })
            }
            Err(e) => {
                warn!("Land check unavailable ({}), using ocean heuristic", e);
                Ok(LandCheck {
                    is_land: likely_on_land(coordinate),
                    confidence: Confidence::Low,
                    country: None,
                })
            }
        }
    }
}
