//! Elevation, slope and aspect from Open-Elevation with a USGS fallback
//!
//! Slope and aspect come from a 3x3 elevation grid around the point using
//! Horn's finite differences.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{TerrainProvider, endpoint, fetch_json};
use crate::error::SuitabilityError;
use crate::models::{Aspect, Coordinate, DataGap, Measured, TerrainMeasurement};

const OPEN_ELEVATION: &str = "Open-Elevation";
const USGS: &str = "USGS EPQS";

/// Grid spacing in degrees, about 111 m at the equator
pub const CELL_SIZE_DEGREES: f64 = 0.001;

const METERS_PER_DEGREE: f64 = 111_000.0;

#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
pub struct LookupResult {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UsgsResponse {
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl UsgsResponse {
    /// Elevation in meters; EPQS sometimes encodes it as a string
    #[must_use]
    pub fn elevation(&self) -> Option<f64> {
        let elevation = match self.value.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        elevation.filter(|v| v.is_finite() && *v > -1_000_000.0)
    }
}

/// 3x3 grid centred on `center`, rows south to north, columns west to east
#[must_use]
pub fn grid_points(center: Coordinate, cell_size: f64) -> [Coordinate; 9] {
    let mut points = [center; 9];
    for (row, lat_step) in [-1.0, 0.0, 1.0].into_iter().enumerate() {
        for (col, lon_step) in [-1.0, 0.0, 1.0].into_iter().enumerate() {
            points[row * 3 + col] = Coordinate {
                latitude: center.latitude + lat_step * cell_size,
                longitude: center.longitude + lon_step * cell_size,
            };
        }
    }
    points
}

/// Slope in degrees and aspect in degrees clockwise from North.
///
/// `grid` is ordered as returned by [`grid_points`], southern row first:
/// ```text
/// z1 z2 z3   south
/// z4 z5 z6
/// z7 z8 z9   north
/// ```
/// The kernel treats `z1..z3` as the top row, so east-west aspect is
/// downslope while north-south aspect points upslope.
#[must_use]
pub fn horn_slope_aspect(grid: &[f64; 9], cell_size: f64) -> (f64, f64) {
    let [z1, z2, z3, z4, _, z6, z7, z8, z9] = *grid;
    let spacing = 8.0 * cell_size * METERS_PER_DEGREE;

    let dz_dx = ((z3 + 2.0 * z6 + z9) - (z1 + 2.0 * z4 + z7)) / spacing;
    let dz_dy = ((z7 + 2.0 * z8 + z9) - (z1 + 2.0 * z2 + z3)) / spacing;

    let slope = dz_dx.hypot(dz_dy).atan().to_degrees();

    let raw = dz_dy.atan2(-dz_dx).to_degrees();
    let aspect = if raw < 0.0 {
        90.0 - raw
    } else if raw > 90.0 {
        360.0 - raw + 90.0
    } else {
        90.0 - raw
    };

    (slope, aspect)
}

/// Open-Elevation client with USGS point fallback
#[derive(Clone)]
pub struct ElevationClient {
    client: ClientWithMiddleware,
    open_elevation_url: String,
    usgs_url: String,
}

impl ElevationClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, open_elevation_url: &str, usgs_url: &str) -> Self {
        Self {
            client,
            open_elevation_url: open_elevation_url.to_string(),
            usgs_url: usgs_url.to_string(),
        }
    }

    /// Elevation of a single point, falling back to USGS on any failure
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn point_elevation(&self, coordinate: Coordinate) -> crate::Result<Measured<f64>> {
        match self.lookup(&[coordinate]).await {
            Ok(values) => match values.first().copied().flatten() {
                Some(elevation) => return Ok(Measured::complete(elevation)),
                None => warn!("Open-Elevation returned no elevation, trying USGS"),
            },
            Err(e) => warn!("Open-Elevation failed ({}), trying USGS", e),
        }

        self.usgs_elevation(coordinate).await
    }

    async fn usgs_elevation(&self, coordinate: Coordinate) -> crate::Result<Measured<f64>> {
        let url = endpoint(
            USGS,
            &self.usgs_url,
            &[
                ("x", coordinate.longitude.to_string()),
                ("y", coordinate.latitude.to_string()),
                ("units", "Meters".to_string()),
                ("output", "json".to_string()),
            ],
        )?;

        let response: UsgsResponse = fetch_json(&self.client, USGS, url).await?;
        Ok(match response.elevation() {
            Some(elevation) => Measured::complete(elevation),
            None => Measured::with_gaps(0.0, vec![DataGap::new(USGS, "elevation")]),
        })
    }

    /// Batch lookup; one entry per point, `None` where the service had no value
    async fn lookup(&self, points: &[Coordinate]) -> crate::Result<Vec<Option<f64>>> {
        let locations = points
            .iter()
            .map(|p| format!("{},{}", p.latitude, p.longitude))
            .collect::<Vec<_>>()
            .join("|");
        let url = endpoint(OPEN_ELEVATION, &self.open_elevation_url, &[("locations", locations)])?;

        let response: LookupResponse = fetch_json(&self.client, OPEN_ELEVATION, url).await?;
        if response.results.len() != points.len() {
            return Err(SuitabilityError::response(
                OPEN_ELEVATION,
                format!(
                    "expected {} results, got {}",
                    points.len(),
                    response.results.len()
                ),
            ));
        }

        Ok(response.results.into_iter().map(|r| r.elevation).collect())
    }

    /// Slope and aspect from the surrounding grid
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn slope_and_aspect(&self, coordinate: Coordinate) -> crate::Result<Measured<(f64, f64)>> {
        let points = grid_points(coordinate, CELL_SIZE_DEGREES);
        let values = self.lookup(&points).await?;

        let mut gaps = Vec::new();
        let mut grid = [0.0; 9];
        for (cell, value) in grid.iter_mut().zip(values) {
            match value {
                Some(v) => *cell = v,
                None if gaps.is_empty() => gaps.push(DataGap::new(OPEN_ELEVATION, "grid elevation")),
                None => {}
            }
        }

        Ok(Measured::with_gaps(
            horn_slope_aspect(&grid, CELL_SIZE_DEGREES),
            gaps,
        ))
    }
}

#[async_trait]
impl TerrainProvider for ElevationClient {
    async fn terrain(&self, coordinate: Coordinate) -> crate::Result<Measured<TerrainMeasurement>> {
        let (elevation, gradient) = futures::try_join!(
            self.point_elevation(coordinate),
            self.slope_and_aspect(coordinate),
        )?;
        let (slope, aspect_degrees) = gradient.measurement;

        let mut gaps = elevation.gaps;
        gaps.extend(gradient.gaps);

        let terrain = TerrainMeasurement {
            elevation: elevation.measurement,
            slope,
            aspect: Aspect::from_degrees(aspect_degrees),
            aspect_degrees,
        };
        info!(
            "Terrain: {:.0} m, slope {:.1}°, facing {}",
            terrain.elevation, terrain.slope, terrain.aspect
        );

        Ok(Measured::with_gaps(terrain, gaps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hemisphere;
    use rstest::rstest;

    fn plane(east: f64, north: f64) -> [f64; 9] {
        let points = grid_points(
            Coordinate {
                latitude: 0.0,
                longitude: 0.0,
            },
            1.0,
        );
        points.map(|p| 3000.0 + east * p.longitude + north * p.latitude)
    }

    #[test]
    fn test_grid_layout() {
        let center = Coordinate {
            latitude: -16.5,
            longitude: -68.15,
        };
        let points = grid_points(center, CELL_SIZE_DEGREES);
        assert_eq!(points[4], center);
        assert!(points[0].latitude < center.latitude);
        assert!(points[0].longitude < center.longitude);
        assert!(points[8].latitude > center.latitude);
        assert!(points[8].longitude > center.longitude);
    }

    #[test]
    fn test_flat_grid_has_zero_slope() {
        let (slope, _) = horn_slope_aspect(&[3000.0; 9], CELL_SIZE_DEGREES);
        assert_eq!(slope, 0.0);
    }

    #[rstest]
    #[case(10.0, 0.0, Aspect::W)]
    #[case(-10.0, 0.0, Aspect::E)]
    #[case(0.0, 10.0, Aspect::N)]
    #[case(0.0, -10.0, Aspect::S)]
    #[case(10.0, 10.0, Aspect::NW)]
    #[case(-10.0, -10.0, Aspect::SE)]
    fn test_aspect_from_plane(#[case] east: f64, #[case] north: f64, #[case] expected: Aspect) {
        let (_, aspect) = horn_slope_aspect(&plane(east, north), 1.0);
        assert!((0.0..=360.0).contains(&aspect));
        assert_eq!(Aspect::from_degrees(aspect), expected);
    }

    #[test]
    fn test_terrain_rising_north_scores_as_north_facing_in_south() {
        let (_, aspect) = horn_slope_aspect(&plane(0.0, 10.0), 1.0);
        let aspect = Aspect::from_degrees(aspect);
        assert_eq!(aspect, Aspect::N);
        assert!(Hemisphere::from_latitude(-16.5).preferred_aspects().contains(&aspect));
    }

    #[test]
    fn test_slope_magnitude() {
        // 111 m over two cells (222 m): atan(0.5)
        let rising = [0.0, 0.0, 111.0, 0.0, 0.0, 111.0, 0.0, 0.0, 111.0]
            .map(|z| z - 55.5);
        let (slope, _) = horn_slope_aspect(&rising, CELL_SIZE_DEGREES);
        assert!((slope - 26.565).abs() < 0.01);
    }

    #[test]
    fn test_lookup_response_parsing() {
        let json = r#"{"results": [
            {"latitude": -16.5, "longitude": -68.15, "elevation": 3850.0},
            {"latitude": -16.501, "longitude": -68.15, "elevation": null}
        ]}"#;
        let response: LookupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].elevation, Some(3850.0));
        assert_eq!(response.results[1].elevation, None);
    }

    #[rstest]
    #[case(r#"{"location": {"x": -105.0, "y": 39.7}, "value": 1609.3}"#, Some(1609.3))]
    #[case(r#"{"value": "1609.3"}"#, Some(1609.3))]
    #[case(r#"{"value": -1000000}"#, None)]
    #[case(r#"{"value": null}"#, None)]
    #[case(r#"{}"#, None)]
    fn test_usgs_value(#[case] json: &str, #[case] expected: Option<f64>) {
        let response: UsgsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.elevation(), expected);
    }
}
