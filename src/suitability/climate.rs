//! Climate category scorer
//!
//! Four criteria, each on a nested inclusive ladder: the wider band only
//! applies when the narrower one did not match.

use serde::{Deserialize, Serialize};

use super::category::{CategoryScore, SubScores, within};
use crate::models::{AridityClass, ClimateMeasurement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateScores {
    pub temperature: u8,
    pub precipitation: u8,
    pub aridity: u8,
    pub solar: u8,
}

impl SubScores for ClimateScores {
    const MAX: u32 = 40;

    fn entries(&self) -> Vec<(&'static str, u8)> {
        vec![
            ("temperature", self.temperature),
            ("precipitation", self.precipitation),
            ("aridity", self.aridity),
            ("solar", self.solar),
        ]
    }
}

/// Climate measurement with its interpretation and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateAssessment {
    pub measurement: ClimateMeasurement,
    pub aridity_class: AridityClass,
    pub score: CategoryScore<ClimateScores>,
}

impl ClimateAssessment {
    #[must_use]
    pub fn assess(measurement: ClimateMeasurement) -> Self {
        let score = score_climate(&measurement);
        Self {
            aridity_class: AridityClass::from_index(measurement.aridity_index),
            measurement,
            score,
        }
    }
}

#[must_use]
pub fn score_climate(measurement: &ClimateMeasurement) -> CategoryScore<ClimateScores> {
    CategoryScore::new(ClimateScores {
        temperature: temperature_score(measurement.temperature_mean),
        precipitation: precipitation_score(measurement.precipitation_annual),
        aridity: aridity_score(measurement.aridity_index),
        solar: solar_score(measurement.solar_radiation_mean),
    })
}

/// Mean temperature, optimum 10-20 °C
fn temperature_score(temperature: f64) -> u8 {
    if within(temperature, 10.0, 20.0) {
        10
    } else if within(temperature, 5.0, 25.0) {
        7
    } else if within(temperature, 0.0, 30.0) {
        4
    } else {
        1
    }
}

/// Annual precipitation, optimum 300-800 mm
fn precipitation_score(precipitation: f64) -> u8 {
    if within(precipitation, 300.0, 800.0) {
        10
    } else if within(precipitation, 200.0, 1000.0) {
        7
    } else if within(precipitation, 150.0, 1200.0) {
        4
    } else {
        1
    }
}

/// Semi-arid to dry sub-humid is preferred
fn aridity_score(aridity_index: f64) -> u8 {
    if within(aridity_index, 0.2, 0.65) {
        10
    } else if within(aridity_index, 0.15, 0.8) {
        7
    } else {
        4
    }
}

fn solar_score(solar_radiation: f64) -> u8 {
    if solar_radiation > 15.0 {
        10
    } else if solar_radiation > 12.0 {
        7
    } else {
        4
    }
}
