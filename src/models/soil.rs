//! Surface soil properties and their agronomic interpretation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Surface (0-5 cm) soil properties for a coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SoilMeasurement {
    /// Simplified USDA texture class
    pub texture: SoilTexture,
    /// pH in water
    pub ph: f64,
    /// Organic matter in g/kg (organic carbon × 1.72)
    pub organic_matter: f64,
    /// Qualitative drainage derived from sand content
    pub drainage: Drainage,
    /// Clay content in %
    pub clay: f64,
    /// Sand content in %
    pub sand: f64,
    /// Silt content in %
    pub silt: f64,
    /// Soil organic carbon in g/kg
    pub organic_carbon: f64,
    /// Total nitrogen in g/kg
    pub nitrogen: f64,
    /// Cation exchange capacity in mmol(c)/kg
    pub cec: f64,
}

/// Simplified USDA soil texture classes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SoilTexture {
    Sandy,
    Clayey,
    Silty,
    SandyLoam,
    SiltyLoam,
    ClayLoam,
    Loam,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Drainage {
    Good,
    Moderate,
    Poor,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Fertility {
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PhLevel {
    Alkaline,
    Neutral,
    SlightlyAcidic,
    Acidic,
}

impl SoilTexture {
    /// Classify texture from sand/silt/clay percentages
    #[must_use]
    pub fn classify(sand: f64, silt: f64, clay: f64) -> Self {
        if sand >= 85.0 && clay <= 10.0 {
            SoilTexture::Sandy
        } else if clay >= 40.0 {
            SoilTexture::Clayey
        } else if silt >= 80.0 && clay < 12.0 {
            SoilTexture::Silty
        } else if (45.0..=80.0).contains(&sand) && clay <= 20.0 {
            SoilTexture::SandyLoam
        } else if silt >= 50.0 && (12.0..27.0).contains(&clay) {
            SoilTexture::SiltyLoam
        } else if (20.0..40.0).contains(&clay) && silt < 40.0 && sand < 45.0 {
            SoilTexture::ClayLoam
        } else {
            SoilTexture::Loam
        }
    }
}

impl Drainage {
    #[must_use]
    pub fn from_sand(sand: f64) -> Self {
        if sand > 60.0 {
            Drainage::Good
        } else if sand > 40.0 {
            Drainage::Moderate
        } else {
            Drainage::Poor
        }
    }
}

impl SoilMeasurement {
    #[must_use]
    pub fn fertility(&self) -> Fertility {
        match self.organic_matter {
            om if om > 30.0 => Fertility::High,
            om if om > 15.0 => Fertility::Medium,
            _ => Fertility::Low,
        }
    }

    #[must_use]
    pub fn retention(&self) -> Retention {
        match self.clay {
            c if c > 35.0 => Retention::High,
            c if c > 20.0 => Retention::Medium,
            _ => Retention::Low,
        }
    }

    #[must_use]
    pub fn ph_level(&self) -> PhLevel {
        match self.ph {
            ph if ph > 7.5 => PhLevel::Alkaline,
            ph if ph > 6.5 => PhLevel::Neutral,
            ph if ph > 5.5 => PhLevel::SlightlyAcidic,
            _ => PhLevel::Acidic,
        }
    }
}

impl fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilTexture::Sandy => write!(f, "Sandy"),
            SoilTexture::Clayey => write!(f, "Clayey"),
            SoilTexture::Silty => write!(f, "Silty"),
            SoilTexture::SandyLoam => write!(f, "Sandy loam"),
            SoilTexture::SiltyLoam => write!(f, "Silty loam"),
            SoilTexture::ClayLoam => write!(f, "Clay loam"),
            SoilTexture::Loam => write!(f, "Loam"),
        }
    }
}

impl fmt::Display for Drainage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drainage::Good => write!(f, "Good"),
            Drainage::Moderate => write!(f, "Moderate"),
            Drainage::Poor => write!(f, "Poor"),
        }
    }
}

impl fmt::Display for Fertility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fertility::High => write!(f, "High"),
            Fertility::Medium => write!(f, "Medium"),
            Fertility::Low => write!(f, "Low"),
        }
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retention::High => write!(f, "High"),
            Retention::Medium => write!(f, "Medium"),
            Retention::Low => write!(f, "Low"),
        }
    }
}

impl fmt::Display for PhLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhLevel::Alkaline => write!(f, "Alkaline"),
            PhLevel::Neutral => write!(f, "Neutral"),
            PhLevel::SlightlyAcidic => write!(f, "Slightly acidic"),
            PhLevel::Acidic => write!(f, "Acidic"),
        }
    }
}
