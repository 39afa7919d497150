//! Configuration management for `QuinoaFit`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SuitabilityError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `QuinoaFit` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// External data source settings
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Analysis window settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Endpoints and HTTP behaviour shared by all data providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// NASA POWER daily point endpoint
    #[serde(default = "default_nasa_power_url")]
    pub nasa_power_url: String,
    /// SoilGrids properties query endpoint
    #[serde(default = "default_soilgrids_url")]
    pub soilgrids_url: String,
    /// Open-Elevation lookup endpoint
    #[serde(default = "default_open_elevation_url")]
    pub open_elevation_url: String,
    /// USGS elevation point query endpoint, used as fallback
    #[serde(default = "default_usgs_url")]
    pub usgs_url: String,
    /// BigDataCloud reverse geocoding endpoint
    #[serde(default = "default_bigdatacloud_url")]
    pub bigdatacloud_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Climate window policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Days skipped at the end of the window
    #[serde(default = "default_recency_offset_days")]
    pub recency_offset_days: u32,
    /// Window length in years
    #[serde(default = "default_window_years")]
    pub window_years: u32,
    /// Reject open-ocean coordinates before analysis
    #[serde(default = "default_validate_land")]
    pub validate_land: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_nasa_power_url() -> String {
    "https://power.larc.nasa.gov/api/temporal/daily/point".to_string()
}

fn default_soilgrids_url() -> String {
    "https://rest.isric.org/soilgrids/v2.0/properties/query".to_string()
}

fn default_open_elevation_url() -> String {
    "https://api.open-elevation.com/api/v1/lookup".to_string()
}

fn default_usgs_url() -> String {
    "https://epqs.nationalmap.gov/v1/json".to_string()
}

fn default_bigdatacloud_url() -> String {
    "https://api.bigdatacloud.net/data/reverse-geocode-client".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_recency_offset_days() -> u32 {
    15
}

fn default_window_years() -> u32 {
    1
}

fn default_validate_land() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            nasa_power_url: default_nasa_power_url(),
            soilgrids_url: default_soilgrids_url(),
            open_elevation_url: default_open_elevation_url(),
            usgs_url: default_usgs_url(),
            bigdatacloud_url: default_bigdatacloud_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recency_offset_days: default_recency_offset_days(),
            window_years: default_window_years(),
            validate_land: default_validate_land(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the given file, or the default path, plus
    /// environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // QUINOAFIT__SECTION__KEY
        builder = builder.add_source(
            Environment::with_prefix("QUINOAFIT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quinoafit").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        let providers = &mut self.providers;
        if providers.nasa_power_url.is_empty() {
            providers.nasa_power_url = default_nasa_power_url();
        }
        if providers.soilgrids_url.is_empty() {
            providers.soilgrids_url = default_soilgrids_url();
        }
        if providers.open_elevation_url.is_empty() {
            providers.open_elevation_url = default_open_elevation_url();
        }
        if providers.usgs_url.is_empty() {
            providers.usgs_url = default_usgs_url();
        }
        if providers.bigdatacloud_url.is_empty() {
            providers.bigdatacloud_url = default_bigdatacloud_url();
        }
        if providers.timeout_seconds == 0 {
            providers.timeout_seconds = default_timeout();
        }
        if self.analysis.window_years == 0 {
            self.analysis.window_years = default_window_years();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds > 300 {
            return Err(
                SuitabilityError::config("Provider timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.providers.max_retries > 10 {
            return Err(SuitabilityError::config("Provider max retries cannot exceed 10").into());
        }

        if !(1..=10).contains(&self.analysis.window_years) {
            return Err(SuitabilityError::config(format!(
                "Analysis window must be between 1 and 10 years, got: {}",
                self.analysis.window_years
            ))
            .into());
        }

        if self.analysis.recency_offset_days > 365 {
            return Err(
                SuitabilityError::config("Recency offset cannot exceed 365 days").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SuitabilityError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SuitabilityError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("nasa_power_url", &self.providers.nasa_power_url),
            ("soilgrids_url", &self.providers.soilgrids_url),
            ("open_elevation_url", &self.providers.open_elevation_url),
            ("usgs_url", &self.providers.usgs_url),
            ("bigdatacloud_url", &self.providers.bigdatacloud_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SuitabilityError::config(format!(
                    "Provider URL '{name}' must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
