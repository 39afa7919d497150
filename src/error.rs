//! Error types and handling for the suitability engine

use thiserror::Error;

/// Main error type for `QuinoaFit`
#[derive(Error, Debug)]
pub enum SuitabilityError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A data source was unreachable or answered with a non-success status
    #[error("{source_name} unavailable: {message}")]
    ProviderUnavailable {
        source_name: String,
        message: String,
    },

    /// A data source answered, but the payload could not be decoded
    #[error("Invalid response from {source_name}: {message}")]
    ProviderResponse {
        source_name: String,
        message: String,
    },

    /// Coordinate outside the valid domain, or not on land
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },
}

impl SuitabilityError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider-unavailable error
    pub fn unavailable<N: Into<String>, S: Into<String>>(source_name: N, message: S) -> Self {
        Self::ProviderUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a new provider-response error
    pub fn response<N: Into<String>, S: Into<String>>(source_name: N, message: S) -> Self {
        Self::ProviderResponse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-coordinate error
    pub fn invalid_coordinate<S: Into<String>>(message: S) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    /// Whether the failure originated in one of the external data sources
    #[must_use]
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable { .. } | Self::ProviderResponse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SuitabilityError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SuitabilityError::ProviderUnavailable { source_name, .. } => format!(
                "Unable to reach {source_name}. Please check your internet connection and try again."
            ),
            SuitabilityError::ProviderResponse { source_name, .. } => {
                format!("{source_name} returned data that could not be read. Please try again later.")
            }
            SuitabilityError::InvalidCoordinate { message } => {
                format!("Invalid location: {message}")
            }
        }
    }
}
