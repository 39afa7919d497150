use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::SuitabilityError;
use crate::suitability::{SuitabilityAnalysis, SuitabilityAnalyzer, render_report};

#[derive(Debug, Deserialize)]
pub struct CoordinateQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub detail: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiHealth {
    pub status: String,
    pub version: String,
}

/// HTTP status for an analysis failure
#[must_use]
pub fn status_for(error: &SuitabilityError) -> StatusCode {
    match error {
        SuitabilityError::InvalidCoordinate { .. } => StatusCode::BAD_REQUEST,
        SuitabilityError::ProviderUnavailable { .. } | SuitabilityError::ProviderResponse { .. } => {
            StatusCode::BAD_GATEWAY
        }
        SuitabilityError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

struct AnalysisFailure(SuitabilityError);

impl IntoResponse for AnalysisFailure {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!("Analysis failed: {}", self.0);
        }
        let body = ApiError {
            error: self.0.user_message(),
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<SuitabilityError> for AnalysisFailure {
    fn from(error: SuitabilityError) -> Self {
        Self(error)
    }
}

pub fn router(analyzer: Arc<SuitabilityAnalyzer>) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/suitability", get(get_suitability))
        .route("/suitability/report", get(get_report))
        .with_state(analyzer)
}

async fn get_health() -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn get_suitability(
    State(analyzer): State<Arc<SuitabilityAnalyzer>>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Json<SuitabilityAnalysis>, AnalysisFailure> {
    let analysis = analyzer.analyze(query.lat, query.lon).await?;
    Ok(Json(analysis))
}

async fn get_report(
    State(analyzer): State<Arc<SuitabilityAnalyzer>>,
    Query(query): Query<CoordinateQuery>,
) -> Result<String, AnalysisFailure> {
    let analysis = analyzer.analyze(query.lat, query.lon).await?;
    Ok(render_report(&analysis))
}
