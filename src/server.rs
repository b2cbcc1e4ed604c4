//! HTTP boundary: JSON in, prediction or error payload out.

use crate::features::InputRecord;
use crate::risk::{ClassifyError, PredictionResult, RiskClassifier, RiskLevel};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

pub fn router(classifier: Arc<RiskClassifier>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/test", get(health))
        .route("/recommendation/:level", get(recommendation))
        .layer(TraceLayer::new_for_http())
        .with_state(classifier)
}

/// Error payload `{"error": "..."}` with a status matching the failure.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ClassifyError> for ApiError {
    fn from(e: ClassifyError) -> Self {
        let status = match e {
            ClassifyError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ClassifyError::PredictionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn predict(
    State(classifier): State<Arc<RiskClassifier>>,
    body: Result<Json<InputRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let span = info_span!("predict", request_id = %Uuid::new_v4());
    let Json(input) = body.map_err(|rejection| {
        span.in_scope(|| warn!(error = %rejection.body_text(), "rejected prediction request"));
        ApiError::from(rejection)
    })?;
    span.in_scope(|| info!(request = ?input, "received prediction request"));

    let worker_span = span.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        worker_span.in_scope(|| classifier.classify(&input))
    })
    .await
    .map_err(|e| ClassifyError::PredictionFailure(e.to_string()))
    .and_then(|r| r);

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            span.in_scope(|| error!(error = %e, "prediction error"));
            Err(e.into())
        }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    model_loaded: bool,
}

async fn health(State(classifier): State<Arc<RiskClassifier>>) -> Json<Health> {
    Json(Health {
        status: "running",
        model_loaded: classifier.is_ready(),
    })
}

#[derive(Serialize)]
struct Recommendation {
    level: RiskLevel,
    label: &'static str,
}

async fn recommendation(Path(level): Path<String>) -> Result<Json<Recommendation>, ApiError> {
    let level = level
        .parse::<u8>()
        .ok()
        .and_then(|n| RiskLevel::try_from(n).ok())
        .ok_or_else(|| ApiError {
            status: StatusCode::NOT_FOUND,
            message: format!("risk level must be 1..=5, got {level}"),
        })?;
    Ok(Json(Recommendation {
        level,
        label: level.label(),
    }))
}
