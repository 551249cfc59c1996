//! HTTP API: /health и /predict

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::models::SleepModel;
use crate::predictor::SleepPredictor;
use crate::types::{HealthStatus, SleepPrediction, SleepQuery};

/// Контекст приложения: модель загружается один раз при старте и дальше только читается
#[derive(Clone, Default)]
pub struct AppState {
    predictor: Option<SleepPredictor>,
}

impl AppState {
    pub fn new(predictor: Option<SleepPredictor>) -> Self {
        Self { predictor }
    }

    /// Загрузка модели; при ошибке сервер работает без неё
    pub fn load(model_path: impl AsRef<Path>) -> Self {
        match SleepModel::load(model_path) {
            Ok(model) => Self::new(Some(SleepPredictor::new(Arc::new(model)))),
            Err(e) => {
                tracing::error!("Failed to load model: {}", e);
                Self::new(None)
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_some()
    }
}

#[derive(Debug)]
pub enum ApiError {
    ModelNotLoaded,
    InvalidInput(String),
    PredictionFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::ModelNotLoaded => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model not loaded on server".to_string(),
            ),
            ApiError::InvalidInput(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            ApiError::PredictionFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model prediction failed".to_string(),
            ),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        if e.is_client_error() {
            ApiError::InvalidInput(e.to_string())
        } else {
            tracing::error!("Prediction failed: {}", e);
            ApiError::PredictionFailed
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Restimator API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::new(state.model_loaded()))
}

async fn predict(
    State(state): State<AppState>,
    Json(query): Json<SleepQuery>,
) -> Result<Json<SleepPrediction>, ApiError> {
    let predictor = state.predictor.as_ref().ok_or(ApiError::ModelNotLoaded)?;

    tracing::info!(
        "Predict request: bedtime {}, desired wake {}, weather {}",
        query.bedtime,
        query.desired_wake,
        query.weather
    );

    let prediction = predictor.predict(&query)?;
    Ok(Json(prediction))
}
