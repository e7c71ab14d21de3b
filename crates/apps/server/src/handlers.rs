use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use compute::{parse_count, values_of, DataPoint, Statistics, MODEL_NAME};
use serde::Serialize;
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SampleBatch {
    pub data: Vec<DataPoint>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub input: f64,
    pub prediction: f64,
    pub confidence: f64,
    pub model: &'static str,
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: state.service_name.to_string(),
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

pub async fn analyze(
    State(state): State<AppState>,
    WithRejection(Json(points), _): WithRejection<Json<Vec<DataPoint>>, ApiError>,
) -> Json<Statistics> {
    let mut span = state.telemetry.span("analyze_data");
    let values = values_of(&points);
    let stats = Statistics::analyze(&values);

    span.record_i64("data.count", stats.count);
    debug!(
        count = stats.count,
        mean = stats.mean,
        std_dev = stats.std_dev,
        "analyzed batch"
    );
    Json(stats)
}

pub async fn generate_sample(
    State(state): State<AppState>,
    WithRejection(Path(raw), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<SampleBatch>, ApiError> {
    let requested = parse_count(&raw).map_err(|source| ApiError::Integer { raw, source })?;

    let mut span = state.telemetry.span("generate_sample_data");
    let base_time = foundation::time::now();
    let data = state.with_rng_mut(|rng| state.sampler.generate(rng, requested, base_time));

    span.record_i64("sample.requested", requested);
    span.record_i64("sample.count", data.len() as i64);
    debug!(requested, count = data.len(), "generated sample");
    Ok(Json(SampleBatch {
        count: data.len(),
        data,
    }))
}

pub async fn ml_predict(
    State(state): State<AppState>,
    WithRejection(Path(value), _): WithRejection<Path<f64>, ApiError>,
) -> Result<Json<PredictionResponse>, ApiError> {
    if !value.is_finite() {
        return Err(ApiError::NonFinite(value));
    }

    let mut span = state.telemetry.span("ml_predict");
    let out = state.with_rng_mut(|rng| state.predictor.predict(rng, value));

    span.record_f64("predict.input", value);
    span.record_f64("predict.output", out.prediction);
    Ok(Json(PredictionResponse {
        input: value,
        prediction: out.prediction,
        confidence: out.confidence,
        model: MODEL_NAME,
    }))
}
