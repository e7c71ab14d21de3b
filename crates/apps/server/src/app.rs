use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use compute::{MockPredictor, SampleGenerator};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers;
use crate::telemetry::Telemetry;

#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub telemetry: Telemetry,
    pub sampler: SampleGenerator,
    pub predictor: MockPredictor,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(config: &ServerConfig, telemetry: Telemetry) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(&config.service_name, telemetry, rng)
    }

    pub fn with_rng(service_name: &str, telemetry: Telemetry, rng: StdRng) -> Self {
        Self {
            service_name: Arc::from(service_name),
            telemetry,
            sampler: SampleGenerator::new(),
            predictor: MockPredictor::new(),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the shared RNG. Never hold this
    /// across an `.await`.
    pub fn with_rng_mut<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut rng)
    }
}

/// All routes with the permissive CORS policy and request tracing applied.
pub fn router(state: AppState) -> Router {
    // Mirroring instead of `Any` so credentialed requests stay allowed.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/generate-sample/:count", get(handlers::generate_sample))
        .route("/ml-predict/:value", get(handlers::ml_predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
