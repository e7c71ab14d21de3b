//! HTTP surface for the data processing service: descriptive statistics over
//! posted data points, synthetic sample generation, and a mock prediction.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod telemetry;

pub use app::{router, AppState};
pub use config::ServerConfig;
pub use error::ApiError;
pub use telemetry::{Telemetry, TelemetryConfig};
