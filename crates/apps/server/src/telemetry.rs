//! Request telemetry for the API.
//!
//! A [`Telemetry`] value is built once at startup and handed to handlers via
//! the router state; nothing is installed as a process-global provider. When
//! the `otlp` feature is enabled and an exporter can be built, each handled
//! operation becomes an OTLP span. Otherwise spans only produce `debug!` logs.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

#[cfg(feature = "otlp")]
use opentelemetry::{
    trace::{Span as _, SpanKind, Tracer as _, TracerProvider as _},
    KeyValue,
};
#[cfg(feature = "otlp")]
use opentelemetry_otlp::WithExportConfig;
#[cfg(feature = "otlp")]
use opentelemetry_sdk::{
    trace::{BatchSpanProcessor, SdkTracerProvider as TracerProvider},
    Resource,
};

/// Configuration for the OTLP exporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// OTLP endpoint URL (e.g., "http://localhost:4317")
    pub endpoint: String,
    /// Service name attached to exported spans
    pub service_name: String,
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4317".to_string(),
            service_name: "data-processing-api".to_string(),
            enabled: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("OTLP exporter could not be built: {0}")]
    Exporter(String),
    #[error("OTLP support not compiled in; enable the `otlp` feature")]
    NotCompiled,
}

#[cfg(feature = "otlp")]
struct Pipeline {
    provider: TracerProvider,
    tracer: opentelemetry_sdk::trace::Tracer,
}

#[cfg(not(feature = "otlp"))]
struct Pipeline;

/// Injectable observability context shared by all handlers.
#[derive(Clone, Default)]
pub struct Telemetry {
    pipeline: Option<Arc<Pipeline>>,
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Telemetry {
    /// Context that records nothing beyond debug logs.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Build the configured context, falling back to [`Telemetry::disabled`]
    /// if the exporter cannot be created. Never fails startup.
    pub fn init(config: &TelemetryConfig) -> Self {
        if !config.enabled {
            info!("telemetry export disabled");
            return Self::disabled();
        }
        match Self::otlp(config) {
            Ok(telemetry) => {
                info!(
                    "exporting spans to {} as {}",
                    config.endpoint, config.service_name
                );
                telemetry
            }
            Err(err) => {
                warn!("telemetry unavailable, continuing without export: {err}");
                Self::disabled()
            }
        }
    }

    /// Build an OTLP (gRPC) exporting context.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(feature = "otlp")]
    pub fn otlp(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint)
            .build()
            .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

        let span_processor = BatchSpanProcessor::builder(exporter).build();

        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .with_attributes(vec![KeyValue::new(
                "service.version",
                env!("CARGO_PKG_VERSION"),
            )])
            .build();

        let provider = TracerProvider::builder()
            .with_span_processor(span_processor)
            .with_resource(resource)
            .build();
        let tracer = provider.tracer("data-api");

        Ok(Self {
            pipeline: Some(Arc::new(Pipeline { provider, tracer })),
        })
    }

    #[cfg(not(feature = "otlp"))]
    pub fn otlp(_config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        Err(TelemetryError::NotCompiled)
    }

    pub fn is_enabled(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Start a span covering one handled operation. The span ends on drop.
    pub fn span(&self, name: &'static str) -> OperationSpan {
        OperationSpan {
            name,
            started: Instant::now(),
            #[cfg(feature = "otlp")]
            inner: self.pipeline.as_ref().map(|p| {
                p.tracer
                    .span_builder(name)
                    .with_kind(SpanKind::Internal)
                    .start(&p.tracer)
            }),
        }
    }

    /// Flush and stop the exporter. Safe to call on a disabled context.
    pub fn shutdown(&self) {
        #[cfg(feature = "otlp")]
        if let Some(pipeline) = &self.pipeline {
            if let Err(err) = pipeline.provider.shutdown() {
                warn!("telemetry shutdown failed: {err}");
            }
        }
    }
}

/// One traced operation; see [`Telemetry::span`].
pub struct OperationSpan {
    name: &'static str,
    started: Instant,
    #[cfg(feature = "otlp")]
    inner: Option<opentelemetry_sdk::trace::Span>,
}

impl OperationSpan {
    pub fn record_i64(&mut self, key: &'static str, value: i64) {
        #[cfg(feature = "otlp")]
        if let Some(span) = self.inner.as_mut() {
            span.set_attribute(KeyValue::new(key, value));
        }
        #[cfg(not(feature = "otlp"))]
        let _ = (key, value);
    }

    pub fn record_f64(&mut self, key: &'static str, value: f64) {
        #[cfg(feature = "otlp")]
        if let Some(span) = self.inner.as_mut() {
            span.set_attribute(KeyValue::new(key, value));
        }
        #[cfg(not(feature = "otlp"))]
        let _ = (key, value);
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        #[cfg(feature = "otlp")]
        if let Some(mut span) = self.inner.take() {
            span.end();
        }
        debug!(
            operation = self.name,
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "operation finished"
        );
    }
}
