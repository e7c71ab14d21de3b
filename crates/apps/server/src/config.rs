use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use tracing::warn;

use crate::telemetry::TelemetryConfig;

/// Process configuration, read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Reported by `GET /`.
    pub service_name: String,
    /// Seeds the sample/prediction RNG; entropy when unset.
    pub rng_seed: Option<u64>,
    pub telemetry: TelemetryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            service_name: "Python Data Processing API".to_string(),
            rng_seed: None,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults;
    /// unparseable values are logged and also fall back.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let telemetry_defaults = defaults.telemetry.clone();

        let telemetry = TelemetryConfig {
            endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(telemetry_defaults.endpoint),
            service_name: lookup("OTEL_SERVICE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(telemetry_defaults.service_name),
            enabled: !parse_or(&lookup, "OTEL_SDK_DISABLED", false),
        };

        Self {
            host: parse_or(&lookup, "HOST", defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
            rng_seed: lookup("RNG_SEED").and_then(|raw| parse_logged("RNG_SEED", &raw)),
            telemetry,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .and_then(|raw| parse_logged(key, &raw))
        .unwrap_or(default)
}

fn parse_logged<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(err) => {
            warn!("ignoring invalid {key}={raw:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = from_pairs(&[]);
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.addr().to_string(), "0.0.0.0:8000");
        assert_eq!(cfg.telemetry.endpoint, "http://localhost:4317");
        assert_eq!(cfg.service_name, "Python Data Processing API");
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_pairs(&[
            ("PORT", "9001"),
            ("HOST", "127.0.0.1"),
            ("RNG_SEED", "42"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
            ("OTEL_SDK_DISABLED", "true"),
        ]);
        assert_eq!(cfg.addr().to_string(), "127.0.0.1:9001");
        assert_eq!(cfg.rng_seed, Some(42));
        assert_eq!(cfg.telemetry.endpoint, "http://collector:4317");
        assert!(!cfg.telemetry.enabled);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = from_pairs(&[("PORT", "eighty"), ("RNG_SEED", "-1"), ("OTEL_SDK_DISABLED", "maybe")]);
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.rng_seed, None);
        assert!(cfg.telemetry.enabled);
    }
}
