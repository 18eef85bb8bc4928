//! OpenTelemetry initialization and configuration
//!
//! Builds the tracing pipeline that exports spans to an OTLP/HTTP collector
//! (e.g. the default collector listening on `http://localhost:4318/v1/traces`).
//! Features graceful degradation when the collector exporter cannot be built.

use std::collections::HashMap;
use std::time::Duration;

use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{Protocol, WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{Sampler, SdkTracerProvider},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for telemetry/tracing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OpenTelemetry export is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// OTLP/HTTP traces endpoint URL, including the signal path
    /// (e.g. "http://localhost:4318/v1/traces")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Headers attached to every export request
    ///
    /// Defaults to the permissive CORS pair so a collector behind a browser
    /// CORS policy accepts exports during local demos.
    #[serde(default = "default_headers")]
    pub headers: HashMap<String, String>,

    /// Service name stamped on every exported span
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version stamped on every exported span
    #[serde(default = "default_service_version")]
    pub service_version: String,

    /// Sampling ratio (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Export timeout in seconds
    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Log level filter (e.g., "info", "tracedemo=debug,hyper=warn")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// `tracing` targets silenced with a `target=off` directive
    ///
    /// The manually wrapped span is the single source of truth for an
    /// outbound request; silencing the HTTP stack internals keeps their
    /// auto-created spans from duplicating it.
    #[serde(default = "default_suppressed_targets")]
    pub suppressed_targets: Vec<String>,

    /// Whether to fall back to console-only logging if the OTLP exporter
    /// cannot be constructed
    ///
    /// When `true` (default), the application continues with console-only
    /// logging instead of failing. Set to `false` to require a working
    /// exporter in production environments.
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

const fn default_enabled() -> bool {
    true
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    30
}

fn default_endpoint() -> String {
    "http://localhost:4318/v1/traces".to_string()
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Headers".to_string(), "*".to_string()),
    ])
}

fn default_service_name() -> String {
    "tracedemo".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_log_filter() -> String {
    "tracedemo=info,telemetry=info".to_string()
}

fn default_suppressed_targets() -> Vec<String> {
    vec![
        "hyper".to_string(),
        "hyper_util".to_string(),
        "h2".to_string(),
        "reqwest::connect".to_string(),
    ]
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            headers: default_headers(),
            service_name: default_service_name(),
            service_version: default_service_version(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            log_filter: default_log_filter(),
            suppressed_targets: default_suppressed_targets(),
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

/// Handle to the registered tracing facility
///
/// Returned by [`init_telemetry`] and kept alive for the duration of the
/// application. Dropping it shuts the tracer provider down and flushes
/// pending spans. Tracers can be retrieved from it by name.
pub struct Telemetry {
    provider: Option<SdkTracerProvider>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("export_enabled", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Telemetry {
    /// Whether spans are exported to a collector (false in console-only mode)
    pub const fn export_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Retrieve a named tracer from the registered provider
    ///
    /// The name identifies the instrumentation scope on spans created through
    /// the returned tracer. In console-only mode the returned tracer produces
    /// no-op spans.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::EmptyTracerName`] when the name is blank.
    pub fn tracer(&self, name: &str) -> Result<global::BoxedTracer, TelemetryError> {
        if name.trim().is_empty() {
            return Err(TelemetryError::EmptyTracerName);
        }
        Ok(global::tracer(name.to_owned()))
    }

    /// Flush all pending spans to the exporter
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Exporter`] when the underlying flush fails.
    pub fn force_flush(&self) -> Result<(), TelemetryError> {
        if let Some(provider) = &self.provider {
            provider
                .force_flush()
                .map_err(|e| TelemetryError::Exporter(e.to_string()))?;
        }
        Ok(())
    }

    /// Shut the tracer provider down, flushing pending spans
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Exporter`] when the shutdown flush fails.
    pub fn shutdown(mut self) -> Result<(), TelemetryError> {
        if let Some(provider) = self.provider.take() {
            provider
                .shutdown()
                .map_err(|e| TelemetryError::Exporter(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!("Failed to shutdown tracer provider: {e:?}");
            }
        }
    }
}

/// Initialize telemetry with the given configuration
///
/// Call once at startup, before any traced call is issued. A second call
/// fails with [`TelemetryError::Init`] because the global subscriber is
/// already installed.
///
/// Registers the tracer provider process-wide, installs W3C trace-context
/// propagation, and bridges `tracing` spans into OpenTelemetry spans so
/// instrumentation the application did not wrap manually is still exported.
///
/// An unreachable collector is not an initialization failure: export errors
/// are logged by the SDK and never surface to the operations being traced.
///
/// # Errors
///
/// Fails fast on a malformed endpoint URL or an unparseable filter
/// directive. Exporter construction failures are errors only when
/// `graceful_fallback` is disabled.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    let env_filter = build_env_filter(config)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if !config.enabled {
        // No OTLP export, just console logging
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;

        info!("Telemetry initialized (OTLP disabled, console only)");
        return Ok(Telemetry { provider: None });
    }

    // Fail fast on a malformed collector endpoint; reachability is checked
    // only at export time.
    url::Url::parse(&config.endpoint)
        .map_err(|e| TelemetryError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;

    let exporter_result = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(config.endpoint.clone())
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .with_headers(config.headers.clone())
        .build();

    match exporter_result {
        Ok(exporter) => {
            let sampler = if (config.sampling_ratio - 1.0).abs() < f64::EPSILON {
                Sampler::AlwaysOn
            } else if config.sampling_ratio <= 0.0 {
                Sampler::AlwaysOff
            } else {
                Sampler::TraceIdRatioBased(config.sampling_ratio)
            };

            // Service identity, set once and immutable from here on
            let resource = Resource::builder()
                .with_service_name(config.service_name.clone())
                .with_attribute(KeyValue::new(
                    "service.version",
                    config.service_version.clone(),
                ))
                .build();

            let provider = SdkTracerProvider::builder()
                .with_batch_exporter(exporter)
                .with_sampler(sampler)
                .with_resource(resource)
                .build();

            let tracer = provider.tracer(config.service_name.clone());
            let otel_layer = OpenTelemetryLayer::new(tracer);

            // Subscriber install doubles as the re-init guard; process-wide
            // state is only touched once it has succeeded.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(otel_layer)
                .try_init()
                .map_err(|e: tracing_subscriber::util::TryInitError| {
                    TelemetryError::Init(e.to_string())
                })?;

            // Context propagation across async boundaries and process edges
            global::set_text_map_propagator(TraceContextPropagator::new());
            global::set_tracer_provider(provider.clone());

            info!(
                endpoint = %config.endpoint,
                service = %config.service_name,
                version = %config.service_version,
                sampling = %config.sampling_ratio,
                "Telemetry initialized with OTLP export"
            );

            Ok(Telemetry {
                provider: Some(provider),
            })
        },
        Err(e) => {
            if config.graceful_fallback {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .try_init()
                    .map_err(|e| TelemetryError::Init(e.to_string()))?;

                warn!(
                    endpoint = %config.endpoint,
                    error = %e,
                    "OTLP exporter unavailable, falling back to console-only logging"
                );
                Ok(Telemetry { provider: None })
            } else {
                Err(TelemetryError::Exporter(e.to_string()))
            }
        },
    }
}

/// Build the log/span filter from the configured base filter plus the
/// suppressed instrumentation targets
fn build_env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    for target in &config.suppressed_targets {
        let directive = format!("{target}=off")
            .parse()
            .map_err(|e| TelemetryError::Init(format!("bad filter target {target:?}: {e}")))?;
        env_filter = env_filter.add_directive(directive);
    }

    Ok(env_filter)
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to create or drive the OTLP exporter
    #[error("OTLP exporter error: {0}")]
    Exporter(String),

    /// Exporter endpoint is not a well-formed URL
    #[error("Invalid exporter endpoint: {0}")]
    InvalidEndpoint(String),

    /// A tracer was requested with a blank name
    #[error("Tracer name must not be empty")]
    EmptyTracerName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert!(config.enabled);
        assert_eq!(config.endpoint, "http://localhost:4318/v1/traces");
        assert_eq!(config.service_name, "tracedemo");
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
        assert!((config.sampling_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.export_timeout_secs, 30);
        assert!(config.graceful_fallback);
        assert_eq!(
            config.headers.get("Access-Control-Allow-Origin"),
            Some(&"*".to_string())
        );
        assert!(config.suppressed_targets.contains(&"hyper".to_string()));
    }

    #[test]
    fn test_config_serialization() {
        let config = TelemetryConfig {
            enabled: false,
            endpoint: "http://collector:4318/v1/traces".to_string(),
            service_name: "test-service".to_string(),
            service_version: "2.0.0".to_string(),
            sampling_ratio: 0.5,
            export_timeout_secs: 60,
            graceful_fallback: false,
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TelemetryConfig = serde_json::from_str(&json).unwrap();

        assert!(!parsed.enabled);
        assert_eq!(parsed.endpoint, "http://collector:4318/v1/traces");
        assert_eq!(parsed.service_name, "test-service");
        assert_eq!(parsed.service_version, "2.0.0");
        assert!((parsed.sampling_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(parsed.export_timeout_secs, 60);
        assert!(!parsed.graceful_fallback);
    }

    #[test]
    fn test_config_defaults_from_sparse_json() {
        // Fields not present in JSON fall back to their defaults
        let json = r#"{"endpoint": "http://collector:4318/v1/traces"}"#;
        let parsed: TelemetryConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.enabled);
        assert!(parsed.graceful_fallback);
        assert_eq!(parsed.service_name, "tracedemo");
        assert!(!parsed.suppressed_targets.is_empty());
    }

    #[test]
    fn test_build_env_filter_rejects_bad_target() {
        let config = TelemetryConfig {
            suppressed_targets: vec!["not a target".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            build_env_filter(&config),
            Err(TelemetryError::Init(_))
        ));
    }

    #[test]
    fn test_telemetry_drop_without_provider() {
        // Telemetry with no provider must not panic on drop
        let telemetry = Telemetry { provider: None };
        drop(telemetry);
    }

    #[test]
    fn test_tracer_rejects_blank_name() {
        let telemetry = Telemetry { provider: None };
        assert!(matches!(
            telemetry.tracer("  "),
            Err(TelemetryError::EmptyTracerName)
        ));
        assert!(telemetry.tracer("demo").is_ok());
    }
}
