//! Traced execution of outbound calls
//!
//! Wraps an asynchronous unit of work in a span with correct status
//! recording and guaranteed release: the span is closed on every exit path,
//! including the work future being dropped before completion.

use std::fmt::Display;

use opentelemetry::KeyValue;
use opentelemetry::trace::Status;
use tracing::{Instrument, info_span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Status message recorded when a failure renders to an empty string
const UNKNOWN_ERROR: &str = "unknown error";

/// Span kind of a traced call
///
/// Outbound HTTP calls are [`CallKind::Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Outbound, client-initiated call
    Client,
    /// Handling an inbound request
    Server,
    /// Message published to a broker
    Producer,
    /// Message consumed from a broker
    Consumer,
    /// Operation internal to the process
    Internal,
}

impl CallKind {
    /// Span-kind value understood by the OpenTelemetry bridge
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
            Self::Producer => "producer",
            Self::Consumer => "consumer",
            Self::Internal => "internal",
        }
    }
}

/// Descriptive attributes carried by a traced call's span
///
/// Construction requires the minimum attribute set: HTTP method, target URL,
/// logical endpoint name, and logical service name. Further attributes can
/// be chained with [`CallAttributes::with_extra`].
#[derive(Debug, Clone)]
pub struct CallAttributes {
    /// HTTP method of the wrapped request (recorded as `http.method`)
    pub method: String,
    /// Target URL of the wrapped request (recorded as `http.url`)
    pub url: String,
    /// Logical endpoint name (recorded as `endpoint.name`)
    pub endpoint: String,
    /// Logical name of the called service (recorded as `service.name`)
    pub service: String,
    /// Additional attributes
    pub extra: Vec<KeyValue>,
}

impl CallAttributes {
    /// Build the minimum attribute set for a traced call
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        endpoint: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            endpoint: endpoint.into(),
            service: service.into(),
            extra: Vec::new(),
        }
    }

    /// Append an additional attribute
    #[must_use]
    pub fn with_extra(mut self, attribute: KeyValue) -> Self {
        self.extra.push(attribute);
        self
    }
}

/// Execute `work` inside a span named `operation`
///
/// The span is active while `work` runs, so spans created within it (nested
/// traced calls, `#[instrument]`-ed functions) become its children. On
/// success the span status is set to OK; on failure it is set to ERROR with
/// a message rendered from the error, and the error is returned to the
/// caller unchanged. The span is closed exactly once on every exit path;
/// if the returned future is dropped before completion the span closes with
/// its status unset.
///
/// `operation` is a stable, dotted, low-cardinality identifier such as
/// `"news.search"` — request-specific values belong in `attributes`, not in
/// the operation name.
///
/// The wrapper is transparent: callers observe exactly the value or error
/// `work` produced, and export problems never surface here.
pub async fn trace_call<F, Fut, T, E>(
    operation: &str,
    attributes: &CallAttributes,
    kind: CallKind,
    work: F,
) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let span = info_span!(
        "traced_call",
        otel.name = operation,
        otel.kind = kind.as_str(),
        http.method = %attributes.method,
        http.url = %attributes.url,
        endpoint.name = %attributes.endpoint,
        service.name = %attributes.service,
    );
    for attribute in &attributes.extra {
        span.set_attribute(attribute.key.clone(), attribute.value.clone());
    }

    let result = work().instrument(span.clone()).await;

    match &result {
        Ok(_) => span.set_status(Status::Ok),
        Err(error) => {
            let message = error.to_string();
            let message = if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            };
            span.set_status(Status::error(message));
        },
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_kind_strings() {
        assert_eq!(CallKind::Client.as_str(), "client");
        assert_eq!(CallKind::Server.as_str(), "server");
        assert_eq!(CallKind::Producer.as_str(), "producer");
        assert_eq!(CallKind::Consumer.as_str(), "consumer");
        assert_eq!(CallKind::Internal.as_str(), "internal");
    }

    #[test]
    fn attributes_carry_minimum_set() {
        let attrs = CallAttributes::new(
            "GET",
            "https://api.ipify.org?format=json",
            "ipify-get-ip",
            "ipify",
        );
        assert_eq!(attrs.method, "GET");
        assert_eq!(attrs.url, "https://api.ipify.org?format=json");
        assert_eq!(attrs.endpoint, "ipify-get-ip");
        assert_eq!(attrs.service, "ipify");
        assert!(attrs.extra.is_empty());
    }

    #[test]
    fn attributes_extra_appends() {
        let attrs = CallAttributes::new("GET", "https://example.com", "example", "example")
            .with_extra(KeyValue::new("http.status_code", 200_i64))
            .with_extra(KeyValue::new("retry", false));
        assert_eq!(attrs.extra.len(), 2);
        assert_eq!(attrs.extra[0].key.as_str(), "http.status_code");
    }

    #[tokio::test]
    async fn trace_call_is_transparent_without_subscriber() {
        // No subscriber installed: the wrapper must still return the work's
        // exact outcome.
        let attrs = CallAttributes::new("GET", "https://example.com", "example", "example");
        let ok: Result<u8, std::io::Error> =
            trace_call("demo.ok", &attrs, CallKind::Client, || async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u8, std::io::Error> =
            trace_call("demo.err", &attrs, CallKind::Client, || async {
                Err(std::io::Error::other("network down"))
            })
            .await;
        assert_eq!(err.unwrap_err().to_string(), "network down");
    }
}
