//! Telemetry and distributed tracing for tracedemo
//!
//! Two pieces: a one-time bootstrap ([`init_telemetry`]) that wires an
//! OTLP/HTTP export pipeline with context propagation and a `tracing`
//! bridge, and a traced-call executor ([`trace_call`]) that wraps one
//! asynchronous outbound operation in a client span with correct status
//! semantics and guaranteed close.

mod otel;
mod traced_call;

pub use otel::{Telemetry, TelemetryConfig, TelemetryError, init_telemetry};
pub use traced_call::{CallAttributes, CallKind, trace_call};
