//! OTLP/HTTP span and log emission for the `bass` CI fabric.
//!
//! The emitter is stateless: every call is an independent POST, and
//! non-2xx responses only produce a local warning. Telemetry is
//! non-critical and never fails a build.

pub mod emitter;
pub mod envelope;

pub use emitter::{LogSender, SpanSender};
pub use envelope::Severity;
