//! OTLP/HTTP JSON envelope construction for spans and logs.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// Log severity, mapped to OTel's `severityNumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    fn number(self) -> u32 {
        match self {
            Severity::Trace => 1,
            Severity::Debug => 5,
            Severity::Info => 9,
            Severity::Warn => 13,
            Severity::Error => 17,
            Severity::Fatal => 21,
        }
    }
}

fn datetime_to_nano(t: DateTime<Utc>) -> i64 {
    t.timestamp_nanos_opt().unwrap_or(0)
}

/// Build a single-span OTLP `resourceSpans` envelope.
#[allow(clippy::too_many_arguments)]
pub fn generate_span(
    trace_id: &str,
    parent_span_id: Option<&str>,
    span_id: &str,
    service: &str,
    name: &str,
    time_from: DateTime<Utc>,
    time_to: DateTime<Utc>,
    status_code: i32,
) -> Value {
    json!({
        "resourceSpans": [
            {
                "resource": {
                    "attributes": [
                        { "key": "service.name", "value": { "stringValue": service } }
                    ]
                },
                "scopeSpans": [
                    {
                        "spans": [
                            {
                                "traceId": trace_id,
                                "spanId": span_id,
                                "parentSpanId": parent_span_id,
                                "startTimeUnixNano": datetime_to_nano(time_from).to_string(),
                                "endTimeUnixNano": datetime_to_nano(time_to).to_string(),
                                "name": name,
                                "kind": 2,
                                "status": { "code": status_code }
                            }
                        ]
                    }
                ]
            }
        ]
    })
}

/// Build a single-log-record OTLP `resourceLogs` envelope.
pub fn generate_log(
    trace_id: &str,
    span_id: &str,
    service: &str,
    severity: Severity,
    message: &str,
) -> Value {
    let now = Utc::now();
    json!({
        "resourceLogs": [
            {
                "resource": {
                    "attributes": [
                        { "key": "service.name", "value": { "stringValue": service } }
                    ]
                },
                "scopeLogs": [
                    {
                        "logRecords": [
                            {
                                "timeUnixNano": datetime_to_nano(now).to_string(),
                                "observedTimeUnixNano": datetime_to_nano(now).to_string(),
                                "severityNumber": severity.number(),
                                "traceId": trace_id,
                                "spanId": span_id,
                                "body": { "stringValue": message }
                            }
                        ]
                    }
                ]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_envelope_has_expected_shape() {
        let now = Utc::now();
        let span = generate_span("trace1", Some("parent1"), "span1", "svc", "step:x", now, now, 1);
        assert_eq!(
            span["resourceSpans"][0]["resource"]["attributes"][0]["value"]["stringValue"],
            "svc"
        );
        let s = &span["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(s["traceId"], "trace1");
        assert_eq!(s["spanId"], "span1");
        assert_eq!(s["parentSpanId"], "parent1");
        assert_eq!(s["kind"], 2);
        assert_eq!(s["status"]["code"], 1);
    }

    #[test]
    fn root_span_has_null_parent() {
        let now = Utc::now();
        let span = generate_span("trace1", None, "span1", "svc", "pipeline:x", now, now, 1);
        let s = &span["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert!(s["parentSpanId"].is_null());
    }

    #[test]
    fn log_envelope_has_expected_severity() {
        let log = generate_log("trace1", "span1", "svc", Severity::Error, "boom");
        let record = &log["resourceLogs"][0]["scopeLogs"][0]["logRecords"][0];
        assert_eq!(record["severityNumber"], 17);
        assert_eq!(record["body"]["stringValue"], "boom");
    }
}
