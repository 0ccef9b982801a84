//! Span/log senders: small value objects bound to an endpoint, service
//! name, and trace id, constructed once per job.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::envelope::{Severity, generate_log, generate_span};

/// Sends span envelopes to a fixed traces endpoint for a single trace.
#[derive(Clone)]
pub struct SpanSender {
    client: reqwest::Client,
    traces_endpoint: String,
    service_name: String,
    trace_id: String,
}

impl SpanSender {
    pub fn new(client: reqwest::Client, traces_endpoint: String, service_name: String, trace_id: String) -> Self {
        Self {
            client,
            traces_endpoint,
            service_name,
            trace_id,
        }
    }

    /// POST a span. Non-2xx responses and transport errors are logged as
    /// warnings and otherwise ignored; telemetry never fails a build.
    pub async fn send(
        &self,
        name: &str,
        parent_span_id: Option<&str>,
        span_id: &str,
        time_from: DateTime<Utc>,
        time_to: DateTime<Utc>,
        status_code: i32,
    ) {
        let span = generate_span(
            &self.trace_id,
            parent_span_id,
            span_id,
            &self.service_name,
            name,
            time_from,
            time_to,
            status_code,
        );

        match self.client.post(&self.traces_endpoint).json(&span).send().await {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                warn!(status = %resp.status(), endpoint = %self.traces_endpoint, "could not post span");
            }
            Err(e) => {
                warn!(error = %e, endpoint = %self.traces_endpoint, "could not post span");
            }
        }
    }
}

/// Sends log envelopes to a fixed logs endpoint for a single trace.
#[derive(Clone)]
pub struct LogSender {
    client: reqwest::Client,
    logs_endpoint: String,
    service_name: String,
    trace_id: String,
}

impl LogSender {
    pub fn new(client: reqwest::Client, logs_endpoint: String, service_name: String, trace_id: String) -> Self {
        Self {
            client,
            logs_endpoint,
            service_name,
            trace_id,
        }
    }

    pub async fn send(&self, span_id: &str, severity: Severity, message: &str) {
        let log = generate_log(&self.trace_id, span_id, &self.service_name, severity, message);

        match self.client.post(&self.logs_endpoint).json(&log).send().await {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                warn!(status = %resp.status(), endpoint = %self.logs_endpoint, "could not post log");
            }
            Err(e) => {
                warn!(error = %e, endpoint = %self.logs_endpoint, "could not post log");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_against_unreachable_endpoint_does_not_panic() {
        let sender = SpanSender::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/v1/traces".to_string(),
            "svc".to_string(),
            "trace1".to_string(),
        );
        let now = Utc::now();
        sender.send("step:x", None, "span1", now, now, 1).await;
    }
}
