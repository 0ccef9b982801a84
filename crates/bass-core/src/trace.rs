//! OpenTelemetry trace/span id generation.
//!
//! `trace-id` is 16 random bytes rendered as 32 hex chars; `span-id` is 8
//! random bytes rendered as 16 hex chars.

use rand::RngCore;

fn generate_hex_string(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(&buf)
}

pub fn generate_trace_id() -> String {
    generate_hex_string(16)
}

pub fn generate_span_id() -> String {
    generate_hex_string(8)
}
