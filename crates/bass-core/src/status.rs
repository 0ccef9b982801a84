//! Execution status and its OTel span-status mapping.

use serde::{Deserialize, Serialize};

/// Aggregated status of a node's execution. Numeric order is the
/// aggregation join: `max(a, b)` over `OK < UNKNOWN < TIMEOUT < ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExecStatus {
    Ok = 0,
    Unknown = 1,
    Timeout = 2,
    Error = 3,
}

impl ExecStatus {
    /// Exit code / numeric value used both for process exit codes and
    /// aggregation comparisons.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// `max(self, other)` over the ExecStatus ordering.
    pub fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }

    /// Maps to the OTel span status code: OK -> 1 (OK), UNKNOWN -> 0
    /// (unset), TIMEOUT/ERROR -> 2 (error).
    pub fn otel_status(self) -> i32 {
        match self {
            ExecStatus::Ok => 1,
            ExecStatus::Unknown => 0,
            ExecStatus::Timeout | ExecStatus::Error => 2,
        }
    }
}

impl std::fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExecStatus::Ok => "OK",
            ExecStatus::Unknown => "UNKNOWN",
            ExecStatus::Timeout => "TIMEOUT",
            ExecStatus::Error => "ERROR",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec() {
        assert!(ExecStatus::Ok < ExecStatus::Unknown);
        assert!(ExecStatus::Unknown < ExecStatus::Timeout);
        assert!(ExecStatus::Timeout < ExecStatus::Error);
    }

    #[test]
    fn max_is_join() {
        assert_eq!(ExecStatus::Ok.max(ExecStatus::Error), ExecStatus::Error);
        assert_eq!(ExecStatus::Timeout.max(ExecStatus::Unknown), ExecStatus::Timeout);
    }

    #[test]
    fn otel_mapping() {
        assert_eq!(ExecStatus::Ok.otel_status(), 1);
        assert_eq!(ExecStatus::Unknown.otel_status(), 0);
        assert_eq!(ExecStatus::Timeout.otel_status(), 2);
        assert_eq!(ExecStatus::Error.otel_status(), 2);
    }
}
