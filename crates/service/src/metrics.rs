// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-call metrics.
//!
//! [`CallMetrics`] records how many messages a call consumed, how many
//! payload bytes they carried, and how the call ended. The adapter logs
//! [`CallMetrics::summary`] when each call completes.

use reduction::OperationKind;
use std::time::Duration;

/// Metrics for a single call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CallMetrics {
    /// Call name (e.g. `"AddVectors"`).
    pub call: &'static str,
    /// Operation the call folded under.
    pub operation: OperationKind,
    /// Inbound messages read from the transport.
    pub messages_received: usize,
    /// Total inbound payload bytes.
    pub payload_bytes: usize,
    /// Wall-clock time from call start to response.
    pub duration: Duration,
    /// `None` on success, the failure category label otherwise.
    pub failure: Option<String>,
}

impl CallMetrics {
    /// Creates an empty metrics container.
    pub fn new(call: &'static str, operation: OperationKind) -> Self {
        Self {
            call,
            operation,
            messages_received: 0,
            payload_bytes: 0,
            duration: Duration::ZERO,
            failure: None,
        }
    }

    /// Records one inbound message.
    pub fn record_message(&mut self, payload_bytes: usize) {
        self.messages_received += 1;
        self.payload_bytes += payload_bytes;
    }

    /// Finalises metrics with the elapsed time and the failure label, if any.
    pub fn finalise(&mut self, duration: Duration, failure: Option<String>) {
        self.duration = duration;
        self.failure = failure;
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns a one-line summary suitable for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}): {} messages, {} in, {:.3}ms, {}",
            self.call,
            self.operation,
            self.messages_received,
            human_size(self.payload_bytes),
            self.duration.as_secs_f64() * 1000.0,
            self.failure.as_deref().unwrap_or("ok"),
        )
    }
}

/// Formats a byte count with a binary unit suffix (`"1.5 KB"`).
pub fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_finalise() {
        let mut m = CallMetrics::new("AddVectors", OperationKind::Sum);
        m.record_message(24);
        m.record_message(24);
        m.finalise(Duration::from_millis(2), None);

        assert_eq!(m.messages_received, 2);
        assert_eq!(m.payload_bytes, 48);
        assert!(m.succeeded());
        let s = m.summary();
        assert!(s.contains("AddVectors (sum)"));
        assert!(s.contains("2 messages"));
        assert!(s.ends_with("ok"));
    }

    #[test]
    fn test_failure_summary() {
        let mut m = CallMetrics::new("MultiplyVectors", OperationKind::DotProduct);
        m.finalise(Duration::ZERO, Some("insufficient_input".into()));
        assert!(!m.succeeded());
        assert!(m.summary().ends_with("insufficient_input"));
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
