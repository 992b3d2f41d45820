//! Structured tracing and in-process metrics for a DKG operator.
//!
//! No metrics HTTP endpoint and no Prometheus dependency are carried here —
//! only `tracing`-backed structured events and atomic counters a host
//! process can snapshot and log on its own schedule.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Standardized event types for structured logging, scoped to what a
/// ceremony instance actually does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CeremonyCreated,
    ExchangeCollected,
    DkgStarted,
    DkgCompleted,
    DkgFailed,
    CeremonyEvicted,
    BundleProcessed,
    SignatureSelfCheckFailed,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CeremonyCreated => "ceremony_created",
            Self::ExchangeCollected => "exchange_collected",
            Self::DkgStarted => "dkg_started",
            Self::DkgCompleted => "dkg_completed",
            Self::DkgFailed => "dkg_failed",
            Self::CeremonyEvicted => "ceremony_evicted",
            Self::BundleProcessed => "bundle_processed",
            Self::SignatureSelfCheckFailed => "signature_self_check_failed",
        };
        write!(f, "{}", s)
    }
}

/// A structured log event with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event_type: EventType,
    pub timestamp_ms: u64,
    /// The ceremony's request id, hex-encoded.
    pub request_id: Option<String>,
    pub operator_id: Option<u64>,
    pub duration_ms: Option<u64>,
    pub error: Option<String>,
}

impl LogEvent {
    pub fn new(event_type: EventType) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        Self {
            event_type,
            timestamp_ms,
            request_id: None,
            operator_id: None,
            duration_ms: None,
            error: None,
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_operator(mut self, operator_id: u64) -> Self {
        self.operator_id = Some(operator_id);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis() as u64);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Emit this event using tracing, at a level matched to its severity.
    pub fn emit(&self) {
        let json = serde_json::to_string(&self).unwrap_or_default();
        match self.event_type {
            EventType::DkgFailed
            | EventType::CeremonyEvicted
            | EventType::SignatureSelfCheckFailed => {
                tracing::warn!(event = %json, "observability_event");
            }
            _ => {
                tracing::info!(event = %json, "observability_event");
            }
        }
    }
}

/// Process-wide counters for a single operator process. Cheap to share via
/// `Arc` and read with `Ordering::Relaxed` since these are monitoring
/// counters, not a source of synchronization.
#[derive(Debug, Default)]
pub struct CeremonyMetrics {
    ceremonies_started: AtomicU64,
    ceremonies_completed: AtomicU64,
    ceremonies_failed: AtomicU64,
    ceremonies_evicted: AtomicU64,
    deals_processed: AtomicU64,
    responses_processed: AtomicU64,
    justifications_processed: AtomicU64,
    signature_self_check_failures: AtomicU64,
}

impl CeremonyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_ceremonies_started(&self) {
        self.ceremonies_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ceremonies_completed(&self) {
        self.ceremonies_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ceremonies_failed(&self) {
        self.ceremonies_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ceremonies_evicted(&self) {
        self.ceremonies_evicted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_deals_processed(&self) {
        self.deals_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_responses_processed(&self) {
        self.responses_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_justifications_processed(&self) {
        self.justifications_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_signature_self_check_failures(&self) {
        self.signature_self_check_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ceremonies_started: self.ceremonies_started.load(Ordering::Relaxed),
            ceremonies_completed: self.ceremonies_completed.load(Ordering::Relaxed),
            ceremonies_failed: self.ceremonies_failed.load(Ordering::Relaxed),
            ceremonies_evicted: self.ceremonies_evicted.load(Ordering::Relaxed),
            deals_processed: self.deals_processed.load(Ordering::Relaxed),
            responses_processed: self.responses_processed.load(Ordering::Relaxed),
            justifications_processed: self.justifications_processed.load(Ordering::Relaxed),
            signature_self_check_failures: self
                .signature_self_check_failures
                .load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of current metrics, serializable for an ad hoc log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub ceremonies_started: u64,
    pub ceremonies_completed: u64,
    pub ceremonies_failed: u64,
    pub ceremonies_evicted: u64,
    pub deals_processed: u64,
    pub responses_processed: u64,
    pub justifications_processed: u64,
    pub signature_self_check_failures: u64,
}

/// A per-ceremony span tracking wall-clock time from creation through
/// completion or failure, emitting the matching `LogEvent` at each stage.
pub struct CeremonySpan {
    request_id: String,
    operator_id: u64,
    start_time: Instant,
}

impl CeremonySpan {
    pub fn new(request_id: impl Into<String>, operator_id: u64) -> Self {
        let span = Self {
            request_id: request_id.into(),
            operator_id,
            start_time: Instant::now(),
        };

        LogEvent::new(EventType::CeremonyCreated)
            .with_request_id(&span.request_id)
            .with_operator(span.operator_id)
            .emit();

        span
    }

    pub fn record_exchange_collected(&self) {
        LogEvent::new(EventType::ExchangeCollected)
            .with_request_id(&self.request_id)
            .with_operator(self.operator_id)
            .emit();
    }

    pub fn record_dkg_started(&self) {
        LogEvent::new(EventType::DkgStarted)
            .with_request_id(&self.request_id)
            .with_operator(self.operator_id)
            .emit();
    }

    pub fn complete(self) -> Duration {
        let duration = self.start_time.elapsed();
        LogEvent::new(EventType::DkgCompleted)
            .with_request_id(&self.request_id)
            .with_operator(self.operator_id)
            .with_duration(duration)
            .emit();
        duration
    }

    pub fn fail(self, error: impl Into<String>) -> Duration {
        let duration = self.start_time.elapsed();
        LogEvent::new(EventType::DkgFailed)
            .with_request_id(&self.request_id)
            .with_operator(self.operator_id)
            .with_duration(duration)
            .with_error(error)
            .emit();
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_builder() {
        let event = LogEvent::new(EventType::CeremonyCreated)
            .with_request_id("req-123")
            .with_operator(2);

        assert_eq!(event.event_type, EventType::CeremonyCreated);
        assert_eq!(event.request_id, Some("req-123".to_string()));
        assert_eq!(event.operator_id, Some(2));
    }

    #[test]
    fn test_metrics_counters() {
        let metrics = CeremonyMetrics::new();
        metrics.inc_ceremonies_started();
        metrics.inc_ceremonies_started();
        metrics.inc_ceremonies_completed();
        metrics.inc_deals_processed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ceremonies_started, 2);
        assert_eq!(snapshot.ceremonies_completed, 1);
        assert_eq!(snapshot.deals_processed, 1);
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(EventType::DkgCompleted.to_string(), "dkg_completed");
        assert_eq!(
            EventType::SignatureSelfCheckFailed.to_string(),
            "signature_self_check_failed"
        );
    }

    #[test]
    fn test_metrics_snapshot_serialization() {
        let metrics = CeremonyMetrics::new();
        metrics.inc_ceremonies_started();

        let snapshot = metrics.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: MetricsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ceremonies_started, 1);
    }
}
