//! Structured logging and pipeline metrics.
//!
//! This module provides:
//! - [`init_logging`] — one-time structured logging setup with `RUST_LOG` support
//! - [`Metrics`] — lightweight counters for the batch/stream pipeline

use tracing_subscriber::EnvFilter;

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `paytrust=info` when `RUST_LOG` is not set. Call once at
/// program startup — subsequent calls are silently ignored by
/// `tracing_subscriber`.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paytrust=info"));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Lightweight counters for one pipeline run.
///
/// Tracks input volume, search activity, and how many transactions landed
/// in each trust tier. Serializable to JSON via [`Metrics::to_json`].
#[derive(Debug, Default)]
pub struct Metrics {
    pub batch_records: u64,
    pub stream_records: u64,
    pub malformed_records: u64,
    pub searches_run: u64,
    pub evictions: u64,
    pub trusted_direct: u64,
    pub trusted_near: u64,
    pub trusted_extended: u64,
    pub suspicion_flags: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "batch_records": self.batch_records,
            "stream_records": self.stream_records,
            "malformed_records": self.malformed_records,
            "searches_run": self.searches_run,
            "evictions": self.evictions,
            "trusted_direct": self.trusted_direct,
            "trusted_near": self.trusted_near,
            "trusted_extended": self.trusted_extended,
            "suspicion_flags": self.suspicion_flags,
        })
    }

    /// Share of stream records that cleared the widest horizon.
    pub fn extended_trust_rate(&self) -> f64 {
        if self.stream_records == 0 {
            return 0.0;
        }
        self.trusted_extended as f64 / self.stream_records as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
