//! Configuration data structures for PayTrust.
//!
//! Defines the YAML config format: trust horizons, the suspicion ratio
//! threshold, and batch progress reporting. Every field defaults, so an
//! absent config file means stock behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PayTrustError, Result};
use crate::types::{Distance, TrustLabel};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for the streaming pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Trust horizon thresholds.
    #[serde(default)]
    pub horizons: HorizonConfig,

    /// Incoming/outgoing ratio above which an account becomes a suspicion
    /// candidate.
    #[serde(default = "default_suspicion_threshold")]
    pub suspicion_threshold: f64,

    /// Emit a batch-loading progress update every this many records.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizons: HorizonConfig::default(),
            suspicion_threshold: default_suspicion_threshold(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl PipelineConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&raw).map_err(|source| PayTrustError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from an optional path, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

fn default_suspicion_threshold() -> f64 {
    10.0
}

fn default_progress_interval() -> u64 {
    100_000
}

// ---------------------------------------------------------------------------
// HorizonConfig
// ---------------------------------------------------------------------------

/// Distance thresholds that bucket a transaction's trust level.
///
/// `direct` is an exact match: only a payment to an existing one-hop
/// neighbor counts (a self-payment at zero hops does not). The wider
/// horizons are inclusive upper bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// Exact hop count for the tightest "friend" horizon.
    #[serde(default = "default_direct")]
    pub direct: u32,

    /// Inclusive bound for the friend-of-friend horizon.
    #[serde(default = "default_near")]
    pub near: u32,

    /// Inclusive bound for the widest horizon; anything beyond it is the
    /// untrusted tier where suspicion reports may fire.
    #[serde(default = "default_extended")]
    pub extended: u32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            direct: default_direct(),
            near: default_near(),
            extended: default_extended(),
        }
    }
}

impl HorizonConfig {
    /// Label a transaction at each horizon, tightest first.
    pub fn classify(&self, distance: Distance) -> [TrustLabel; 3] {
        let label = |trusted: bool| {
            if trusted {
                TrustLabel::Trusted
            } else {
                TrustLabel::Unverified
            }
        };
        [
            label(distance == Distance::Hops(self.direct)),
            label(distance <= Distance::Hops(self.near)),
            label(distance <= Distance::Hops(self.extended)),
        ]
    }

    /// Whether a distance falls outside every horizon. Suspicion reports
    /// are only surfaced in this least-trusted tier.
    pub fn beyond_all(&self, distance: Distance) -> bool {
        distance > Distance::Hops(self.extended)
    }
}

fn default_direct() -> u32 {
    1
}

fn default_near() -> u32 {
    2
}

fn default_extended() -> u32 {
    4
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
