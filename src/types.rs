//! Core domain types shared across the graph and pipeline layers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Opaque account identifier.
///
/// The wire format uses numeric-looking strings, but nothing in the graph
/// depends on that: ids are only cloned, hashed, and compared. Adjacency
/// sets and the eviction queue store `AccountId`s rather than vertex
/// references, so vertex state is always resolved through the graph's
/// owning map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// Hop count between two accounts in the transaction graph.
///
/// `Unreachable` compares greater than every finite hop count, so ordinary
/// `<`/`min` comparisons implement "keep the best candidate" without
/// sentinel arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// A concrete shortest-path length in hops.
    Hops(u32),
    /// No path exists, or an endpoint is not in the graph.
    Unreachable,
}

impl Distance {
    /// One hop further, saturating at `Unreachable`.
    pub fn succ(self) -> Self {
        match self {
            Self::Hops(d) => Self::Hops(d + 1),
            Self::Unreachable => Self::Unreachable,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Self::Hops(_))
    }

    /// The finite hop count, if any.
    pub fn hops(self) -> Option<u32> {
        match self {
            Self::Hops(d) => Some(d),
            Self::Unreachable => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hops(d) => write!(f, "{}", d),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}

// ---------------------------------------------------------------------------
// VisitState
// ---------------------------------------------------------------------------

/// Which search tree (if any) has discovered a vertex during a
/// bidirectional search. Scratch state, reset before every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    #[default]
    Unvisited,
    /// Discovered by the tree growing out of the payer.
    Forward,
    /// Discovered by the tree growing out of the payee.
    Backward,
}

impl VisitState {
    /// The color the *other* search tree uses.
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::Unvisited => Self::Unvisited,
        }
    }
}

// ---------------------------------------------------------------------------
// TrustLabel
// ---------------------------------------------------------------------------

/// Per-horizon verdict for a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLabel {
    Trusted,
    Unverified,
}

impl TrustLabel {
    /// Exact wire spelling used in the horizon output files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Unverified => "unverified",
        }
    }
}

impl fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
