//! Crate-wide error type and `Result` alias.

use thiserror::Error;

/// All errors surfaced by the PayTrust library.
#[derive(Debug, Error)]
pub enum PayTrustError {
    /// Underlying file or stream I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file existed but could not be parsed.
    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An input line did not carry the expected `time, id1, id2, amount,
    /// message` fields. The pipeline skips and counts these; callers that
    /// parse single records see the variant directly.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, PayTrustError>;
