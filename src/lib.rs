//! PayTrust — payment trust signals from a sliding-window transaction graph.
//!
//! Maintains a bounded-memory graph of recent payments and answers
//! payer-to-payee distance queries with a bidirectional BFS, which the
//! streaming pipeline turns into per-transaction trust labels and
//! suspicious-account reports.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod observability;
pub mod pipeline;
pub mod types;
