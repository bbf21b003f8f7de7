//! Configuration loading and schema.

pub mod schema;

pub use schema::{HorizonConfig, PipelineConfig};
