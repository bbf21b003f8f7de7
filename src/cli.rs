//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::TrustPipeline;
use crate::types::AccountId;

/// Payment trust signals from a sliding-window transaction graph.
#[derive(Debug, Parser)]
#[command(name = "paytrust", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed the graph from a batch file, then label every stream payment.
    Run {
        /// Historical payments used to seed the graph.
        #[arg(long)]
        batch: PathBuf,

        /// Live payments to classify.
        #[arg(long)]
        stream: PathBuf,

        /// Directory for the per-horizon output files.
        #[arg(long, default_value = "paymo_output")]
        out_dir: PathBuf,

        /// Optional YAML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load a batch file and answer a single distance query.
    Distance {
        /// Historical payments used to seed the graph.
        #[arg(long)]
        batch: PathBuf,

        /// Optional YAML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Payer account id.
        from: String,

        /// Payee account id.
        to: String,
    },
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            batch,
            stream,
            out_dir,
            config,
        } => {
            let config = PipelineConfig::load_or_default(config.as_deref())?;
            let mut pipeline = TrustPipeline::new(config);
            pipeline.load_batch(&batch)?;
            pipeline.process_stream(&stream, &out_dir)?;
            info!(metrics = %pipeline.metrics().to_json(), "run complete");
            Ok(())
        }
        Command::Distance {
            batch,
            config,
            from,
            to,
        } => {
            let config = PipelineConfig::load_or_default(config.as_deref())?;
            let mut pipeline = TrustPipeline::new(config);
            pipeline.load_batch(&batch)?;

            let distance = pipeline.distance(&AccountId::from(from.as_str()), &AccountId::from(to.as_str()));
            let labels = pipeline.classify(distance);
            println!("distance: {}", distance);
            println!(
                "labels: direct={} near={} extended={}",
                labels[0], labels[1], labels[2]
            );
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
