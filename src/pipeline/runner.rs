//! Batch seeding and stream processing.
//!
//! A run has two phases. The batch phase replays historical payments into
//! the graph with `add_edge` only — no searches, no eviction. The stream
//! phase then handles each live payment in strict arrival order:
//!
//! 1. bidirectional distance on the graph *as it existed before the record*
//! 2. one trust label per horizon, appended to the three output files
//! 3. `add_edge` for the record
//! 4. suspicion check on both endpoints
//! 5. one `evict_oldest`
//!
//! Classifying against pre-insertion state is a correctness requirement:
//! the transaction must not contribute to its own trust signal.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::graph::{BidirectionalSearch, TransactionGraph};
use crate::observability::Metrics;
use crate::pipeline::parser::{PaymentRecord, RecordReader};
use crate::types::{AccountId, Distance, TrustLabel};

// ---------------------------------------------------------------------------
// HorizonWriters
// ---------------------------------------------------------------------------

const OUTPUT_FILES: [&str; 3] = ["output1.txt", "output2.txt", "output3.txt"];

/// Buffered writers for the three horizon output files, tightest horizon
/// first.
struct HorizonWriters {
    outputs: [BufWriter<File>; 3],
}

impl HorizonWriters {
    fn create(out_dir: &Path) -> Result<Self> {
        fs::create_dir_all(out_dir)?;
        let open = |name: &str| -> Result<BufWriter<File>> {
            Ok(BufWriter::new(File::create(out_dir.join(name))?))
        };
        Ok(Self {
            outputs: [
                open(OUTPUT_FILES[0])?,
                open(OUTPUT_FILES[1])?,
                open(OUTPUT_FILES[2])?,
            ],
        })
    }

    fn write_labels(&mut self, labels: [TrustLabel; 3]) -> Result<()> {
        for (writer, label) in self.outputs.iter_mut().zip(labels) {
            writeln!(writer, "{}", label.as_str())?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        for writer in &mut self.outputs {
            writer.flush()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TrustPipeline
// ---------------------------------------------------------------------------

/// Owns the graph, the policy config, and the run metrics.
///
/// The graph is threaded through explicitly rather than living in a
/// global, so tests can run any number of pipelines side by side.
pub struct TrustPipeline {
    graph: TransactionGraph,
    config: PipelineConfig,
    metrics: Metrics,
}

impl TrustPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            graph: TransactionGraph::new(),
            config,
            metrics: Metrics::new(),
        }
    }

    pub fn graph(&self) -> &TransactionGraph {
        &self.graph
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Distance between two accounts in the current window.
    pub fn distance(&mut self, from: &AccountId, to: &AccountId) -> Distance {
        self.metrics.searches_run += 1;
        BidirectionalSearch::new(&mut self.graph).distance(from, to)
    }

    /// Trust labels for a distance, tightest horizon first.
    pub fn classify(&self, distance: Distance) -> [TrustLabel; 3] {
        self.config.horizons.classify(distance)
    }

    // -- batch phase --------------------------------------------------------

    /// Seed the graph from a historical batch file. Edges only: no
    /// searches, no eviction.
    pub fn load_batch(&mut self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "loading batch file");
        let progress = ProgressBar::new_spinner();

        for record in RecordReader::open(path)? {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    self.metrics.malformed_records += 1;
                    warn!("skipping batch record: {e}");
                    continue;
                }
            };
            self.graph.add_edge(record.payer, record.payee);
            self.metrics.batch_records += 1;
            if self.config.progress_interval > 0
                && self.metrics.batch_records % self.config.progress_interval == 0
            {
                progress.set_message(format!("{} batch records", self.metrics.batch_records));
                progress.tick();
            }
        }

        progress.finish_and_clear();
        info!(
            records = self.metrics.batch_records,
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            "batch loaded"
        );
        Ok(())
    }

    // -- stream phase -------------------------------------------------------

    /// Process a stream file, writing one label per horizon file for each
    /// record.
    pub fn process_stream(&mut self, path: &Path, out_dir: &Path) -> Result<()> {
        info!(path = %path.display(), out_dir = %out_dir.display(), "processing stream");
        let mut writers = HorizonWriters::create(out_dir)?;

        for record in RecordReader::open(path)? {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    self.metrics.malformed_records += 1;
                    warn!("skipping stream record: {e}");
                    continue;
                }
            };
            self.apply_stream_record(record, &mut writers)?;
        }

        writers.flush()?;
        info!(
            records = self.metrics.stream_records,
            suspicion_flags = self.metrics.suspicion_flags,
            "stream processed"
        );
        Ok(())
    }

    fn apply_stream_record(
        &mut self,
        record: PaymentRecord,
        writers: &mut HorizonWriters,
    ) -> Result<()> {
        let PaymentRecord { payer, payee, .. } = record;

        let distance = self.distance(&payer, &payee);
        let labels = self.config.horizons.classify(distance);
        writers.write_labels(labels)?;

        self.metrics.stream_records += 1;
        if labels[0] == TrustLabel::Trusted {
            self.metrics.trusted_direct += 1;
        }
        if labels[1] == TrustLabel::Trusted {
            self.metrics.trusted_near += 1;
        }
        if labels[2] == TrustLabel::Trusted {
            self.metrics.trusted_extended += 1;
        } else {
            debug!(%payer, %payee, %distance, "payment beyond every trust horizon");
        }

        self.graph.add_edge(payer.clone(), payee.clone());
        self.check_suspicion(&payer, distance);
        if payee != payer {
            self.check_suspicion(&payee, distance);
        }

        self.graph.evict_oldest();
        self.metrics.evictions += 1;
        Ok(())
    }

    /// Flag an account whose incoming/outgoing ratio is abnormal while the
    /// current payment's distance exceeds the widest horizon. Suspicion is
    /// only surfaced for the least-trusted tier.
    fn check_suspicion(&mut self, account: &AccountId, distance: Distance) {
        if !self.config.horizons.beyond_all(distance) {
            return;
        }
        let Some(vertex) = self.graph.vertex(account) else {
            return;
        };
        let ratio = vertex.ratio();
        if ratio > self.config.suspicion_threshold {
            warn!(%account, ratio, %distance, "suspicious incoming/outgoing payment ratio");
            self.metrics.suspicion_flags += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
