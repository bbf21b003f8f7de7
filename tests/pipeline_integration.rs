//! Full end-to-end tests for the batch/stream pipeline.
//!
//! These write real payment files into a temp directory, run the pipeline,
//! and verify the three horizon output files line by line.

use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use paytrust::config::PipelineConfig;
use paytrust::pipeline::TrustPipeline;
use paytrust::types::{AccountId, Distance};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const HEADER: &str = "time, id1, id2, amount, message";

/// Write a payment file with the standard header and one record per pair.
fn write_payments(path: &Path, pairs: &[(&str, &str)]) {
    let mut contents = String::from(HEADER);
    for (payer, payee) in pairs {
        contents.push_str(&format!(
            "\n2016-11-02 09:38:53, {}, {}, 12.34, test payment",
            payer, payee
        ));
    }
    contents.push('\n');
    std::fs::write(path, contents).unwrap();
}

fn read_labels(out_dir: &Path, file: &str) -> Vec<String> {
    std::fs::read_to_string(out_dir.join(file))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn id(s: &str) -> AccountId {
    AccountId::from(s)
}

// ===========================================================================
// 1. Batch seeding
// ===========================================================================

#[test]
fn batch_seeds_graph_with_exact_ratios() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    write_payments(
        &batch,
        &[
            ("a", "b"),
            ("a", "c"),
            ("a", "d"),
            ("b", "c"),
            ("b", "d"),
            ("c", "d"),
        ],
    );

    let mut pipeline = TrustPipeline::new(PipelineConfig::default());
    pipeline.load_batch(&batch).unwrap();

    assert_eq!(pipeline.metrics().batch_records, 6);
    assert_eq!(pipeline.graph().vertex_count(), 4);
    assert_eq!(pipeline.graph().edge_count(), 6);

    let ratio = |name: &str| pipeline.graph().vertex(&id(name)).unwrap().ratio();
    assert_eq!(ratio("a"), 0.0);
    assert_eq!(ratio("b"), 0.5);
    assert_eq!(ratio("c"), 2.0);
    assert_eq!(ratio("d"), 0.0);
}

#[test]
fn batch_phase_never_evicts() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    write_payments(&batch, &[("a", "b"), ("b", "c"), ("c", "d"), ("a", "b")]);

    let mut pipeline = TrustPipeline::new(PipelineConfig::default());
    pipeline.load_batch(&batch).unwrap();

    // Three distinct edges survive; the repeat only bumped counters.
    assert_eq!(pipeline.graph().edge_count(), 3);
    assert_eq!(pipeline.metrics().evictions, 0);
}

// ===========================================================================
// 2. Stream labeling
// ===========================================================================

#[test]
fn stream_labels_each_record_at_three_horizons() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    let stream = dir.path().join("stream.txt");
    let out_dir = dir.path().join("out");

    write_payments(
        &batch,
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "f")],
    );
    // Each record is classified before it lands and before one eviction:
    // 1. a-b: one hop. The repeat does not requeue, so eviction then drops
    //    the a-b edge and a leaves the window.
    // 2. a-c: a is absent at query time. The record then re-creates it.
    // 3. a-f: four hops via the fresh a-c edge (b-c aged out in step 2).
    // 4. x-y: both sides unknown.
    write_payments(&stream, &[("a", "b"), ("a", "c"), ("a", "f"), ("x", "y")]);

    let mut pipeline = TrustPipeline::new(PipelineConfig::default());
    pipeline.load_batch(&batch).unwrap();
    pipeline.process_stream(&stream, &out_dir).unwrap();

    assert_eq!(
        read_labels(&out_dir, "output1.txt"),
        ["trusted", "unverified", "unverified", "unverified"]
    );
    assert_eq!(
        read_labels(&out_dir, "output2.txt"),
        ["trusted", "unverified", "unverified", "unverified"]
    );
    assert_eq!(
        read_labels(&out_dir, "output3.txt"),
        ["trusted", "unverified", "trusted", "unverified"]
    );

    assert_eq!(pipeline.metrics().stream_records, 4);
    assert_eq!(pipeline.metrics().evictions, 4);
    assert_eq!(pipeline.metrics().searches_run, 4);
}

#[test]
fn classification_uses_pre_insertion_state() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    let stream = dir.path().join("stream.txt");
    let out_dir = dir.path().join("out");

    write_payments(&batch, &[("a", "b")]);
    // p and q first transact in the stream itself; the payment must not
    // vouch for its own trust signal, so it labels as unverified even
    // though the edge exists by the time the record is fully applied.
    write_payments(&stream, &[("p", "q")]);

    let mut pipeline = TrustPipeline::new(PipelineConfig::default());
    pipeline.load_batch(&batch).unwrap();
    pipeline.process_stream(&stream, &out_dir).unwrap();

    assert_eq!(read_labels(&out_dir, "output1.txt"), ["unverified"]);
    assert_eq!(read_labels(&out_dir, "output2.txt"), ["unverified"]);
    assert_eq!(read_labels(&out_dir, "output3.txt"), ["unverified"]);
}

#[test]
fn stream_eviction_slides_the_window() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    let stream = dir.path().join("stream.txt");
    let out_dir = dir.path().join("out");

    write_payments(&batch, &[("a", "b"), ("b", "c")]);
    // Each stream record adds one edge and evicts one. After two records
    // the batch edges have both aged out.
    write_payments(&stream, &[("c", "d"), ("d", "e")]);

    let mut pipeline = TrustPipeline::new(PipelineConfig::default());
    pipeline.load_batch(&batch).unwrap();
    pipeline.process_stream(&stream, &out_dir).unwrap();

    assert!(
        pipeline.graph().vertex(&id("a")).is_none(),
        "a aged out of the window"
    );
    assert_eq!(pipeline.graph().edge_count(), 2);
    assert_eq!(pipeline.distance(&id("a"), &id("e")), Distance::Unreachable);
}

// ===========================================================================
// 3. Malformed input
// ===========================================================================

#[test]
fn malformed_records_are_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    let stream = dir.path().join("stream.txt");
    let out_dir = dir.path().join("out");

    write_payments(&batch, &[("a", "b"), ("b", "c")]);
    std::fs::write(
        &stream,
        "time, id1, id2, amount, message\n\
         2016-11-02 09:38:53, a, c, 1.00, ok\n\
         totally broken line\n\
         2016-11-02 09:38:54, b, c, 2.00, ok\n",
    )
    .unwrap();

    let mut pipeline = TrustPipeline::new(PipelineConfig::default());
    pipeline.load_batch(&batch).unwrap();
    pipeline.process_stream(&stream, &out_dir).unwrap();

    // Two good records produce two lines each; the broken one vanished.
    assert_eq!(read_labels(&out_dir, "output1.txt").len(), 2);
    assert_eq!(pipeline.metrics().stream_records, 2);
    assert_eq!(pipeline.metrics().malformed_records, 1);
}

// ===========================================================================
// 4. Suspicion reporting
// ===========================================================================

#[test]
fn suspicion_fires_only_beyond_the_widest_horizon() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    let stream = dir.path().join("stream.txt");
    let out_dir = dir.path().join("out");

    // "sink" receives three payments and sends one: ratio 3.0. The u-v
    // pair lives in a separate component.
    write_payments(
        &batch,
        &[
            ("p1", "sink"),
            ("p2", "sink"),
            ("p3", "sink"),
            ("sink", "p1"),
            ("u", "v"),
        ],
    );
    // u pays sink from across the disconnect: distance Unreachable, and
    // after the edge lands sink's ratio is 4.0 > 1.5.
    write_payments(&stream, &[("u", "sink")]);

    let config = PipelineConfig {
        suspicion_threshold: 1.5,
        ..PipelineConfig::default()
    };
    let mut pipeline = TrustPipeline::new(config);
    pipeline.load_batch(&batch).unwrap();
    pipeline.process_stream(&stream, &out_dir).unwrap();

    assert_eq!(pipeline.metrics().suspicion_flags, 1);
}

#[test]
fn nearby_payments_never_raise_suspicion() {
    let dir = TempDir::new().unwrap();
    let batch = dir.path().join("batch.txt");
    let stream = dir.path().join("stream.txt");
    let out_dir = dir.path().join("out");

    write_payments(
        &batch,
        &[
            ("p1", "sink"),
            ("p2", "sink"),
            ("p3", "sink"),
            ("sink", "p1"),
        ],
    );
    // Distance p2-sink is 1: inside every horizon, so no flag regardless
    // of ratio.
    write_payments(&stream, &[("p2", "sink")]);

    let config = PipelineConfig {
        suspicion_threshold: 1.5,
        ..PipelineConfig::default()
    };
    let mut pipeline = TrustPipeline::new(config);
    pipeline.load_batch(&batch).unwrap();
    pipeline.process_stream(&stream, &out_dir).unwrap();

    assert_eq!(pipeline.metrics().suspicion_flags, 0);
}
