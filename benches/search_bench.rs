//! Benchmarks for the distance searches.
//!
//! Compares the bidirectional search against the reference BFS on graph
//! shapes that favor (a ring) and stress (a hub cluster) the
//! smaller-frontier balancing rule. Graphs are built deterministically so
//! runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use paytrust::graph::{BidirectionalSearch, ReferenceSearch, TransactionGraph};
use paytrust::types::AccountId;

fn account(n: u32) -> AccountId {
    AccountId::new(format!("acct{}", n))
}

/// A single cycle of `n` accounts: worst case for one-sided BFS, since the
/// two search trees each only need to cover half the ring.
fn ring_graph(n: u32) -> TransactionGraph {
    let mut g = TransactionGraph::new();
    for i in 0..n {
        g.add_edge(account(i), account((i + 1) % n));
    }
    g
}

/// Several dense hubs chained together, with spokes hanging off each hub.
/// Frontier sizes are uneven, exercising the balancing rule.
fn hub_chain_graph(hubs: u32, spokes: u32) -> TransactionGraph {
    let mut g = TransactionGraph::new();
    for h in 0..hubs {
        let hub = h * (spokes + 1);
        for s in 1..=spokes {
            g.add_edge(account(hub), account(hub + s));
        }
        if h > 0 {
            let prev_hub = (h - 1) * (spokes + 1);
            g.add_edge(account(prev_hub), account(hub));
        }
    }
    g
}

fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_1000");
    let mut g = ring_graph(1000);
    let (from, to) = (account(0), account(500));

    group.bench_function("bidirectional", |b| {
        b.iter(|| {
            let d = BidirectionalSearch::new(&mut g).distance(black_box(&from), black_box(&to));
            black_box(d)
        })
    });
    group.bench_function("reference_bfs", |b| {
        b.iter(|| {
            let d = ReferenceSearch::new(&mut g).shortest_path(black_box(&from), black_box(&to));
            black_box(d)
        })
    });
    group.finish();
}

fn bench_hub_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("hub_chain_50x20");
    let mut g = hub_chain_graph(50, 20);
    let (from, to) = (account(1), account(49 * 21 + 1));

    group.bench_function("bidirectional", |b| {
        b.iter(|| {
            let d = BidirectionalSearch::new(&mut g).distance(black_box(&from), black_box(&to));
            black_box(d)
        })
    });
    group.bench_function("reference_bfs", |b| {
        b.iter(|| {
            let d = ReferenceSearch::new(&mut g).shortest_path(black_box(&from), black_box(&to));
            black_box(d)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_ring, bench_hub_chain);
criterion_main!(benches);
