//! Sliding-window transaction graph.
//!
//! Owns all vertices and the adjacency relation, plus a FIFO record of
//! first-seen edge insertion order used only for eviction. Pairing each
//! stream insertion with one eviction keeps the edge count roughly
//! constant; vertices live exactly as long as they have at least one
//! neighbor.

use std::collections::{HashMap, VecDeque};

use crate::graph::vertex::Vertex;
use crate::types::AccountId;

/// Mutable graph of recent payment activity.
///
/// Adjacency is an undirected simple-graph view of directed payments:
/// repeat payments between an already-linked pair bump the directional
/// counters but never duplicate the edge or its eviction-queue slot.
#[derive(Debug, Default)]
pub struct TransactionGraph {
    vertices: HashMap<AccountId, Vertex>,
    edge_queue: VecDeque<(AccountId, AccountId)>,
}

impl TransactionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // -- vertex access ------------------------------------------------------

    /// Look up a vertex. Never fabricates one.
    pub fn vertex(&self, id: &AccountId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub(crate) fn vertex_mut(&mut self, id: &AccountId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.vertices.contains_key(id)
    }

    /// Create a vertex if absent. Idempotent.
    pub fn add_vertex(&mut self, id: AccountId) {
        self.vertices
            .entry(id.clone())
            .or_insert_with(|| Vertex::new(id));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges currently in the window.
    pub fn edge_count(&self) -> usize {
        self.edge_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edge_queue.is_empty()
    }

    pub fn account_ids(&self) -> impl Iterator<Item = &AccountId> {
        self.vertices.keys()
    }

    // -- edge lifecycle -----------------------------------------------------

    /// Record one directed payment from `from` to `to`.
    ///
    /// Lazily creates both endpoints. The pair is linked (and queued for
    /// eviction) only when not already mutually adjacent — the check is
    /// against adjacency itself, so an edge that was evicted and is later
    /// re-observed counts as brand new and takes a fresh FIFO slot. The
    /// directional counters are bumped on every call, including repeats of
    /// an existing edge.
    pub fn add_edge(&mut self, from: AccountId, to: AccountId) {
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());

        let already_linked = self
            .vertices
            .get(&from)
            .is_some_and(|v| v.has_neighbor(&to));
        if !already_linked {
            self.edge_queue.push_back((from.clone(), to.clone()));
            if let Some(v) = self.vertices.get_mut(&from) {
                v.add_neighbor(to.clone());
            }
            if let Some(v) = self.vertices.get_mut(&to) {
                v.add_neighbor(from.clone());
            }
        }

        if let Some(v) = self.vertices.get_mut(&from) {
            v.record_outgoing();
        }
        if let Some(v) = self.vertices.get_mut(&to) {
            v.record_incoming();
        }
    }

    /// Remove the oldest distinct edge in the window.
    ///
    /// Strict FIFO by first insertion, independent of how recently the
    /// pair transacted. An endpoint left with an empty adjacency set is
    /// deleted outright, discarding its counters.
    ///
    /// # Panics
    ///
    /// Panics if the eviction queue is empty. The driver pairs each
    /// stream insertion with exactly one eviction, so an empty queue here
    /// is a programming error, not a runtime condition.
    pub fn evict_oldest(&mut self) {
        let (from, to) = self
            .edge_queue
            .pop_front()
            .expect("evict_oldest called with an empty edge queue");

        if let Some(v) = self.vertices.get_mut(&from) {
            v.remove_neighbor(&to);
        }
        if let Some(v) = self.vertices.get_mut(&to) {
            v.remove_neighbor(&from);
        }

        if self.vertices.get(&from).is_some_and(|v| v.degree() == 0) {
            self.vertices.remove(&from);
        }
        if self.vertices.get(&to).is_some_and(|v| v.degree() == 0) {
            self.vertices.remove(&to);
        }
    }

    /// Oldest queued edge, if any. Exposed for diagnostics and tests.
    pub fn oldest_edge(&self) -> Option<&(AccountId, AccountId)> {
        self.edge_queue.front()
    }

    // -- search support -----------------------------------------------------

    /// Reset every vertex's scratch fields ahead of a search.
    pub(crate) fn reset_scratch(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.reset_scratch();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
