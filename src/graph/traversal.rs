//! Distance searches over the transaction graph.
//!
//! [`BidirectionalSearch`] is the production algorithm: two BFS trees grown
//! from payer and payee that meet in the middle, with a stopping rule that
//! returns as soon as no deeper level can improve on the best meeting
//! distance. [`ReferenceSearch`] is a plain single-source BFS kept as the
//! correctness oracle for tests and benchmarks.
//!
//! Both searches use the scratch `distance`/`visit` fields on
//! [`Vertex`](crate::graph::vertex::Vertex) and reset them across the whole
//! graph before running; neither touches adjacency or the payment counters.

use std::collections::VecDeque;

use crate::graph::store::TransactionGraph;
use crate::types::{AccountId, Distance, VisitState};

// ---------------------------------------------------------------------------
// ReferenceSearch
// ---------------------------------------------------------------------------

/// Single-source BFS oracle. O(V+E) per query — not the hot path.
pub struct ReferenceSearch<'a> {
    graph: &'a mut TransactionGraph,
}

impl<'a> ReferenceSearch<'a> {
    pub fn new(graph: &'a mut TransactionGraph) -> Self {
        Self { graph }
    }

    /// Shortest hop count from `from` to `to`, or `Unreachable` when the
    /// endpoints are absent or disconnected.
    pub fn shortest_path(&mut self, from: &AccountId, to: &AccountId) -> Distance {
        self.graph.reset_scratch();

        if !self.graph.contains(from) || !self.graph.contains(to) {
            return Distance::Unreachable;
        }

        let mut frontier: VecDeque<AccountId> = VecDeque::new();
        if let Some(v) = self.graph.vertex_mut(from) {
            v.set_distance(Distance::Hops(0));
        }
        frontier.push_back(from.clone());

        while let Some(current) = frontier.pop_front() {
            let (next, neighbors) = match self.graph.vertex(&current) {
                Some(v) => (
                    v.distance().succ(),
                    v.adjacent().iter().cloned().collect::<Vec<_>>(),
                ),
                None => continue,
            };
            for neighbor in neighbors {
                if let Some(v) = self.graph.vertex_mut(&neighbor) {
                    if v.distance() == Distance::Unreachable {
                        v.set_distance(next);
                        frontier.push_back(neighbor);
                    }
                }
            }
        }

        self.graph
            .vertex(to)
            .map(|v| v.distance())
            .unwrap_or(Distance::Unreachable)
    }
}

// ---------------------------------------------------------------------------
// BidirectionalSearch
// ---------------------------------------------------------------------------

/// Meet-in-the-middle BFS between payer and payee.
///
/// Each step expands one vertex from whichever frontier is currently
/// smaller, which keeps the two trees balanced and is what makes this
/// sub-quadratic next to a one-sided BFS. Ties favor the forward side so
/// traces are reproducible.
pub struct BidirectionalSearch<'a> {
    graph: &'a mut TransactionGraph,
}

impl<'a> BidirectionalSearch<'a> {
    pub fn new(graph: &'a mut TransactionGraph) -> Self {
        Self { graph }
    }

    /// Shortest hop count between `from` and `to`.
    ///
    /// Absent endpoints are `Unreachable`; a self-query is `Hops(0)`
    /// without running the search loop.
    pub fn distance(&mut self, from: &AccountId, to: &AccountId) -> Distance {
        self.graph.reset_scratch();

        if !self.graph.contains(from) || !self.graph.contains(to) {
            return Distance::Unreachable;
        }
        if from == to {
            return Distance::Hops(0);
        }

        let mut forward: VecDeque<AccountId> = VecDeque::new();
        let mut backward: VecDeque<AccountId> = VecDeque::new();

        if let Some(v) = self.graph.vertex_mut(from) {
            v.set_distance(Distance::Hops(0));
            v.set_visit(VisitState::Forward);
        }
        if let Some(v) = self.graph.vertex_mut(to) {
            v.set_distance(Distance::Hops(0));
            v.set_visit(VisitState::Backward);
        }
        forward.push_back(from.clone());
        backward.push_back(to.clone());

        // Deepest level each side has committed to, and the best meeting
        // distance seen so far.
        let mut depth_forward = 0u32;
        let mut depth_backward = 0u32;
        let mut min_meet = Distance::Unreachable;

        while !forward.is_empty() && !backward.is_empty() {
            let stop = if forward.len() <= backward.len() {
                expand_one(
                    self.graph,
                    &mut forward,
                    &mut depth_forward,
                    VisitState::Forward,
                    &mut min_meet,
                )
            } else {
                expand_one(
                    self.graph,
                    &mut backward,
                    &mut depth_backward,
                    VisitState::Backward,
                    &mut min_meet,
                )
            };
            if stop {
                return min_meet;
            }
        }

        // A frontier drained without the early stop firing; `min_meet` is
        // still `Unreachable` when the components never connected.
        min_meet
    }
}

/// Expand a single vertex from one side's frontier.
///
/// Returns `true` when the early stop fires: the popped vertex would open
/// a deeper level while a finite meeting distance is already known. Levels
/// expand monotonically, so nothing beyond that level can shorten the
/// answer.
fn expand_one(
    graph: &mut TransactionGraph,
    frontier: &mut VecDeque<AccountId>,
    committed_depth: &mut u32,
    side: VisitState,
    min_meet: &mut Distance,
) -> bool {
    let Some(current) = frontier.pop_front() else {
        return false;
    };
    // Frontier members always carry a finite distance; they were assigned
    // one when enqueued.
    let (new_depth, neighbors) = match graph.vertex(&current) {
        Some(v) => match v.distance() {
            Distance::Hops(d) => (d + 1, v.adjacent().iter().cloned().collect::<Vec<_>>()),
            Distance::Unreachable => return false,
        },
        None => return false,
    };

    if new_depth > *committed_depth {
        if min_meet.is_finite() {
            return true;
        }
        *committed_depth = new_depth;
    }

    for neighbor in neighbors {
        let Some(v) = graph.vertex_mut(&neighbor) else {
            continue;
        };
        match v.visit() {
            VisitState::Unvisited => {
                v.set_distance(Distance::Hops(new_depth));
                v.set_visit(side);
                frontier.push_back(neighbor);
            }
            state if state == side.opposite() => {
                // Meeting point: the other tree already reached this
                // vertex. Dequeued vertices still count — membership in
                // the visited set governs meetings, not queue membership.
                if let Distance::Hops(theirs) = v.distance() {
                    let candidate = Distance::Hops(new_depth + theirs);
                    if candidate < *min_meet {
                        *min_meet = candidate;
                    }
                }
            }
            _ => {} // already reached from this side
        }
    }

    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
