//! Bidirectional search on a contraction hierarchy.
//!
//! Both searches only relax arcs leading to higher ranked vertices. The
//! forward search uses arcs that may be travelled away from the settled
//! vertex, the backward search arcs that may be travelled towards it. The
//! searches alternate by queue minimum and stop once neither can improve the
//! best meeting weight.
use std::collections::BinaryHeap;

use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    cancel::CancelToken,
    constants::{VertexId, Weight},
    edge_data::EdgeData,
    error::{ChError, Result},
    graph::GraphStore,
    overlay_graph::OverlayGraph,
    statistics::SearchStats,
};

use super::{
    shortest_path::{PathArc, ShortestPath},
    unpack::unpack_path,
    Candidate,
};

/// Tentative weight and the arc the vertex was reached by. The arc is stored
/// at the predecessor.
pub type NodeData = FxHashMap<VertexId, (Weight, Option<(VertexId, EdgeData)>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    /// Finished, the shortest path passes this vertex
    MetAt(VertexId),
    /// Finished, target is unreachable
    NoPath,
}

pub struct CHSearch<'a> {
    pub stats: SearchStats,
    pub nodes_stalled: usize,
    g: &'a OverlayGraph,
    cancel: CancelToken,
    stall_on_demand: bool,

    data_fwd: NodeData,
    data_bwd: NodeData,
    settled_fwd: FxHashSet<VertexId>,
    settled_bwd: FxHashSet<VertexId>,

    best_weight: Weight,
    meeting_node: Option<VertexId>,
    state: SearchState,
}

impl<'a> CHSearch<'a> {
    pub fn new(graph: &'a OverlayGraph) -> Self {
        CHSearch {
            stats: SearchStats::default(),
            nodes_stalled: 0,
            g: graph,
            cancel: CancelToken::new(),
            stall_on_demand: true,
            data_fwd: FxHashMap::default(),
            data_bwd: FxHashMap::default(),
            settled_fwd: FxHashSet::default(),
            settled_bwd: FxHashSet::default(),
            best_weight: Weight::INFINITY,
            meeting_node: None,
            state: SearchState::Running,
        }
    }

    /// Searches observe `token` and stop with [`ChError::Cancelled`] once it
    /// is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn stall_on_demand(mut self, enabled: bool) -> Self {
        self.stall_on_demand = enabled;
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    fn init(&mut self) {
        self.data_fwd.clear();
        self.data_bwd.clear();
        self.settled_fwd.clear();
        self.settled_bwd.clear();
        self.best_weight = Weight::INFINITY;
        self.meeting_node = None;
        self.state = SearchState::Running;
        self.nodes_stalled = 0;
        self.stats.init();
    }

    /// Shortest path from `source` to `target` with all shortcuts unpacked.
    /// Returns `Ok(None)` if `target` is unreachable.
    pub fn search(&mut self, source: VertexId, target: VertexId) -> Result<Option<ShortestPath>> {
        let Some(weight) = self.distance(source, target)? else {
            return Ok(None);
        };

        let meeting_node = match self.state {
            SearchState::MetAt(v) => v,
            _ => return Ok(None),
        };

        let arcs = self.reconstruct_arcs(meeting_node)?;
        let arcs = unpack_path(self.g.graph(), &arcs, Some(&self.cancel))?;

        let mut sp = ShortestPath::from_arcs(source, arcs);
        sp.weight = weight;
        debug!("Path found: {:?}", sp.nodes);
        Ok(Some(sp))
    }

    /// Weight of the shortest path without reconstructing it.
    pub fn distance(&mut self, source: VertexId, target: VertexId) -> Result<Option<Weight>> {
        self.init();

        for v in [source, target] {
            if !self.g.graph().contains_vertex(v) {
                return Err(ChError::UnknownVertex(v));
            }
        }
        if !self.g.is_augmented() {
            return Err(ChError::InvalidState(
                "hierarchy has no downward arcs, augment it before searching".to_string(),
            ));
        }

        info!("BEGIN CH SEARCH from {} to {}", source, target);

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            self.data_fwd.insert(source, (0.0, None));
            self.data_bwd.insert(target, (0.0, None));
            self.best_weight = 0.0;
            self.state = SearchState::MetAt(source);
            return Ok(Some(0.0));
        }

        let mut queue_fwd = BinaryHeap::new();
        let mut queue_bwd = BinaryHeap::new();

        self.data_fwd.insert(source, (0.0, None));
        self.data_bwd.insert(target, (0.0, None));
        queue_fwd.push(Candidate::new(source, 0.0));
        queue_bwd.push(Candidate::new(target, 0.0));

        loop {
            self.cancel.check()?;

            let min_fwd = queue_fwd.peek().map_or(Weight::INFINITY, |c: &Candidate| c.weight);
            let min_bwd = queue_bwd.peek().map_or(Weight::INFINITY, |c: &Candidate| c.weight);

            // Neither direction can improve the best meeting weight
            if min_fwd.min(min_bwd) >= self.best_weight {
                break;
            }

            if min_fwd <= min_bwd {
                self.settle_next(true, &mut queue_fwd);
            } else {
                self.settle_next(false, &mut queue_bwd);
            }
        }

        self.stats.finish();

        match self.meeting_node {
            Some(v) => {
                self.state = SearchState::MetAt(v);
                info!("{}, meeting node: {}, weight: {}", self.stats, v, self.best_weight);
                Ok(Some(self.best_weight))
            }
            None => {
                self.state = SearchState::NoPath;
                info!("No path found: {}", self.stats);
                Ok(None)
            }
        }
    }

    fn settle_next(&mut self, forward: bool, queue: &mut BinaryHeap<Candidate>) {
        let Some(Candidate { node_idx: v, weight }) = queue.pop() else {
            return;
        };

        let overlay_graph: &'a OverlayGraph = self.g;
        let g = overlay_graph.graph();
        let (data, settled, other_data, other_settled) = if forward {
            (
                &mut self.data_fwd,
                &mut self.settled_fwd,
                &self.data_bwd,
                &self.settled_bwd,
            )
        } else {
            (
                &mut self.data_bwd,
                &mut self.settled_bwd,
                &self.data_fwd,
                &self.settled_fwd,
            )
        };

        // Stale queue entry
        if weight > data.get(&v).map_or(Weight::INFINITY, |d| d.0) || !settled.insert(v) {
            return;
        }
        self.stats.nodes_settled += 1;

        // Settled by both searches
        if let Some((other_weight, _)) = other_data.get(&v).filter(|_| other_settled.contains(&v)) {
            let total = weight + other_weight;
            if total < self.best_weight {
                debug!("New best weight {} meeting at {}", total, v);
                self.best_weight = total;
                self.meeting_node = Some(v);
            }
        }

        // Stall on demand: a lower neighbour reaches v cheaper, so v is not on
        // a shortest upward path
        if self.stall_on_demand {
            let stalled = g
                .arcs(v)
                .iter()
                .filter(|(_, e)| e.is_to_lower() && if forward { e.backward() } else { e.forward() })
                .any(|(n, e)| {
                    data.get(n)
                        .map_or(false, |(n_weight, _)| n_weight + e.weight < weight)
                });
            if stalled {
                self.nodes_stalled += 1;
                return;
            }
        }

        for (n, e) in g
            .arcs(v)
            .iter()
            .filter(|(_, e)| e.is_to_higher() && if forward { e.forward() } else { e.backward() })
        {
            let new_distance = weight + e.weight;
            if new_distance < data.get(n).map_or(Weight::INFINITY, |d| d.0) {
                data.insert(*n, (new_distance, Some((v, *e))));
                queue.push(Candidate::new(*n, new_distance));
            }
        }
    }

    /// Arcs of the packed path in travel direction
    fn reconstruct_arcs(&self, meeting_node: VertexId) -> Result<Vec<PathArc>> {
        let mut arcs = Vec::new();

        let mut next = meeting_node;
        while let Some((prev, data)) = self.predecessor(&self.data_fwd, next)? {
            arcs.push(PathArc::new(prev, next, data));
            next = prev;
        }
        arcs.reverse();

        let mut next = meeting_node;
        while let Some((prev, data)) = self.predecessor(&self.data_bwd, next)? {
            // Stored at `prev` pointing to `next`, travelled from `next` to `prev`
            arcs.push(PathArc::new(next, prev, data.reversed()));
            next = prev;
        }

        Ok(arcs)
    }

    fn predecessor(&self, data: &NodeData, v: VertexId) -> Result<Option<(VertexId, EdgeData)>> {
        data.get(&v)
            .map(|(_, pred)| *pred)
            .ok_or_else(|| ChError::InvalidState(format!("vertex {v} was never reached")))
    }
}
