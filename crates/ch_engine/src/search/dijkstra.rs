//! Plain Dijkstra on all traversable arcs, ignoring the hierarchy. Used to
//! verify query results and by the query tool to compare timings.
use std::collections::BinaryHeap;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::{
    constants::{VertexId, Weight},
    error::{ChError, Result},
    graph::{ChGraph, GraphStore},
    statistics::SearchStats,
};

use super::{
    shortest_path::{PathArc, ShortestPath},
    Candidate,
};

pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a ChGraph,
    // Arcs in travel direction, indexed by vertex id
    outgoing: Vec<Vec<PathArc>>,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a ChGraph) -> Self {
        let mut outgoing = vec![Vec::new(); graph.vertex_count() + 1];
        for v in graph.vertices() {
            for (w, data) in graph.arcs(v) {
                // Informative arcs are dominated, downward arcs are copies
                if data.is_informative() || data.is_to_lower() {
                    continue;
                }
                if data.forward() {
                    outgoing[v as usize].push(PathArc::new(v, *w, *data));
                }
                if data.backward() {
                    outgoing[*w as usize].push(PathArc::new(*w, v, data.reversed()));
                }
            }
        }

        Dijkstra {
            stats: SearchStats::default(),
            g: graph,
            outgoing,
        }
    }

    pub fn search(&mut self, source: VertexId, target: VertexId) -> Result<Option<ShortestPath>> {
        for v in [source, target] {
            if !self.g.contains_vertex(v) {
                return Err(ChError::UnknownVertex(v));
            }
        }

        self.stats.init();

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Ok(Some(ShortestPath::new(vec![source], Vec::new(), 0.0)));
        }

        let mut node_data: FxHashMap<VertexId, (Weight, Option<PathArc>)> = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = BinaryHeap::new();
        queue.push(Candidate::new(source, 0.0));

        while let Some(Candidate { weight, node_idx }) = queue.pop() {
            if weight > node_data.get(&node_idx).map_or(Weight::INFINITY, |d| d.0) {
                continue;
            }

            self.stats.nodes_settled += 1;

            if node_idx == target {
                break;
            }

            for arc in self.outgoing[node_idx as usize].iter() {
                let new_distance = weight + arc.data.weight;
                if new_distance
                    < node_data
                        .get(&arc.target)
                        .map_or(Weight::INFINITY, |d| d.0)
                {
                    node_data.insert(arc.target, (new_distance, Some(*arc)));
                    queue.push(Candidate::new(arc.target, new_distance));
                }
            }
        }
        self.stats.finish();

        let sp = reconstruct_path(source, target, &node_data);
        match &sp {
            Some(sp) => {
                debug!("Path found: {:?}", sp.nodes);
                info!("Path found: {}", self.stats);
            }
            None => info!("No path found: {}", self.stats),
        }

        Ok(sp)
    }
}

fn reconstruct_path(
    source: VertexId,
    target: VertexId,
    node_data: &FxHashMap<VertexId, (Weight, Option<PathArc>)>,
) -> Option<ShortestPath> {
    let (weight, _) = node_data.get(&target)?;

    let mut arcs = Vec::new();
    let mut current = target;
    while let Some((_, Some(arc))) = node_data.get(&current) {
        arcs.push(*arc);
        current = arc.source;
    }
    arcs.reverse();

    let mut sp = ShortestPath::from_arcs(source, arcs);
    sp.weight = *weight;
    Some(sp)
}
