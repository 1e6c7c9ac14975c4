//! Witness searches decide whether a path `u -> v -> w` needs a shortcut once
//! `v` is contracted.
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::{VertexId, Weight},
    graph::{ChGraph, GraphStore},
    search::Candidate,
};

/// Cheapest travel weights between a vertex and one of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// vertex -> neighbour
    pub out: Weight,
    /// neighbour -> vertex
    pub inc: Weight,
}

impl Link {
    const NONE: Link = Link {
        out: Weight::INFINITY,
        inc: Weight::INFINITY,
    };
}

/// Read only view on the part of the graph that is not contracted yet.
pub struct ActiveGraph<'a> {
    pub(crate) g: &'a ChGraph,
    /// For every vertex the vertices storing an arc pointing to it
    pub(crate) referrers: &'a [FxHashSet<VertexId>],
    pub(crate) contracted: &'a [bool],
}

impl<'a> ActiveGraph<'a> {
    pub fn is_contracted(&self, v: VertexId) -> bool {
        self.contracted[v as usize]
    }

    /// Links from `v` to all of its active neighbours, sorted by neighbour id.
    /// Informative arcs are ignored.
    pub fn links(&self, v: VertexId) -> Vec<(VertexId, Link)> {
        let mut links: FxHashMap<VertexId, Link> = FxHashMap::default();

        for (n, data) in self.g.arcs(v) {
            if data.is_informative() || self.is_contracted(*n) {
                continue;
            }
            let link = links.entry(*n).or_insert(Link::NONE);
            if data.forward() {
                link.out = link.out.min(data.weight);
            }
            if data.backward() {
                link.inc = link.inc.min(data.weight);
            }
        }

        for u in self.referrers[v as usize].iter() {
            if self.is_contracted(*u) {
                continue;
            }
            for (_, data) in self.g.arcs(*u).iter().filter(|(t, _)| *t == v) {
                if data.is_informative() {
                    continue;
                }
                let link = links.entry(*u).or_insert(Link::NONE);
                if data.forward() {
                    link.inc = link.inc.min(data.weight);
                }
                if data.backward() {
                    link.out = link.out.min(data.weight);
                }
            }
        }

        let mut links: Vec<(VertexId, Link)> = links
            .into_iter()
            .filter(|(_, l)| l.out.is_finite() || l.inc.is_finite())
            .collect();
        links.sort_unstable_by_key(|(n, _)| *n);
        links
    }

    /// Active neighbours reachable from `v` with the weight of the cheapest arc.
    pub fn out_links(&self, v: VertexId) -> impl Iterator<Item = (VertexId, Weight)> {
        self.links(v)
            .into_iter()
            .filter(|(_, l)| l.out.is_finite())
            .map(|(n, l)| (n, l.out))
    }
}

/// Decides which shortcuts are necessary. Implementations report the weights
/// of alternative paths, correctness of the hierarchy does not depend on them
/// finding every witness.
pub trait WitnessStrategy: Send + Sync {
    /// Returns for (some of) the `targets` the weight of a path from `source`
    /// that does not pass `avoid`. Targets without a known path may be missing.
    fn witness_weights(
        &self,
        g: &ActiveGraph<'_>,
        source: VertexId,
        targets: &[VertexId],
        avoid: VertexId,
        max_weight: Weight,
        max_settled: usize,
    ) -> FxHashMap<VertexId, Weight>;
}

/// Local Dijkstra search limited by weight and number of settled vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraWitness;

impl WitnessStrategy for DijkstraWitness {
    fn witness_weights(
        &self,
        g: &ActiveGraph<'_>,
        source: VertexId,
        targets: &[VertexId],
        avoid: VertexId,
        max_weight: Weight,
        max_settled: usize,
    ) -> FxHashMap<VertexId, Weight> {
        let mut nodes_settled = 0;
        let mut node_data = FxHashMap::default();
        let mut targets_settled = 0;

        let mut queue = BinaryHeap::new();
        let mut settled = FxHashSet::default();

        node_data.insert(source, 0.0);
        queue.push(Candidate::new(source, 0.0));

        while let Some(Candidate { weight, node_idx }) = queue.pop() {
            if nodes_settled >= max_settled {
                break;
            }

            if weight > max_weight {
                break;
            }

            if !settled.insert(node_idx) {
                continue;
            }

            for (target, edge_weight) in g.out_links(node_idx) {
                // Skip edges where target is avoid node
                if target == avoid {
                    continue;
                }

                let new_distance = weight + edge_weight;
                if new_distance < *node_data.get(&target).unwrap_or(&Weight::INFINITY) {
                    node_data.insert(target, new_distance);
                    queue.push(Candidate::new(target, new_distance));
                }
            }

            nodes_settled += 1;
            if targets.contains(&node_idx) {
                targets_settled += 1;
            }

            // If all targets are settled
            if targets_settled == targets.len() {
                break;
            }
        }

        node_data
    }
}

/// Never finds a witness. Every candidate shortcut is inserted unless an
/// existing arc overlaps it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWitness;

impl WitnessStrategy for NoWitness {
    fn witness_weights(
        &self,
        _g: &ActiveGraph<'_>,
        _source: VertexId,
        _targets: &[VertexId],
        _avoid: VertexId,
        _max_weight: Weight,
        _max_settled: usize,
    ) -> FxHashMap<VertexId, Weight> {
        FxHashMap::default()
    }
}
