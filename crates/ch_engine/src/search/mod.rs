use crate::constants::{VertexId, Weight};

pub mod ch_search;
pub mod dijkstra;
pub mod shortest_path;
pub mod unpack;

/// Heap entry of the Dijkstra based searches. Ordered reversed by weight so
/// `BinaryHeap` pops the cheapest candidate first.
#[derive(Debug)]
pub(crate) struct Candidate {
    pub(crate) node_idx: VertexId,
    pub(crate) weight: Weight,
}

impl Candidate {
    pub(crate) fn new(node_idx: VertexId, weight: Weight) -> Self {
        Self { node_idx, weight }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.weight == self.weight
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected_nodes: Vec<VertexId>,
    expected_weight: Weight,
    sp: Option<shortest_path::ShortestPath>,
) {
    let sp = sp.expect("expected a path");
    assert_eq!(expected_nodes, sp.nodes);
    approx::assert_abs_diff_eq!(expected_weight, sp.weight, epsilon = 1e-6);
}

#[cfg(test)]
pub(crate) fn assert_no_path(sp: Option<shortest_path::ShortestPath>) {
    assert_eq!(None, sp);
}
