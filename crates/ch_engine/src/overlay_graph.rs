use std::fmt::Display;

use crate::{
    constants::VertexId,
    downward::add_downward_edges,
    edge_data::EdgeData,
    error::Result,
    graph::{ChGraph, GraphStore},
    search::{shortest_path::PathArc, unpack::unpack_arc},
    statistics::GraphStats,
};

/// Representation of the graph after running
///     - NodeContractor::run
///     - NodeContractor::run_with_order
/// Shortest path calculation is performed on this graph.
///
/// Upward arcs are stored at their lower endpoint. Once augmented, every
/// upward arc also has a downward copy stored at its higher endpoint.
#[derive(Debug, Clone)]
pub struct OverlayGraph {
    g: ChGraph,
    // Contraction order, indexed by vertex id
    ranks: Vec<u32>,
    augmented: bool,
}

impl OverlayGraph {
    pub(crate) fn new(g: ChGraph, ranks: Vec<u32>) -> Self {
        let augmented = g
            .vertices()
            .any(|v| g.arcs(v).iter().any(|(_, e)| e.is_to_lower()));
        OverlayGraph {
            g,
            ranks,
            augmented,
        }
    }

    pub(crate) fn from_parts(g: ChGraph, ranks: Vec<u32>, augmented: bool) -> Self {
        OverlayGraph {
            g,
            ranks,
            augmented,
        }
    }

    pub fn graph(&self) -> &ChGraph {
        &self.g
    }

    /// Position of `v` in the contraction order, 0 for unknown vertices
    pub fn rank(&self, v: VertexId) -> u32 {
        self.ranks.get(v as usize).copied().unwrap_or(0)
    }

    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Adds the downward arcs needed for unpacking. Returns how many were added.
    pub fn augment(&mut self) -> Result<usize> {
        let added = add_downward_edges(&mut self.g)?;
        self.augmented = true;
        Ok(added)
    }

    pub fn num_shortcuts(&self) -> usize {
        self.count_arcs(|e| e.is_shortcut() && e.is_to_higher())
    }

    pub fn num_informative(&self) -> usize {
        self.count_arcs(|e| e.is_informative())
    }

    fn count_arcs(&self, pred: impl Fn(&EdgeData) -> bool) -> usize {
        self.g
            .vertices()
            .map(|v| self.g.arcs(v).iter().filter(|(_, e)| pred(e)).count())
            .sum()
    }

    /// Replaces a shortcut by the original arcs it stands for. Original arcs
    /// are returned as they are.
    pub fn unpack_edge(&self, arc: PathArc) -> Result<Vec<PathArc>> {
        unpack_arc(&self.g, arc, None)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::new(&self.g)
    }

    pub fn print_info(&self) {
        println!("OverlayGraph:\t{}", self.stats());
    }
}

impl Display for OverlayGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "OverlayGraph: #Arcs: {}, #Vertices: {}",
            self.g.arc_count(),
            self.g.vertex_count()
        )?;
        for v in self.g.vertices() {
            write!(f, "  {} (rank {}):", v, self.rank(v))?;
            for (target, data) in self.g.arcs(v) {
                write!(f, " {}->{} {}", v, target, data)?;
            }
            writeln!(f)?;
        }

        writeln!(f)
    }
}
