use std::{
    fmt::{Debug, Display},
    time::{Duration, Instant},
};

use crate::graph::{ChGraph, GraphStore};

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    pub nodes_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.duration = None;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} nodes settled in {:?}",
            self.nodes_settled, self.duration
        )
    }
}

/// Size and shape of a graph before or after contraction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GraphStats {
    pub num_vertices: usize,
    pub num_arcs: usize,
    pub num_shortcuts: usize,
    pub num_informative: usize,
    pub average_out_degree: f64,
    pub max_out_degree: usize,
}

impl GraphStats {
    pub fn new(g: &ChGraph) -> Self {
        let mut stats = GraphStats {
            num_vertices: g.vertex_count(),
            ..Default::default()
        };

        for v in g.vertices() {
            let arcs = g.arcs(v);
            stats.num_arcs += arcs.len();
            stats.max_out_degree = stats.max_out_degree.max(arcs.len());
            for (_, e) in arcs {
                if e.is_informative() {
                    stats.num_informative += 1;
                } else if e.is_shortcut() {
                    stats.num_shortcuts += 1;
                }
            }
        }

        if stats.num_vertices > 0 {
            stats.average_out_degree = stats.num_arcs as f64 / stats.num_vertices as f64;
        }
        stats
    }
}

impl Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#Vertices: {}, #Arcs: {} (shortcuts: {}, informative: {}), out degree avg: {:.2} max: {}",
            self.num_vertices,
            self.num_arcs,
            self.num_shortcuts,
            self.num_informative,
            self.average_out_degree,
            self.max_out_degree
        )
    }
}
