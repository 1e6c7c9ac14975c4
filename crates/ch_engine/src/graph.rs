use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::{
    constants::{TagsRef, VertexId, Weight, NO_VERTEX},
    edge_data::EdgeData,
    error::{ChError, Result},
};

/// Outgoing arc as stored at its source vertex.
pub type ArcEntry = (VertexId, EdgeData);

/// Adjacency storage the hierarchy is built and queried on.
///
/// Vertex ids are `1..=vertex_count()`, id [`NO_VERTEX`] is never valid.
pub trait GraphStore {
    fn vertex_count(&self) -> usize;

    /// Arcs stored at `vertex`. Unknown vertices have no arcs.
    fn arcs(&self, vertex: VertexId) -> &[ArcEntry];

    /// Appends an arc. Does not deduplicate.
    fn add_arc(&mut self, from: VertexId, to: VertexId, data: EdgeData) -> Result<()>;

    /// Removes all arcs stored at `from` pointing to `to`, returns how many.
    fn remove_arcs(&mut self, from: VertexId, to: VertexId) -> usize;

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex != NO_VERTEX && vertex as usize <= self.vertex_count()
    }
}

/// Arena of per vertex arc lists, indexed by vertex id.
#[derive(Debug, Clone, Default)]
pub struct ChGraph {
    adjacency: Vec<Vec<ArcEntry>>,
}

impl ChGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Adds a new vertex and returns its id
    pub fn add_vertex(&mut self) -> VertexId {
        self.adjacency.push(Vec::new());
        self.adjacency.len() as VertexId
    }

    pub fn add_vertices(&mut self, count: usize) {
        self.adjacency
            .resize_with(self.adjacency.len() + count, Vec::new);
    }

    pub fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = (VertexId, VertexId, EdgeData)>,
    ) -> Result<()> {
        for (from, to, data) in edges {
            self.add_arc(from, to, data)?;
        }
        Ok(())
    }

    pub fn arc_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Iterator over all vertex ids
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        1..=self.adjacency.len() as VertexId
    }

    pub(crate) fn arcs_mut(&mut self, vertex: VertexId) -> &mut Vec<ArcEntry> {
        &mut self.adjacency[vertex as usize - 1]
    }

    /// Reads original edges from a csv file with the columns
    /// `source,target,weight,forward,backward[,tags]`.
    ///
    /// The vertex count is the highest id referenced.
    pub fn from_csv(path_to_edges: &Path) -> Result<Self> {
        info!("Reading edges from {:?}", path_to_edges);

        let mut rows: Vec<CsvEdge> = Vec::new();
        let mut reader = csv::Reader::from_path(path_to_edges)?;
        for result in reader.deserialize() {
            rows.push(result?);
        }

        let num_vertices = rows
            .iter()
            .map(|row| row.source.max(row.target))
            .max()
            .unwrap_or(0);

        let mut g = ChGraph::with_vertices(num_vertices as usize);
        for row in rows {
            let data = EdgeData::new(row.weight, row.forward, row.backward).tagged(row.tags);
            g.add_arc(row.source, row.target, data)?;
        }

        info!(
            "Graph has {} vertices and {} arcs",
            g.vertex_count(),
            g.arc_count()
        );
        Ok(g)
    }

    pub fn print_info(&self) {
        println!(
            "ChGraph:\t#Vertices: {}, #Arcs: {}",
            self.vertex_count(),
            self.arc_count()
        );
    }
}

impl GraphStore for ChGraph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn arcs(&self, vertex: VertexId) -> &[ArcEntry] {
        if self.contains_vertex(vertex) {
            &self.adjacency[vertex as usize - 1]
        } else {
            &[]
        }
    }

    fn add_arc(&mut self, from: VertexId, to: VertexId, data: EdgeData) -> Result<()> {
        if from == to {
            return Err(ChError::MalformedGraph(format!(
                "self loop at vertex {from}"
            )));
        }
        for vertex in [from, to] {
            if !self.contains_vertex(vertex) {
                return Err(ChError::MalformedGraph(format!(
                    "arc {from}->{to} references missing vertex {vertex}"
                )));
            }
        }
        if !(data.weight >= 0.0 && data.weight.is_finite()) {
            return Err(ChError::MalformedGraph(format!(
                "arc {from}->{to} has invalid weight {}",
                data.weight
            )));
        }
        if data.is_shortcut() && !self.contains_vertex(data.contracted) {
            return Err(ChError::MalformedGraph(format!(
                "shortcut {from}->{to} contracts missing vertex {}",
                data.contracted
            )));
        }

        self.arcs_mut(from).push((to, data));
        Ok(())
    }

    fn remove_arcs(&mut self, from: VertexId, to: VertexId) -> usize {
        if !self.contains_vertex(from) {
            return 0;
        }
        let arcs = self.arcs_mut(from);
        let before = arcs.len();
        arcs.retain(|(target, _)| *target != to);
        let removed = before - arcs.len();
        debug!("Removed {removed} arcs {from}->{to}");
        removed
    }
}

#[derive(Debug, Deserialize)]
struct CsvEdge {
    source: VertexId,
    target: VertexId,
    weight: Weight,
    forward: bool,
    backward: bool,
    #[serde(default)]
    tags: TagsRef,
}

/// Arcs pointing to a higher ranked vertex.
pub fn arcs_higher(arcs: &[ArcEntry]) -> Vec<ArcEntry> {
    arcs.iter().filter(|(_, e)| e.is_to_higher()).copied().collect()
}

/// Arcs pointing to a lower ranked vertex.
pub fn arcs_lower(arcs: &[ArcEntry]) -> Vec<ArcEntry> {
    arcs.iter().filter(|(_, e)| e.is_to_lower()).copied().collect()
}

pub fn remove_informative(arcs: &[ArcEntry]) -> Vec<ArcEntry> {
    arcs.iter().filter(|(_, e)| !e.is_informative()).copied().collect()
}

pub fn keep_informative(arcs: &[ArcEntry]) -> Vec<ArcEntry> {
    arcs.iter().filter(|(_, e)| e.is_informative()).copied().collect()
}

/// Drops shortcuts, keeps the arcs of the input graph.
pub fn keep_uncontracted(arcs: &[ArcEntry]) -> Vec<ArcEntry> {
    arcs.iter().filter(|(_, e)| !e.is_shortcut()).copied().collect()
}

/// Macro to create an original arc from source to target with a weight
///
/// edge!(1 , 2, 3.0) Returns an arc traversable in both directions
///
/// edge!(1 => 2, 3.0) Returns a one-way arc
#[macro_export]
macro_rules! edge {
    ($source:expr => $target:expr, $weight:expr) => {
        (
            $source,
            $target,
            $crate::edge_data::EdgeData::new($weight, true, false),
        )
    };
    ($source:expr , $target:expr, $weight:expr) => {
        (
            $source,
            $target,
            $crate::edge_data::EdgeData::new($weight, true, true),
        )
    };
}
