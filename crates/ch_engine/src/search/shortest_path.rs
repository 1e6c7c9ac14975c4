use crate::{
    constants::{VertexId, Weight},
    edge_data::EdgeData,
    tags::TagResolver,
};

/// An arc in travel direction. `data` is oriented so that `forward()` holds
/// for travelling from `source` to `target`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PathArc {
    pub source: VertexId,
    pub target: VertexId,
    pub data: EdgeData,
}

impl PathArc {
    pub fn new(source: VertexId, target: VertexId, data: EdgeData) -> Self {
        PathArc {
            source,
            target,
            data,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<VertexId>,
    /// Original arcs only, shortcuts are unpacked
    pub arcs: Vec<PathArc>,
    pub weight: Weight,
}

impl ShortestPath {
    pub fn new(nodes: Vec<VertexId>, arcs: Vec<PathArc>, weight: Weight) -> Self {
        ShortestPath {
            nodes,
            arcs,
            weight,
        }
    }

    /// Builds the path from consecutive arcs starting at `source`
    pub fn from_arcs(source: VertexId, arcs: Vec<PathArc>) -> Self {
        let mut nodes = Vec::with_capacity(arcs.len() + 1);
        nodes.push(source);
        nodes.extend(arcs.iter().map(|arc| arc.target));
        let weight = arcs.iter().map(|arc| arc.data.weight).sum();
        ShortestPath::new(nodes, arcs, weight)
    }

    /// Resolves the tags of every arc along the path
    pub fn tags(&self, resolver: &impl TagResolver) -> Vec<Vec<(String, String)>> {
        self.arcs
            .iter()
            .map(|arc| resolver.resolve_tags(arc.data.tags))
            .collect()
    }
}
