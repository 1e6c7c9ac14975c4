//! Binary storage of a contracted hierarchy.
//!
//! The hierarchy is written with bincode's standard configuration. Every arc
//! keeps its direction as the byte code, so a file can be inspected without
//! knowing the in-memory layout.
use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{TagsRef, VertexId, Weight},
    downward::missing_downward_edges,
    edge_data::{Direction, EdgeData},
    error::{ChError, Result},
    graph::{ChGraph, GraphStore},
    overlay_graph::OverlayGraph,
};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedArc {
    neighbor: VertexId,
    weight: Weight,
    direction: u8,
    contracted: VertexId,
    tags: TagsRef,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedHierarchy {
    version: u32,
    augmented: bool,
    ranks: Vec<u32>,
    vertices: Vec<Vec<PersistedArc>>,
}

pub fn to_bytes(overlay_graph: &OverlayGraph) -> Result<Vec<u8>> {
    let g = overlay_graph.graph();
    let hierarchy = PersistedHierarchy {
        version: FORMAT_VERSION,
        augmented: overlay_graph.is_augmented(),
        ranks: overlay_graph.ranks().to_vec(),
        vertices: g
            .vertices()
            .map(|v| {
                g.arcs(v)
                    .iter()
                    .map(|(neighbor, data)| PersistedArc {
                        neighbor: *neighbor,
                        weight: data.weight,
                        direction: data.direction.code(),
                        contracted: data.contracted,
                        tags: data.tags,
                    })
                    .collect()
            })
            .collect(),
    };

    Ok(bincode::serde::encode_to_vec(
        &hierarchy,
        bincode::config::standard(),
    )?)
}

/// Decodes a hierarchy and checks it for structural errors.
pub fn from_bytes(bytes: &[u8]) -> Result<OverlayGraph> {
    let (hierarchy, _): (PersistedHierarchy, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;

    if hierarchy.version != FORMAT_VERSION {
        return Err(ChError::MalformedGraph(format!(
            "unsupported format version {}",
            hierarchy.version
        )));
    }
    if hierarchy.ranks.len() != hierarchy.vertices.len() + 1 {
        return Err(ChError::MalformedGraph(format!(
            "{} ranks for {} vertices",
            hierarchy.ranks.len(),
            hierarchy.vertices.len()
        )));
    }

    let mut g = ChGraph::with_vertices(hierarchy.vertices.len());
    for (v, arcs) in (1..).zip(hierarchy.vertices) {
        for arc in arcs {
            let data = EdgeData {
                weight: arc.weight,
                direction: Direction::from_code(arc.direction)?,
                contracted: arc.contracted,
                tags: arc.tags,
            };
            g.add_arc(v, arc.neighbor, data)?;
        }
    }

    // The stored flag has to agree with the arcs, queries rely on it
    let has_downward = g
        .vertices()
        .any(|v| g.arcs(v).iter().any(|(_, e)| e.is_to_lower()));
    if hierarchy.augmented {
        let missing = missing_downward_edges(&g);
        if missing > 0 {
            return Err(ChError::MalformedGraph(format!(
                "hierarchy is marked augmented but {missing} downward arcs are missing"
            )));
        }
    } else if has_downward {
        return Err(ChError::MalformedGraph(
            "hierarchy is not marked augmented but stores downward arcs".to_string(),
        ));
    }

    Ok(OverlayGraph::from_parts(
        g,
        hierarchy.ranks,
        hierarchy.augmented,
    ))
}

pub fn save(overlay_graph: &OverlayGraph, path: &Path) -> Result<()> {
    let bytes = to_bytes(overlay_graph)?;
    fs::write(path, &bytes)?;
    info!("Saved hierarchy to {:?} ({} bytes)", path, bytes.len());
    Ok(())
}

pub fn load(path: &Path) -> Result<OverlayGraph> {
    let bytes = fs::read(path)?;
    let overlay_graph = from_bytes(&bytes)?;
    info!("Loaded hierarchy from {:?}", path);
    Ok(overlay_graph)
}

#[cfg(test)]
mod tests {
    use crate::{
        contraction_strategy::{ContractionStrategy, UpdateStrategy},
        node_contraction::NodeContractor,
        util::test_graphs::generate_complex_graph,
    };

    use super::*;

    #[test]
    fn stored_hierarchy_is_identical() {
        let overlay_graph = NodeContractor::new(generate_complex_graph().unwrap())
            .run()
            .unwrap();

        let restored = from_bytes(&to_bytes(&overlay_graph).unwrap()).unwrap();

        assert_eq!(restored.ranks(), overlay_graph.ranks());
        assert!(restored.is_augmented());
        for v in overlay_graph.graph().vertices() {
            assert_eq!(restored.graph().arcs(v), overlay_graph.graph().arcs(v));
        }
    }

    #[test]
    fn reject_garbage() {
        assert!(matches!(from_bytes(&[1, 2, 3]), Err(ChError::Decode(_))));
    }

    #[test]
    fn reject_invalid_direction_code() {
        let hierarchy = PersistedHierarchy {
            version: FORMAT_VERSION,
            augmented: false,
            ranks: vec![0, 1, 2],
            vertices: vec![
                vec![PersistedArc {
                    neighbor: 2,
                    weight: 1.0,
                    direction: 42,
                    contracted: 0,
                    tags: 0,
                }],
                vec![],
            ],
        };
        let bytes =
            bincode::serde::encode_to_vec(&hierarchy, bincode::config::standard()).unwrap();

        assert!(matches!(from_bytes(&bytes), Err(ChError::MalformedGraph(_))));
    }

    #[test]
    fn reject_missing_ranks() {
        let hierarchy = PersistedHierarchy {
            version: FORMAT_VERSION,
            augmented: false,
            ranks: vec![0],
            vertices: vec![vec![]],
        };
        let bytes =
            bincode::serde::encode_to_vec(&hierarchy, bincode::config::standard()).unwrap();

        assert!(matches!(from_bytes(&bytes), Err(ChError::MalformedGraph(_))));
    }

    #[test]
    fn reject_augmented_flag_without_downward_arcs() {
        let overlay_graph = NodeContractor::new(generate_complex_graph().unwrap())
            .contract_only(ContractionStrategy::LazyUpdate(UpdateStrategy::default()))
            .unwrap();
        assert!(!overlay_graph.is_augmented());

        let mut hierarchy: PersistedHierarchy = bincode::serde::decode_from_slice(
            &to_bytes(&overlay_graph).unwrap(),
            bincode::config::standard(),
        )
        .unwrap()
        .0;
        hierarchy.augmented = true;
        let bytes =
            bincode::serde::encode_to_vec(&hierarchy, bincode::config::standard()).unwrap();

        assert!(matches!(from_bytes(&bytes), Err(ChError::MalformedGraph(_))));

        // Stored as it is, the hierarchy loads and can still be augmented
        let mut restored = from_bytes(&to_bytes(&overlay_graph).unwrap()).unwrap();
        assert!(!restored.is_augmented());
        assert!(restored.augment().unwrap() > 0);
    }

    #[test]
    fn reject_downward_arcs_without_augmented_flag() {
        let overlay_graph = NodeContractor::new(generate_complex_graph().unwrap())
            .run()
            .unwrap();

        let mut hierarchy: PersistedHierarchy = bincode::serde::decode_from_slice(
            &to_bytes(&overlay_graph).unwrap(),
            bincode::config::standard(),
        )
        .unwrap()
        .0;
        hierarchy.augmented = false;
        let bytes =
            bincode::serde::encode_to_vec(&hierarchy, bincode::config::standard()).unwrap();

        assert!(matches!(from_bytes(&bytes), Err(ChError::MalformedGraph(_))));
    }
}
