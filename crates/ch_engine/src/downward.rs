//! Mirrors upward arcs at their higher endpoint.
//!
//! After contraction every traversable arc is stored at its lower endpoint.
//! Unpacking a shortcut `u -> w` over `v` has to find the arcs between `v`
//! and both endpoints while only `u` and `w` are known, so each upward arc
//! gets a downward copy stored at its target.
use log::{info, warn};

use crate::{
    constants::VertexId,
    edge_data::{EdgeData, HierarchyBand},
    error::Result,
    graph::GraphStore,
};

/// Adds for every arc `v -> w` in the to-higher band the reversed arc
/// `w -> v` in the to-lower band. Shortcut vertex and tags are copied.
///
/// Running it again adds nothing, reverses that already exist are skipped.
/// Returns the number of arcs added.
pub fn add_downward_edges<G: GraphStore + ?Sized>(g: &mut G) -> Result<usize> {
    let downward = downward_copies(g);

    let mut added = 0;
    let mut skipped = 0;
    for (from, to, data) in downward {
        if has_arc(g, from, to, &data) {
            skipped += 1;
            continue;
        }
        g.add_arc(from, to, data)?;
        added += 1;
    }

    if skipped > 0 {
        warn!("Skipped {skipped} downward arcs that already exist");
    }
    info!("Added {added} downward arcs");

    Ok(added)
}

/// Number of to-higher arcs whose downward copy is not stored yet. Zero on a
/// fully augmented graph.
pub fn missing_downward_edges<G: GraphStore + ?Sized>(g: &G) -> usize {
    downward_copies(g)
        .into_iter()
        .filter(|(from, to, data)| !has_arc(g, *from, *to, data))
        .count()
}

fn downward_copies<G: GraphStore + ?Sized>(g: &G) -> Vec<(VertexId, VertexId, EdgeData)> {
    let mut downward = Vec::new();
    for v in 1..=g.vertex_count() as VertexId {
        for (w, data) in g.arcs(v).iter().filter(|(_, e)| e.is_to_higher()) {
            downward.push((*w, v, data.reversed().with_band(HierarchyBand::ToLower)));
        }
    }
    downward
}

fn has_arc<G: GraphStore + ?Sized>(g: &G, from: VertexId, to: VertexId, data: &EdgeData) -> bool {
    g.arcs(from).iter().any(|(t, e)| *t == to && e == data)
}
