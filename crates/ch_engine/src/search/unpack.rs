//! Expansion of shortcuts into the original arcs they stand for.
//!
//! A shortcut `u -> w` over `v` is split into `u -> v` and `v -> w`. Both legs
//! are looked up in the downward arcs stored at `u` and `w`, so the graph has
//! to be augmented. Legs may be shortcuts themselves, an explicit stack keeps
//! deep hierarchies from exhausting the call stack.
use log::trace;

use crate::{
    cancel::CancelToken,
    constants::{VertexId, Weight},
    edge_data::EdgeData,
    error::{ChError, Result},
    graph::GraphStore,
};

use super::shortest_path::PathArc;

// Relative tolerance between a shortcut and the sum of its legs
const WEIGHT_TOLERANCE: Weight = 1e-4;

/// Unpacks a single arc in travel direction. Original arcs are returned
/// unchanged.
pub fn unpack_arc<G: GraphStore + ?Sized>(
    g: &G,
    arc: PathArc,
    cancel: Option<&CancelToken>,
) -> Result<Vec<PathArc>> {
    let mut unpacked = Vec::new();
    let mut stack = vec![arc];

    while let Some(arc) = stack.pop() {
        if let Some(token) = cancel {
            token.check()?;
        }

        if !arc.data.is_shortcut() {
            unpacked.push(arc);
            continue;
        }

        let (first, second) = split_shortcut(g, &arc)?;
        trace!(
            "Unpacked {}->{} into {}->{} and {}->{}",
            arc.source,
            arc.target,
            first.source,
            first.target,
            second.source,
            second.target
        );
        stack.push(second);
        stack.push(first);
    }

    Ok(unpacked)
}

/// Unpacks consecutive arcs of a path.
pub fn unpack_path<G: GraphStore + ?Sized>(
    g: &G,
    arcs: &[PathArc],
    cancel: Option<&CancelToken>,
) -> Result<Vec<PathArc>> {
    let mut unpacked = Vec::with_capacity(arcs.len());
    for arc in arcs {
        unpacked.extend(unpack_arc(g, *arc, cancel)?);
    }
    Ok(unpacked)
}

fn split_shortcut<G: GraphStore + ?Sized>(g: &G, arc: &PathArc) -> Result<(PathArc, PathArc)> {
    let via = arc.data.contracted;

    // source -> via, stored at the source
    let first = cheapest_leg(g, arc.source, via, |e| e.forward(), |e| e);
    // via -> target, stored at the target
    let second = cheapest_leg(g, arc.target, via, |e| e.backward(), |e| e.reversed());

    let (first, second) = match (first, second) {
        (Some(first), Some(second)) => (first, second),
        _ => {
            return Err(ChError::MalformedGraph(format!(
                "no downward arcs to unpack shortcut {}->{} via {}",
                arc.source, arc.target, via
            )))
        }
    };

    let legs = first.weight + second.weight;
    if (legs - arc.data.weight).abs() > WEIGHT_TOLERANCE * arc.data.weight.max(1.0) {
        return Err(ChError::MalformedGraph(format!(
            "shortcut {}->{} via {} weighs {} but its legs weigh {}",
            arc.source, arc.target, via, arc.data.weight, legs
        )));
    }

    Ok((
        PathArc::new(arc.source, via, first),
        PathArc::new(via, arc.target, second),
    ))
}

fn cheapest_leg<G: GraphStore + ?Sized>(
    g: &G,
    at: VertexId,
    via: VertexId,
    traversable: impl Fn(&EdgeData) -> bool,
    orient: impl Fn(EdgeData) -> EdgeData,
) -> Option<EdgeData> {
    g.arcs(at)
        .iter()
        .filter(|(target, e)| *target == via && e.is_to_lower() && traversable(e))
        .map(|(_, e)| orient(*e))
        .min_by(|a, b| a.weight.total_cmp(&b.weight))
}
