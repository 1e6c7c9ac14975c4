use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    constants::VertexId,
    edge,
    edge_data::EdgeData,
    error::Result,
    graph::{ChGraph, GraphStore},
};

// https://jlazarsfeld.github.io/ch.150.project/sections/8-contraction/
pub fn generate_complex_graph() -> Result<ChGraph> {
    let mut graph = ChGraph::with_vertices(11);

    let (a, b, c, d, e, f) = (1, 2, 3, 4, 5, 6);
    let (g, h, i, j, k) = (7, 8, 9, 10, 11);

    graph.add_edges([
        edge!(a, b, 3.0), // A <=> B
        edge!(a, c, 5.0), // A <=> C
        edge!(a, k, 3.0), // A <=> K
        edge!(b, d, 5.0), // B <=> D
        edge!(b, c, 3.0), // B <=> C
        edge!(c, d, 2.0), // C <=> D
        edge!(c, j, 2.0), // C <=> J
        edge!(d, j, 4.0), // D <=> J
        edge!(d, e, 7.0), // D <=> E
        edge!(e, j, 3.0), // E <=> J
        edge!(e, f, 6.0), // E <=> F
        edge!(f, h, 2.0), // F <=> H
        edge!(f, g, 4.0), // F <=> G
        edge!(g, h, 3.0), // G <=> H
        edge!(g, i, 5.0), // G <=> I
        edge!(h, i, 3.0), // H <=> I
        edge!(h, j, 2.0), // H <=> J
        edge!(i, j, 4.0), // I <=> J
        edge!(i, k, 6.0), // I <=> K
        edge!(j, k, 3.0), // J <=> K
    ])?;

    Ok(graph)
}

pub fn generate_simple_graph() -> Result<ChGraph> {
    //           B
    //           |
    // E -> A -> C
    //      |  /
    //      D
    let mut g = ChGraph::with_vertices(5);

    let (a, b, c, d, e) = (1, 2, 3, 4, 5);

    g.add_edges([
        edge!(a => c, 1.0),
        edge!(a => d, 1.0),
        edge!(e => a, 1.0),
        edge!(c, b, 1.0),
        edge!(c, d, 1.0),
    ])?;

    Ok(g)
}

/// 1 - 2 - ... - n with unit weights. One-way from lower to higher ids
/// unless `bidirectional` is set.
pub fn line_graph(n: usize, bidirectional: bool) -> Result<ChGraph> {
    let mut g = ChGraph::with_vertices(n);
    for v in 1..n as VertexId {
        g.add_arc(v, v + 1, EdgeData::new(1.0, true, bidirectional))?;
    }
    Ok(g)
}

/// Grid of `width * height` vertices with random integer weights in `1..10`.
/// Most streets are two-way, some are one-way in either direction.
pub fn random_grid_graph(width: usize, height: usize, seed: u64) -> Result<ChGraph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = ChGraph::with_vertices(width * height);

    let id = |x: usize, y: usize| (y * width + x + 1) as VertexId;

    for y in 0..height {
        for x in 0..width {
            let mut neighbors = Vec::with_capacity(2);
            if x + 1 < width {
                neighbors.push(id(x + 1, y));
            }
            if y + 1 < height {
                neighbors.push(id(x, y + 1));
            }

            for n in neighbors {
                let weight = rng.gen_range(1..10) as f32;
                let (forward, backward) = match rng.gen_range(0..10) {
                    0 => (true, false),
                    1 => (false, true),
                    _ => (true, true),
                };
                g.add_arc(id(x, y), n, EdgeData::new(weight, forward, backward))?;
            }
        }
    }

    Ok(g)
}
