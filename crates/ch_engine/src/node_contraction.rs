//! Module to build contraction hierarchies from a given [`ChGraph`].
//!
//! # Examples
//! ```
//! use ch_engine::prelude::*;
//!
//! // 1 <-> 2 <-> 3
//! let mut g = ChGraph::with_vertices(3);
//! g.add_edges([ch_engine::edge!(1, 2, 1.0), ch_engine::edge!(2, 3, 1.0)])
//!     .expect("valid arcs");
//!
//! // Create a new NodeContractor instance and run the contraction algorithm
//! let overlay_graph = NodeContractor::new(g).run().expect("contraction failed");
//!
//! assert_eq!(overlay_graph.graph().vertex_count(), 3);
//!```
//! [`ChGraph`]: crate::graph::ChGraph
use std::{
    cmp::{max, Reverse},
    time::Instant,
};

use log::{debug, info};
use priority_queue::PriorityQueue;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::{VertexId, Weight},
    contraction_params::ContractionParams,
    contraction_strategy::{ContractionStrategy, UpdateStrategy},
    edge_data::{EdgeData, HierarchyBand},
    error::{ChError, Result},
    graph::{ChGraph, GraphStore},
    overlap::overlaps,
    overlay_graph::OverlayGraph,
    witness_search::{ActiveGraph, DijkstraWitness, WitnessStrategy},
};

const STEP_SIZE: f64 = 5.0;

/// Path `source -> contracted -> target` that needs a shortcut
#[derive(Debug, Clone, Copy)]
struct Shortcut {
    source: VertexId,
    target: VertexId,
    weight: Weight,
}

/// Contracts the vertices of a graph one by one and turns it into a
/// contraction hierarchy.
///
/// Vertex bookkeeping is indexed by vertex id, slot 0 is unused.
///
/// - `referrers`: for every vertex the vertices storing an arc pointing to it
/// - `ranks`: position in the contraction order, starting at 1
/// - `levels`: depth of the vertex in the hierarchy (search space heuristic)
/// - `contracted_neighbors`: number of already contracted neighbours
///
/// All mutation of the graph happens on the contraction thread through
/// `&mut self`. Priority evaluation only needs `&self` and may run on the
/// rayon pool.
pub struct NodeContractor<W = DijkstraWitness> {
    g: ChGraph,
    referrers: Vec<FxHashSet<VertexId>>,
    contracted: Vec<bool>,
    ranks: Vec<u32>,
    levels: Vec<usize>,
    contracted_neighbors: Vec<usize>,
    num_nodes: usize,
    num_shortcuts: usize,
    num_informative: usize,
    params: ContractionParams,
    witness: W,
}

impl NodeContractor<DijkstraWitness> {
    pub fn new(g: ChGraph) -> Self {
        Self::with_witness(g, ContractionParams::default(), DijkstraWitness)
    }

    pub fn new_with_params(g: ChGraph, params: ContractionParams) -> Self {
        Self::with_witness(g, params, DijkstraWitness)
    }
}

impl<W: WitnessStrategy> NodeContractor<W> {
    pub fn with_witness(g: ChGraph, params: ContractionParams, witness: W) -> Self {
        let num_nodes = g.vertex_count();

        let mut referrers = vec![FxHashSet::default(); num_nodes + 1];
        for v in g.vertices() {
            for (target, _) in g.arcs(v) {
                referrers[*target as usize].insert(v);
            }
        }

        NodeContractor {
            g,
            referrers,
            contracted: vec![false; num_nodes + 1],
            ranks: vec![0; num_nodes + 1],
            levels: vec![0; num_nodes + 1],
            contracted_neighbors: vec![0; num_nodes + 1],
            num_nodes,
            num_shortcuts: 0,
            num_informative: 0,
            params,
            witness,
        }
    }

    /// Contracts all vertices and adds the downward arcs needed to unpack
    /// shortcuts. The result is ready for queries.
    pub fn run(self) -> Result<OverlayGraph> {
        self.run_with_strategy(ContractionStrategy::default())
    }

    pub fn run_with_order(self, node_order: &[VertexId]) -> Result<OverlayGraph> {
        self.run_with_strategy(ContractionStrategy::FixedOrder(node_order))
    }

    pub fn run_with_strategy(self, strategy: ContractionStrategy) -> Result<OverlayGraph> {
        let mut overlay_graph = self.contract_only(strategy)?;
        overlay_graph.augment()?;
        Ok(overlay_graph)
    }

    /// Contracts all vertices without adding downward arcs.
    pub fn contract_only(mut self, strategy: ContractionStrategy) -> Result<OverlayGraph> {
        self.validate_input()?;

        let now = Instant::now();

        let (mut queue, update_strategy) = match strategy {
            ContractionStrategy::FixedOrder(order) => (self.fixed_node_order(order)?, None),
            ContractionStrategy::LazyUpdate(update) => (self.calc_initial_node_order(), Some(update)),
        };

        let mut step_size = STEP_SIZE;
        let mut next_goal = step_size;
        let mut num_contracted = 0;

        while let Some((node, Reverse(priority))) = queue.pop() {
            if update_strategy.map_or(false, |u| u.update_jit()) {
                // Lazy Update node: If the priority of the node is worse (higher), it will be updated instead of contracted
                let importance = self.calc_priority(node, self.params.witness_search_limit);

                if importance > priority {
                    queue.push(node, Reverse(importance));
                    continue;
                }
            }

            debug!("=> Contracting node: {}", node);

            let neighbors: Vec<VertexId> = self
                .view()
                .links(node)
                .into_iter()
                .map(|(n, _)| n)
                .collect();

            self.contract_node(node)?;
            num_contracted += 1;
            self.ranks[node as usize] = num_contracted;

            for neighbor in neighbors.iter() {
                // Spatial Uniformity heuristic
                self.contracted_neighbors[*neighbor as usize] += 1;
                self.levels[*neighbor as usize] = max(
                    self.levels[node as usize] + 1,
                    self.levels[*neighbor as usize],
                );
            }

            // Update only the priority of neighbors = Lazy Neighbor Updating
            if update_strategy.map_or(false, |u: UpdateStrategy| u.update_local()) {
                let priorities = self.calc_priorities(&neighbors, self.params.witness_search_limit);
                for (neighbor, importance) in priorities {
                    if let Some(Reverse(old_value)) =
                        queue.change_priority(&neighbor, Reverse(importance))
                    {
                        if importance != old_value {
                            debug!(
                                "[Update] Changed priority of node {} from {} to {}",
                                neighbor, old_value, importance
                            );
                        }
                    }
                }
            }

            let progress = num_contracted as f64 / self.num_nodes as f64;
            if progress * 100.0 >= next_goal {
                info!("Progress: {:.2}%", progress * 100.0);
                if progress * 100.0 >= 95.0 {
                    step_size = 0.5;
                }
                next_goal += step_size;
            }
        }

        info!("Contracting nodes took {:?}", now.elapsed());
        info!(
            "Added shortcuts: {}, informative arcs: {}",
            self.num_shortcuts, self.num_informative
        );

        Ok(OverlayGraph::new(self.g, self.ranks))
    }

    /// The input must consist of original arcs without rank information.
    fn validate_input(&self) -> Result<()> {
        for v in self.g.vertices() {
            for (target, data) in self.g.arcs(v) {
                if data.is_shortcut() {
                    return Err(ChError::MalformedGraph(format!(
                        "input arc {v}->{target} is a shortcut"
                    )));
                }
                if data.band() != HierarchyBand::Unknown {
                    return Err(ChError::MalformedGraph(format!(
                        "input arc {v}->{target} already has hierarchy band {:?}",
                        data.band()
                    )));
                }
            }
        }
        Ok(())
    }

    fn view(&self) -> ActiveGraph<'_> {
        ActiveGraph {
            g: &self.g,
            referrers: &self.referrers,
            contracted: &self.contracted,
        }
    }

    fn fixed_node_order(&self, order: &[VertexId]) -> Result<PriorityQueue<VertexId, Reverse<i32>>> {
        if order.len() != self.num_nodes {
            return Err(ChError::InvalidState(format!(
                "node order has {} entries, graph has {} vertices",
                order.len(),
                self.num_nodes
            )));
        }

        let mut pq = PriorityQueue::new();
        for (priority, node) in order.iter().enumerate() {
            if !self.g.contains_vertex(*node) {
                return Err(ChError::UnknownVertex(*node));
            }
            if pq.push(*node, Reverse(priority as i32)).is_some() {
                return Err(ChError::InvalidState(format!(
                    "vertex {node} appears twice in node order"
                )));
            }
        }

        Ok(pq)
    }

    fn calc_initial_node_order(&self) -> PriorityQueue<VertexId, Reverse<i32>> {
        let nodes: Vec<VertexId> = self.g.vertices().collect();

        let mut pq = PriorityQueue::with_capacity(nodes.len());
        for (v, importance) in self.calc_priorities(&nodes, self.params.witness_search_initial_limit) {
            pq.push(v, Reverse(importance));
        }

        pq
    }

    /// Evaluates the priorities of `nodes` against the current state.
    fn calc_priorities(&self, nodes: &[VertexId], max_nodes_settled_limit: usize) -> Vec<(VertexId, i32)> {
        if self.params.parallel_ordering {
            nodes
                .par_iter()
                .map(|v| (*v, self.calc_priority(*v, max_nodes_settled_limit)))
                .collect()
        } else {
            nodes
                .iter()
                .map(|v| (*v, self.calc_priority(*v, max_nodes_settled_limit)))
                .collect()
        }
    }

    /// Calculates the importance/relevance of a node v
    /// The lower the value, the earlier the node is contracted.
    /// Priority terms:
    /// - Edge difference: Shortcuts - Removed edges
    /// - Contracted neighbours
    /// - Level: Level of the node in the hierarchy.
    fn calc_priority(&self, v: VertexId, max_nodes_settled_limit: usize) -> i32 {
        let params = self.params.priority_params;
        let edge_difference = self.calc_edge_difference(v, max_nodes_settled_limit);
        let contracted_neighbors = self.contracted_neighbors[v as usize];
        let level = self.levels[v as usize];

        edge_difference * params.edge_difference_coeff
            + level as i32 * params.search_space_coeff
            + contracted_neighbors as i32 * params.contracted_neighbors_coeff
    }

    /// ED = Shortcuts - Removed edges
    fn calc_edge_difference(&self, v: VertexId, max_nodes_settled_limit: usize) -> i32 {
        let (removed_edges, shortcuts) = self.find_shortcuts(v, max_nodes_settled_limit);
        shortcuts.len() as i32 - removed_edges as i32
    }

    /// Returns the number of directed links removed with `v` and the shortcut
    /// arcs needed to contract it, ready to be stored at their source.
    fn find_shortcuts(
        &self,
        v: VertexId,
        max_nodes_settled_limit: usize,
    ) -> (usize, Vec<(VertexId, VertexId, EdgeData)>) {
        let view = self.view();
        let links = view.links(v);

        let removed_edges = links
            .iter()
            .map(|(_, l)| l.out.is_finite() as usize + l.inc.is_finite() as usize)
            .sum();

        let mut shortcuts = Vec::new();
        for (u, uv) in links.iter().filter(|(_, l)| l.inc.is_finite()) {
            let mut max_weight: Weight = 0.0;
            let mut target_nodes = Vec::new();
            // Calculate max_weight <u,v,w>
            for (w, vw) in links.iter() {
                if w == u || !vw.out.is_finite() {
                    continue;
                }
                max_weight = max_weight.max(uv.inc + vw.out);
                target_nodes.push(*w);
            }

            if target_nodes.is_empty() {
                continue;
            }

            // Start search from u
            let res = self.witness.witness_weights(
                &view,
                *u,
                &target_nodes,
                v,
                max_weight,
                max_nodes_settled_limit,
            );

            // Add shortcut if no better or equal path <u,...,w> was found
            for (w, vw) in links.iter() {
                if w == u || !vw.out.is_finite() {
                    continue;
                }

                let weight = uv.inc + vw.out;
                let witness_weight = *res.get(w).unwrap_or(&Weight::INFINITY);

                if witness_weight <= weight {
                    continue;
                }

                shortcuts.push(Shortcut {
                    source: *u,
                    target: *w,
                    weight,
                });
            }
        }

        (removed_edges, merge_shortcuts(&shortcuts, v))
    }

    fn contract_node(&mut self, v: VertexId) -> Result<()> {
        let (_, shortcuts) = self.find_shortcuts(v, self.params.witness_search_limit);

        for (from, to, data) in shortcuts {
            if self.insert_arc_checked(from, to, data)? {
                debug!("Added shortcut {from}->{to} {data}");
                self.num_shortcuts += 1;
            }
        }

        self.disconnect_node(v)
    }

    /// Adds `data` as arc `from -> to` unless an existing arc between both
    /// vertices overlaps it. Existing arcs overlapped by the new one become
    /// informative. Returns whether the arc was added.
    fn insert_arc_checked(&mut self, from: VertexId, to: VertexId, data: EdgeData) -> Result<bool> {
        // (storage vertex, index, arc seen from `from`)
        let mut incumbents = Vec::new();
        for (i, (target, e)) in self.g.arcs(from).iter().enumerate() {
            if *target == to && !e.is_informative() {
                incumbents.push((from, i, *e));
            }
        }
        for (i, (target, e)) in self.g.arcs(to).iter().enumerate() {
            if *target == from && !e.is_informative() {
                incumbents.push((to, i, e.reversed()));
            }
        }

        if let Some((_, _, e)) = incumbents.iter().find(|(_, _, e)| overlaps(e, &data)) {
            debug!("Skipped shortcut {from}->{to} {data}, overlapped by {e}");
            return Ok(false);
        }

        for (at, i, e) in incumbents {
            if overlaps(&data, &e) {
                self.make_informative(at, i)?;
            }
        }

        self.g.add_arc(from, to, data)?;
        self.referrers[to as usize].insert(from);
        Ok(true)
    }

    fn make_informative(&mut self, at: VertexId, index: usize) -> Result<()> {
        let entry = &mut self.g.arcs_mut(at)[index];
        entry.1 = entry.1.convert_to_informative()?;
        self.num_informative += 1;
        debug!("Arc {}->{} {} is informative now", at, entry.0, entry.1);
        Ok(())
    }

    /// Marks `v` as contracted. All traversable arcs between `v` and its
    /// active neighbours end up stored at `v` pointing upwards.
    fn disconnect_node(&mut self, v: VertexId) -> Result<()> {
        self.contracted[v as usize] = true;

        let referrers = std::mem::take(&mut self.referrers[v as usize]);
        for u in referrers {
            if self.contracted[u as usize] {
                continue;
            }

            let mut moved = Vec::new();
            self.g.arcs_mut(u).retain(|(target, e)| {
                if *target == v && !e.is_informative() {
                    moved.push(*e);
                    false
                } else {
                    true
                }
            });

            for e in moved {
                self.g.arcs_mut(v).push((u, e.reversed()));
                self.referrers[u as usize].insert(v);
            }
        }

        let arcs = self.g.arcs_mut(v);
        for (_, e) in arcs.iter_mut().filter(|(_, e)| !e.is_informative()) {
            *e = e.with_band(HierarchyBand::ToHigher);
        }

        // Parallel arcs dominated by another arc to the same neighbour
        let redundant: Vec<usize> = arcs
            .iter()
            .enumerate()
            .filter(|(i, (n, e))| {
                !e.is_informative()
                    && arcs.iter().enumerate().any(|(j, (m, other))| {
                        j != *i && m == n && !other.is_informative() && overlaps(other, e)
                    })
            })
            .map(|(i, _)| i)
            .collect();

        for i in redundant {
            self.make_informative(v, i)?;
        }

        Ok(())
    }
}

/// Turns directed shortcuts into arcs. A pair of opposite shortcuts with
/// equal weight becomes a single arc usable in both directions.
fn merge_shortcuts(shortcuts: &[Shortcut], via: VertexId) -> Vec<(VertexId, VertexId, EdgeData)> {
    let weights: FxHashMap<(VertexId, VertexId), Weight> = shortcuts
        .iter()
        .map(|s| ((s.source, s.target), s.weight))
        .collect();

    let mut merged = FxHashSet::default();
    let mut arcs = Vec::with_capacity(shortcuts.len());
    for s in shortcuts {
        if merged.contains(&(s.source, s.target)) {
            continue;
        }

        let bidir = weights.get(&(s.target, s.source)) == Some(&s.weight);
        if bidir {
            merged.insert((s.target, s.source));
        }

        arcs.push((
            s.source,
            s.target,
            EdgeData::shortcut(s.weight, true, bidir, via),
        ));
    }
    arcs
}

#[cfg(test)]
mod tests {
    use crate::{
        edge,
        graph::{remove_informative, GraphStore},
        util::test_graphs::{generate_complex_graph, generate_simple_graph, line_graph},
        witness_search::NoWitness,
    };

    use super::*;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Traversable arcs between `a` and `b`, stored at either endpoint
    fn arcs_between(g: &ChGraph, a: VertexId, b: VertexId) -> Vec<EdgeData> {
        remove_informative(g.arcs(a))
            .into_iter()
            .filter(|(t, _)| *t == b)
            .map(|(_, e)| e)
            .chain(
                remove_informative(g.arcs(b))
                    .into_iter()
                    .filter(|(t, _)| *t == a)
                    .map(|(_, e)| e),
            )
            .collect()
    }

    fn assert_bands_match_ranks(overlay_graph: &OverlayGraph) {
        let g = overlay_graph.graph();
        for v in g.vertices() {
            for (n, e) in remove_informative(g.arcs(v)) {
                assert_eq!(
                    e.is_to_higher(),
                    overlay_graph.rank(n) > overlay_graph.rank(v),
                    "arc {v}->{n} {e}"
                );
                assert_eq!(
                    e.is_to_lower(),
                    overlay_graph.rank(n) < overlay_graph.rank(v),
                    "arc {v}->{n} {e}"
                );
            }
        }
    }

    #[test]
    fn contract_path_inserts_shortcut() {
        // A - B - C, contract B first
        init_log();
        let mut g = ChGraph::with_vertices(3);
        g.add_edges([edge!(1, 2, 1.0), edge!(2, 3, 1.0)]).unwrap();

        let overlay_graph = NodeContractor::new(g)
            .contract_only(ContractionStrategy::FixedOrder(&[2, 1, 3]))
            .unwrap();

        let shortcuts = arcs_between(overlay_graph.graph(), 1, 3);
        assert_eq!(shortcuts.len(), 1);
        let shortcut = shortcuts[0];
        assert_eq!(shortcut.contracted, 2);
        assert_eq!(shortcut.weight, 2.0);
        assert!(shortcut.forward());
        assert!(shortcut.backward());
        assert_eq!(overlay_graph.num_shortcuts(), 1);
        assert_bands_match_ranks(&overlay_graph);
    }

    #[test]
    fn one_way_path_inserts_one_way_shortcut() {
        // A -> B -> C
        let mut g = ChGraph::with_vertices(3);
        g.add_edges([edge!(1 => 2, 1.0), edge!(2 => 3, 1.0)]).unwrap();

        let overlay_graph = NodeContractor::new(g)
            .contract_only(ContractionStrategy::FixedOrder(&[2, 1, 3]))
            .unwrap();

        let g = overlay_graph.graph();
        let shortcut = g.arcs(1).iter().find(|(t, _)| *t == 3).unwrap().1;
        assert!(shortcut.forward());
        assert!(!shortcut.backward());
        assert!(shortcut.is_to_higher());
        assert!(g.arcs(3).iter().all(|(t, _)| *t != 1));
    }

    #[test]
    fn direct_edge_suppresses_shortcut() {
        // A - B - C with a direct edge A - C of weight 1.5
        for witness_search in [true, false] {
            let mut g = ChGraph::with_vertices(3);
            g.add_edges([edge!(1, 2, 1.0), edge!(2, 3, 1.0), edge!(1, 3, 1.5)])
                .unwrap();

            let strategy = ContractionStrategy::FixedOrder(&[2, 1, 3]);
            let overlay_graph = if witness_search {
                NodeContractor::new(g).contract_only(strategy).unwrap()
            } else {
                NodeContractor::with_witness(g, ContractionParams::default(), NoWitness)
                    .contract_only(strategy)
                    .unwrap()
            };

            let between = arcs_between(overlay_graph.graph(), 1, 3);
            assert_eq!(between.len(), 1);
            assert_eq!(between[0].weight, 1.5);
            assert!(!between[0].is_shortcut());
            assert_eq!(overlay_graph.num_shortcuts(), 0);
        }
    }

    #[test]
    fn overlapped_edge_becomes_informative() {
        // A - B - C with an expensive direct edge A - C
        let mut g = ChGraph::with_vertices(3);
        g.add_edges([
            edge!(1, 2, 1.0),
            edge!(2, 3, 1.0),
            (1, 3, EdgeData::new(5.0, true, true).tagged(7)),
        ])
        .unwrap();

        let overlay_graph = NodeContractor::new(g)
            .contract_only(ContractionStrategy::FixedOrder(&[2, 1, 3]))
            .unwrap();
        let g = overlay_graph.graph();

        let between = arcs_between(g, 1, 3);
        assert_eq!(between.len(), 1);
        assert!(between[0].is_shortcut());
        assert_eq!(between[0].weight, 2.0);

        let informative: Vec<_> = g
            .vertices()
            .flat_map(|v| g.arcs(v).iter().filter(|(_, e)| e.is_informative()).copied())
            .collect();
        assert_eq!(informative.len(), 1);
        assert_eq!(informative[0].0, 3);
        assert_eq!(informative[0].1.weight, 5.0);
        assert_eq!(informative[0].1.tags, 7);
        assert_eq!(overlay_graph.num_informative(), 1);
    }

    #[test]
    fn dominated_parallel_arcs_become_informative() {
        // Two arcs 1 -> 2, the cheaper one usable in both directions
        let mut g = ChGraph::with_vertices(2);
        g.add_edges([edge!(1, 2, 1.0), edge!(2 => 1, 3.0)]).unwrap();

        let overlay_graph = NodeContractor::new(g).run_with_order(&[1, 2]).unwrap();
        let g = overlay_graph.graph();

        assert_eq!(remove_informative(g.arcs(1)).len(), 1);
        assert_eq!(overlay_graph.num_informative(), 1);
    }

    #[test]
    fn contract_simple_graph_with_order() {
        //           B
        //           |
        // E -> A -> C
        //      |  /
        //      D
        init_log();
        let g = generate_simple_graph().unwrap();

        // A,E,D,C,B
        let node_order = vec![1, 5, 4, 3, 2];

        let overlay_graph = NodeContractor::new(g).run_with_order(&node_order).unwrap();

        assert_eq!(2, overlay_graph.num_shortcuts());
        assert_bands_match_ranks(&overlay_graph);
    }

    #[test]
    // https://jlazarsfeld.github.io/ch.150.project/sections/8-contraction/
    fn contract_complex_graph_with_order() {
        let g = generate_complex_graph().unwrap();

        // [B, E, I, K, D, G, C, J, H, F, A]
        let node_order = vec![2, 5, 9, 11, 4, 7, 3, 10, 8, 6, 1];

        let overlay_graph = NodeContractor::new(g).run_with_order(&node_order).unwrap();

        // A - J via K, A - H via J, A - F via H, all usable in both directions
        assert_eq!(3, overlay_graph.num_shortcuts());
        assert_bands_match_ranks(&overlay_graph);
    }

    #[test]
    fn contract_complex_graph_with_optimal_order() {
        let g = generate_complex_graph().unwrap();

        // [D, I, F, G, E, B, C, A, K, H, J]
        let node_order = vec![4, 9, 6, 7, 5, 2, 3, 1, 11, 8, 10];

        let overlay_graph = NodeContractor::new(g).run_with_order(&node_order).unwrap();

        assert_eq!(0, overlay_graph.num_shortcuts());
    }

    #[test]
    fn contract_complex_graph() {
        init_log();
        let g = generate_complex_graph().unwrap();

        let overlay_graph = NodeContractor::new(g).run().unwrap();

        let mut ranks: Vec<u32> = overlay_graph.graph().vertices().map(|v| overlay_graph.rank(v)).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=11).collect::<Vec<_>>());
        assert_bands_match_ranks(&overlay_graph);
    }

    #[test]
    fn contract_sequential_and_parallel_ordering_agree() {
        let params = ContractionParams::new().parallel_ordering(false);
        let sequential = NodeContractor::new_with_params(line_graph(8, false).unwrap(), params)
            .run()
            .unwrap();
        let parallel = NodeContractor::new(line_graph(8, false).unwrap()).run().unwrap();

        assert_eq!(sequential.ranks(), parallel.ranks());
        assert_eq!(sequential.num_shortcuts(), parallel.num_shortcuts());
    }

    #[test]
    fn contract_with_update_strategies() {
        for update in [
            UpdateStrategy::new(),
            UpdateStrategy::new().set_update_jit(false),
            UpdateStrategy::new().set_update_local(false),
        ] {
            let g = generate_complex_graph().unwrap();
            let overlay_graph = NodeContractor::new(g)
                .run_with_strategy(ContractionStrategy::LazyUpdate(update))
                .unwrap();
            assert_bands_match_ranks(&overlay_graph);
        }
    }

    #[test]
    fn reject_invalid_order() {
        let g = generate_simple_graph().unwrap();
        assert!(matches!(
            NodeContractor::new(g.clone()).run_with_order(&[1, 2, 3]),
            Err(ChError::InvalidState(_))
        ));
        assert!(matches!(
            NodeContractor::new(g.clone()).run_with_order(&[1, 2, 3, 4, 4]),
            Err(ChError::InvalidState(_))
        ));
        assert!(matches!(
            NodeContractor::new(g).run_with_order(&[1, 2, 3, 4, 6]),
            Err(ChError::UnknownVertex(6))
        ));
    }

    #[test]
    fn reject_ranked_input() {
        let mut g = ChGraph::with_vertices(2);
        g.add_arc(1, 2, EdgeData::with_rank(1.0, true, true, true))
            .unwrap();

        assert!(matches!(
            NodeContractor::new(g).run(),
            Err(ChError::MalformedGraph(_))
        ));
    }

    #[test]
    fn disconnect_node() {
        let mut g = ChGraph::with_vertices(4);
        let (a, b, c, u) = (1, 2, 3, 4);

        g.add_edges([
            edge!(a => u, 1.0),
            edge!(u => c, 1.0),
            edge!(c => b, 1.0),
            edge!(u => b, 1.0),
        ])
        .unwrap();

        let mut contractor = NodeContractor::new(g);
        contractor.disconnect_node(u).unwrap();

        // a -> u was moved to u
        assert!(contractor.g.arcs(a).is_empty());
        assert_eq!(contractor.g.arcs(u).len(), 3);
        assert!(contractor.g.arcs(u).iter().all(|(_, e)| e.is_to_higher()));

        let (_, moved) = contractor.g.arcs(u).iter().find(|(t, _)| *t == a).unwrap();
        assert!(!moved.forward());
        assert!(moved.backward());

        let view = contractor.view();
        assert!(view.links(a).is_empty());
        assert_eq!(view.links(b).len(), 1);
        assert_eq!(view.links(c).len(), 1);
    }
}
