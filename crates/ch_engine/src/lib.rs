//! Crate to build and query contraction hierarchies on road graphs.
//!
//! # Basic usage
//! ```
//! use ch_engine::prelude::*;
//!
//! // A <-> B <-> C
//! let mut g = ChGraph::with_vertices(3);
//! g.add_edges([ch_engine::edge!(1, 2, 1.0), ch_engine::edge!(2, 3, 1.0)])
//!     .expect("valid arcs");
//!
//! // Contract all vertices and add the downward arcs needed for unpacking
//! let overlay_graph = NodeContractor::new(g).run().expect("contraction failed");
//!
//! // Search
//! let mut ch = CHSearch::new(&overlay_graph);
//! let shortest_path = ch.search(1, 3).expect("search failed").expect("no path");
//! assert_eq!(shortest_path.nodes, vec![1, 2, 3]);
//! println!("Costs: {}", shortest_path.weight);
//!```
//! [`ChGraph`]: crate::graph::ChGraph
pub mod cancel;
pub mod constants;
pub mod contraction_params;
pub mod contraction_strategy;
pub mod downward;
pub mod edge_data;
pub mod error;
pub mod graph;
pub mod node_contraction;
pub mod overlap;
pub mod overlay_graph;
pub mod persist;
pub mod prelude;
pub mod search;
pub mod statistics;
pub mod tags;
pub mod util;
pub mod witness_search;
