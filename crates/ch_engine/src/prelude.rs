//! Re-exports of the most commonly used items in `ch_engine`.
pub use crate::cancel::CancelToken;
pub use crate::constants::{VertexId, Weight};
pub use crate::contraction_params::{ContractionParams, PriorityParams};
pub use crate::contraction_strategy::{ContractionStrategy, UpdateStrategy};
pub use crate::edge_data::EdgeData;
pub use crate::error::{ChError, Result};
pub use crate::graph::{ChGraph, GraphStore};
pub use crate::node_contraction::NodeContractor;
pub use crate::overlay_graph::OverlayGraph;

pub use crate::search;
pub use crate::search::ch_search::CHSearch;
pub use crate::search::shortest_path::ShortestPath;
