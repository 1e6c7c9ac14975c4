//! Error kinds reported by preprocessing, persistence and queries.
//!
//! A query that finds no route is not an error, searches return `Ok(None)`.
use thiserror::Error;

use crate::constants::VertexId;

pub type Result<T, E = ChError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChError {
    /// An operation was applied to a value in a state that does not allow it,
    /// e.g. converting an already informative edge.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The graph violates a structural invariant. Preprocessing must abort,
    /// a corrupt hierarchy yields wrong shortest paths without any symptom.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    #[error("vertex {0} does not exist")]
    UnknownVertex(VertexId),

    /// The caller abandoned the running operation.
    #[error("operation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not parse csv input")]
    Csv(#[from] csv::Error),

    #[error("could not encode hierarchy")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("could not decode hierarchy")]
    Decode(#[from] bincode::error::DecodeError),
}
