use thiserror::Error;

use crate::graph::{Cost, NodeId};

pub type Result<T> = std::result::Result<T, RouteError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Weight was negative or NaN. Nothing is clamped.
    #[error("invalid edge {from} -> {to}: weight {weight} must be a non-negative number")]
    InvalidEdge {
        from: NodeId,
        to: NodeId,
        weight: Cost,
    },

    #[error("no edge {from} -> {to} in the graph")]
    EdgeNotFound { from: NodeId, to: NodeId },

    /// Only reachable by popping an empty frontier directly; the engine checks first.
    #[error("pop from an empty frontier")]
    FrontierEmpty,

    #[error("none of the candidates {candidates:?} is reachable from node {start}")]
    NoReachableDestination {
        start: NodeId,
        candidates: Vec<NodeId>,
    },

    #[error("shortest path search from node {start} was cancelled")]
    Cancelled { start: NodeId },
}
