//! Dynamic single-source shortest paths over a directed graph whose edge weights
//! change between queries, plus a nearest-destination query that returns the closest
//! of several candidate nodes together with its route.
//!
//! [`Router`] is the entry point for shared use: it owns the graph, applies weight
//! updates and answers [`Router::query_best_route`] against a consistent snapshot.
//! The lower-level pieces ([`compute_shortest_paths`], [`reconstruct`],
//! [`select_best`]) work directly on a [`Graph`].

pub mod dijkstra;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod path;
pub mod router;
pub mod select;

pub use dijkstra::{
    compute_shortest_paths, compute_shortest_paths_with, Cancellation, DistanceMap, Predecessor,
    PredecessorMap, QueryOptions, ShortestPaths, UNREACHABLE,
};
pub use error::{Result, RouteError};
pub use frontier::{Frontier, TieBreak};
pub use graph::{Cost, Edge, Graph, NodeId};
pub use path::{reconstruct, Route};
pub use router::{CandidateDistance, QueryReport, Router};
pub use select::{best_route, select_best, BestRoute};
