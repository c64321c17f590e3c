use tracing::warn;

use crate::dijkstra::{DistanceMap, ShortestPaths};
use crate::error::{Result, RouteError};
use crate::graph::{Cost, NodeId};
use crate::path::{reconstruct, Route};

/// Nearest destination among a candidate list, with the route to reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct BestRoute {
    pub best_node: NodeId,
    pub total_distance: Cost,
    pub route: Vec<NodeId>,
}

/// Picks the candidate with the smallest finite distance. On a tie the candidate that
/// comes first in `candidates` wins.
pub fn select_best(distances: &DistanceMap, candidates: &[NodeId]) -> Result<(NodeId, Cost)> {
    let mut best: Option<(NodeId, Cost)> = None;
    for &node in candidates {
        let cost = distances.get(node);
        if !cost.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((node, cost));
        }
    }

    best.ok_or_else(|| {
        warn!(start = distances.start(), ?candidates, "no reachable destination");
        RouteError::NoReachableDestination {
            start: distances.start(),
            candidates: candidates.to_vec(),
        }
    })
}

/// Selects the nearest candidate and reconstructs the route to it.
pub fn best_route(paths: &ShortestPaths, candidates: &[NodeId]) -> Result<BestRoute> {
    let (best_node, total_distance) = select_best(&paths.distances, candidates)?;
    match reconstruct(&paths.predecessors, best_node) {
        Route::Path(route) => Ok(BestRoute {
            best_node,
            total_distance,
            route,
        }),
        // A finite distance always comes with a predecessor chain.
        Route::Unreachable => Err(RouteError::NoReachableDestination {
            start: paths.start,
            candidates: candidates.to_vec(),
        }),
    }
}
