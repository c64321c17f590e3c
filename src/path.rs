use crate::dijkstra::{Predecessor, PredecessorMap};
use crate::graph::NodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Nodes from the start node to the target, both included.
    Path(Vec<NodeId>),
    Unreachable,
}

impl Route {
    pub fn nodes(&self) -> Option<&[NodeId]> {
        match self {
            Route::Path(nodes) => Some(nodes),
            Route::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Route::Path(_))
    }
}

/// Walks predecessor links back from `target`. A walk that does not end at the root
/// yields `Route::Unreachable`, never a partial route.
pub fn reconstruct(predecessors: &PredecessorMap, target: NodeId) -> Route {
    let mut path = vec![target];
    let mut cur = target;
    loop {
        match predecessors.get(cur) {
            Some(Predecessor::Root) => break,
            Some(Predecessor::Via(prev)) => {
                // A chain longer than the map can only be a cycle.
                if path.len() > predecessors.len() {
                    return Route::Unreachable;
                }
                path.push(prev);
                cur = prev;
            }
            None => return Route::Unreachable,
        }
    }
    path.reverse();
    Route::Path(path)
}
