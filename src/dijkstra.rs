use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use fnv::FnvHashMap;
use tracing::debug;

use crate::error::{Result, RouteError};
use crate::frontier::{Frontier, TieBreak};
use crate::graph::{Cost, Graph, NodeId};

/// Distance of a node the search never reached.
pub const UNREACHABLE: Cost = f64::INFINITY;

/// Best known distance from the start node. Unknown nodes read as `UNREACHABLE`.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMap {
    start: NodeId,
    costs: FnvHashMap<NodeId, Cost>,
}

impl DistanceMap {
    /// The node every distance is measured from.
    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn get(&self, node: NodeId) -> Cost {
        self.costs.get(&node).copied().unwrap_or(UNREACHABLE)
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.get(node).is_finite()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        self.costs.iter().map(|(&node, &cost)| (node, cost))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Predecessor {
    /// The start node of the search.
    Root,
    Via(NodeId),
}

/// Predecessor on a shortest path. Holds an entry exactly for the reached nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredecessorMap(FnvHashMap<NodeId, Predecessor>);

impl PredecessorMap {
    pub fn get(&self, node: NodeId) -> Option<Predecessor> {
        self.0.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of one search. Only valid for the edge weights the graph had when it ran.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    pub start: NodeId,
    pub distances: DistanceMap,
    pub predecessors: PredecessorMap,
}

/// Stops a search early once a deadline passes or a shared flag is raised.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    deadline: Option<Instant>,
    flag: Option<Arc<AtomicBool>>,
}

impl Cancellation {
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
            || self
                .flag
                .as_ref()
                .is_some_and(|f| f.load(Ordering::Relaxed))
    }
}

#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    pub tie_break: TieBreak,
    pub cancellation: Option<Cancellation>,
}

pub fn compute_shortest_paths(graph: &Graph, start: NodeId) -> ShortestPaths {
    // Without a cancellation there is no failure path.
    match compute_shortest_paths_with(graph, start, &QueryOptions::default()) {
        Ok(paths) => paths,
        Err(_) => unreachable!("search without cancellation cannot fail"),
    }
}

/// Dijkstra with lazy deletion from `start` to every node. A `start` missing from the
/// graph is not an error: it just reaches nothing but itself.
pub fn compute_shortest_paths_with(
    graph: &Graph,
    start: NodeId,
    opts: &QueryOptions,
) -> Result<ShortestPaths> {
    let mut dist: FnvHashMap<NodeId, Cost> = FnvHashMap::default();
    dist.reserve(graph.node_count() + 1);
    for node in graph.nodes() {
        dist.insert(node, UNREACHABLE);
    }
    let mut pred: FnvHashMap<NodeId, Predecessor> = FnvHashMap::default();
    let mut frontier = Frontier::new(opts.tie_break);

    dist.insert(start, 0.0);
    pred.insert(start, Predecessor::Root);
    frontier.push(start, 0.0);

    let mut pops = 0usize;
    let mut stale = 0usize;
    while !frontier.is_empty() {
        if let Some(cancel) = &opts.cancellation {
            if cancel.is_cancelled() {
                debug!(start, pops, "search cancelled");
                return Err(RouteError::Cancelled { start });
            }
        }

        let (node_id, cost) = frontier.pop_min()?;
        pops += 1;
        if cost > dist[&node_id] {
            stale += 1;
            continue;
        }
        for edge in graph.neighbors(node_id) {
            let next_cost = cost + edge.weight;
            let best = dist.entry(edge.target).or_insert(UNREACHABLE);
            if next_cost < *best {
                *best = next_cost;
                pred.insert(edge.target, Predecessor::Via(node_id));
                frontier.push(edge.target, next_cost);
            }
        }
    }

    debug!(
        start,
        nodes = graph.node_count(),
        reached = pred.len(),
        pushes = frontier.pushes(),
        pops,
        stale,
        "shortest paths computed"
    );

    Ok(ShortestPaths {
        start,
        distances: DistanceMap { start, costs: dist },
        predecessors: PredecessorMap(pred),
    })
}
