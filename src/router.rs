/*
Shared routing handle: one mutable graph, many concurrent queries.

Queries run against a snapshot. The graph lives behind an Arc; a query clones the Arc
under a short read lock and then searches without holding any lock. A weight update
takes the write lock and goes through Arc::make_mut, which copies the graph only when
some query still holds the previous snapshot. A query therefore sees every edge at
either its pre-update or its post-update weight, never a mix.
*/

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::dijkstra::{compute_shortest_paths_with, QueryOptions};
use crate::error::Result;
use crate::graph::{Cost, Graph, NodeId};
use crate::select::{best_route, BestRoute};

#[derive(Clone, Debug, PartialEq)]
pub struct CandidateDistance {
    pub node: NodeId,
    /// `UNREACHABLE` when there is no path.
    pub distance: Cost,
}

/// A best-route answer plus every candidate's distance, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryReport {
    /// Graph revision the answer was computed against.
    pub revision: u64,
    pub candidates: Vec<CandidateDistance>,
    pub best: BestRoute,
}

#[derive(Debug)]
struct Versioned {
    graph: Arc<Graph>,
    revision: u64,
}

#[derive(Debug)]
pub struct Router {
    state: RwLock<Versioned>,
}

impl Router {
    pub fn new(graph: Graph) -> Self {
        Self {
            state: RwLock::new(Versioned {
                graph: Arc::new(graph),
                revision: 0,
            }),
        }
    }

    /// Bulk constructor from `(source, target, weight)` triples.
    pub fn build<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Cost)>,
    {
        let graph = Graph::from_edges(edges)?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(Self::new(graph))
    }

    /// Applies a traffic update. Results from earlier queries describe the old weights.
    pub fn update_edge_weight(&self, source: NodeId, target: NodeId, weight: Cost) -> Result<()> {
        let mut state = self.state.write();
        // Validate first so a rejected update never copies a shared graph.
        state.graph.check_update(source, target, weight)?;
        Arc::make_mut(&mut state.graph).update_weight(source, target, weight)?;
        state.revision += 1;
        Ok(())
    }

    /// Current graph and its revision. The snapshot is immutable.
    pub fn snapshot(&self) -> (Arc<Graph>, u64) {
        let state = self.state.read();
        (Arc::clone(&state.graph), state.revision)
    }

    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    pub fn query_best_route(&self, start: NodeId, candidates: &[NodeId]) -> Result<BestRoute> {
        Ok(self
            .query_report_with(start, candidates, &QueryOptions::default())?
            .best)
    }

    pub fn query_report(&self, start: NodeId, candidates: &[NodeId]) -> Result<QueryReport> {
        self.query_report_with(start, candidates, &QueryOptions::default())
    }

    pub fn query_report_with(
        &self,
        start: NodeId,
        candidates: &[NodeId],
        opts: &QueryOptions,
    ) -> Result<QueryReport> {
        let (graph, revision) = self.snapshot();
        let paths = compute_shortest_paths_with(&graph, start, opts)?;
        let best = best_route(&paths, candidates)?;
        let candidates = candidates
            .iter()
            .map(|&node| CandidateDistance {
                node,
                distance: paths.distances.get(node),
            })
            .collect();
        Ok(QueryReport {
            revision,
            candidates,
            best,
        })
    }
}
