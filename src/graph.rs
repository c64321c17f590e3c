/*
Directed road graph with mutable, non-negative edge weights.

Each node owns its outgoing edges in insertion order. An edge is identified by its
(source, target) pair, so adding an edge that already exists overwrites its weight.

The graph does not track staleness. Any ShortestPaths computed before a call to
add_edge or update_weight describes the old weights and must be recomputed; callers
that share a graph across threads should go through Router, which hands out snapshots.
*/

use hashbrown::HashMap;
use tracing::info;

use crate::error::{Result, RouteError};

pub type NodeId = usize;
pub type Cost = f64;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: Cost,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    adj: HashMap<NodeId, Vec<Edge>>,
    // Node ids in the order they were first seen.
    order: Vec<NodeId>,
    edge_count: usize,
}

fn check_weight(from: NodeId, to: NodeId, weight: Cost) -> Result<()> {
    // NaN fails the comparison too.
    if weight >= 0.0 {
        Ok(())
    } else {
        Err(RouteError::InvalidEdge { from, to, weight })
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(source, target, weight)` triples, failing on the first bad weight.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Cost)>,
    {
        let mut graph = Self::new();
        for (u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    pub fn add_node(&mut self, node: NodeId) {
        if !self.adj.contains_key(&node) {
            self.adj.insert(node, Vec::new());
            self.order.push(node);
        }
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: Cost) -> Result<()> {
        check_weight(source, target, weight)?;
        self.add_node(source);
        self.add_node(target);

        let edges = self.adj.entry(source).or_default();
        match edges.iter_mut().find(|e| e.target == target) {
            Some(edge) => edge.weight = weight,
            None => {
                edges.push(Edge { target, weight });
                self.edge_count += 1;
            }
        }
        Ok(())
    }

    /// Adds both directions of a two-way road with the same travel cost.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, weight: Cost) -> Result<()> {
        check_weight(a, b, weight)?;
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Fails exactly when `update_weight` with the same arguments would.
    pub fn check_update(&self, source: NodeId, target: NodeId, weight: Cost) -> Result<()> {
        if self.weight(source, target).is_none() {
            return Err(RouteError::EdgeNotFound {
                from: source,
                to: target,
            });
        }
        check_weight(source, target, weight)
    }

    /// Changes the weight of an existing directed edge. On error the graph is unchanged.
    pub fn update_weight(&mut self, source: NodeId, target: NodeId, weight: Cost) -> Result<()> {
        self.check_update(source, target, weight)?;
        if let Some(edge) = self
            .adj
            .get_mut(&source)
            .and_then(|edges| edges.iter_mut().find(|e| e.target == target))
        {
            info!(source, target, old = edge.weight, new = weight, "edge weight updated");
            edge.weight = weight;
        }
        Ok(())
    }

    /// Outgoing edges of `node`. Unknown nodes and dead ends both give an empty iterator.
    pub fn neighbors(&self, node: NodeId) -> std::slice::Iter<'_, Edge> {
        self.adj.get(&node).map(Vec::as_slice).unwrap_or(&[]).iter()
    }

    pub fn weight(&self, source: NodeId, target: NodeId) -> Option<Cost> {
        self.neighbors(source)
            .find(|e| e.target == target)
            .map(|e| e.weight)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adj.contains_key(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
