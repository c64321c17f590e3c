/*
Min-priority frontier of (node, candidate distance) entries for lazy-deletion Dijkstra.

There is no decrease-key: a node that gets a better distance is simply pushed again and
the older entry goes stale. The engine drops stale entries when they are popped.

Entries are stored in an arena; the heap only holds arena indices keyed by
(distance, sequence). The sequence number comes from the TieBreak policy so equal
distances always pop in the same order.
*/

use orx_priority_queue::*;
use ordered_float::OrderedFloat;

use crate::error::{Result, RouteError};
use crate::graph::{Cost, NodeId};

/// Order among entries with equal distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Earlier pushes pop first.
    #[default]
    Fifo,
    /// Later pushes pop first.
    Lifo,
}

impl TieBreak {
    fn sequence(self, pushed: u64) -> u64 {
        match self {
            TieBreak::Fifo => pushed,
            TieBreak::Lifo => u64::MAX - pushed,
        }
    }
}

type Key = (OrderedFloat<Cost>, u64);

#[derive(Debug)]
pub struct Frontier {
    tie_break: TieBreak,
    entries: Vec<(NodeId, Cost)>,
    heap: BinaryHeap<usize, Key>,
}

impl Frontier {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            entries: Vec::new(),
            heap: BinaryHeap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes since creation, stale ones included.
    pub fn pushes(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, node: NodeId, distance: Cost) {
        let slot = self.entries.len();
        let seq = self.tie_break.sequence(slot as u64);
        self.entries.push((node, distance));
        self.heap.push(slot, (OrderedFloat(distance), seq));
    }

    pub fn pop_min(&mut self) -> Result<(NodeId, Cost)> {
        let (slot, _) = self.heap.pop().ok_or(RouteError::FrontierEmpty)?;
        Ok(self.entries[slot])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_distance_order() {
        let mut frontier = Frontier::new(TieBreak::Fifo);
        frontier.push(0, 10.0);
        frontier.push(3, 5.0);
        frontier.push(2, 7.5);
        frontier.push(4, 8.0);
        frontier.push(4, 2.5);
        assert_eq!(frontier.len(), 5);

        let popped: Vec<(NodeId, Cost)> = (0..5).map(|_| frontier.pop_min().unwrap()).collect();
        assert_eq!(
            popped,
            vec![(4, 2.5), (3, 5.0), (2, 7.5), (4, 8.0), (0, 10.0)]
        );
        assert!(frontier.is_empty());
        assert_eq!(frontier.pushes(), 5);
    }

    #[test]
    fn ties_follow_policy() {
        let mut fifo = Frontier::new(TieBreak::Fifo);
        let mut lifo = Frontier::new(TieBreak::Lifo);
        for node in [7, 3, 9] {
            fifo.push(node, 1.0);
            lifo.push(node, 1.0);
        }
        let fifo_order: Vec<NodeId> = (0..3).map(|_| fifo.pop_min().unwrap().0).collect();
        let lifo_order: Vec<NodeId> = (0..3).map(|_| lifo.pop_min().unwrap().0).collect();
        assert_eq!(fifo_order, vec![7, 3, 9]);
        assert_eq!(lifo_order, vec![9, 3, 7]);
    }

    #[test]
    fn empty_pop_is_an_error() {
        let mut frontier = Frontier::new(TieBreak::default());
        assert_eq!(frontier.pop_min(), Err(RouteError::FrontierEmpty));
        frontier.push(1, 0.0);
        assert_eq!(frontier.pop_min(), Ok((1, 0.0)));
        assert_eq!(frontier.pop_min(), Err(RouteError::FrontierEmpty));
    }
}
