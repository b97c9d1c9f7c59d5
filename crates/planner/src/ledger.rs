//! Shared coverage ledger.
//!
//! Tracks which `(target, turn)` pairs earlier balloons already claimed and, for
//! every node that covers at least one target, how many of its targets are still
//! unclaimed at each turn. Claiming a pair walks the target's covering nodes and
//! decrements their per-turn credit.

use strato_coverage::TargetId;

use crate::graph::{NodeId, StateGraph};

const NO_ROW: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub struct CoverageLedger {
    turns: usize,
    claimed: Vec<bool>,
    covering_nodes: Vec<Vec<NodeId>>,
    credit_row: Vec<u32>,
    credits: Vec<u32>,
}

impl CoverageLedger {
    pub fn new(graph: &StateGraph, target_count: usize, turns: usize) -> Self {
        let mut covering_nodes = vec![Vec::new(); target_count];
        let mut credit_row = vec![NO_ROW; graph.len()];
        let mut credits = Vec::new();
        let mut rows = 0u32;
        for (id, node) in graph.nodes().iter().enumerate() {
            if node.covers.is_empty() {
                continue;
            }
            for &target in &node.covers {
                covering_nodes[target].push(id);
            }
            credit_row[id] = rows;
            rows += 1;
            credits.extend(std::iter::repeat_n(node.covers.len() as u32, turns));
        }
        Self {
            turns,
            claimed: vec![false; target_count * turns],
            covering_nodes,
            credit_row,
            credits,
        }
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Unclaimed targets covered by `node` at `turn`.
    pub fn credit(&self, node: NodeId, turn: usize) -> u32 {
        match self.credit_row.get(node) {
            Some(&row) if row != NO_ROW && turn < self.turns => {
                self.credits[row as usize * self.turns + turn]
            }
            _ => 0,
        }
    }

    pub fn is_claimed(&self, target: TargetId, turn: usize) -> bool {
        self.claimed
            .get(target * self.turns + turn)
            .copied()
            .unwrap_or(false)
    }

    /// Claim one pair. Returns `true` if it was still unclaimed.
    pub fn claim(&mut self, target: TargetId, turn: usize) -> bool {
        if turn >= self.turns || target >= self.covering_nodes.len() {
            return false;
        }
        let slot = target * self.turns + turn;
        if self.claimed[slot] {
            return false;
        }
        self.claimed[slot] = true;
        for &node in &self.covering_nodes[target] {
            let row = self.credit_row[node] as usize;
            let credit = &mut self.credits[row * self.turns + turn];
            *credit = credit.saturating_sub(1);
        }
        true
    }

    /// Claim everything a balloon covers along `path` (`path[t]` is its node at turn `t`).
    /// Returns the number of newly claimed pairs.
    pub fn claim_path(&mut self, graph: &StateGraph, path: &[NodeId]) -> usize {
        let mut fresh = 0;
        for (turn, &node) in path.iter().enumerate() {
            for &target in &graph.node(node).covers {
                if self.claim(target, turn) {
                    fresh += 1;
                }
            }
        }
        fresh
    }
}
