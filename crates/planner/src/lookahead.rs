//! Bounded-depth memoized value function over the state graph.
//!
//! `value(node, turn)` is the node's unclaimed credit at `turn` plus the best
//! child value at `turn + 1`, and zero once `turn` reaches the window end. Values
//! are cached per node and remaining depth in one flat table; the table must be
//! reset whenever the ledger changes.

use crate::graph::{NodeId, StateGraph};
use crate::ledger::CoverageLedger;

/// Per-turn credit of the sink node.
pub const SINK_PENALTY: i64 = -1000;

const UNSET: i64 = i64::MIN;

#[derive(Debug, Clone)]
pub struct LookaheadScorer {
    depth: usize,
    memo: Vec<i64>,
}

impl LookaheadScorer {
    pub fn new(node_count: usize, depth: usize) -> Self {
        Self {
            depth,
            memo: vec![UNSET; node_count * depth],
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Exclusive end of the window opened at `turn`.
    pub fn window_end(&self, turn: usize, turns: usize) -> usize {
        turn.saturating_add(self.depth).min(turns)
    }

    /// Drop every cached value.
    pub fn reset(&mut self) {
        self.memo.fill(UNSET);
    }

    /// Best total credit reachable from `node` over turns `turn..end`.
    pub fn value(
        &mut self,
        graph: &StateGraph,
        ledger: &CoverageLedger,
        node: NodeId,
        turn: usize,
        end: usize,
    ) -> i64 {
        if turn >= end {
            return 0;
        }
        let remaining = end - turn;
        let slot = (remaining <= self.depth).then(|| node * self.depth + remaining - 1);
        if let Some(slot) = slot {
            if self.memo[slot] != UNSET {
                return self.memo[slot];
            }
        }

        let credit = if node == graph.sink() {
            SINK_PENALTY
        } else {
            i64::from(ledger.credit(node, turn))
        };
        let mut best: Option<i64> = None;
        for edge in &graph.node(node).edges {
            let child = self.value(graph, ledger, edge.target, turn + 1, end);
            best = Some(best.map_or(child, |b| b.max(child)));
        }
        let total = credit + best.unwrap_or(0);

        if let Some(slot) = slot {
            self.memo[slot] = total;
        }
        total
    }
}
