//! Time-expanded state graph.
//!
//! One node per airborne `(col, row, altitude)`, one launch node for the grounded
//! balloon at the starting cell, and one absorbing sink for balloons that drifted
//! out of the latitude band. Node ids are dense: airborne states come first in
//! altitude, row, column order, followed by launch and sink.

use smallvec::SmallVec;
use strato_core::constants::LAUNCH_ALTITUDE;
use strato_core::{Grid, Instruction, Position, valid_instructions};
use strato_coverage::TargetId;
use strato_sim::{BalloonState, Problem, ScoringContext, Simulator};

use crate::PlannerError;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Launch,
    Aloft { position: Position, altitude: i32 },
    Sink,
}

/// Transition taken by issuing `instruction` from the owning node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub instruction: Instruction,
    pub target: NodeId,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Targets inside the sensing circle, ascending.
    pub covers: Vec<TargetId>,
    pub edges: SmallVec<[Edge; 3]>,
}

#[derive(Debug, Clone)]
pub struct StateGraph {
    grid: Grid,
    start: Position,
    nodes: Vec<Node>,
}

impl StateGraph {
    /// Build every node and resolve its successors through the simulator.
    pub fn build(problem: &Problem, ctx: &ScoringContext) -> Result<Self, PlannerError> {
        let grid = problem.grid;
        let airborne = grid.cell_count() * grid.max_altitude as usize;
        let mut graph = StateGraph {
            grid,
            start: problem.start,
            nodes: Vec::with_capacity(airborne + 2),
        };
        let sim = Simulator::new(&problem.wind);

        for altitude in 1..=grid.max_altitude {
            for position in grid.cells() {
                let state = BalloonState::aloft(position, altitude);
                let node = Node {
                    kind: NodeKind::Aloft { position, altitude },
                    covers: ctx.coverage.covered_targets(position, &ctx.targets)?,
                    edges: graph.successors(&sim, &state)?,
                };
                graph.nodes.push(node);
            }
        }

        let launch = BalloonState::launch(problem.start);
        let launch_node = Node {
            kind: NodeKind::Launch,
            covers: ctx.coverage.covered_targets(problem.start, &ctx.targets)?,
            edges: graph.successors(&sim, &launch)?,
        };
        graph.nodes.push(launch_node);

        let sink = graph.sink();
        graph.nodes.push(Node {
            kind: NodeKind::Sink,
            covers: Vec::new(),
            edges: SmallVec::from_slice(&[Edge {
                instruction: Instruction::Hold,
                target: sink,
            }]),
        });

        log::debug!(
            "state graph built: {} nodes, {} edges",
            graph.nodes.len(),
            graph.nodes.iter().map(|n| n.edges.len()).sum::<usize>()
        );
        Ok(graph)
    }

    fn successors(
        &self,
        sim: &Simulator<'_>,
        state: &BalloonState,
    ) -> Result<SmallVec<[Edge; 3]>, PlannerError> {
        let mut edges = SmallVec::new();
        for instruction in valid_instructions(state.altitude, self.grid.max_altitude) {
            let next = sim.advance(state, instruction)?;
            let target = self.node_for_state(&next).ok_or(PlannerError::UnmappedState {
                col: next.position.col,
                row: next.position.row,
                altitude: next.altitude,
            })?;
            edges.push(Edge {
                instruction,
                target,
            });
        }
        Ok(edges)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn launch(&self) -> NodeId {
        self.grid.cell_count() * self.grid.max_altitude as usize
    }

    pub fn sink(&self) -> NodeId {
        self.launch() + 1
    }

    /// Id of an airborne state, if it lies inside the grid.
    pub fn aloft_id(&self, position: Position, altitude: i32) -> Option<NodeId> {
        if !(1..=self.grid.max_altitude).contains(&altitude) {
            return None;
        }
        let cell = self.grid.cell_index(position)?;
        Some((altitude as usize - 1) * self.grid.cell_count() + cell)
    }

    /// Node representing a simulator state. Grounded balloons only map to the
    /// launch node at the starting cell.
    pub fn node_for_state(&self, state: &BalloonState) -> Option<NodeId> {
        if !state.is_live() {
            return Some(self.sink());
        }
        if state.altitude == LAUNCH_ALTITUDE {
            return (state.position == self.start).then(|| self.launch());
        }
        self.aloft_id(state.position, state.altitude)
    }
}
