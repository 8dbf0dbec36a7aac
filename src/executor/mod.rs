//! Step-driven executor operators
//!
//! Operators are ticked one at a time by an outer controller; each tick is
//! an `async fn execute` that runs to completion (no internal suspension)
//! and resolves to a [`Status`]. The variable table is the only channel
//! between operators: tick k+1 observes every write made by tick k.
//!
//! - [`logic`] — Start, Select, and the bounded Loop controller
//! - [`bfs`] — the bidirectional BFS shortest-path operator

pub mod bfs;
pub mod logic;

pub use bfs::{BfsOptions, BfsShortestPathOperator};
pub use logic::{LoopOperator, SelectOperator, StartOperator};

use crate::context::ExecutionContext;
use crate::error::Result;

/// Outcome of one operator tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The operator expects to be ticked again
    Running,
    /// The operator is done; further ticks are no-ops
    Finished,
}

/// Tagged union over the executor's operator kinds
#[derive(Debug)]
pub enum Operator {
    Start(StartOperator),
    Select(SelectOperator),
    Loop(LoopOperator),
    BfsShortestPath(Box<BfsShortestPathOperator>),
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Start(_) => "start",
            Operator::Select(_) => "select",
            Operator::Loop(_) => "loop",
            Operator::BfsShortestPath(_) => "bfs_shortest_path",
        }
    }

    /// Run one tick of the wrapped operator
    pub async fn execute(&mut self, ctx: &mut ExecutionContext) -> Result<Status> {
        match self {
            Operator::Start(op) => op.execute(ctx).await,
            Operator::Select(op) => op.execute(ctx).await,
            Operator::Loop(op) => op.execute(ctx).await,
            Operator::BfsShortestPath(op) => op.execute(ctx).await,
        }
    }
}
