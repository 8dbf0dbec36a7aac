//! Logic operators: Start, Select, and the bounded Loop controller

use tracing::debug;

use super::Status;
use crate::context::ExecutionContext;
use crate::error::{PathloomError, Result};
use crate::expr::Expr;
use crate::value::Value;

/// Plan leaf. Ticking it does nothing and reports `Finished`.
#[derive(Debug, Default)]
pub struct StartOperator;

impl StartOperator {
    pub fn new() -> Self {
        StartOperator
    }

    pub async fn execute(&mut self, _ctx: &mut ExecutionContext) -> Result<Status> {
        Ok(Status::Finished)
    }
}

/// Bounded repetition controller.
///
/// Each tick evaluates the (side-effecting) predicate exactly once,
/// publishes the boolean to the output variable, and keeps running while it
/// holds. With the canonical predicate `++c <= N` and `c` starting at 0,
/// ticks 1..N yield true and tick N+1 yields false, leaving `c = N + 1`.
#[derive(Debug)]
pub struct LoopOperator {
    condition: Expr,
    output_var: String,
}

impl LoopOperator {
    pub fn new(condition: Expr, output_var: impl Into<String>) -> Self {
        LoopOperator {
            condition,
            output_var: output_var.into(),
        }
    }

    pub fn output_var(&self) -> &str {
        &self.output_var
    }

    #[tracing::instrument(skip(self, ctx), fields(output = %self.output_var))]
    pub async fn execute(&mut self, ctx: &mut ExecutionContext) -> Result<Status> {
        let verdict = eval_condition(&self.condition, ctx)?;
        ctx.set(self.output_var.clone(), Value::Bool(verdict));
        debug!(verdict, "loop tick");
        Ok(if verdict {
            Status::Running
        } else {
            Status::Finished
        })
    }
}

/// One-shot branch decision.
///
/// Evaluates its predicate once and publishes the boolean; the controller
/// reads it to pick the then/else branch. Unlike [`LoopOperator`] it never
/// asks to run again.
#[derive(Debug)]
pub struct SelectOperator {
    condition: Expr,
    output_var: String,
}

impl SelectOperator {
    pub fn new(condition: Expr, output_var: impl Into<String>) -> Self {
        SelectOperator {
            condition,
            output_var: output_var.into(),
        }
    }

    pub fn output_var(&self) -> &str {
        &self.output_var
    }

    #[tracing::instrument(skip(self, ctx), fields(output = %self.output_var))]
    pub async fn execute(&mut self, ctx: &mut ExecutionContext) -> Result<Status> {
        let verdict = eval_condition(&self.condition, ctx)?;
        ctx.set(self.output_var.clone(), Value::Bool(verdict));
        debug!(verdict, "select decided");
        Ok(Status::Finished)
    }
}

fn eval_condition(condition: &Expr, ctx: &mut ExecutionContext) -> Result<bool> {
    condition
        .eval(ctx)?
        .as_bool()
        .ok_or_else(|| PathloomError::evaluation("condition did not yield a boolean"))
}

#[cfg(test)]
mod tests;
