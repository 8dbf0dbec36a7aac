//! Predicate expressions for logic operators
//!
//! A deliberately small interpreter over a mutable variable environment:
//! enough for the `++counter <= N` loop idiom and one-shot select
//! conditions. Prefix increment/decrement are read-modify-write on a named
//! variable and yield the new value, so a predicate holding one must be
//! evaluated exactly once per tick.

use crate::context::ExecutionContext;
use crate::error::{PathloomError, Result};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Prefix increment: `++x`
    Incr,
    /// Prefix decrement: `--x`
    Decr,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Expression tree over the query's variable scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Constant(Value),
    Variable(String),
    Unary(UnaryOp, Box<Expr>),
    Relational(RelOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// `++name`
    pub fn incr(name: impl Into<String>) -> Self {
        Expr::Unary(UnaryOp::Incr, Box::new(Expr::variable(name)))
    }

    /// `--name`
    pub fn decr(name: impl Into<String>) -> Self {
        Expr::Unary(UnaryOp::Decr, Box::new(Expr::variable(name)))
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Unary(UnaryOp::Not, Box::new(operand))
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::Relational(RelOp::Eq, Box::new(lhs), Box::new(rhs))
    }

    pub fn ne(lhs: Expr, rhs: Expr) -> Self {
        Expr::Relational(RelOp::Ne, Box::new(lhs), Box::new(rhs))
    }

    pub fn lt(lhs: Expr, rhs: Expr) -> Self {
        Expr::Relational(RelOp::Lt, Box::new(lhs), Box::new(rhs))
    }

    pub fn le(lhs: Expr, rhs: Expr) -> Self {
        Expr::Relational(RelOp::Le, Box::new(lhs), Box::new(rhs))
    }

    pub fn gt(lhs: Expr, rhs: Expr) -> Self {
        Expr::Relational(RelOp::Gt, Box::new(lhs), Box::new(rhs))
    }

    pub fn ge(lhs: Expr, rhs: Expr) -> Self {
        Expr::Relational(RelOp::Ge, Box::new(lhs), Box::new(rhs))
    }

    /// Evaluate against the variable table. Side effects (increments)
    /// apply immediately, even when a later part of the tree fails.
    pub fn eval(&self, ctx: &mut ExecutionContext) -> Result<Value> {
        match self {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Variable(name) => ctx
                .get(name)
                .cloned()
                .ok_or_else(|| PathloomError::evaluation(format!("undefined variable: {name}"))),
            Expr::Unary(op, operand) => eval_unary(*op, operand, ctx),
            Expr::Relational(op, lhs, rhs) => {
                let lv = lhs.eval(ctx)?;
                let rv = rhs.eval(ctx)?;
                eval_relational(*op, &lv, &rv)
            }
        }
    }
}

fn eval_unary(op: UnaryOp, operand: &Expr, ctx: &mut ExecutionContext) -> Result<Value> {
    match op {
        UnaryOp::Not => {
            let value = operand.eval(ctx)?;
            let b = value
                .as_bool()
                .ok_or_else(|| PathloomError::evaluation("operand of `!` is not a boolean"))?;
            Ok(Value::Bool(!b))
        }
        UnaryOp::Incr | UnaryOp::Decr => {
            let Expr::Variable(name) = operand else {
                return Err(PathloomError::evaluation(
                    "increment target must be a variable",
                ));
            };
            let current = ctx
                .get(name)
                .cloned()
                .ok_or_else(|| PathloomError::evaluation(format!("undefined variable: {name}")))?;
            let Value::Int(n) = current else {
                return Err(PathloomError::evaluation(format!(
                    "cannot increment non-integer variable: {name}"
                )));
            };
            let next = if op == UnaryOp::Incr { n + 1 } else { n - 1 };
            ctx.set(name.clone(), Value::Int(next));
            Ok(Value::Int(next))
        }
    }
}

fn eval_relational(op: RelOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    let ord = match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) if matches!(op, RelOp::Eq | RelOp::Ne) => a.cmp(b),
        _ => {
            return Err(PathloomError::evaluation(
                "relational operands are not comparable",
            ))
        }
    };
    let verdict = match op {
        RelOp::Eq => ord.is_eq(),
        RelOp::Ne => ord.is_ne(),
        RelOp::Lt => ord.is_lt(),
        RelOp::Le => ord.is_le(),
        RelOp::Gt => ord.is_gt(),
        RelOp::Ge => ord.is_ge(),
    };
    Ok(Value::Bool(verdict))
}

#[cfg(test)]
mod tests;
