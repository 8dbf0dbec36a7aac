use crate::context::ExecutionContext;
use crate::error::ErrorKind;
use crate::executor::logic::{LoopOperator, SelectOperator, StartOperator};
use crate::executor::{Operator, Status};
use crate::expr::Expr;
use crate::value::Value;

fn counter_le(n: i64) -> Expr {
    Expr::le(Expr::incr("counter"), Expr::constant(n))
}

/// The canonical `++counter <= 5` loop: five true ticks, then false, with
/// the counter left at N + 1.
#[tokio::test]
async fn test_loop_canonical_predicate() {
    let mut ctx = ExecutionContext::new();
    ctx.set("counter", Value::Int(0));
    let mut op = LoopOperator::new(counter_le(5), "loopOut");

    for _ in 0..5 {
        let status = op.execute(&mut ctx).await.unwrap();
        assert_eq!(status, Status::Running);
        assert_eq!(ctx.get("loopOut"), Some(&Value::Bool(true)));
    }

    let status = op.execute(&mut ctx).await.unwrap();
    assert_eq!(status, Status::Finished);
    assert_eq!(ctx.get("loopOut"), Some(&Value::Bool(false)));
    assert_eq!(ctx.get("counter"), Some(&Value::Int(6)));
}

/// The predicate is evaluated exactly once per tick: the counter advances
/// by one per tick, no more and no less.
#[tokio::test]
async fn test_loop_evaluates_predicate_once_per_tick() {
    let mut ctx = ExecutionContext::new();
    ctx.set("counter", Value::Int(0));
    let mut op = LoopOperator::new(counter_le(10), "loopOut");

    for tick in 1..=3 {
        op.execute(&mut ctx).await.unwrap();
        assert_eq!(ctx.get("counter"), Some(&Value::Int(tick)));
    }
}

#[tokio::test]
async fn test_loop_missing_counter_fails() {
    let mut ctx = ExecutionContext::new();
    let mut op = LoopOperator::new(counter_le(5), "loopOut");

    let err = op.execute(&mut ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
    assert!(ctx.get("loopOut").is_none());
}

#[tokio::test]
async fn test_loop_non_boolean_condition_fails() {
    let mut ctx = ExecutionContext::new();
    ctx.set("counter", Value::Int(0));
    let mut op = LoopOperator::new(Expr::incr("counter"), "loopOut");

    let err = op.execute(&mut ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

#[tokio::test]
async fn test_select_writes_once_and_finishes() {
    let mut ctx = ExecutionContext::new();
    ctx.set("flag", Value::Int(7));
    let condition = Expr::gt(Expr::variable("flag"), Expr::constant(0));
    let mut op = SelectOperator::new(condition, "selectOut");

    let status = op.execute(&mut ctx).await.unwrap();
    assert_eq!(status, Status::Finished);
    assert_eq!(ctx.get("selectOut"), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn test_start_is_a_no_op() {
    let mut ctx = ExecutionContext::new();
    let mut op = StartOperator::new();
    assert_eq!(op.execute(&mut ctx).await.unwrap(), Status::Finished);
}

/// Dispatch through the tagged operator union behaves like calling the
/// wrapped operator directly.
#[tokio::test]
async fn test_operator_dispatch() {
    let mut ctx = ExecutionContext::new();
    ctx.set("counter", Value::Int(0));
    let mut op = Operator::Loop(LoopOperator::new(counter_le(1), "loopOut"));

    assert_eq!(op.name(), "loop");
    assert_eq!(op.execute(&mut ctx).await.unwrap(), Status::Running);
    assert_eq!(op.execute(&mut ctx).await.unwrap(), Status::Finished);
}
