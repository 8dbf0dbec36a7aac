use crate::context::ExecutionContext;
use crate::error::ErrorKind;
use crate::expr::{Expr, UnaryOp};
use crate::value::Value;

#[test]
fn test_incr_yields_new_value_and_updates_variable() {
    let mut ctx = ExecutionContext::new();
    ctx.set("c", Value::Int(0));

    let expr = Expr::incr("c");
    assert_eq!(expr.eval(&mut ctx).unwrap(), Value::Int(1));
    assert_eq!(ctx.get("c"), Some(&Value::Int(1)));
    assert_eq!(expr.eval(&mut ctx).unwrap(), Value::Int(2));
    assert_eq!(ctx.get("c"), Some(&Value::Int(2)));
}

#[test]
fn test_decr() {
    let mut ctx = ExecutionContext::new();
    ctx.set("c", Value::Int(5));
    assert_eq!(Expr::decr("c").eval(&mut ctx).unwrap(), Value::Int(4));
    assert_eq!(ctx.get("c"), Some(&Value::Int(4)));
}

#[test]
fn test_incr_missing_variable_fails() {
    let mut ctx = ExecutionContext::new();
    let err = Expr::incr("c").eval(&mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

#[test]
fn test_incr_non_integer_fails() {
    let mut ctx = ExecutionContext::new();
    ctx.set("c", Value::from("five"));
    let err = Expr::incr("c").eval(&mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

#[test]
fn test_incr_target_must_be_variable() {
    let mut ctx = ExecutionContext::new();
    let expr = Expr::Unary(UnaryOp::Incr, Box::new(Expr::constant(1)));
    let err = expr.eval(&mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

/// The canonical loop predicate: `++c <= 2` holds twice, then fails, and
/// every evaluation advances the counter.
#[test]
fn test_canonical_loop_predicate() {
    let mut ctx = ExecutionContext::new();
    ctx.set("c", Value::Int(0));

    let predicate = Expr::le(Expr::incr("c"), Expr::constant(2));
    assert_eq!(predicate.eval(&mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(predicate.eval(&mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(predicate.eval(&mut ctx).unwrap(), Value::Bool(false));
    assert_eq!(ctx.get("c"), Some(&Value::Int(3)));
}

#[test]
fn test_relational_integers() {
    let mut ctx = ExecutionContext::new();
    let one = || Expr::constant(1);
    let two = || Expr::constant(2);

    assert_eq!(Expr::lt(one(), two()).eval(&mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(Expr::ge(one(), two()).eval(&mut ctx).unwrap(), Value::Bool(false));
    assert_eq!(Expr::eq(two(), two()).eval(&mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(Expr::ne(one(), two()).eval(&mut ctx).unwrap(), Value::Bool(true));
}

#[test]
fn test_relational_strings() {
    let mut ctx = ExecutionContext::new();
    let expr = Expr::lt(Expr::constant("a"), Expr::constant("b"));
    assert_eq!(expr.eval(&mut ctx).unwrap(), Value::Bool(true));
}

#[test]
fn test_relational_mixed_types_fail() {
    let mut ctx = ExecutionContext::new();
    let expr = Expr::le(Expr::constant(1), Expr::constant("b"));
    let err = expr.eval(&mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

#[test]
fn test_not() {
    let mut ctx = ExecutionContext::new();
    let expr = Expr::not(Expr::constant(false));
    assert_eq!(expr.eval(&mut ctx).unwrap(), Value::Bool(true));

    let err = Expr::not(Expr::constant(0)).eval(&mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

/// Side effects before a failure stick: `++c <= "x"` advances the counter
/// even though the comparison fails.
#[test]
fn test_side_effect_applies_before_failure() {
    let mut ctx = ExecutionContext::new();
    ctx.set("c", Value::Int(0));

    let expr = Expr::le(Expr::incr("c"), Expr::constant("x"));
    assert!(expr.eval(&mut ctx).is_err());
    assert_eq!(ctx.get("c"), Some(&Value::Int(1)));
}
