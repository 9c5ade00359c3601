mod common;

use common::FixtureSemantics;
use jconst::{Ast, BinaryOp, EvalCache, Evaluator, NodeId, Value};

fn eval(build: impl FnOnce(&mut Ast) -> NodeId) -> Option<Value> {
    let mut ast = Ast::new();
    let node = build(&mut ast);
    let semantics = FixtureSemantics::new();
    let evaluator = Evaluator::new(&ast, &semantics);
    let mut cache = EvalCache::new();
    evaluator.evaluate(&mut cache, node, true)
}

#[test]
fn long_arithmetic_keeps_long_width() {
    let result = eval(|ast| {
        let a = ast.long_lit(1i64 << 33);
        let b = ast.long_lit(1);
        ast.binary(BinaryOp::Add, a, b)
    });
    assert_eq!(result, Some(Value::Long((1i64 << 33) + 1)));
}

#[test]
fn long_overflow_wraps() {
    let result = eval(|ast| {
        let a = ast.long_lit(i64::MAX);
        let b = ast.long_lit(1);
        ast.binary(BinaryOp::Add, a, b)
    });
    assert_eq!(result, Some(Value::Long(i64::MIN)));
}

#[test]
fn int_shift_masks_distance_to_five_bits() {
    // 1 << 33 at int width shifts by 33 & 0x1F == 1.
    let result = eval(|ast| {
        let one = ast.int_lit(1);
        let dist = ast.int_lit(33);
        ast.binary(BinaryOp::LShift, one, dist)
    });
    assert_eq!(result, Some(Value::Int(2)));
}

#[test]
fn long_shift_masks_distance_to_six_bits() {
    let result = eval(|ast| {
        let one = ast.long_lit(1);
        let dist = ast.int_lit(33);
        ast.binary(BinaryOp::LShift, one, dist)
    });
    assert_eq!(result, Some(Value::Long(1i64 << 33)));
}

#[test]
fn shift_result_width_follows_the_left_operand() {
    // int << long stays int; the right operand never widens the result.
    let result = eval(|ast| {
        let one = ast.int_lit(4);
        let dist = ast.long_lit(1);
        ast.binary(BinaryOp::RShift, one, dist)
    });
    assert_eq!(result, Some(Value::Int(2)));
}

#[test]
fn unsigned_right_shift_on_negative_long() {
    let result = eval(|ast| {
        let v = ast.long_lit(-1);
        let dist = ast.int_lit(60);
        ast.binary(BinaryOp::URShift, v, dist)
    });
    assert_eq!(result, Some(Value::Long(0xF)));
}

#[test]
fn long_comparisons_fold() {
    let result = eval(|ast| {
        let a = ast.long_lit(i64::MAX);
        let b = ast.int_lit(1);
        ast.binary(BinaryOp::Gt, a, b)
    });
    assert_eq!(result, Some(Value::Boolean(true)));
}

#[test]
fn long_bitwise_ops_fold() {
    let result = eval(|ast| {
        let a = ast.long_lit(0xF0);
        let b = ast.long_lit(0x0F);
        ast.binary(BinaryOp::Or, a, b)
    });
    assert_eq!(result, Some(Value::Long(0xFF)));
}
