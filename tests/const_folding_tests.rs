mod common;

use common::FixtureSemantics;
use jconst::{Ast, BinaryOp, EvalCache, Evaluator, NodeId, UnaryOp, Value};

fn eval(build: impl FnOnce(&mut Ast) -> NodeId) -> Option<Value> {
    let mut ast = Ast::new();
    let node = build(&mut ast);
    let semantics = FixtureSemantics::new();
    let evaluator = Evaluator::new(&ast, &semantics);
    let mut cache = EvalCache::new();
    evaluator.evaluate(&mut cache, node, true)
}

#[test]
fn int_addition_folds() {
    let result = eval(|ast| {
        let one = ast.int_lit(1);
        let two = ast.int_lit(2);
        ast.binary(BinaryOp::Add, one, two)
    });
    assert_eq!(result, Some(Value::Int(3)));
}

#[test]
fn int_plus_long_widens_to_long() {
    let result = eval(|ast| {
        let one = ast.int_lit(1);
        let two = ast.long_lit(2);
        ast.binary(BinaryOp::Add, one, two)
    });
    assert_eq!(result, Some(Value::Long(3)));
}

#[test]
fn char_promotes_to_int() {
    let result = eval(|ast| {
        let a = ast.char_lit('A');
        let two = ast.int_lit(2);
        ast.binary(BinaryOp::Add, a, two)
    });
    assert_eq!(result, Some(Value::Int(67)));
}

#[test]
fn string_concat_with_numeric_operand() {
    let result = eval(|ast| {
        let a = ast.string_lit("a");
        let one = ast.int_lit(1);
        ast.binary(BinaryOp::Add, a, one)
    });
    assert_eq!(result, Some(Value::Str("a1".into())));
}

#[test]
fn string_concat_prints_doubles_the_java_way() {
    let result = eval(|ast| {
        let prefix = ast.string_lit("x=");
        let v = ast.double_lit(1.0);
        ast.binary(BinaryOp::Add, prefix, v)
    });
    assert_eq!(result, Some(Value::Str("x=1.0".into())));
}

#[test]
fn integer_division_by_zero_does_not_fold() {
    let result = eval(|ast| {
        let five = ast.int_lit(5);
        let zero = ast.int_lit(0);
        ast.binary(BinaryOp::Div, five, zero)
    });
    assert_eq!(result, None);
}

#[test]
fn floating_division_by_zero_folds_to_infinity() {
    let result = eval(|ast| {
        let five = ast.double_lit(5.0);
        let zero = ast.int_lit(0);
        ast.binary(BinaryOp::Div, five, zero)
    });
    assert_eq!(result, Some(Value::Double(f64::INFINITY)));
}

#[test]
fn nested_arithmetic_respects_structure() {
    // 1 + 2 * 3, built as 1 + (2 * 3)
    let result = eval(|ast| {
        let two = ast.int_lit(2);
        let three = ast.int_lit(3);
        let product = ast.binary(BinaryOp::Mul, two, three);
        let one = ast.int_lit(1);
        ast.binary(BinaryOp::Add, one, product)
    });
    assert_eq!(result, Some(Value::Int(7)));
}

#[test]
fn unary_minus_and_bit_not_fold() {
    let result = eval(|ast| {
        let five = ast.int_lit(5);
        ast.unary(UnaryOp::Minus, five)
    });
    assert_eq!(result, Some(Value::Int(-5)));

    let result = eval(|ast| {
        let zero = ast.int_lit(0);
        ast.unary(UnaryOp::BitNot, zero)
    });
    assert_eq!(result, Some(Value::Int(-1)));
}

#[test]
fn mixed_relational_comparisons_fold() {
    let result = eval(|ast| {
        let one = ast.int_lit(1);
        let two = ast.double_lit(2.0);
        ast.binary(BinaryOp::Lt, one, two)
    });
    assert_eq!(result, Some(Value::Boolean(true)));

    let result = eval(|ast| {
        let a = ast.char_lit('A');
        let b = ast.int_lit(65);
        ast.binary(BinaryOp::Eq, a, b)
    });
    assert_eq!(result, Some(Value::Boolean(true)));
}

#[test]
fn non_constant_operand_spoils_the_fold() {
    let result = eval(|ast| {
        let call = ast.method_call(None, "size", vec![]);
        let one = ast.int_lit(1);
        ast.binary(BinaryOp::Add, call, one)
    });
    assert_eq!(result, None);
}

#[test]
fn conditional_takes_only_the_folded_branch() {
    // true ? 1 : 1/0; the dead branch would fault, and must not run.
    let result = eval(|ast| {
        let cond = ast.bool_lit(true);
        let one = ast.int_lit(1);
        let lhs = ast.int_lit(1);
        let zero = ast.int_lit(0);
        let division = ast.binary(BinaryOp::Div, lhs, zero);
        ast.conditional(cond, one, division)
    });
    assert_eq!(result, Some(Value::Int(1)));
}

#[test]
fn conditional_with_unknown_condition_is_not_strictly_constant() {
    let result = eval(|ast| {
        let cond = ast.method_call(None, "flag", vec![]);
        let one = ast.int_lit(1);
        let two = ast.int_lit(2);
        ast.conditional(cond, one, two)
    });
    assert_eq!(result, None);
}

#[test]
fn unsupported_kinds_do_not_fold() {
    let result = eval(|ast| ast.lambda(None));
    assert_eq!(result, None);

    let result = eval(|ast| {
        let a = ast.ident("arr");
        let i = ast.int_lit(0);
        ast.array_access(a, i)
    });
    assert_eq!(result, None);
}
