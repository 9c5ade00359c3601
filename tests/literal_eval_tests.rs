mod common;

use common::FixtureSemantics;
use jconst::{Ast, EvalCache, Evaluator, Value};

fn eval_one(build: impl FnOnce(&mut Ast) -> jconst::NodeId) -> Option<Value> {
    let mut ast = Ast::new();
    let node = build(&mut ast);
    let semantics = FixtureSemantics::new();
    let evaluator = Evaluator::new(&ast, &semantics);
    let mut cache = EvalCache::new();
    evaluator.evaluate(&mut cache, node, true)
}

#[test]
fn int_literal_evaluates_to_itself() {
    assert_eq!(eval_one(|ast| ast.int_lit(42)), Some(Value::Int(42)));
}

#[test]
fn long_literal_keeps_its_width() {
    assert_eq!(eval_one(|ast| ast.long_lit(1i64 << 40)), Some(Value::Long(1 << 40)));
}

#[test]
fn float_and_double_literals_evaluate_to_themselves() {
    assert_eq!(eval_one(|ast| ast.float_lit(1.5)), Some(Value::Float(1.5)));
    assert_eq!(eval_one(|ast| ast.double_lit(2.5)), Some(Value::Double(2.5)));
}

#[test]
fn boolean_and_char_literals_evaluate_to_themselves() {
    assert_eq!(eval_one(|ast| ast.bool_lit(true)), Some(Value::Boolean(true)));
    assert_eq!(eval_one(|ast| ast.char_lit('A')), Some(Value::Char('A')));
}

#[test]
fn string_literal_evaluates_to_itself() {
    assert_eq!(eval_one(|ast| ast.string_lit("hello")), Some(Value::Str("hello".into())));
}

#[test]
fn null_literal_is_not_a_strict_constant() {
    assert_eq!(eval_one(|ast| ast.null_lit()), None);
}

#[test]
fn parentheses_are_transparent() {
    assert_eq!(
        eval_one(|ast| {
            let inner = ast.int_lit(7);
            ast.paren(inner)
        }),
        Some(Value::Int(7))
    );
}
