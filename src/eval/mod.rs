//! Constant expression evaluation
//!
//! A typed, cached, partial interpreter over the expression tree. Walks an
//! expression bottom-up and computes its compile-time value under one of two
//! rule sets:
//!
//! - **strict**: JLS constant-expression folding only;
//! - **enhanced**: additionally tracks null/non-null facts, accepts reference
//!   and boxing casts, and resolves effectively-final local/field
//!   initializers.
//!
//! Evaluation never panics and never reports errors: every non-conforming
//! input (unsupported tree shape, arithmetic fault, unresolved symbol,
//! initializer cycle) degrades to `None` ("not a constant"). Results are
//! memoized per branch-point node and per resolved symbol in an injected
//! [`EvalCache`] scoped to one analysis pass.

mod cache;
mod convert;
mod fold;
mod value;

pub use cache::EvalCache;
pub use convert::implicit_conversion;
pub use value::Value;

use crate::ast::{Ast, BinaryOp, ExprPrinter, Literal, NodeId, NodeKind};
use crate::provider::Semantics;
use crate::sym::{SymbolId, SymbolInfo};
use crate::types::Type;
use cache::Folded;
use std::collections::HashSet;

/// True when the evaluation produced a concrete constant.
pub fn is_real_value(result: &Option<Value>) -> bool {
    matches!(result, Some(v) if v.is_real_value())
}

/// True when the expression is statically known to be the null reference.
pub fn is_null(result: &Option<Value>) -> bool {
    matches!(result, Some(v) if v.is_null())
}

/// True when the expression is known not to be the null reference.
pub fn is_never_null(result: &Option<Value>) -> bool {
    matches!(result, Some(v) if v.is_never_null())
}

/// The two orthogonal evaluation dimensions of one call.
#[derive(Debug, Clone, Copy)]
struct Mode {
    resolve_symbols: bool,
    enhanced: bool,
}

/// Constant evaluator over one tree, borrowing its semantic collaborator.
///
/// The evaluator itself is stateless; all memoization lives in the
/// [`EvalCache`] passed into each call, whose lifetime the caller ties to the
/// analysis pass.
pub struct Evaluator<'a, S: Semantics> {
    ast: &'a Ast,
    semantics: &'a S,
}

impl<'a, S: Semantics> Evaluator<'a, S> {
    pub fn new(ast: &'a Ast, semantics: &'a S) -> Self {
        Self { ast, semantics }
    }

    /// Strict JLS constant folding. With `resolve_symbols`, references to
    /// constant variables (final primitive/String with constant initializer)
    /// fold to their values; without it, every reference is non-constant.
    pub fn evaluate(
        &self,
        cache: &mut EvalCache,
        node: NodeId,
        resolve_symbols: bool,
    ) -> Option<Value> {
        self.run(cache, node, Mode { resolve_symbols, enhanced: false })
    }

    /// Enhanced evaluation: strict folding plus null tracking, reference and
    /// boxing casts, and effectively-final initializer resolution.
    pub fn evaluate_enhanced(
        &self,
        cache: &mut EvalCache,
        node: NodeId,
        resolve_symbols: bool,
    ) -> Option<Value> {
        self.run(cache, node, Mode { resolve_symbols, enhanced: true })
    }

    fn run(&self, cache: &mut EvalCache, node: NodeId, mode: Mode) -> Option<Value> {
        log::debug!(
            "evaluate {} `{}` enhanced={} resolve={}",
            node,
            ExprPrinter::new(self.ast).print(node),
            mode.enhanced,
            mode.resolve_symbols
        );
        let mut visiting = HashSet::new();
        let result = self.eval(cache, &mut visiting, node, mode);
        log::debug!("evaluate {} -> {:?}", node, result);
        result
    }

    fn eval(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        node: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        // Branch points memoize; a resolve_symbols=false result must not be
        // reused by a resolving call, so only resolving calls participate.
        let memoize = mode.resolve_symbols && self.is_branch_point(node);
        if memoize {
            if let Some(folded) = cache.node(node, mode.enhanced) {
                log::trace!("node cache hit for {}", node);
                return folded.to_result();
            }
        }
        let result = self.eval_node(cache, visiting, node, mode);
        if memoize {
            cache.put_node(node, mode.enhanced, Folded::from_result(&result));
        }
        result
    }

    fn eval_node(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        node: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        match self.ast.kind(node) {
            // The null literal only means something under null tracking.
            NodeKind::Literal(Literal::Null) => mode.enhanced.then_some(Value::Null),
            NodeKind::Literal(lit) => value::value_of_literal(lit),
            NodeKind::Parenthesized(inner) => self.eval(cache, visiting, *inner, mode),
            NodeKind::Identifier(_) | NodeKind::FieldAccess { .. } => {
                self.eval_reference(cache, visiting, node, mode)
            }
            NodeKind::Unary { op, operand } => {
                let v = self.eval(cache, visiting, *operand, mode)?;
                fold::fold_unary(*op, v)
                    .map_err(|fault| log::trace!("unary {} fault: {}", op, fault))
                    .ok()
            }
            NodeKind::Binary { op, lhs, rhs } => {
                self.eval_binary(cache, visiting, *op, *lhs, *rhs, mode)
            }
            NodeKind::Cast { ty, operand } => {
                self.eval_cast(cache, visiting, ty, *operand, mode)
            }
            NodeKind::Conditional { cond, then_branch, else_branch } => {
                self.eval_conditional(cache, visiting, *cond, *then_branch, *else_branch, mode)
            }
            // A fresh allocation is a non-null reference of unknown value.
            NodeKind::New { .. } | NodeKind::NewArray { .. } => {
                mode.enhanced.then_some(Value::NotNull)
            }
            // Everything below never folds; children are not visited and the
            // semantic collaborator is not consulted.
            NodeKind::MethodCall { .. }
            | NodeKind::ArrayAccess { .. }
            | NodeKind::Assignment { .. }
            | NodeKind::InstanceOf { .. }
            | NodeKind::Lambda { .. }
            | NodeKind::VarDecl { .. }
            | NodeKind::ExprStmt(_)
            | NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::DoWhile { .. }
            | NodeKind::For { .. }
            | NodeKind::Assert { .. }
            | NodeKind::Return(_)
            | NodeKind::Block(_) => None,
        }
    }

    fn eval_binary(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        let lv = self.eval(cache, visiting, lhs, mode);
        // A decided left operand settles && and || without the right side.
        match (op, &lv) {
            (BinaryOp::AndAnd, Some(Value::Boolean(false))) => return Some(Value::Boolean(false)),
            (BinaryOp::OrOr, Some(Value::Boolean(true))) => return Some(Value::Boolean(true)),
            _ => {}
        }
        let rv = self.eval(cache, visiting, rhs, mode);
        let (lv, rv) = (lv?, rv?);

        if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
            if matches!(lv, Value::Null) || matches!(rv, Value::Null) {
                return self.eval_null_comparison(op, (lhs, lv), (rhs, rv));
            }
            if matches!(lv, Value::NotNull) || matches!(rv, Value::NotNull) {
                // Identity of an unknown reference is unknowable.
                return None;
            }
        }
        fold::fold_binary(op, lv, rv)
            .map_err(|fault| log::trace!("binary {} fault: {}", op, fault))
            .ok()
    }

    // `x == null` and friends: legal only when the non-null side's static
    // type is a reference type.
    fn eval_null_comparison(
        &self,
        op: BinaryOp,
        (lhs_node, lv): (NodeId, Value),
        (rhs_node, rv): (NodeId, Value),
    ) -> Option<Value> {
        let (other_node, other_value) = if matches!(lv, Value::Null) {
            (rhs_node, rv)
        } else {
            (lhs_node, lv)
        };
        if !self.semantics.type_of(self.ast, other_node).is_reference() {
            return None;
        }
        let eq = matches!(other_value, Value::Null);
        Some(Value::Boolean(if op == BinaryOp::Eq { eq } else { !eq }))
    }

    fn eval_cast(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        target: &Type,
        operand: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        let v = self.eval(cache, visiting, operand, mode)?;
        match target {
            Type::Primitive(p) => convert::cast_to_primitive(&v, *p),
            Type::Reference(name) => {
                // Null facts survive a reference cast unchanged.
                if mode.enhanced && matches!(v, Value::Null | Value::NotNull) {
                    return Some(v);
                }
                if crate::types::is_string_name(name) {
                    return matches!(v, Value::Str(_)).then_some(v);
                }
                if !mode.enhanced {
                    return None;
                }
                // Boxing to the exact wrapper of the value's own type.
                if let Some(boxed) = crate::types::wrapper_primitives().get(name.as_str()) {
                    return (v.primitive_type() == Some(*boxed)).then_some(v);
                }
                let source = self.semantics.type_of(self.ast, operand);
                self.semantics.is_assignable(&source, target).then_some(v)
            }
            Type::Array(_) => {
                if !mode.enhanced {
                    return None;
                }
                if matches!(v, Value::Null | Value::NotNull) {
                    return Some(v);
                }
                let source = self.semantics.type_of(self.ast, operand);
                self.semantics.is_assignable(&source, target).then_some(v)
            }
            Type::Null | Type::Error => None,
        }
    }

    fn eval_conditional(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        match self.eval(cache, visiting, cond, mode).and_then(|v| v.as_boolean()) {
            // The untaken branch is never evaluated, so dead code cannot
            // spoil the fold.
            Some(true) => self.eval(cache, visiting, then_branch, mode),
            Some(false) => self.eval(cache, visiting, else_branch, mode),
            None if mode.enhanced => {
                // Unknown condition: the conditional still produces *some*
                // value when both branches do.
                let t = self.eval(cache, visiting, then_branch, mode);
                let e = self.eval(cache, visiting, else_branch, mode);
                match (t, e) {
                    (Some(Value::Null), Some(Value::Null)) => Some(Value::Null),
                    (Some(_), Some(_)) => Some(Value::NotNull),
                    _ => None,
                }
            }
            None => None,
        }
    }

    fn eval_reference(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        node: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        if !mode.resolve_symbols {
            return None;
        }
        let symbol = self.semantics.symbol_of(self.ast, node)?;
        // Many nodes may name the same symbol; the memo is per symbol.
        if let Some(folded) = cache.symbol(symbol, mode.enhanced) {
            log::trace!("symbol cache hit for {}", symbol);
            return folded.to_result();
        }
        let result = self.resolve_symbol(cache, visiting, node, symbol, mode);
        cache.put_symbol(symbol, mode.enhanced, Folded::from_result(&result));
        result
    }

    fn resolve_symbol(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        reference: NodeId,
        symbol: SymbolId,
        mode: Mode,
    ) -> Option<Value> {
        let info = self.semantics.symbol_info(symbol)?;
        let init = info.initializer?;
        // A reference inside its own declaration statement is a
        // self-reference (`int x = x + 1;`) and must not recurse.
        if info.declaration.is_some() && self.ast.enclosing_statement(reference) == info.declaration
        {
            return None;
        }
        if !visiting.insert(symbol) {
            // Initializer cycle through other symbols.
            return None;
        }
        let result = self.symbol_value(cache, visiting, symbol, info, init, mode);
        visiting.remove(&symbol);
        result
    }

    fn symbol_value(
        &self,
        cache: &mut EvalCache,
        visiting: &mut HashSet<SymbolId>,
        symbol: SymbolId,
        info: &SymbolInfo,
        init: NodeId,
        mode: Mode,
    ) -> Option<Value> {
        // Constant variable in the JLS sense: the initializer folds under
        // strict rules and the value takes the declared type.
        if info.is_constant_candidate() {
            let strict = Mode { resolve_symbols: true, enhanced: false };
            if let Some(v) = self.eval(cache, visiting, init, strict) {
                if let Some(converted) = convert::implicit_conversion(&v, &info.declared_type) {
                    return Some(converted);
                }
            }
        }
        // Enhanced rules also chase any binding with a single reaching
        // definition, keeping the raw value when the declared type does not
        // constrain it.
        if mode.enhanced && self.semantics.has_single_reaching_definition(symbol) {
            let v = self.eval(cache, visiting, init, Mode { resolve_symbols: true, enhanced: true })?;
            return Some(convert::implicit_conversion(&v, &info.declared_type).unwrap_or(v));
        }
        None
    }

    fn is_branch_point(&self, node: NodeId) -> bool {
        let Some(parent) = self.ast.parent(node) else {
            return false;
        };
        match self.ast.kind(parent) {
            NodeKind::If { cond, .. }
            | NodeKind::While { cond, .. }
            | NodeKind::DoWhile { cond, .. }
            | NodeKind::Assert { cond, .. }
            | NodeKind::Conditional { cond, .. } => *cond == node,
            NodeKind::For { cond: Some(cond), .. } => *cond == node,
            NodeKind::Assignment { value, .. } => *value == node,
            NodeKind::VarDecl { init: Some(init), .. } => *init == node,
            _ => false,
        }
    }
}
