//! Per-pass memoization store
//!
//! One [`EvalCache`] lives exactly as long as one analysis pass and is handed
//! into every evaluation; nothing here is global, so pass isolation is a
//! property of the types rather than a convention. Two keyspaces: expression
//! nodes (branch points) and resolved symbols. Each entry keeps the strict
//! and enhanced results apart, and records "computed, not a constant"
//! distinctly from "not computed yet" so a non-constant subtree is never
//! re-walked.

use crate::ast::NodeId;
use crate::eval::value::Value;
use crate::sym::SymbolId;
use std::collections::HashMap;

/// Outcome of one completed evaluation, as stored in the cache.
///
/// `NotConst` is internal: the public API translates it back to `None`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Folded {
    Value(Value),
    NotConst,
}

impl Folded {
    pub(crate) fn from_result(result: &Option<Value>) -> Self {
        match result {
            Some(v) => Folded::Value(v.clone()),
            None => Folded::NotConst,
        }
    }

    pub(crate) fn to_result(&self) -> Option<Value> {
        match self {
            Folded::Value(v) => Some(v.clone()),
            Folded::NotConst => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slots {
    strict: Option<Folded>,
    enhanced: Option<Folded>,
}

impl Slots {
    fn slot(&self, enhanced: bool) -> &Option<Folded> {
        if enhanced { &self.enhanced } else { &self.strict }
    }

    fn slot_mut(&mut self, enhanced: bool) -> &mut Option<Folded> {
        if enhanced { &mut self.enhanced } else { &mut self.strict }
    }
}

/// Memoized evaluation results for one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct EvalCache {
    nodes: HashMap<NodeId, Slots>,
    symbols: HashMap<SymbolId, Slots>,
}

impl EvalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn node(&self, id: NodeId, enhanced: bool) -> Option<&Folded> {
        self.nodes.get(&id).and_then(|slots| slots.slot(enhanced).as_ref())
    }

    pub(crate) fn put_node(&mut self, id: NodeId, enhanced: bool, folded: Folded) {
        *self.nodes.entry(id).or_default().slot_mut(enhanced) = Some(folded);
    }

    pub(crate) fn symbol(&self, id: SymbolId, enhanced: bool) -> Option<&Folded> {
        self.symbols.get(&id).and_then(|slots| slots.slot(enhanced).as_ref())
    }

    pub(crate) fn put_symbol(&mut self, id: SymbolId, enhanced: bool, folded: Folded) {
        *self.symbols.entry(id).or_default().slot_mut(enhanced) = Some(folded);
    }
}
