// Common test utilities
#![allow(dead_code)]

use jconst::{
    Ast, Literal, NodeId, NodeKind, PrimitiveType, Semantics, SymbolId, SymbolInfo, SymbolKind,
    Type,
};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

/// Test double for the semantic collaborator: explicit lookup tables plus a
/// call counter, so tests can assert that cached evaluations stop consulting
/// the collaborator entirely.
#[derive(Default)]
pub struct FixtureSemantics {
    types: HashMap<NodeId, Type>,
    bindings: HashMap<NodeId, SymbolId>,
    infos: Vec<SymbolInfo>,
    single_def: HashSet<SymbolId>,
    assignable: HashSet<(String, String)>,
    calls: Cell<usize>,
}

impl FixtureSemantics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, info: SymbolInfo) -> SymbolId {
        let id = SymbolId::new(self.infos.len() as u32);
        self.infos.push(info);
        id
    }

    pub fn bind(&mut self, node: NodeId, symbol: SymbolId) {
        self.bindings.insert(node, symbol);
    }

    pub fn set_type(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }

    pub fn mark_single_definition(&mut self, symbol: SymbolId) {
        self.single_def.insert(symbol);
    }

    pub fn allow_assignable(&mut self, from: &Type, to: &Type) {
        self.assignable.insert((from.to_string(), to.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset_calls(&self) {
        self.calls.set(0);
    }

    fn count(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl Semantics for FixtureSemantics {
    fn type_of(&self, ast: &Ast, node: NodeId) -> Type {
        self.count();
        if let Some(ty) = self.types.get(&node) {
            return ty.clone();
        }
        // Literal nodes type themselves so fixtures stay terse.
        match ast.kind(node) {
            NodeKind::Literal(lit) => literal_type(lit),
            _ => Type::Error,
        }
    }

    fn symbol_of(&self, _ast: &Ast, node: NodeId) -> Option<SymbolId> {
        self.count();
        self.bindings.get(&node).copied()
    }

    fn symbol_info(&self, symbol: SymbolId) -> Option<&SymbolInfo> {
        self.count();
        self.infos.get(symbol.index())
    }

    fn is_assignable(&self, from: &Type, to: &Type) -> bool {
        from == to || self.assignable.contains(&(from.to_string(), to.to_string()))
    }

    fn has_single_reaching_definition(&self, symbol: SymbolId) -> bool {
        self.single_def.contains(&symbol)
            || self.infos.get(symbol.index()).is_some_and(|info| info.is_final())
    }
}

fn literal_type(lit: &Literal) -> Type {
    match lit {
        Literal::Int(_) => Type::Primitive(PrimitiveType::Int),
        Literal::Long(_) => Type::Primitive(PrimitiveType::Long),
        Literal::Float(_) => Type::Primitive(PrimitiveType::Float),
        Literal::Double(_) => Type::Primitive(PrimitiveType::Double),
        Literal::Boolean(_) => Type::Primitive(PrimitiveType::Boolean),
        Literal::Char(_) => Type::Primitive(PrimitiveType::Char),
        Literal::String(_) => Type::string(),
        Literal::Null => Type::Null,
    }
}

pub fn static_final_field(
    name: &str,
    declared_type: Type,
    initializer: Option<NodeId>,
    declaration: Option<NodeId>,
) -> SymbolInfo {
    SymbolInfo {
        name: name.to_string(),
        kind: SymbolKind::Field { is_static: true, is_final: true },
        declared_type,
        initializer,
        declaration,
    }
}

pub fn final_local(
    name: &str,
    declared_type: Type,
    initializer: Option<NodeId>,
    declaration: Option<NodeId>,
) -> SymbolInfo {
    SymbolInfo {
        name: name.to_string(),
        kind: SymbolKind::Local { is_final: true },
        declared_type,
        initializer,
        declaration,
    }
}

pub fn mutable_local(
    name: &str,
    declared_type: Type,
    initializer: Option<NodeId>,
    declaration: Option<NodeId>,
) -> SymbolInfo {
    SymbolInfo {
        name: name.to_string(),
        kind: SymbolKind::Local { is_final: false },
        declared_type,
        initializer,
        declaration,
    }
}
