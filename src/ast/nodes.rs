use super::Span;
use crate::types::Type;
use std::fmt;
use std::ops::Index;

/// Identity of a node within one [`Ast`] arena.
///
/// Ids are dense indices. They are only meaningful against the arena that
/// produced them and are never reused within one arena, which is what makes
/// them usable as evaluation-cache keys for the duration of an analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single arena node: kind, parent link and source span.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub span: Span,
}

// Source literals. Java has no byte/short literals; those widths only arise
// from conversions, so they live in the value domain, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Char(char),
    String(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, Sub, Mul, Div, Mod,
    Lt, Le, Gt, Ge, Eq, Ne,
    And, Or, Xor, AndAnd, OrOr,
    LShift, RShift, URShift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus, Minus, Not, BitNot,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+", BinaryOp::Sub => "-", BinaryOp::Mul => "*",
            BinaryOp::Div => "/", BinaryOp::Mod => "%",
            BinaryOp::Lt => "<", BinaryOp::Le => "<=", BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=", BinaryOp::Eq => "==", BinaryOp::Ne => "!=",
            BinaryOp::And => "&", BinaryOp::Or => "|", BinaryOp::Xor => "^",
            BinaryOp::AndAnd => "&&", BinaryOp::OrOr => "||",
            BinaryOp::LShift => "<<", BinaryOp::RShift => ">>", BinaryOp::URShift => ">>>",
        };
        f.write_str(s)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        };
        f.write_str(s)
    }
}

/// Closed set of node kinds.
///
/// The evaluator matches on this exhaustively: every kind it supports is
/// handled, and every kind it does not support falls through to "not a
/// constant" without its children being visited.
#[derive(Debug, Clone)]
pub enum NodeKind {
    // Expressions
    Literal(Literal),
    Identifier(String),
    FieldAccess { target: Option<NodeId>, name: String },
    Binary { op: BinaryOp, lhs: NodeId, rhs: NodeId },
    Unary { op: UnaryOp, operand: NodeId },
    Cast { ty: Type, operand: NodeId },
    Conditional { cond: NodeId, then_branch: NodeId, else_branch: NodeId },
    Parenthesized(NodeId),
    New { ty: Type, args: Vec<NodeId> },
    NewArray { ty: Type, dims: Vec<NodeId> },
    // Expressions the evaluator never folds
    MethodCall { target: Option<NodeId>, name: String, args: Vec<NodeId> },
    ArrayAccess { array: NodeId, index: NodeId },
    Assignment { target: NodeId, value: NodeId },
    InstanceOf { operand: NodeId, ty: Type },
    Lambda { body: Option<NodeId> },
    // Statements (structural context for branch points and cycle guards)
    VarDecl { name: String, init: Option<NodeId> },
    ExprStmt(NodeId),
    If { cond: NodeId, then_stmt: NodeId, else_stmt: Option<NodeId> },
    While { cond: NodeId, body: NodeId },
    DoWhile { cond: NodeId, body: NodeId },
    For { cond: Option<NodeId>, body: NodeId },
    Assert { cond: NodeId, message: Option<NodeId> },
    Return(Option<NodeId>),
    Block(Vec<NodeId>),
}

impl NodeKind {
    /// Whether this kind is a statement (a boundary for the upward walk that
    /// detects self-referential initializers).
    pub fn is_stmt(&self) -> bool {
        matches!(
            self,
            NodeKind::VarDecl { .. }
                | NodeKind::ExprStmt(_)
                | NodeKind::If { .. }
                | NodeKind::While { .. }
                | NodeKind::DoWhile { .. }
                | NodeKind::For { .. }
                | NodeKind::Assert { .. }
                | NodeKind::Return(_)
                | NodeKind::Block(_)
        )
    }

    /// Direct children, in source order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Literal(_) | NodeKind::Identifier(_) => Vec::new(),
            NodeKind::FieldAccess { target, .. } => target.iter().copied().collect(),
            NodeKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            NodeKind::Unary { operand, .. } => vec![*operand],
            NodeKind::Cast { operand, .. } => vec![*operand],
            NodeKind::Conditional { cond, then_branch, else_branch } => {
                vec![*cond, *then_branch, *else_branch]
            }
            NodeKind::Parenthesized(inner) => vec![*inner],
            NodeKind::New { args, .. } => args.clone(),
            NodeKind::NewArray { dims, .. } => dims.clone(),
            NodeKind::MethodCall { target, args, .. } => {
                target.iter().copied().chain(args.iter().copied()).collect()
            }
            NodeKind::ArrayAccess { array, index } => vec![*array, *index],
            NodeKind::Assignment { target, value } => vec![*target, *value],
            NodeKind::InstanceOf { operand, .. } => vec![*operand],
            NodeKind::Lambda { body } => body.iter().copied().collect(),
            NodeKind::VarDecl { init, .. } => init.iter().copied().collect(),
            NodeKind::ExprStmt(e) => vec![*e],
            NodeKind::If { cond, then_stmt, else_stmt } => {
                let mut out = vec![*cond, *then_stmt];
                out.extend(else_stmt.iter().copied());
                out
            }
            NodeKind::While { cond, body } | NodeKind::DoWhile { cond, body } => {
                vec![*cond, *body]
            }
            NodeKind::For { cond, body } => {
                cond.iter().copied().chain(std::iter::once(*body)).collect()
            }
            NodeKind::Assert { cond, message } => {
                std::iter::once(*cond).chain(message.iter().copied()).collect()
            }
            NodeKind::Return(e) => e.iter().copied().collect(),
            NodeKind::Block(stmts) => stmts.clone(),
        }
    }
}

/// Arena of syntax nodes for one compilation unit fragment.
///
/// Trees are built bottom-up through the builder methods below; pushing a
/// composite node wires the parent links of its children. The arena is
/// pass-local: ids from one arena must never be looked up in another.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    /// First statement ancestor of `id`, excluding `id` itself.
    pub fn enclosing_statement(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(id);
        while let Some(node) = cur {
            if self.kind(node).is_stmt() {
                return Some(node);
            }
            cur = self.parent(node);
        }
        None
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in kind.children() {
            debug_assert!(
                self.nodes[child.index()].parent.is_none(),
                "node {child} already has a parent"
            );
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(Node { kind, parent: None, span: Span::default() });
        id
    }

    // Expression builders

    pub fn lit(&mut self, value: Literal) -> NodeId {
        self.push(NodeKind::Literal(value))
    }

    pub fn int_lit(&mut self, v: i32) -> NodeId {
        self.lit(Literal::Int(v))
    }

    pub fn long_lit(&mut self, v: i64) -> NodeId {
        self.lit(Literal::Long(v))
    }

    pub fn float_lit(&mut self, v: f32) -> NodeId {
        self.lit(Literal::Float(v))
    }

    pub fn double_lit(&mut self, v: f64) -> NodeId {
        self.lit(Literal::Double(v))
    }

    pub fn bool_lit(&mut self, v: bool) -> NodeId {
        self.lit(Literal::Boolean(v))
    }

    pub fn char_lit(&mut self, v: char) -> NodeId {
        self.lit(Literal::Char(v))
    }

    pub fn string_lit(&mut self, v: impl Into<String>) -> NodeId {
        self.lit(Literal::String(v.into()))
    }

    pub fn null_lit(&mut self) -> NodeId {
        self.lit(Literal::Null)
    }

    pub fn ident(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Identifier(name.into()))
    }

    pub fn field_access(&mut self, target: Option<NodeId>, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::FieldAccess { target, name: name.into() })
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(NodeKind::Binary { op, lhs, rhs })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.push(NodeKind::Unary { op, operand })
    }

    pub fn cast(&mut self, ty: Type, operand: NodeId) -> NodeId {
        self.push(NodeKind::Cast { ty, operand })
    }

    pub fn conditional(&mut self, cond: NodeId, then_branch: NodeId, else_branch: NodeId) -> NodeId {
        self.push(NodeKind::Conditional { cond, then_branch, else_branch })
    }

    pub fn paren(&mut self, inner: NodeId) -> NodeId {
        self.push(NodeKind::Parenthesized(inner))
    }

    pub fn new_object(&mut self, ty: Type, args: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::New { ty, args })
    }

    pub fn new_array(&mut self, ty: Type, dims: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::NewArray { ty, dims })
    }

    pub fn method_call(
        &mut self,
        target: Option<NodeId>,
        name: impl Into<String>,
        args: Vec<NodeId>,
    ) -> NodeId {
        self.push(NodeKind::MethodCall { target, name: name.into(), args })
    }

    pub fn array_access(&mut self, array: NodeId, index: NodeId) -> NodeId {
        self.push(NodeKind::ArrayAccess { array, index })
    }

    pub fn assignment(&mut self, target: NodeId, value: NodeId) -> NodeId {
        self.push(NodeKind::Assignment { target, value })
    }

    pub fn instance_of(&mut self, operand: NodeId, ty: Type) -> NodeId {
        self.push(NodeKind::InstanceOf { operand, ty })
    }

    pub fn lambda(&mut self, body: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Lambda { body })
    }

    // Statement builders

    pub fn var_decl(&mut self, name: impl Into<String>, init: Option<NodeId>) -> NodeId {
        self.push(NodeKind::VarDecl { name: name.into(), init })
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.push(NodeKind::ExprStmt(expr))
    }

    pub fn if_stmt(&mut self, cond: NodeId, then_stmt: NodeId, else_stmt: Option<NodeId>) -> NodeId {
        self.push(NodeKind::If { cond, then_stmt, else_stmt })
    }

    pub fn while_stmt(&mut self, cond: NodeId, body: NodeId) -> NodeId {
        self.push(NodeKind::While { cond, body })
    }

    pub fn do_while_stmt(&mut self, cond: NodeId, body: NodeId) -> NodeId {
        self.push(NodeKind::DoWhile { cond, body })
    }

    pub fn for_stmt(&mut self, cond: Option<NodeId>, body: NodeId) -> NodeId {
        self.push(NodeKind::For { cond, body })
    }

    pub fn assert_stmt(&mut self, cond: NodeId, message: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Assert { cond, message })
    }

    pub fn return_stmt(&mut self, expr: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Return(expr))
    }

    pub fn block(&mut self, stmts: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::Block(stmts))
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}
