use super::{Ast, Literal, NodeId, NodeKind};
use std::fmt::Write;

/// Compact single-line renderer for tree fragments, used by debug logging
/// and test failure output. Not a source formatter.
pub struct ExprPrinter<'a> {
    ast: &'a Ast,
}

impl<'a> ExprPrinter<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self { ast }
    }

    pub fn print(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write(&mut out, node);
        out
    }

    fn write(&self, out: &mut String, node: NodeId) {
        match self.ast.kind(node) {
            NodeKind::Literal(lit) => write_literal(out, lit),
            NodeKind::Identifier(name) => out.push_str(name),
            NodeKind::FieldAccess { target, name } => {
                if let Some(target) = target {
                    self.write(out, *target);
                    out.push('.');
                }
                out.push_str(name);
            }
            NodeKind::Binary { op, lhs, rhs } => {
                self.write(out, *lhs);
                let _ = write!(out, " {} ", op);
                self.write(out, *rhs);
            }
            NodeKind::Unary { op, operand } => {
                let _ = write!(out, "{}", op);
                self.write(out, *operand);
            }
            NodeKind::Cast { ty, operand } => {
                let _ = write!(out, "({}) ", ty);
                self.write(out, *operand);
            }
            NodeKind::Conditional { cond, then_branch, else_branch } => {
                self.write(out, *cond);
                out.push_str(" ? ");
                self.write(out, *then_branch);
                out.push_str(" : ");
                self.write(out, *else_branch);
            }
            NodeKind::Parenthesized(inner) => {
                out.push('(');
                self.write(out, *inner);
                out.push(')');
            }
            NodeKind::New { ty, args } => {
                let _ = write!(out, "new {}(", ty);
                self.write_list(out, args);
                out.push(')');
            }
            NodeKind::NewArray { ty, dims } => {
                let _ = write!(out, "new {}", ty);
                for dim in dims {
                    out.push('[');
                    self.write(out, *dim);
                    out.push(']');
                }
            }
            NodeKind::MethodCall { target, name, args } => {
                if let Some(target) = target {
                    self.write(out, *target);
                    out.push('.');
                }
                out.push_str(name);
                out.push('(');
                self.write_list(out, args);
                out.push(')');
            }
            NodeKind::ArrayAccess { array, index } => {
                self.write(out, *array);
                out.push('[');
                self.write(out, *index);
                out.push(']');
            }
            NodeKind::Assignment { target, value } => {
                self.write(out, *target);
                out.push_str(" = ");
                self.write(out, *value);
            }
            NodeKind::InstanceOf { operand, ty } => {
                self.write(out, *operand);
                let _ = write!(out, " instanceof {}", ty);
            }
            NodeKind::Lambda { .. } => out.push_str("() -> ..."),
            NodeKind::VarDecl { name, init } => {
                out.push_str(name);
                if let Some(init) = init {
                    out.push_str(" = ");
                    self.write(out, *init);
                }
                out.push(';');
            }
            NodeKind::ExprStmt(expr) => {
                self.write(out, *expr);
                out.push(';');
            }
            NodeKind::If { cond, .. } => {
                out.push_str("if (");
                self.write(out, *cond);
                out.push_str(") ...");
            }
            NodeKind::While { cond, .. } => {
                out.push_str("while (");
                self.write(out, *cond);
                out.push_str(") ...");
            }
            NodeKind::DoWhile { cond, .. } => {
                out.push_str("do ... while (");
                self.write(out, *cond);
                out.push(')');
            }
            NodeKind::For { cond, .. } => {
                out.push_str("for (; ");
                if let Some(cond) = cond {
                    self.write(out, *cond);
                }
                out.push_str("; ) ...");
            }
            NodeKind::Assert { cond, .. } => {
                out.push_str("assert ");
                self.write(out, *cond);
                out.push(';');
            }
            NodeKind::Return(expr) => {
                out.push_str("return");
                if let Some(expr) = expr {
                    out.push(' ');
                    self.write(out, *expr);
                }
                out.push(';');
            }
            NodeKind::Block(_) => out.push_str("{ ... }"),
        }
    }

    fn write_list(&self, out: &mut String, nodes: &[NodeId]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(out, *node);
        }
    }
}

fn write_literal(out: &mut String, lit: &Literal) {
    let _ = match lit {
        Literal::Int(v) => write!(out, "{}", v),
        Literal::Long(v) => write!(out, "{}L", v),
        Literal::Float(v) => write!(out, "{}f", v),
        Literal::Double(v) => write!(out, "{}", v),
        Literal::Boolean(v) => write!(out, "{}", v),
        Literal::Char(v) => write!(out, "'{}'", v),
        Literal::String(v) => write!(out, "\"{}\"", v),
        Literal::Null => write!(out, "null"),
    };
}
