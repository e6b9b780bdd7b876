//! Conversion from the parser AST.

use mathstep_parser::parser::{
    binary::{BinOp, Binary},
    expr::Expr as AstExpr,
};
use crate::primitive::rational_from_str;
use super::{Builder, Expr, ExprKind};

impl Builder {
    /// Builds an expression tree from a parsed AST, recording the span of each node.
    ///
    /// Chains of the same operator are flattened into a single node unless parenthesised:
    /// `a - b + c` becomes one sum of three terms, while `a + (b + c)` keeps the inner sum as a
    /// term. `2xy` becomes one implicit product, separate from explicit `*` chains.
    pub fn build(&self, ast: &AstExpr) -> Expr {
        let loc = Some(ast.span());
        match ast {
            AstExpr::Number(num) => {
                // literals are digits with at most one decimal point
                let value = rational_from_str(&num.value).unwrap_or_default();
                self.node_at(ExprKind::Number(value), loc)
            },
            AstExpr::Symbol(sym) => self.node_at(ExprKind::Identifier {
                name: sym.name.clone(),
                subscript: sym.subscript.as_ref().map(|subscript| self.build(subscript)),
            }, loc),
            AstExpr::Ellipsis(_) => self.node_at(ExprKind::Ellipsis, loc),
            AstExpr::Paren(paren) => self.build(&paren.expr),
            AstExpr::Neg(neg) => self.node_at(ExprKind::Neg {
                arg: self.build(&neg.operand),
                subtraction: false,
            }, loc),
            AstExpr::Binary(binary) => self.build_binary(binary),
            AstExpr::Relation(relation) => self.node_at(ExprKind::Relation {
                op: relation.op,
                args: relation.operands.iter().map(|operand| self.build(operand)).collect(),
            }, loc),
            AstExpr::Root(root) => {
                let index = match &root.index {
                    Some(index) => self.build(index),
                    None => self.int(2),
                };
                self.node_at(ExprKind::Root {
                    radicand: self.build(&root.radicand),
                    index,
                }, loc)
            },
        }
    }

    fn build_binary(&self, binary: &Binary) -> Expr {
        let loc = Some(binary.span());
        match binary.op {
            BinOp::Add | BinOp::Sub => {
                let mut terms = Vec::new();
                self.collect_terms(binary, &mut terms);
                self.node_at(ExprKind::Add(terms), loc)
            },
            BinOp::Mul | BinOp::ImplicitMul => {
                let mut factors = Vec::new();
                self.collect_factors(binary, binary.op, &mut factors);
                self.node_at(ExprKind::Mul {
                    factors,
                    implicit: binary.op == BinOp::ImplicitMul,
                }, loc)
            },
            BinOp::Div => self.node_at(ExprKind::Div(self.build(&binary.lhs), self.build(&binary.rhs)), loc),
            BinOp::Exp => self.node_at(ExprKind::Pow {
                base: self.build(&binary.lhs),
                exp: self.build(&binary.rhs),
            }, loc),
        }
    }

    /// Flattens a left-nested chain of `+` and `-`. Subtracted operands become negations marked
    /// as subtractions.
    fn collect_terms(&self, binary: &Binary, terms: &mut Vec<Expr>) {
        match &*binary.lhs {
            AstExpr::Binary(lhs) if matches!(lhs.op, BinOp::Add | BinOp::Sub) => {
                self.collect_terms(lhs, terms);
            },
            lhs => terms.push(self.build(lhs)),
        }

        let rhs = self.build(&binary.rhs);
        if binary.op == BinOp::Sub {
            terms.push(self.node_at(ExprKind::Neg { arg: rhs, subtraction: true }, Some(binary.rhs.span())));
        } else {
            terms.push(rhs);
        }
    }

    /// Flattens a left-nested chain of the same multiplication operator.
    fn collect_factors(&self, binary: &Binary, op: BinOp, factors: &mut Vec<Expr>) {
        match &*binary.lhs {
            AstExpr::Binary(lhs) if lhs.op == op => self.collect_factors(lhs, op, factors),
            lhs => factors.push(self.build(lhs)),
        }
        match &*binary.rhs {
            AstExpr::Binary(rhs) if rhs.op == op => self.collect_factors(rhs, op, factors),
            rhs => factors.push(self.build(rhs)),
        }
    }
}
