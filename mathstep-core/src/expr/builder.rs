use rug::Rational;
use std::{cell::Cell, ops::Range, rc::Rc};
use crate::primitive::rational_from_str;
use super::{Expr, ExprKind, Node, NodeId, RelOp};

/// Creates expression nodes with fresh identities.
///
/// Clones of a builder share the same counter, so nodes created through any of them never share
/// an id.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    next_id: Rc<Cell<u64>>,
}

impl Builder {
    /// Creates a builder whose first node will have id `0`.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    /// Creates a node of the given kind with a fresh id.
    pub fn node(&self, kind: ExprKind) -> Expr {
        self.node_at(kind, None)
    }

    /// Creates a node of the given kind with a fresh id and a source span.
    pub fn node_at(&self, kind: ExprKind, loc: Option<Range<usize>>) -> Expr {
        Expr::from_node(Node {
            id: self.next_id(),
            loc,
            kind,
        })
    }

    /// Creates a number from a decimal literal such as `24` or `1.5`.
    ///
    /// # Panics
    ///
    /// Panics if the literal is malformed.
    pub fn number(&self, literal: &str) -> Expr {
        match rational_from_str(literal) {
            Some(value) => self.rational(value),
            None => panic!("malformed number literal `{}`", literal),
        }
    }

    /// Creates an integer. Negative values become the negation of a number.
    pub fn int(&self, value: i64) -> Expr {
        self.rational(Rational::from(value))
    }

    /// Creates a rational number. Negative values become the negation of a number.
    pub fn rational(&self, value: Rational) -> Expr {
        if value < 0 {
            self.neg(self.node(ExprKind::Number(-value)), false)
        } else {
            self.node(ExprKind::Number(value))
        }
    }

    /// Creates an identifier.
    pub fn identifier(&self, name: impl Into<String>) -> Expr {
        self.node(ExprKind::Identifier {
            name: name.into(),
            subscript: None,
        })
    }

    /// Creates a sum of two or more terms.
    pub fn add(&self, terms: Vec<Expr>) -> Expr {
        debug_assert!(terms.len() >= 2, "a sum needs at least two terms");
        self.node(ExprKind::Add(terms))
    }

    /// Creates a sum, except that no terms give `0` and a single term is returned as is.
    pub fn add_terms(&self, mut terms: Vec<Expr>) -> Expr {
        match terms.len() {
            0 => self.int(0),
            1 => terms.remove(0),
            _ => self.add(terms),
        }
    }

    /// Creates a product of two or more factors.
    pub fn mul(&self, factors: Vec<Expr>, implicit: bool) -> Expr {
        debug_assert!(factors.len() >= 2, "a product needs at least two factors");
        self.node(ExprKind::Mul { factors, implicit })
    }

    /// Creates a product, except that no factors give `1` and a single factor is returned as is.
    pub fn mul_factors(&self, mut factors: Vec<Expr>, implicit: bool) -> Expr {
        match factors.len() {
            0 => self.int(1),
            1 => factors.remove(0),
            _ => self.mul(factors, implicit),
        }
    }

    /// Creates a negation.
    pub fn neg(&self, arg: Expr, subtraction: bool) -> Expr {
        self.node(ExprKind::Neg { arg, subtraction })
    }

    /// Creates a quotient.
    pub fn div(&self, num: Expr, den: Expr) -> Expr {
        self.node(ExprKind::Div(num, den))
    }

    /// Creates a power.
    pub fn pow(&self, base: Expr, exp: Expr) -> Expr {
        self.node(ExprKind::Pow { base, exp })
    }

    /// Creates a root. Without an index, this is a square root.
    pub fn root(&self, radicand: Expr, index: Option<Expr>) -> Expr {
        let index = index.unwrap_or_else(|| self.int(2));
        self.node(ExprKind::Root { radicand, index })
    }

    /// Creates a relation between two or more operands.
    pub fn relation(&self, op: RelOp, args: Vec<Expr>) -> Expr {
        debug_assert!(args.len() >= 2, "a relation needs at least two operands");
        self.node(ExprKind::Relation { op, args })
    }

    /// Creates an equation.
    pub fn eq(&self, args: Vec<Expr>) -> Expr {
        self.relation(RelOp::Eq, args)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fresh_ids() {
        let builder = Builder::new();
        let shared = builder.clone();
        let a = builder.identifier("a");
        let b = shared.identifier("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn negative_numbers_are_negations() {
        let builder = Builder::new();
        assert_eq!(builder.int(-3), builder.neg(builder.int(3), false));
        assert_eq!(builder.number("-1.5"), builder.neg(builder.rational(Rational::from((3, 2))), false));
    }

    #[test]
    fn degenerate_sums_and_products() {
        let builder = Builder::new();
        assert_eq!(builder.add_terms(vec![]), builder.int(0));
        assert_eq!(builder.mul_factors(vec![], true), builder.int(1));
        assert_eq!(builder.add_terms(vec![builder.identifier("x")]), builder.identifier("x"));
    }

    #[test]
    fn square_root_index() {
        let builder = Builder::new();
        let root = builder.root(builder.identifier("x"), None);
        assert_eq!(root, builder.root(builder.identifier("x"), Some(builder.int(2))));
        assert_eq!(root.to_string(), "sqrt(x)");
    }

    #[test]
    #[should_panic(expected = "malformed number literal")]
    fn malformed_literal() {
        Builder::new().number("1.2.3");
    }
}
