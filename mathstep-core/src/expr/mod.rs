//! The expression tree shared by the checker, simplifier and solver.
//!
//! Expressions are immutable trees of reference-counted [`Node`]s. Every node carries a
//! [`NodeId`] handed out by a [`Builder`], an optional source span, and an [`ExprKind`]. Cloning
//! an [`Expr`] is cheap and shares the whole subtree, so rewriting one node of a large tree only
//! rebuilds the path from the root to that node.
//!
//! Unlike the parser AST, sums and products are **flattened**: `a - b + c` is a single
//! [`ExprKind::Add`] node with three terms, the second one being a negation marked as a
//! subtraction. Parentheses are not stored; they only stop flattening, so `a + (b + c)` is an
//! addition whose second term is another addition.
//!
//! Two expressions compare equal with `==` when they have the same shape and values, no matter
//! their ids or spans. Operands are compared in order.

mod builder;
mod convert;
mod fmt;
mod iter;
mod path;
mod traverse;

pub use builder::Builder;
pub use iter::ExprIter;
pub use mathstep_parser::parser::relation::RelOp;
pub use path::{apply_step, apply_steps, replace_at, Path};
pub use traverse::{traverse, Visitor};

use rug::Rational;
use std::{fmt::Debug, ops::{Deref, Range}, rc::Rc};

/// Uniquely identifies a node created by a [`Builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

/// The kind of an expression node, along with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A non-negative number literal.
    Number(Rational),

    /// A variable, such as `x` or `x_1`.
    Identifier {
        name: String,
        subscript: Option<Expr>,
    },

    /// A sum of two or more terms.
    Add(Vec<Expr>),

    /// A product of two or more factors. Implicit products are written without an operator, such
    /// as `2x`.
    Mul {
        factors: Vec<Expr>,
        implicit: bool,
    },

    /// A negation. When `subtraction` is set, the negation is a term of a sum written with a
    /// minus sign, such as the `-b` in `a - b`.
    Neg {
        arg: Expr,
        subtraction: bool,
    },

    /// A quotient.
    Div(Expr, Expr),

    /// A power.
    Pow {
        base: Expr,
        exp: Expr,
    },

    /// A root. Square roots have an index of `2`.
    Root {
        radicand: Expr,
        index: Expr,
    },

    /// Two or more operands joined by the same relational operator, such as `2x + 5 = 10`.
    Relation {
        op: RelOp,
        args: Vec<Expr>,
    },

    /// The ellipsis placeholder, `...`.
    Ellipsis,
}

impl ExprKind {
    /// Returns the direct children of this node, in order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Number(_) | Self::Ellipsis => Vec::new(),
            Self::Identifier { subscript, .. } => subscript.iter().collect(),
            Self::Add(terms) => terms.iter().collect(),
            Self::Mul { factors, .. } => factors.iter().collect(),
            Self::Neg { arg, .. } => vec![arg],
            Self::Div(num, den) => vec![num, den],
            Self::Pow { base, exp } => vec![base, exp],
            Self::Root { radicand, index } => vec![radicand, index],
            Self::Relation { args, .. } => args.iter().collect(),
        }
    }

    /// Returns a node of the same kind with its children replaced by the given ones.
    ///
    /// The number of children must match [`ExprKind::children`].
    fn with_children(&self, children: Vec<Expr>) -> Self {
        let mut children = children.into_iter();
        let mut next = || children.next().expect("child count does not match node kind");
        match self {
            Self::Number(_) | Self::Ellipsis => self.clone(),
            Self::Identifier { name, subscript } => Self::Identifier {
                name: name.clone(),
                subscript: subscript.as_ref().map(|_| next()),
            },
            Self::Add(terms) => Self::Add(terms.iter().map(|_| next()).collect()),
            Self::Mul { factors, implicit } => Self::Mul {
                factors: factors.iter().map(|_| next()).collect(),
                implicit: *implicit,
            },
            Self::Neg { subtraction, .. } => Self::Neg {
                arg: next(),
                subtraction: *subtraction,
            },
            Self::Div(..) => {
                let num = next();
                Self::Div(num, next())
            },
            Self::Pow { .. } => {
                let base = next();
                Self::Pow { base, exp: next() }
            },
            Self::Root { .. } => {
                let radicand = next();
                Self::Root { radicand, index: next() }
            },
            Self::Relation { op, args } => Self::Relation {
                op: *op,
                args: args.iter().map(|_| next()).collect(),
            },
        }
    }
}

/// A single node of an expression tree.
#[derive(Debug)]
pub struct Node {
    /// The identity of the node.
    pub id: NodeId,

    /// The region of the source code this node was built from, if any.
    pub loc: Option<Range<usize>>,

    /// The kind of the node.
    pub kind: ExprKind,
}

/// A shared handle to an immutable expression [`Node`].
#[derive(Clone)]
pub struct Expr(Rc<Node>);

impl Deref for Expr {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.kind == other.kind
    }
}

impl Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

impl Expr {
    /// Wraps a node.
    pub(crate) fn from_node(node: Node) -> Self {
        Self(Rc::new(node))
    }

    /// Returns true if both handles point at the very same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a copy of this node with its children replaced, keeping its id and span. This
    /// marks the result as the same slot of the tree with different contents.
    pub fn with_children(&self, children: Vec<Expr>) -> Self {
        Self::from_node(Node {
            id: self.id,
            loc: self.loc.clone(),
            kind: self.kind.with_children(children),
        })
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns the value of this node if it is a number literal.
    pub fn as_number(&self) -> Option<&Rational> {
        match &self.kind {
            ExprKind::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if this node is a number literal.
    pub fn is_number(&self) -> bool {
        matches!(self.kind, ExprKind::Number(_))
    }

    /// Returns true if this node is the number literal `value`.
    pub fn is_number_eq(&self, value: i32) -> bool {
        self.as_number().is_some_and(|number| *number == value)
    }

    /// Returns true if this node is an identifier.
    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, ExprKind::Identifier { .. })
    }

    /// Returns true if this node is a sum.
    pub fn is_add(&self) -> bool {
        matches!(self.kind, ExprKind::Add(_))
    }

    /// Returns true if this node is a product, implicit or not.
    pub fn is_mul(&self) -> bool {
        matches!(self.kind, ExprKind::Mul { .. })
    }

    /// Returns true if this node is a quotient.
    pub fn is_div(&self) -> bool {
        matches!(self.kind, ExprKind::Div(..))
    }

    /// Returns true if this node is a negation, subtraction or not.
    pub fn is_neg(&self) -> bool {
        matches!(self.kind, ExprKind::Neg { .. })
    }

    /// Returns true if this node is a negation written as a subtraction.
    pub fn is_subtraction(&self) -> bool {
        matches!(self.kind, ExprKind::Neg { subtraction: true, .. })
    }

    /// Returns true if this node takes part in arithmetic, i.e. it is not a relation.
    pub fn is_numeric(&self) -> bool {
        !matches!(self.kind, ExprKind::Relation { .. })
    }

    /// Returns true if this node is an equation with exactly two sides.
    pub fn is_equation(&self) -> bool {
        matches!(&self.kind, ExprKind::Relation { op: RelOp::Eq, args } if args.len() == 2)
    }

    /// Returns the argument of a negation.
    pub fn neg_arg(&self) -> Option<&Expr> {
        match &self.kind {
            ExprKind::Neg { arg, .. } => Some(arg),
            _ => None,
        }
    }

    /// Returns the numerator and denominator of a quotient.
    pub fn as_div(&self) -> Option<(&Expr, &Expr)> {
        match &self.kind {
            ExprKind::Div(num, den) => Some((num, den)),
            _ => None,
        }
    }

    /// Returns the two sides of an equation.
    pub fn sides(&self) -> Option<(&Expr, &Expr)> {
        match &self.kind {
            ExprKind::Relation { op: RelOp::Eq, args } if args.len() == 2 => Some((&args[0], &args[1])),
            _ => None,
        }
    }

    /// Returns true if this node has a negative sign, taking nested negations and the factors of
    /// products into account. Subtractions are not negative on their own; the sign belongs to the
    /// enclosing sum.
    ///
    /// - `-a` is negative
    /// - `--a` is not
    /// - `(-a)(b)(-c)` is not
    /// - `(-a)(b)(c)` is
    pub fn is_negative(&self) -> bool {
        match &self.kind {
            ExprKind::Neg { arg, subtraction: false } => !arg.is_negative(),
            ExprKind::Mul { factors, .. } => factors
                .iter()
                .fold(false, |negative, factor| negative ^ factor.is_negative()),
            _ => false,
        }
    }

    /// Returns the terms of a sum, or this node alone if it is not a sum.
    pub fn terms(&self) -> Vec<Expr> {
        match &self.kind {
            ExprKind::Add(terms) => terms.clone(),
            _ => vec![self.clone()],
        }
    }

    /// Returns the factors of a product, or this node alone if it is not a product.
    pub fn factors(&self) -> Vec<Expr> {
        match &self.kind {
            ExprKind::Mul { factors, .. } => factors.clone(),
            _ => vec![self.clone()],
        }
    }

    /// Returns true if the given identifier appears anywhere in this expression.
    pub fn contains_identifier(&self, ident: &Expr) -> bool {
        self.post_order_iter().any(|node| node == ident)
    }

    /// Evaluates this expression if it is made only of numbers, negations, sums and products.
    /// Quotients are evaluated only when `fractions` is set; division by zero is never evaluated.
    pub fn constant_value(&self, fractions: bool) -> Option<Rational> {
        match &self.kind {
            ExprKind::Number(value) => Some(value.clone()),
            ExprKind::Neg { arg, .. } => arg.constant_value(fractions).map(|value| -value),
            ExprKind::Add(terms) => terms.iter().try_fold(Rational::new(), |sum, term| {
                Some(sum + term.constant_value(fractions)?)
            }),
            ExprKind::Mul { factors, .. } => factors.iter().try_fold(Rational::from(1), |product, factor| {
                Some(product * factor.constant_value(fractions)?)
            }),
            ExprKind::Div(num, den) if fractions => {
                let den = den.constant_value(fractions)?;
                if den == 0 {
                    return None;
                }
                Some(num.constant_value(fractions)? / den)
            },
            _ => None,
        }
    }
}
