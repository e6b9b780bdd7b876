use std::{fmt, ops::Range};
use crate::tokenizer::TokenKind;
use super::expr::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A relational operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelOp {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl RelOp {
    /// Returns the relational operator represented by the given token kind, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(Self::Eq),
            TokenKind::NotEq => Some(Self::NotEq),
            TokenKind::Less => Some(Self::Less),
            TokenKind::LessEq => Some(Self::LessEq),
            TokenKind::Greater => Some(Self::Greater),
            TokenKind::GreaterEq => Some(Self::GreaterEq),
            _ => None,
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::NotEq => write!(f, "!="),
            Self::Less => write!(f, "<"),
            Self::LessEq => write!(f, "<="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEq => write!(f, ">="),
        }
    }
}

/// A chain of two or more operands joined by the same relational operator, such as `x = 2` or
/// `a < b < c`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    /// The operator joining the operands.
    pub op: RelOp,

    /// The operands, in order.
    pub operands: Vec<Expr>,

    /// The region of the source code that this relation was parsed from.
    pub span: Range<usize>,
}

impl Relation {
    /// Returns the span of the relation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
