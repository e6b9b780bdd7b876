use mathstep_error::Error;
use std::{fmt, ops::Range};
use crate::tokenizer::TokenKind;
use super::{
    error::MixedRelation,
    expr::Expr,
    relation::{RelOp, Relation},
    unary::Neg,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Exp,

    /// Implicit multiplication, such as `2x` or `x(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMul,
}

impl BinOp {
    /// Returns the binary operator represented by the given token kind, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Exp => Some(Self::Exp),
            _ => None,
        }
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul => Precedence::Factor,
            Self::Div => Precedence::Quotient,
            Self::ImplicitMul => Precedence::Implicit,
            Self::Exp => Precedence::Exp,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Exp => write!(f, "^"),
            Self::ImplicitMul => Ok(()),
        }
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds the node `lhs op rhs`.
    fn new(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span })
    }

    /// Parses an expression whose operators all bind tighter than `precedence`.
    ///
    /// Operators of the same precedence are left-associative, except for `^`, whose right-hand
    /// side is parsed one level lower so that `x^y^z` groups as `x^(y^z)`. When no operator
    /// follows an operand but another operand does, the two are joined by implicit
    /// multiplication.
    pub(crate) fn parse_expr(input: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
        let mut lhs = Neg::parse_operand(input)?;

        loop {
            let Some(kind) = input.peek_token().map(|token| token.kind) else {
                break;
            };

            if let Some(op) = BinOp::from_token(kind) {
                if op.precedence() <= precedence {
                    break;
                }
                input.next_token()?;

                let rhs = if op == BinOp::Exp {
                    Self::parse_expr(input, Precedence::Implicit)?
                } else {
                    Self::parse_expr(input, op.precedence())?
                };
                lhs = Self::new(lhs, op, rhs);
            } else if let Some(op) = RelOp::from_token(kind) {
                if Precedence::Relation <= precedence {
                    break;
                }
                lhs = Self::parse_relation(input, lhs, op)?;
            } else if kind.starts_operand() {
                if Precedence::Implicit <= precedence {
                    break;
                }
                let rhs = Self::parse_expr(input, Precedence::Implicit)?;
                lhs = Self::new(lhs, BinOp::ImplicitMul, rhs);
            } else {
                break;
            }
        }

        Ok(lhs)
    }

    /// Parses the rest of a relation chain whose first operand has already been parsed.
    fn parse_relation(input: &mut Parser, first: Expr, op: RelOp) -> Result<Expr, Error> {
        let start = first.span().start;
        let mut operands = vec![first];
        let mut last_op_span = input.next_token()?.span;

        loop {
            operands.push(Self::parse_expr(input, Precedence::Relation)?);

            let Some(token) = input.peek_token() else {
                break;
            };
            match RelOp::from_token(token.kind) {
                Some(next_op) if next_op == op => {
                    last_op_span = input.next_token()?.span;
                },
                Some(_) => {
                    return Err(Error::new(vec![last_op_span, token.span.clone()], MixedRelation));
                },
                None => break,
            }
        }

        let end = operands.last().map_or(start, |operand| operand.span().end);
        Ok(Expr::Relation(Relation { op, operands, span: start..end }))
    }
}
