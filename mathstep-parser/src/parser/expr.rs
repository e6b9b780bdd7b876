use mathstep_error::Error;
use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{
    binary::Binary,
    call::Root,
    error::{UnclosedParenthesis, UnexpectedEof, UnexpectedToken},
    literal::{LitNum, LitSym},
    paren::Paren,
    relation::Relation,
    unary::Neg,
    Parse,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression in the math syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number literal.
    Number(LitNum),

    /// A symbol, such as `x` or `x_1`.
    Symbol(LitSym),

    /// An ellipsis, `...`.
    Ellipsis(Range<usize>),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A negation, such as `-x`.
    Neg(Neg),

    /// A binary operation, such as `1 + 2` or `2x`.
    Binary(Binary),

    /// A chain of relations, such as `2x + 5 = 10`.
    Relation(Relation),

    /// A square root or n-th root.
    Root(Root),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Number(num) => num.span.clone(),
            Expr::Symbol(sym) => sym.span.clone(),
            Expr::Ellipsis(span) => span.clone(),
            Expr::Paren(paren) => paren.span(),
            Expr::Neg(neg) => neg.span(),
            Expr::Binary(binary) => binary.span(),
            Expr::Relation(relation) => relation.span(),
            Expr::Root(root) => root.span(),
        }
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Parses a single atom: a number, symbol, ellipsis, root, or parenthesized expression.
    pub(crate) fn parse_atom(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.peek_token().cloned() else {
            return Err(input.error(UnexpectedEof));
        };

        match token.kind {
            TokenKind::Int | TokenKind::Decimal => input.try_parse::<LitNum>().map(Expr::Number),
            TokenKind::Name => input.try_parse::<LitSym>().map(Expr::Symbol),
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Expr::Paren),
            TokenKind::Sqrt | TokenKind::Root => input.try_parse::<Root>().map(Expr::Root),
            TokenKind::Ellipsis => {
                input.next_token()?;
                Ok(Expr::Ellipsis(token.span))
            },
            TokenKind::CloseParen => Err(Error::new(vec![token.span], UnclosedParenthesis { opening: false })),
            found => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Decimal,
                    TokenKind::Name,
                    TokenKind::OpenParen,
                    TokenKind::Sqrt,
                    TokenKind::Root,
                    TokenKind::Ellipsis,
                    TokenKind::Sub,
                ],
                found,
            })),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        Binary::parse_expr(input, Precedence::Any)
    }
}
