use mathstep_error::Error;
use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{binary::Binary, expr::Expr, Parser, Precedence};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary negation, such as `-x` or `-(a + b)`.
///
/// Negation binds looser than implicit multiplication and exponentiation, so `-2xy` negates the
/// whole product and `-x^2` negates the power.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Neg {
    /// The negated operand.
    pub operand: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Neg {
    /// Returns the span of the negation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses an operand, which is either an atom or a negation of an operand.
    pub(crate) fn parse_operand(input: &mut Parser) -> Result<Expr, Error> {
        if input.peek_token().is_some_and(|token| token.kind == TokenKind::Sub) {
            let minus = input.next_token()?;
            let operand = Binary::parse_expr(input, Precedence::Neg)?;
            let span = minus.span.start..operand.span().end;
            Ok(Expr::Neg(Neg { operand: Box::new(operand), span }))
        } else {
            Expr::parse_atom(input)
        }
    }
}
