use mathstep_error::Error;
use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{
    error::{EmptyParenthesis, UnclosedParenthesis},
    expr::Expr,
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.expect_token(&[TokenKind::OpenParen])?;

        if input.peek_token().is_some_and(|token| token.kind == TokenKind::CloseParen) {
            let close_paren = input.next_token()?;
            return Err(Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                EmptyParenthesis,
            ));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_paren = input.expect_token(&[TokenKind::CloseParen])
            .map_err(|_| Error::new(vec![open_paren.span.clone()], UnclosedParenthesis { opening: true }))?;

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
