use mathstep_error::Error;
use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{error::UnclosedParenthesis, expr::Expr, Parse, Parser};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A root, written as `sqrt(x)` or `root(x, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Root {
    /// The expression under the root.
    pub radicand: Box<Expr>,

    /// The index of the root. `sqrt(x)` has no explicit index.
    pub index: Option<Box<Expr>>,

    /// The region of the source code that this root was parsed from.
    pub span: Range<usize>,
}

impl Root {
    /// Returns the span of the root.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Root {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.expect_token(&[TokenKind::Sqrt, TokenKind::Root])?;
        let open_paren = input.expect_token(&[TokenKind::OpenParen])?;
        let radicand = input.try_parse::<Expr>()?;

        let index = if name.kind == TokenKind::Root {
            input.expect_token(&[TokenKind::Comma])?;
            Some(Box::new(input.try_parse::<Expr>()?))
        } else {
            None
        };

        let close_paren = input.expect_token(&[TokenKind::CloseParen])
            .map_err(|_| Error::new(vec![open_paren.span.clone()], UnclosedParenthesis { opening: true }))?;

        Ok(Self {
            radicand: Box::new(radicand),
            index,
            span: name.span.start..close_paren.span.end,
        })
    }
}
