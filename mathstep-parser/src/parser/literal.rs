use mathstep_error::Error;
use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{expr::Expr, Parse, Parser};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `24` or `1.5`. The digits are kept as written so that no precision
/// is lost before the value is converted to an exact rational.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The digits of the number literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect_token(&[TokenKind::Int, TokenKind::Decimal])?;
        Ok(Self {
            value: token.lexeme.to_owned(),
            span: token.span,
        })
    }
}

/// A symbol literal, a single letter optionally followed by a subscript, such as `x` or `x_1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The subscript of the symbol, if any.
    pub subscript: Option<Box<Expr>>,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect_token(&[TokenKind::Name])?;
        let mut span = token.span;

        let subscript = if input.try_parse_with_fn(|input| input.expect_token(&[TokenKind::Underscore])).is_ok() {
            let subscript = Expr::parse_atom(input)?;
            span.end = subscript.span().end;
            Some(Box::new(subscript))
        } else {
            None
        };

        Ok(Self {
            name: token.lexeme.to_owned(),
            subscript,
            span,
        })
    }
}
