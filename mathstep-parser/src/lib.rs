//! Tokenizer and parser for the plain-text math syntax accepted by the toolkit, such as
//! `2x + 5 = 10`, `(x + 1)(x + 3)` or `24ab / 6a`.
//!
//! Single letters are separate symbols, so `abc` is the implicit product of `a`, `b` and `c`.
//! Implicit multiplication binds tighter than `/`, which binds tighter than `*`, so `ab / cd` is a
//! quotient of two products while `a * 1/b` is a product with a fraction as its second factor.

pub mod parser;
pub mod tokenizer;
