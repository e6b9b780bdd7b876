//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the node to simplify and its parent, and
//! returns `Some(step)` describing the rewritten node if the rule applies, or `None` if it does
//! not.

pub mod add;
pub mod distribute;
pub mod fraction;
pub mod multiply;

use crate::{expr::{Builder, Expr, ExprKind}, step::Step};

/// If the expression is a sum, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let ExprKind::Add(terms) = &expr.kind {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a product, calls the given transformation function with the factors and
/// whether the product is implicit.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl FnOnce(&[Expr], bool) -> Option<Expr>) -> Option<Expr> {
    if let ExprKind::Mul { factors, implicit } = &expr.kind {
        f(factors, *implicit)
    } else {
        None
    }
}

/// If the expression is a quotient, calls the given transformation function with the numerator
/// and denominator.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_divide(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let ExprKind::Div(num, den) = &expr.kind {
        f(num, den)
    } else {
        None
    }
}

/// Applies the first rule that matches, in the fixed order the simplifier relies on.
///
/// Multiplication signs are normalized first so that every later rule sees them in front of the
/// product. Addition of a negative is turned back into subtraction last, since the other rules
/// match subtraction as the addition of a negative.
pub fn all(builder: &Builder, expr: &Expr, parent: Option<&Expr>) -> Option<Step> {
    multiply::simplify_multiplication(builder, expr)
        .or_else(|| distribute::distribute(builder, expr, parent))
        .or_else(|| add::collect_like_terms(builder, expr))
        .or_else(|| add::drop_parentheses(builder, expr))
        .or_else(|| multiply::evaluate_multiplication(builder, expr))
        .or_else(|| add::evaluate_addition(builder, expr))
        .or_else(|| fraction::reduce_fraction(builder, expr))
        .or_else(|| fraction::multiply_fractions(builder, expr))
        .or_else(|| fraction::evaluate_division(builder, expr))
        .or_else(|| multiply::repeated_multiplication_as_power(builder, expr))
        .or_else(|| add::add_negative_as_subtraction(builder, expr))
}
