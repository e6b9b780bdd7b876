//! Evaluation of constant arithmetic, and prime factorization of fractions.

use rug::Rational;
use crate::{
    expr::{Builder, Expr, ExprKind},
    primitive::{is_composite, prime_factors},
    step::Step,
};
use super::{Check, Context, StepChecker};

pub(super) const CHECKS: &[Check] = &[
    Check::symmetric("eval_add", eval_add).unfilterable(),
    Check::symmetric("eval_mul", eval_mul).unfilterable(),
    Check::forward("prime_factorization", prime_factorization),
];

/// Splits operands into the values of the constant ones and the remaining ones.
fn partition(operands: &[Expr], fractions: bool) -> (Vec<Rational>, Vec<Expr>) {
    let mut values = Vec::new();
    let mut rest = Vec::new();
    for operand in operands {
        match operand.constant_value(fractions) {
            Some(value) => values.push(value),
            None => rest.push(operand.clone()),
        }
    }
    (values, rest)
}

/// Shared implementation of [`eval_add`] and [`eval_mul`]: the constant operands of `prev` must
/// combine to the constant operands of `next`, which must have fewer of them, and the remaining
/// operands must match.
fn eval_operands(
    checker: &StepChecker,
    prev_operands: &[Expr],
    next_operands: &[Expr],
    context: &Context,
    combine: fn(Vec<Rational>) -> Rational,
) -> Option<Vec<Step>> {
    let fractions = checker.options().eval_fractions;
    let (prev_values, prev_rest) = partition(prev_operands, fractions);
    if prev_values.len() < 2 {
        return None;
    }
    let (next_values, next_rest) = partition(next_operands, fractions);
    if next_values.len() >= prev_values.len() || combine(prev_values) != combine(next_values) {
        return None;
    }
    checker.match_operands(&prev_rest, &next_rest, context).map(|(steps, _)| steps)
}

/// `2 + 3 + x -> 5 + x`
fn eval_add(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Add(terms) = &prev.kind else {
        return None;
    };
    let steps = eval_operands(checker, terms, &next.terms(), context, |values| {
        values.into_iter().fold(Rational::new(), |sum, value| sum + value)
    })?;
    let own = context.step("evaluation of addition", prev.clone(), next.clone());
    Some(context.arrange(vec![vec![own], steps]))
}

/// `(2)(3)x -> 6x`
fn eval_mul(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Mul { factors, .. } = &prev.kind else {
        return None;
    };
    let steps = eval_operands(checker, factors, &next.factors(), context, |values| {
        values.into_iter().fold(Rational::from(1), |product, value| product * value)
    })?;
    let own = context.step("evaluation of multiplication", prev.clone(), next.clone());
    Some(context.arrange(vec![vec![own], steps]))
}

/// Returns true if the expression is a composite integer literal.
fn is_composite_literal(expr: &Expr) -> bool {
    expr.as_number()
        .is_some_and(|value| value.is_integer() && is_composite(value.numer()))
}

/// Replaces every composite integer factor of `side` with its prime factors.
fn factorize(builder: &Builder, side: &Expr) -> Expr {
    let implicit = matches!(side.kind, ExprKind::Mul { implicit: true, .. });
    let factors = side
        .factors()
        .into_iter()
        .flat_map(|factor| {
            if is_composite_literal(&factor) {
                let value = factor.as_number().map(|value| value.numer().clone()).unwrap_or_default();
                prime_factors(&value)
                    .into_iter()
                    .map(|prime| builder.rational(Rational::from(prime)))
                    .collect()
            } else {
                vec![factor]
            }
        })
        .collect();
    builder.mul_factors(factors, implicit)
}

/// `24 / 6 -> (2 * 2 * 2 * 3) / (2 * 3)`
fn prime_factorization(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (num, den) = prev.as_div()?;
    let has_composite = |side: &Expr| side.factors().iter().any(is_composite_literal);
    if !has_composite(num) && !has_composite(den) {
        return None;
    }

    let builder = checker.builder();
    let new_prev = builder.div(factorize(builder, num), factorize(builder, den));
    let steps = checker.check_step_with(&new_prev, next, context)?;
    let own = context.step("prime factorization", prev.clone(), new_prev);
    Some(context.arrange(vec![vec![own], steps]))
}
