//! Simplification rules for quotients.

use rug::{Integer, Rational};
use crate::{
    checker::{difference, intersection},
    expr::{Builder, Expr, ExprKind},
    primitive::prime_factors,
    step::Step,
};
use super::{do_divide, do_multiply};

/// Splits one side of a quotient into its sign and its factors, with integer factors broken into
/// primes.
///
/// - `-12ab` -> `(true, [2, 2, 3, a, b])`
/// - `(-a)(-b)` -> `(false, [a, b])`
/// - `1` -> `(false, [])`
fn signed_factors(builder: &Builder, side: &Expr) -> (bool, Vec<Expr>) {
    fn split(builder: &Builder, expr: &Expr, negative: &mut bool, factors: &mut Vec<Expr>) {
        match &expr.kind {
            ExprKind::Neg { arg, .. } => {
                *negative = !*negative;
                split(builder, arg, negative, factors);
            },
            ExprKind::Mul { factors: inner, .. } => {
                for factor in inner {
                    split(builder, factor, negative, factors);
                }
            },
            ExprKind::Number(value) if value.is_integer() && *value != 0 => {
                factors.extend(
                    prime_factors(value.numer())
                        .into_iter()
                        .map(|prime| builder.rational(Rational::from(prime))),
                );
            },
            _ => factors.push(expr.clone()),
        }
    }

    let mut negative = false;
    let mut factors = Vec::new();
    split(builder, side, &mut negative, &mut factors);
    (negative, factors)
}

/// Rebuilds one side of a quotient from its factors, multiplying the integer factors back into a
/// single coefficient in front.
fn unsigned_side(builder: &Builder, factors: Vec<Expr>) -> Expr {
    let mut coefficient = Integer::from(1);
    let mut rest = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor.as_number() {
            Some(value) if value.is_integer() => coefficient *= value.numer(),
            _ => rest.push(factor),
        }
    }
    if coefficient != 1 {
        rest.insert(0, builder.rational(Rational::from(coefficient)));
    }
    builder.mul_factors(rest, true)
}

/// Cancels the factors common to the numerator and denominator of a quotient that is not made of
/// numbers alone.
///
/// `abc / bc = a`
/// `2x / 2 = x`
/// `-abc / bcd = -a / d`
/// `abc / -bcd = a / -d`
///
/// Each side keeps its own sign, unless both are negative or the denominator cancels entirely.
pub fn reduce_fraction(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_divide(expr, |num, den| {
        let (num_negative, num_factors) = signed_factors(builder, num);
        let (den_negative, den_factors) = signed_factors(builder, den);
        let symbolic = |factor: &Expr| !factor.is_number();
        if !num_factors.iter().any(symbolic) && !den_factors.iter().any(symbolic) {
            return None;
        }

        let common = intersection(&num_factors, &den_factors);
        let num_rest = difference(&num_factors, &common)?;
        let den_rest = difference(&den_factors, &common)?;
        let both_negative = num_negative && den_negative;
        if common.is_empty() && !den_rest.is_empty() && !both_negative {
            return None;
        }

        let signed = |negative: bool, side: Expr| if negative { builder.neg(side, false) } else { side };
        let new_num = unsigned_side(builder, num_rest);
        if den_rest.is_empty() {
            return Some(signed(num_negative != den_negative, new_num));
        }
        let new_den = unsigned_side(builder, den_rest);
        Some(builder.div(
            signed(num_negative && !both_negative, new_num),
            signed(den_negative && !both_negative, new_den),
        ))
    })?;

    Some(Step::new("reduce fraction", expr.clone(), opt))
}

/// Multiplies the quotients in a product into a single quotient.
///
/// `(5 / 6)(x) = 5x / 6`
/// `a/b * c/d = ac / bd`
pub fn multiply_fractions(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_multiply(expr, |factors, _| {
        if !factors.iter().any(Expr::is_div) {
            return None;
        }

        let mut nums = Vec::with_capacity(factors.len());
        let mut dens = Vec::new();
        for factor in factors {
            match factor.as_div() {
                Some((num, den)) => {
                    nums.push(num.clone());
                    dens.push(den.clone());
                },
                None => nums.push(factor.clone()),
            }
        }
        Some(builder.div(builder.mul_factors(nums, true), builder.mul_factors(dens, true)))
    })?;

    Some(Step::new("multiply fraction(s)", expr.clone(), opt))
}

/// Returns the value of a number literal, or of the negation of one.
fn signed_number(expr: &Expr) -> Option<Rational> {
    match &expr.kind {
        ExprKind::Number(value) => Some(value.clone()),
        ExprKind::Neg { arg, .. } => arg.as_number().map(|value| Rational::from(-value)),
        _ => None,
    }
}

/// Reduces a quotient of two numbers, moving the sign of the denominator to the numerator.
///
/// `4 / 6 = 2 / 3`
/// `6 / 3 = 2`
/// `5 / -1 = -5`
pub fn evaluate_division(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_divide(expr, |num, den| {
        let (num, den) = (signed_number(num)?, signed_number(den)?);
        if den == 0 {
            return None;
        }

        let quotient = Rational::from(&num / &den);
        if quotient.is_integer() {
            return Some(builder.rational(quotient));
        }
        if num.is_integer() && den.is_integer() && quotient.denom() == den.numer() {
            return None;
        }
        Some(builder.div(
            builder.rational(Rational::from(quotient.numer().clone())),
            builder.rational(Rational::from(quotient.denom().clone())),
        ))
    })?;

    Some(Step::new("evaluate division", expr.clone(), opt))
}
