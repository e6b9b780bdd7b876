//! Simplification rules for products.

use crate::{
    expr::{Builder, Expr, ExprKind},
    simplify::monomial::Monomial,
    step::Step,
};
use super::do_multiply;

/// Moves the signs of the factors in front of the product and drops factors of `1`.
///
/// `(-a)(b)(-c) = abc`
/// `(-3)(x) = -3x`
/// `1x = x`
///
/// Products containing a sum are left to distribution.
pub fn simplify_multiplication(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_multiply(expr, |factors, implicit| {
        if factors.iter().any(Expr::is_add) {
            return None;
        }

        let mut negative = false;
        let mut changed = false;
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            let mut factor = factor;
            while let ExprKind::Neg { arg, .. } = &factor.kind {
                negative = !negative;
                changed = true;
                factor = arg;
            }
            if factor.is_number_eq(1) {
                changed = true;
                continue;
            }
            new_factors.push(factor.clone());
        }
        if !changed {
            return None;
        }

        let product = builder.mul_factors(new_factors, implicit);
        Some(if negative { builder.neg(product, false) } else { product })
    })?;

    Some(Step::new("simplify multiplication", expr.clone(), opt))
}

/// Multiplies the constant factors of a product together.
///
/// `(3)(3)(x) = 9x`
/// `6 * 1/2 = 3`
pub fn evaluate_multiplication(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_multiply(expr, |factors, _| {
        let mut constants = 0;
        let mut monomial = Monomial::one();
        for factor in factors {
            match factor.constant_value(true) {
                Some(value) => {
                    constants += 1;
                    monomial.coefficient *= value;
                },
                None => monomial.factors.push(factor.clone()),
            }
        }

        (constants >= 2).then(|| monomial.to_expr(builder))
    })?;

    Some(Step::new("evaluate multiplication", expr.clone(), opt))
}

/// Groups equal factors into powers.
///
/// `xx = x^2`
/// `banana = ba^3n^2`
pub fn repeated_multiplication_as_power(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_multiply(expr, |factors, implicit| {
        let mut groups: Vec<(Expr, i64)> = Vec::new();
        for factor in factors {
            match groups.iter_mut().find(|(base, _)| base == factor && !base.is_number()) {
                Some((_, count)) => *count += 1,
                None => groups.push((factor.clone(), 1)),
            }
        }
        if groups.len() == factors.len() {
            return None;
        }

        let new_factors = groups
            .into_iter()
            .map(|(base, count)| match count {
                1 => base,
                _ => builder.pow(base, builder.int(count)),
            })
            .collect();
        Some(builder.mul_factors(new_factors, implicit))
    })?;

    Some(Step::new("repeated multiplication can be written as a power", expr.clone(), opt))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parse;
    use super::*;

    fn apply(rule: fn(&Builder, &Expr) -> Option<Step>, source: &str) -> Option<String> {
        let builder = Builder::new();
        let expr = parse(&builder, source).unwrap();
        rule(&builder, &expr).map(|step| step.after.to_string())
    }

    #[test]
    fn signs_move_to_front() {
        assert_eq!(apply(simplify_multiplication, "(-3)(x)"), Some("-3x".to_string()));
        assert_eq!(apply(simplify_multiplication, "(-a)(b)(-c)"), Some("abc".to_string()));
        assert_eq!(apply(simplify_multiplication, "1x"), Some("x".to_string()));
        assert_eq!(apply(simplify_multiplication, "2x"), None);
        assert_eq!(apply(simplify_multiplication, "(-2)(x + 1)"), None);
    }

    #[test]
    fn constants_multiply() {
        assert_eq!(apply(evaluate_multiplication, "(3)(3)(x)"), Some("9x".to_string()));
        assert_eq!(apply(evaluate_multiplication, "6 * 1/2"), Some("3".to_string()));
        assert_eq!(apply(evaluate_multiplication, "3x"), None);
    }

    #[test]
    fn powers() {
        assert_eq!(apply(repeated_multiplication_as_power, "banana"), Some("ba^3n^2".to_string()));
        assert_eq!(apply(repeated_multiplication_as_power, "(x)(x)"), Some("x^2".to_string()));
        assert_eq!(apply(repeated_multiplication_as_power, "(3)(3)"), None);
    }
}
