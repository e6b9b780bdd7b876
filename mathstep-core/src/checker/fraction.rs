//! Fraction rules.
//!
//! The checks that rewrite a fraction into another fraction-shaped expression, without making it
//! smaller, can undo each other. Each of them refuses to run on a path where it was already
//! applied.

use crate::{expr::{Expr, ExprKind}, step::Step};
use super::{intersection, difference, Check, Context, StepChecker};

pub(super) const CHECKS: &[Check] = &[
    Check::symmetric("division_by_one", division_by_one),
    Check::symmetric("division_by_same_value", division_by_same_value),
    Check::forward("extract_common_factors", extract_common_factors),
    Check::symmetric("div_by_fraction", div_by_fraction),
    Check::symmetric("mul_fractions", mul_fractions),
    Check::symmetric("div_is_mul_by_one_over", div_is_mul_by_one_over),
];

const EXTRACT: &str = "extract common factors from numerator and denominator";
const DIV_BY_FRACTION: &str = "dividing by a fraction is the same as multiplying by the reciprocal";
const MUL_FRACTIONS: &str = "multiplying fractions";
const DIV_IS_MUL: &str = "fraction is the same as multiplying by one over";
const MUL_IS_DIV: &str = "multiplying by one over something results in a fraction";

/// `a / 1 -> a`
fn division_by_one(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (num, den) = prev.as_div()?;
    let one = checker.builder().int(1);
    let den_steps = checker.check_step_with(den, &one, context)?;
    let num_steps = checker.check_step_with(num, next, context)?;
    let own = context.step("division by one", prev.with_children(vec![next.clone(), one]), next.clone());
    Some(context.arrange(vec![den_steps, num_steps, vec![own]]))
}

/// `a / a -> 1`
fn division_by_same_value(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (num, den) = prev.as_div()?;
    let same_steps = checker.check_step_with(num, den, context)?;
    let one = checker.builder().int(1);
    let steps = checker.check_step_with(&one, next, context)?;
    let own = context.step("division by the same value", prev.clone(), one);
    Some(context.arrange(vec![same_steps, vec![own], steps]))
}

/// `ab / ac -> (a / a)(b / c)`
fn extract_common_factors(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[EXTRACT]) {
        return None;
    }
    let (num, den) = prev.as_div()?;
    let num_factors = num.factors();
    let den_factors = den.factors();
    let common = intersection(&num_factors, &den_factors)
        .into_iter()
        .filter(|factor| !factor.is_number_eq(1))
        .collect::<Vec<_>>();
    if common.is_empty() {
        return None;
    }
    let num_rest = difference(&num_factors, &common)?;
    let den_rest = difference(&den_factors, &common)?;
    if num_rest.is_empty() && den_rest.is_empty() {
        return None;
    }

    let builder = checker.builder();
    let new_prev = builder.mul(vec![
        builder.div(builder.mul_factors(common.clone(), false), builder.mul_factors(common, false)),
        builder.div(builder.mul_factors(num_rest, false), builder.mul_factors(den_rest, false)),
    ], false);
    let own = context.step(EXTRACT, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

/// `a / (b / c) -> a * c / b`
fn div_by_fraction(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[DIV_BY_FRACTION]) {
        return None;
    }
    let (num, den) = prev.as_div()?;
    let (den_num, den_den) = den.as_div()?;

    let builder = checker.builder();
    let new_prev = builder.mul(vec![num.clone(), builder.div(den_den.clone(), den_num.clone())], false);
    let own = context.step(DIV_BY_FRACTION, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

/// `(a / b)(c / d) -> ac / bd`
fn mul_fractions(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[MUL_FRACTIONS]) {
        return None;
    }
    let ExprKind::Mul { factors, .. } = &prev.kind else {
        return None;
    };
    let (nums, dens): (Vec<_>, Vec<_>) = factors
        .iter()
        .map(|factor| factor.as_div().map(|(num, den)| (num.clone(), den.clone())))
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .unzip();

    let builder = checker.builder();
    let new_prev = builder.div(builder.mul(nums, false), builder.mul(dens, false));
    let own = context.step(MUL_FRACTIONS, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

/// `a / b -> a * 1 / b`, and `a * 1 / b -> a / b` in reverse.
fn div_is_mul_by_one_over(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[DIV_IS_MUL, MUL_IS_DIV]) {
        return None;
    }
    let (num, den) = prev.as_div()?;
    if num.is_number_eq(1) {
        return None;
    }

    let builder = checker.builder();
    let new_prev = builder.mul(vec![num.clone(), builder.div(builder.int(1), den.clone())], false);
    let own = context.directed_step(DIV_IS_MUL, MUL_IS_DIV, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{checker::{tests::check, Options}, expr::Builder, parse};
    use super::*;

    #[test]
    fn one_over_as_fraction() {
        let result = check("a * 1/b", "a / b");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiplying by one over something results in a fraction"]);
    }

    #[test]
    fn fraction_as_one_over() {
        let result = check("a / b", "a * 1/b");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["fraction is the same as multiplying by one over"]);
    }

    #[test]
    fn one_as_fraction() {
        let result = check("1", "a / a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["division by the same value"]);
    }

    #[test]
    fn divide_by_one() {
        let result = check("x / 1", "x");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["division by one"]);
        assert_eq!(result.steps[0].before.to_string(), "x / 1");
    }

    #[test]
    fn multiply_fractions() {
        let result = check("a/b * c/d", "ac / bd");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiplying fractions"]);
    }

    #[test]
    fn cancel_factor() {
        let result = check("2a / a", "2");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec![
            "extract common factors from numerator and denominator",
            "division by the same value",
            "multiplication with identity",
            "division by one",
        ]);
    }

    #[test]
    fn divide_by_fraction() {
        let result = check("a / (b/c)", "a * c/b");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["dividing by a fraction is the same as multiplying by the reciprocal"]);
    }

    #[test]
    fn reciprocal() {
        let result = check("1 / (a/b)", "b / a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec![
            "dividing by a fraction is the same as multiplying by the reciprocal",
            "multiplication with identity",
        ]);
    }

    #[test]
    fn divide_by_unit_fraction() {
        let result = check("a / (1/b)", "ab");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec![
            "dividing by a fraction is the same as multiplying by the reciprocal",
            "division by one",
        ]);
    }

    #[test]
    fn history_stops_rewriting_back() {
        let builder = Builder::new();
        let prev = parse(&builder, "a / b").unwrap();
        let next = parse(&builder, "a * 1/b").unwrap();
        let checker = StepChecker::new(builder, Options::default());
        assert!(div_is_mul_by_one_over(&checker, &prev, &next, &Context::new()).is_some());

        let context = Context::new().with_step(&Step::new(MUL_IS_DIV, next.clone(), prev.clone()));
        assert_eq!(div_is_mul_by_one_over(&checker, &prev, &next, &context), None);
    }

    #[test]
    fn incorrect_cancellation() {
        assert!(!check("2x / 2", "2b").equivalent);
    }
}
