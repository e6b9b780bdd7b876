//! Doing the same thing to both sides of an equation.

use crate::{expr::Expr, step::Step};
use super::{difference, Check, Context, StepChecker};

pub(super) const CHECKS: &[Check] = &[
    Check::forward("add_to_both_sides", add_to_both_sides),
    Check::forward("remove_from_both_sides", remove_from_both_sides),
    Check::forward("mul_both_sides", mul_both_sides),
    Check::forward("cancel_factor_on_both_sides", cancel_factor_on_both_sides),
    Check::symmetric("div_both_sides", div_both_sides),
];

const ADD: &str = "adding the same value to both sides";
const SUB: &str = "subtracting the same value from both sides";
const MUL: &str = "multiply both sides by the same value";
const DIV: &str = "divide both sides by the same value";

/// Returns the operands `next_side` has in addition to `prev_side`, splitting both sides into
/// terms or factors with `split`. `prev_side` may appear whole or already split.
fn added_operands(prev_side: &Expr, next_side: &Expr, split: fn(&Expr) -> Vec<Expr>) -> Option<Vec<Expr>> {
    let next_operands = split(next_side);
    let added = difference(&next_operands, std::slice::from_ref(prev_side))
        .or_else(|| difference(&next_operands, &split(prev_side)))?;
    (!added.is_empty()).then_some(added)
}

/// Returns the operands of `prev_side` that are missing from `next_side`, if `next_side` keeps
/// some but not all of them.
fn removed_operands(prev_side: &Expr, next_side: &Expr, split: fn(&Expr) -> Vec<Expr>) -> Option<Vec<Expr>> {
    let prev_operands = split(prev_side);
    if prev_operands.len() < 2 {
        return None;
    }
    let removed = difference(&prev_operands, &split(next_side))?;
    (!removed.is_empty()).then_some(removed)
}

/// `2x + 5 = 10 -> 2x + 5 - 5 = 10 - 5`
fn add_to_both_sides(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (prev_lhs, prev_rhs) = prev.sides()?;
    let (next_lhs, next_rhs) = next.sides()?;
    let lhs_added = added_operands(prev_lhs, next_lhs, Expr::terms)?;
    let rhs_added = added_operands(prev_rhs, next_rhs, Expr::terms)?;

    let builder = checker.builder();
    let subtracting = lhs_added.iter().all(Expr::is_subtraction);
    let steps = checker.check_step_with(&builder.add_terms(lhs_added), &builder.add_terms(rhs_added), context)?;
    if !steps.is_empty() {
        return None;
    }

    let message = if subtracting { SUB } else { ADD };
    Some(vec![context.step(message, prev.clone(), next.clone())])
}

/// `2x + 5 = 10 -> 2x = 10 - 5`
///
/// Rebuilds the equation with the inverse of the removed terms added to both sides, then checks
/// that against `next`.
fn remove_from_both_sides(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[ADD, SUB]) {
        return None;
    }
    let (prev_lhs, prev_rhs) = prev.sides()?;
    let (next_lhs, next_rhs) = next.sides()?;
    let removed = removed_operands(prev_lhs, next_lhs, Expr::terms)
        .or_else(|| removed_operands(prev_rhs, next_rhs, Expr::terms))?;

    let builder = checker.builder();
    let inverses = removed
        .iter()
        .map(|term| match term.neg_arg() {
            Some(arg) => arg.clone(),
            None => builder.neg(term.clone(), true),
        })
        .collect::<Vec<_>>();
    let message = if inverses.iter().all(Expr::is_subtraction) { SUB } else { ADD };
    let with_inverses = |side: &Expr| {
        let mut terms = side.terms();
        terms.extend(inverses.iter().cloned());
        builder.add(terms)
    };

    let new_prev = builder.eq(vec![with_inverses(prev_lhs), with_inverses(prev_rhs)]);
    let own = context.step(message, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

/// `x = 5 -> 2x = (5)(2)`
fn mul_both_sides(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (prev_lhs, prev_rhs) = prev.sides()?;
    let (next_lhs, next_rhs) = next.sides()?;
    let lhs_added = added_operands(prev_lhs, next_lhs, Expr::factors)?;
    let rhs_added = added_operands(prev_rhs, next_rhs, Expr::factors)?;

    let builder = checker.builder();
    let steps = checker.check_step_with(
        &builder.mul_factors(lhs_added, false),
        &builder.mul_factors(rhs_added, false),
        context,
    )?;
    if !steps.is_empty() {
        return None;
    }
    Some(vec![context.step(MUL, prev.clone(), next.clone())])
}

/// `2x = 10 -> x = 5`
///
/// Rebuilds the equation with both sides divided by the removed factors, then checks that
/// against `next`.
fn cancel_factor_on_both_sides(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[DIV]) {
        return None;
    }
    let (prev_lhs, prev_rhs) = prev.sides()?;
    let (next_lhs, next_rhs) = next.sides()?;
    let removed = removed_operands(prev_lhs, next_lhs, Expr::factors)
        .or_else(|| removed_operands(prev_rhs, next_rhs, Expr::factors))?;

    let builder = checker.builder();
    let divisor = builder.mul_factors(removed, true);
    let new_prev = builder.eq(vec![
        builder.div(prev_lhs.clone(), divisor.clone()),
        builder.div(prev_rhs.clone(), divisor),
    ]);
    let own = context.step(DIV, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

/// `2x = 10 -> 2x / 2 = 10 / 2`, and `x / 2 = 3 -> x = 6` by multiplying both sides in reverse.
///
/// The divisor is the denominator of a side of `next` whose numerator is the matching side of
/// `prev`. Both sides of `prev` are divided by it, and the result is checked against `next`.
fn div_both_sides(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if context.has_applied(&[DIV, MUL]) {
        return None;
    }
    let (prev_lhs, prev_rhs) = prev.sides()?;
    let (next_lhs, next_rhs) = next.sides()?;
    let divisor = [(prev_lhs, next_lhs), (prev_rhs, next_rhs)]
        .into_iter()
        .find_map(|(prev_side, next_side)| {
            let (num, den) = next_side.as_div()?;
            (num == prev_side).then_some(den)
        })?;

    let builder = checker.builder();
    let new_prev = builder.eq(vec![
        builder.div(prev_lhs.clone(), divisor.clone()),
        builder.div(prev_rhs.clone(), divisor.clone()),
    ]);
    let own = context.directed_step(DIV, MUL, prev.clone(), new_prev.clone());
    let steps = checker.check_step_with(&new_prev, next, &context.with_step(&own))?;
    Some(context.arrange(vec![vec![own], steps]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{checker::{tests::check, Options}, expr::Builder, parse};
    use super::*;

    #[test]
    fn subtract_from_both_sides() {
        let result = check("2x + 5 = 10", "2x + 5 - 5 = 10 - 5");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["subtracting the same value from both sides"]);
    }

    #[test]
    fn add_to_both_sides() {
        let result = check("x - 3 = 4", "x - 3 + 3 = 4 + 3");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["adding the same value to both sides"]);
    }

    #[test]
    fn different_values_on_each_side() {
        let result = check("2x + 5 = 10", "2x + 5 - 5 = 10 - 4");
        assert!(!result.equivalent);
    }

    #[test]
    fn move_term_across() {
        let result = check("2x + 5 = 10", "2x = 10 - 5");
        assert!(result.equivalent);
        assert_eq!(result.messages()[0], "subtracting the same value from both sides");
    }

    #[test]
    fn multiply_both_sides() {
        let result = check("x / 2 = 3", "2 * x / 2 = 2 * 3");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiply both sides by the same value"]);
    }

    #[test]
    fn divide_both_sides() {
        let result = check("2x = 10", "2x / 2 = 10 / 2");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["divide both sides by the same value"]);
    }

    #[test]
    fn cancel_coefficient() {
        let result = check("2x = 10", "x = 5");
        assert!(result.equivalent);
        assert_eq!(result.messages()[0], "divide both sides by the same value");
    }

    #[test]
    fn multiply_to_undo_division() {
        let result = check("x / 2 = 3", "x = 6");
        assert!(result.equivalent);
        assert_eq!(result.messages().last(), Some(&"multiply both sides by the same value"));
        assert!(result.successful_checks.contains(&"div_both_sides"));
    }

    #[test]
    fn divide_to_introduce_division() {
        let result = check("x = 6", "x / 2 = 3");
        assert!(result.equivalent);
        assert_eq!(result.messages()[0], "divide both sides by the same value");
        assert_eq!(result.steps[0].after.to_string(), "x / 2 = 6 / 2");
    }

    #[test]
    fn unequal_operations() {
        let cases = [
            ("2x + 5 = 10", "2x = 3"),
            ("2x = 10", "x = 6"),
            ("x / 2 = 3", "x = 5"),
            ("x = 6", "x / 2 = 2"),
        ];
        for (prev, next) in cases {
            assert!(!check(prev, next).equivalent, "{} -> {}", prev, next);
        }
    }

    #[test]
    fn history_stops_repeated_division() {
        let builder = Builder::new();
        let prev = parse(&builder, "2x = 10").unwrap();
        let next = parse(&builder, "2x / 2 = 10 / 2").unwrap();
        let checker = StepChecker::new(builder, Options::default());
        assert!(div_both_sides(&checker, &prev, &next, &Context::new()).is_some());

        for message in [DIV, MUL] {
            let context = Context::new().with_step(&Step::new(message, prev.clone(), next.clone()));
            assert_eq!(div_both_sides(&checker, &prev, &next, &context), None);
        }
    }
}
