//! The equation-level rewrites the solver chains together.
//!
//! Each transform takes the current equation and the variable being solved for, and returns the
//! step rewriting the whole equation if it applies.

use crate::{
    expr::{Expr, ExprKind},
    simplify::{constant, Monomial},
    step::Step,
};
use super::Solver;

/// A rewrite of an equation, given the variable being solved for.
pub type Transform = fn(&Solver, &Expr, &Expr) -> Option<Step>;

/// Returns true if the variable should end up on the left side of the equation.
fn variable_on_left(left: &Expr, right: &Expr, ident: &Expr) -> bool {
    left.contains_identifier(ident) || !right.contains_identifier(ident)
}

/// Simplifies each side of the equation on its own.
///
/// `2x + 5 - 5 = 10 - 5` -> `2x = 5`
pub fn simplify_both_sides(solver: &Solver, eq: &Expr, _: &Expr) -> Option<Step> {
    let (left, right) = eq.sides()?;
    let left_step = solver.simplifier().simplify(left);
    let right_step = solver.simplifier().simplify(right);
    if left_step.is_none() && right_step.is_none() {
        return None;
    }

    let new_left = left_step.as_ref().map_or_else(|| left.clone(), |step| step.after.clone());
    let new_right = right_step.as_ref().map_or_else(|| right.clone(), |step| step.after.clone());
    let new_eq = solver.builder().eq(vec![new_left, new_right]);
    Some(
        Step::new("simplify both sides", eq.clone(), new_eq)
            .with_substeps(left_step.into_iter().chain(right_step).collect()),
    )
}

/// Moves the terms without the variable to one side and the terms with it to the other, one term
/// at a time.
///
/// `2x + 3 = x + 7` -> `2x + 3 - 3 - x = x + 7 - 3 - x`
pub fn move_terms_to_one_side(solver: &Solver, eq: &Expr, ident: &Expr) -> Option<Step> {
    let builder = solver.builder();
    let (left, right) = eq.sides()?;
    if !eq.contains_identifier(ident) {
        return None;
    }

    let (variable_side, constant_side) = if variable_on_left(left, right, ident) {
        (left, right)
    } else {
        (right, left)
    };
    let moved = variable_side
        .terms()
        .into_iter()
        .filter(|term| !term.contains_identifier(ident))
        .chain(constant_side.terms().into_iter().filter(|term| term.contains_identifier(ident)))
        .filter(|term| !term.is_number_eq(0))
        .collect::<Vec<_>>();
    if moved.is_empty() {
        return None;
    }

    let append = |side: &Expr, term: Expr| {
        let mut terms = side.terms();
        terms.push(term);
        builder.add(terms)
    };
    let mut steps = Vec::with_capacity(moved.len());
    let (mut new_left, mut new_right) = (left.clone(), right.clone());
    let mut current = eq.clone();
    for term in moved {
        let (message, added) = match &term.kind {
            ExprKind::Neg { arg, .. } => ("add the same value to both sides", arg.clone()),
            _ => ("subtract the same value from both sides", builder.neg(term.clone(), true)),
        };
        new_left = append(&new_left, added.clone());
        new_right = append(&new_right, added);
        let next = builder.eq(vec![new_left.clone(), new_right.clone()]);
        steps.push(Step::new(message, current, next.clone()));
        current = next;
    }

    Some(Step::new("move terms to one side", eq.clone(), current).with_substeps(steps))
}

/// Divides both sides by the integer coefficient of the variable, once the variable side is a
/// single term.
///
/// `2x = 5` -> `2x / 2 = 5 / 2`
pub fn divide_both_sides(solver: &Solver, eq: &Expr, ident: &Expr) -> Option<Step> {
    let builder = solver.builder();
    let (left, right) = eq.sides()?;
    let variable_side = if variable_on_left(left, right, ident) { left } else { right };

    let monomial = Monomial::of(variable_side);
    if monomial.factors.as_slice() != std::slice::from_ref(ident)
        || monomial.coefficient == 1
        || monomial.coefficient == 0
        || !monomial.coefficient.is_integer()
    {
        return None;
    }

    let divide = |side: &Expr| builder.div(side.clone(), constant(builder, &monomial.coefficient));
    let new_eq = builder.eq(vec![divide(left), divide(right)]);
    Some(Step::new("divide both sides", eq.clone(), new_eq))
}

/// Multiplies both sides by the denominator of the variable side, if it is a constant.
///
/// `x / 2 = 3` -> `2 * x / 2 = 2 * 3`
pub fn multiply_both_sides(solver: &Solver, eq: &Expr, ident: &Expr) -> Option<Step> {
    let builder = solver.builder();
    let (left, right) = eq.sides()?;
    let variable_side = if variable_on_left(left, right, ident) { left } else { right };

    let (num, den) = variable_side.as_div()?;
    if !num.contains_identifier(ident) || den.contains_identifier(ident) {
        return None;
    }
    match den.constant_value(false) {
        Some(value) if value != 0 => (),
        _ => return None,
    }

    let multiply = |side: &Expr| builder.mul(vec![den.clone(), side.clone()], false);
    let new_eq = builder.eq(vec![multiply(left), multiply(right)]);
    Some(Step::new("multiply both sides", eq.clone(), new_eq))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{expr::Builder, parse};
    use super::*;

    fn apply(transform: Transform, source: &str) -> Option<Step> {
        let builder = Builder::new();
        let eq = parse(&builder, source).unwrap();
        let ident = builder.identifier("x");
        transform(&Solver::new(builder), &eq, &ident)
    }

    #[test]
    fn move_constants_and_variables() {
        let step = apply(move_terms_to_one_side, "2x + 3 = x + 7").unwrap();
        assert_eq!(step.after.to_string(), "2x + 3 - 3 - x = x + 7 - 3 - x");
        assert_eq!(step.substep_messages(), vec![
            "subtract the same value from both sides",
            "subtract the same value from both sides",
        ]);
    }

    #[test]
    fn move_subtracted_term() {
        let step = apply(move_terms_to_one_side, "2x - 4 = 6").unwrap();
        assert_eq!(step.after.to_string(), "2x - 4 + 4 = 6 + 4");
        assert_eq!(step.substep_messages(), vec!["add the same value to both sides"]);
    }

    #[test]
    fn variable_on_the_right() {
        let step = apply(move_terms_to_one_side, "3 = 2x + 3").unwrap();
        assert_eq!(step.after.to_string(), "3 - 3 = 2x + 3 - 3");
        assert_eq!(apply(move_terms_to_one_side, "5 = x"), None);
    }

    #[test]
    fn nothing_to_move() {
        assert_eq!(apply(move_terms_to_one_side, "2x = 5"), None);
        assert_eq!(apply(move_terms_to_one_side, "y + 1 = 2"), None);
    }

    #[test]
    fn divide_by_coefficient() {
        let step = apply(divide_both_sides, "2x = 5").unwrap();
        assert_eq!(step.after.to_string(), "2x / 2 = 5 / 2");
        assert_eq!(apply(divide_both_sides, "-x = 5").unwrap().after.to_string(), "-x / -1 = 5 / -1");
        assert_eq!(apply(divide_both_sides, "x = 5"), None);
        assert_eq!(apply(divide_both_sides, "x / 2 = 3"), None);
        assert_eq!(apply(divide_both_sides, "2x + 1 = 5"), None);
    }

    #[test]
    fn multiply_by_denominator() {
        let step = apply(multiply_both_sides, "x / 2 = 3").unwrap();
        assert_eq!(step.after.to_string(), "2 * x / 2 = 2 * 3");
        assert_eq!(apply(multiply_both_sides, "2 / x = 3"), None);
        assert_eq!(apply(multiply_both_sides, "2x = 3"), None);
    }

    #[test]
    fn simplify_sides() {
        let step = apply(simplify_both_sides, "2x + 5 - 5 = 10 - 5").unwrap();
        assert_eq!(step.after.to_string(), "2x = 5");
        assert_eq!(step.substep_messages(), vec!["simplify expression", "simplify expression"]);
        assert_eq!(apply(simplify_both_sides, "2x = 5"), None);
    }
}
