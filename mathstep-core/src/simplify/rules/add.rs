//! Simplification rules for sums, including collecting like terms.

use rug::Rational;
use crate::{
    expr::{Builder, Expr, ExprKind},
    simplify::monomial::{constant, Monomial},
    step::Step,
};
use super::do_add;

/// Writes a term of a sum after the first one as a subtraction if it is negated.
fn as_later_term(builder: &Builder, term: Expr) -> Expr {
    if let ExprKind::Neg { arg, subtraction: false } = &term.kind {
        return builder.neg(arg.clone(), true);
    }
    term
}

/// Combines like terms.
///
/// `3x + 4x = 7x`
/// `x + 1 + 4 = x + 5`
/// `4x - 3x - 1 = x - 1`
///
/// Terms are like when they have the same factors after removing their coefficients, in any
/// order. Each group takes the place of its first term. Sums of constants alone are left to
/// [`evaluate_addition`].
pub fn collect_like_terms(builder: &Builder, expr: &Expr) -> Option<Step> {
    struct Group {
        first: usize,
        total: Monomial,
        count: usize,
    }

    let opt = do_add(expr, |terms| {
        let monomials = terms.iter().map(Monomial::of).collect::<Vec<_>>();
        if monomials.iter().all(|monomial| monomial.factors.is_empty()) {
            return None;
        }

        let mut groups: Vec<Group> = Vec::new();
        for (i, monomial) in monomials.into_iter().enumerate() {
            match groups.iter_mut().find(|group| group.total.is_like(&monomial)) {
                Some(group) => {
                    group.total.coefficient += monomial.coefficient;
                    group.count += 1;
                },
                None => groups.push(Group { first: i, total: monomial, count: 1 }),
            }
        }
        if groups.iter().all(|group| group.count == 1) {
            return None;
        }

        let new_terms = groups
            .into_iter()
            .filter_map(|group| match group.count {
                1 => Some((terms[group.first].clone(), false)),
                _ if group.total.coefficient == 0 => None,
                _ => Some((group.total.to_expr(builder), true)),
            })
            .enumerate()
            .map(|(i, (term, collected))| {
                if i == 0 {
                    // the first group may have been cancelled
                    if let ExprKind::Neg { arg, subtraction: true } = &term.kind {
                        return builder.neg(arg.clone(), false);
                    }
                    term
                } else if collected {
                    as_later_term(builder, term)
                } else {
                    term
                }
            })
            .collect();
        Some(builder.add_terms(new_terms))
    })?;

    Some(Step::new("collect like terms", expr.clone(), opt))
}

/// Removes the parentheses around a sum that is a term of another sum.
///
/// `(x + 1) + 4 = x + 1 + 4`
pub fn drop_parentheses(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(Expr::is_add) {
            return None;
        }
        let new_terms = terms.iter().flat_map(Expr::terms).collect();
        Some(builder.add(new_terms))
    })?;

    Some(Step::new("drop parentheses", expr.clone(), opt))
}

/// Adds the constant terms of a sum together, in place of the first one.
///
/// `1 + 2 = 3`
pub fn evaluate_addition(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_add(expr, |terms| {
        let mut first = None;
        let mut sum = Rational::new();
        let mut rest = Vec::with_capacity(terms.len());
        let mut constants = 0;
        for term in terms {
            match term.constant_value(true) {
                Some(value) => {
                    constants += 1;
                    sum += value;
                    first.get_or_insert(rest.len());
                },
                None => rest.push(term.clone()),
            }
        }
        if constants < 2 {
            return None;
        }

        let position = first.unwrap_or(0);
        if sum != 0 || rest.is_empty() {
            let value = constant(builder, &sum);
            let value = if position > 0 { as_later_term(builder, value) } else { value };
            rest.insert(position, value);
        }
        Some(builder.add_terms(rest))
    })?;

    Some(Step::new("evaluate addition", expr.clone(), opt))
}

/// Writes every negated term after the first one as a subtraction.
///
/// `a + -b = a - b`
pub fn add_negative_as_subtraction(builder: &Builder, expr: &Expr) -> Option<Step> {
    let opt = do_add(expr, |terms| {
        let negated = |term: &Expr| matches!(term.kind, ExprKind::Neg { subtraction: false, .. });
        if !terms.iter().skip(1).any(negated) {
            return None;
        }
        let new_terms = terms
            .iter()
            .enumerate()
            .map(|(i, term)| if i > 0 { as_later_term(builder, term.clone()) } else { term.clone() })
            .collect();
        Some(builder.add(new_terms))
    })?;

    Some(Step::new("adding the inverse is the same as subtraction", expr.clone(), opt))
}
