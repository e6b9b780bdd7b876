//! Identity elements, distribution, commutativity, multiplication by zero and the symmetric
//! property of equality.

use crate::{
    expr::{Builder, Expr, ExprKind, RelOp},
    step::Step,
};
use super::{Check, Context, Filters, StepChecker};

pub(super) const CHECKS: &[Check] = &[
    Check::symmetric("add_zero", add_zero).unfilterable(),
    Check::symmetric("mul_one", mul_one).unfilterable(),
    Check::symmetric("distribution", distribution),
    Check::forward("commute_addition", commute_addition).unfilterable(),
    Check::forward("commute_multiplication", commute_multiplication).unfilterable(),
    Check::symmetric("mul_by_zero", mul_by_zero),
    Check::symmetric("symmetric_property", symmetric_property),
];

/// Checks that may run while verifying the rest of a sum after distributing one of its terms.
const AFTER_DISTRIBUTION: &[&str] = &[
    "distribution",
    "neg_is_mul_neg_one",
    "sub_is_neg",
    "mul_two_negs_is_pos",
    "double_negative",
];

/// Removes the operands of `prev` that are equivalent to `identity`, then checks the remaining
/// sum or product against `next`.
fn remove_identity(
    checker: &StepChecker,
    prev: &Expr,
    next: &Expr,
    context: &Context,
    identity: i64,
    message: &'static str,
) -> Option<Vec<Step>> {
    let builder = checker.builder();
    let (operands, implicit) = match &prev.kind {
        ExprKind::Add(terms) if identity == 0 => (terms, false),
        ExprKind::Mul { factors, implicit } if identity == 1 => (factors, *implicit),
        _ => return None,
    };

    let identity_node = builder.int(identity);
    let mut identity_steps = Vec::new();
    let mut with_identity = Vec::with_capacity(operands.len());
    let mut rest = Vec::new();
    for operand in operands {
        match checker.check_step_with(operand, &identity_node, context) {
            Some(steps) => {
                identity_steps.extend(steps);
                with_identity.push(identity_node.clone());
            },
            None => {
                with_identity.push(operand.clone());
                rest.push(operand.clone());
            },
        }
    }
    if rest.len() == operands.len() {
        return None;
    }

    let new_prev = if identity == 0 {
        builder.add_terms(rest)
    } else {
        builder.mul_factors(rest, implicit)
    };
    let steps = checker.check_step_with(&new_prev, next, context)?;
    let own = context.step(message, prev.with_children(with_identity), new_prev);
    Some(context.arrange(vec![identity_steps, vec![own], steps]))
}

/// `a + 0 -> a`
fn add_zero(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    remove_identity(checker, prev, next, context, 0, "addition with identity")
}

/// `a * 1 -> a`
fn mul_one(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    remove_identity(checker, prev, next, context, 1, "multiplication with identity")
}

/// Turns a subtraction into a plain negation, so it can become a factor of a product.
fn as_factor(builder: &Builder, term: &Expr) -> Expr {
    match &term.kind {
        ExprKind::Neg { arg, subtraction: true } => builder.neg(arg.clone(), false),
        _ => term.clone(),
    }
}

/// Expands a product of two factors, one of which is a sum: `a(b + c) -> ab + ac`.
fn distribute_product(builder: &Builder, product: &Expr) -> Option<Expr> {
    let ExprKind::Mul { factors, implicit } = &product.kind else {
        return None;
    };
    let [left, right] = factors.as_slice() else {
        return None;
    };

    let terms = if let ExprKind::Add(terms) = &right.kind {
        terms
            .iter()
            .map(|term| builder.mul(vec![left.clone(), as_factor(builder, term)], *implicit))
            .collect()
    } else if let ExprKind::Add(terms) = &left.kind {
        terms
            .iter()
            .map(|term| builder.mul(vec![as_factor(builder, term), right.clone()], *implicit))
            .collect()
    } else {
        return None;
    };
    Some(builder.add(terms))
}

/// `a(b + c) -> ab + ac`, and `ab + ac -> a(b + c)` in reverse.
///
/// Inside a sum, every term that can be distributed is tried and the explanation with the fewest
/// steps is kept.
fn distribution(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let builder = checker.builder();
    match (&prev.kind, &next.kind) {
        (ExprKind::Add(terms), ExprKind::Add(_)) => {
            let context = &context.with_filters(Filters {
                allowed: Some(AFTER_DISTRIBUTION),
                ..Filters::default()
            });

            terms
                .iter()
                .enumerate()
                .filter_map(|(i, term)| {
                    let (forward, backward, replacement) = match &term.kind {
                        ExprKind::Neg { arg, subtraction: true } if arg.is_add() => {
                            let message = "negation is the same as multiplying by negative one";
                            let product = builder.mul(vec![builder.int(-1), arg.clone()], false);
                            (message, message, vec![product])
                        },
                        _ => ("distribution", "factoring", distribute_product(builder, term)?.terms()),
                    };

                    // the expanded terms are spliced into the sum, so the step covers all of it
                    let mut new_terms = terms[..i].to_vec();
                    new_terms.extend(replacement);
                    new_terms.extend_from_slice(&terms[i + 1..]);
                    let new_prev = builder.add(new_terms);
                    let steps = checker.check_step_with(&new_prev, next, context)?;
                    let own = context.directed_step(forward, backward, prev.clone(), new_prev);
                    Some(context.arrange(vec![vec![own], steps]))
                })
                .min_by_key(Vec::len)
        },
        (ExprKind::Mul { .. }, ExprKind::Add(_)) => {
            let new_prev = distribute_product(builder, prev)?;
            let steps = checker.check_step_with(&new_prev, next, context)?;
            let own = context.directed_step("distribution", "factoring", prev.clone(), new_prev);
            Some(context.arrange(vec![vec![own], steps]))
        },
        _ => None,
    }
}

/// `a + b -> b + a`
fn commute_addition(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (ExprKind::Add(a), ExprKind::Add(b)) = (&prev.kind, &next.kind) else {
        return None;
    };
    let (steps, reordered) = checker.match_operands(a, b, context)?;
    if !reordered {
        return None;
    }
    let own = context.step("commutative property", prev.clone(), next.clone());
    Some(context.arrange(vec![steps, vec![own]]))
}

/// `ab -> ba`
fn commute_multiplication(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let (ExprKind::Mul { factors: a, .. }, ExprKind::Mul { factors: b, .. }) = (&prev.kind, &next.kind) else {
        return None;
    };
    let (steps, reordered) = checker.match_operands(a, b, context)?;
    if !reordered {
        return None;
    }
    let own = context.step("commutative property", prev.clone(), next.clone());
    Some(context.arrange(vec![vec![own], steps]))
}

/// `0a -> 0`, and `0 -> 0a` in reverse.
fn mul_by_zero(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Mul { factors, .. } = &prev.kind else {
        return None;
    };
    let zero = checker.builder().int(0);
    let zero_steps = factors
        .iter()
        .find_map(|factor| checker.check_step_with(factor, &zero, context))?;
    let steps = checker.check_step_with(&zero, next, context)?;
    let own = context.step("multiplication by zero", prev.clone(), zero);
    Some(context.arrange(vec![zero_steps, vec![own], steps]))
}

/// `a = b -> b = a`
///
/// Each side must match the other side of `next` exactly, or up to the order of its operands.
/// Only tried in reverse, so that it comes last in an explanation.
fn symmetric_property(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    if !context.is_reversed() {
        return None;
    }
    let (
        ExprKind::Relation { op: RelOp::Eq, args: a },
        ExprKind::Relation { op: RelOp::Eq, args: b },
    ) = (&prev.kind, &next.kind) else {
        return None;
    };
    if a.len() != b.len() {
        return None;
    }

    let swapped_args = a.iter().rev().cloned().collect::<Vec<_>>();
    let mut steps = Vec::new();
    for (swapped_arg, next_arg) in swapped_args.iter().zip(b) {
        if swapped_arg == next_arg {
            continue;
        }
        let reordered = commute_addition(checker, swapped_arg, next_arg, context)
            .or_else(|| commute_multiplication(checker, swapped_arg, next_arg, context))?;
        steps.extend(reordered);
    }
    let swapped = checker.builder().eq(swapped_args);
    let own = context.step("symmetric property", prev.clone(), swapped);
    Some(context.arrange(vec![vec![own], steps]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::checker::tests::check;

    #[test]
    fn addition_with_zero() {
        let result = check("a + 0", "a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["addition with identity"]);

        let result = check("a", "a + 0");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["addition with identity"]);
    }

    #[test]
    fn multiplication_with_one() {
        let result = check("1 * a", "a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiplication with identity"]);
        assert_eq!(result.steps[0].before.to_string(), "1 * a");
        assert_eq!(result.steps[0].after.to_string(), "a");
    }

    #[test]
    fn distribute_product() {
        let result = check("2(x + y)", "2x + 2y");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["distribution"]);
    }

    #[test]
    fn factor_sum() {
        let result = check("2x + 2y", "2(x + y)");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["factoring"]);
    }

    #[test]
    fn distribute_inside_sum() {
        let result = check("2(x + y) + 1", "2x + 2y + 1");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["distribution"]);
        assert_eq!(result.steps[0].before.to_string(), "2(x + y) + 1");
        assert_eq!(result.steps[0].after.to_string(), "2x + 2y + 1");

        let result = check("2x + 2y + 1", "2(x + y) + 1");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["factoring"]);
    }

    #[test]
    fn commute_factors() {
        let result = check("ab", "ba");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["commutative property"]);
    }

    #[test]
    fn zero_product() {
        let result = check("0 * a", "0");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiplication by zero"]);

        let result = check("0", "0a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiplication by zero"]);
        assert_eq!(result.steps[0].after.to_string(), "0a");
    }

    #[test]
    fn swap_sides() {
        let result = check("x = 5", "5 = x");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["symmetric property"]);

        let result = check("x + 1 = 5", "5 = 1 + x");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["commutative property", "symmetric property"]);
    }

    #[test]
    fn swapped_sides_are_not_rewritten() {
        let result = check("x = 2 + 3", "5 = x");
        assert!(result.equivalent);
        assert!(!result.messages().contains(&"symmetric property"));
    }
}
