//! Sign rules.

use crate::{expr::{Expr, ExprKind}, step::Step};
use super::{Check, Context, StepChecker};

pub(super) const CHECKS: &[Check] = &[
    Check::symmetric("add_inverse", add_inverse),
    Check::symmetric("sub_is_neg", sub_is_neg).prefer_cheaper(),
    Check::symmetric("mul_two_negs_is_pos", mul_two_negs_is_pos),
    Check::symmetric("double_negative", double_negative).prefer_cheaper(),
    Check::symmetric("neg_is_mul_neg_one", neg_is_mul_neg_one),
];

/// Checks `new_prev` against `next`, with a step from `prev` to `new_prev` in front.
fn rewrite(
    checker: &StepChecker,
    message: &'static str,
    prev: &Expr,
    new_prev: Expr,
    next: &Expr,
    context: &Context,
) -> Option<Vec<Step>> {
    let steps = checker.check_step_with(&new_prev, next, context)?;
    let own = context.step(message, prev.clone(), new_prev);
    Some(context.arrange(vec![vec![own], steps]))
}

/// `a + b - b -> a`
fn add_inverse(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Add(terms) = &prev.kind else {
        return None;
    };

    let mut removed = vec![false; terms.len()];
    for i in 0..terms.len() {
        if removed[i] {
            continue;
        }
        let inverse = (0..terms.len()).find(|&j| {
            i != j && !removed[j] && terms[j].neg_arg().is_some_and(|arg| *arg == terms[i])
        });
        if let Some(j) = inverse {
            removed[i] = true;
            removed[j] = true;
        }
    }
    if !removed.contains(&true) {
        return None;
    }

    let rest = terms
        .iter()
        .zip(&removed)
        .filter(|(_, removed)| !**removed)
        .map(|(term, _)| term.clone())
        .collect();
    let new_prev = checker.builder().add_terms(rest);
    rewrite(checker, "adding inverse", prev, new_prev, next, context)
}

/// `a - b -> a + -b`
///
/// A subtracted product carries the sign on its first factor: `a - bc -> a + (-b)c`.
fn sub_is_neg(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Add(terms) = &prev.kind else {
        return None;
    };
    let builder = checker.builder();

    terms
        .iter()
        .enumerate()
        .filter_map(|(i, term)| {
            let ExprKind::Neg { arg, subtraction: true } = &term.kind else {
                return None;
            };
            let replacement = match &arg.kind {
                ExprKind::Mul { factors, implicit } => {
                    let mut factors = factors.clone();
                    factors[0] = builder.neg(factors[0].clone(), false);
                    builder.mul(factors, *implicit)
                },
                _ => builder.neg(arg.clone(), false),
            };

            let mut new_terms = terms.clone();
            new_terms[i] = replacement;
            let new_prev = builder.add(new_terms);
            rewrite(checker, "subtracting is the same as adding the inverse", prev, new_prev, next, context)
        })
        .min_by_key(Vec::len)
}

/// `(-a)(-b) -> ab`
fn mul_two_negs_is_pos(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Mul { factors, implicit } = &prev.kind else {
        return None;
    };
    let [left, right] = factors.as_slice() else {
        return None;
    };
    let (
        ExprKind::Neg { arg: a, subtraction: false },
        ExprKind::Neg { arg: b, subtraction: false },
    ) = (&left.kind, &right.kind) else {
        return None;
    };

    let new_prev = checker.builder().mul(vec![a.clone(), b.clone()], *implicit);
    rewrite(checker, "multiplying two negatives is a positive", prev, new_prev, next, context)
}

/// `--a -> a`
fn double_negative(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Neg { arg, .. } = &prev.kind else {
        return None;
    };
    let ExprKind::Neg { arg: inner, subtraction: false } = &arg.kind else {
        return None;
    };
    rewrite(checker, "negative of a negative is positive", prev, inner.clone(), next, context)
}

/// `-a -> -1 * a`
fn neg_is_mul_neg_one(checker: &StepChecker, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
    let ExprKind::Neg { arg, subtraction: false } = &prev.kind else {
        return None;
    };
    if arg.is_number_eq(1) {
        return None;
    }

    let builder = checker.builder();
    let new_prev = builder.mul(vec![builder.int(-1), arg.clone()], false);
    rewrite(checker, "negation is the same as multiplying by negative one", prev, new_prev, next, context)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::checker::tests::check;

    #[test]
    fn cancel_inverse() {
        let result = check("a + -a", "0");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["adding inverse"]);
    }

    #[test]
    fn cancel_inverse_in_longer_sum() {
        let result = check("2x + 5 - 5", "2x");
        assert!(result.equivalent);
    }

    #[test]
    fn subtraction_as_addition() {
        let result = check("a - b", "a + -b");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["subtracting is the same as adding the inverse"]);

        let result = check("a + -b", "a - b");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["subtracting is the same as adding the inverse"]);
    }

    #[test]
    fn product_of_negatives() {
        let result = check("(-a)(-b)", "ab");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["multiplying two negatives is a positive"]);
    }

    #[test]
    fn negative_of_negative() {
        let result = check("--a", "a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["negative of a negative is positive"]);

        let result = check("a", "--a");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["negative of a negative is positive"]);
    }

    #[test]
    fn negation_as_product() {
        let result = check("-x", "-1 * x");
        assert!(result.equivalent);
        assert_eq!(result.messages(), vec!["negation is the same as multiplying by negative one"]);
    }

    #[test]
    fn sign_errors() {
        assert!(!check("a - b", "a + b").equivalent);
        assert!(!check("(-a)(b)", "ab").equivalent);
    }
}
