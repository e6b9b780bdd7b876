//! Simplification rules related to the distributive property.

use crate::{
    expr::{Builder, Expr, ExprKind},
    simplify::monomial::Monomial,
    step::Step,
};

const DISTRIBUTE: &str = "distribute";

/// Expands a product over its last factor that is a sum, returning the substeps taken and the
/// resulting terms.
///
/// `a(b - c)` goes through `a(b + -c)` and `ab + a(-c)` to `ab + -ac`.
fn expand(builder: &Builder, product: &Expr) -> Option<(Vec<Step>, Vec<Expr>)> {
    let ExprKind::Mul { factors, implicit } = &product.kind else {
        return None;
    };
    let index = factors.iter().rposition(Expr::is_add)?;
    let mut steps = Vec::new();

    let mut sum = factors[index].clone();
    if sum.terms().iter().any(Expr::is_subtraction) {
        let terms = sum
            .terms()
            .into_iter()
            .map(|term| match &term.kind {
                ExprKind::Neg { arg, subtraction: true } => builder.neg(arg.clone(), false),
                _ => term.clone(),
            })
            .collect();
        let new_sum = builder.add(terms);
        steps.push(Step::new("subtraction is the same as adding the negative", sum, new_sum.clone()));
        sum = new_sum;
    }

    let products = sum
        .terms()
        .into_iter()
        .map(|term| {
            let mut product_factors = factors.clone();
            product_factors[index] = term;
            builder.mul(product_factors, *implicit)
        })
        .collect::<Vec<_>>();
    let each_term = builder.add(products.clone());
    steps.push(Step::new("multiply each term", product.clone(), each_term.clone()));

    let mut one_negative = false;
    let mut two_negatives = false;
    let terms = products
        .iter()
        .map(|product| {
            let monomials = product.factors().iter().map(Monomial::of).collect::<Vec<_>>();
            match monomials.iter().filter(|monomial| monomial.coefficient < 0).count() {
                0 => (),
                negatives if negatives % 2 == 1 => one_negative = true,
                _ => two_negatives = true,
            }
            monomials
                .into_iter()
                .fold(Monomial::one(), Monomial::mul)
                .to_expr(builder)
        })
        .collect::<Vec<_>>();

    let message = if two_negatives {
        "multiplying two negatives is a positive"
    } else if one_negative {
        "multiplying a negative by a positive is negative"
    } else {
        "multiply monomials"
    };
    steps.push(Step::new(message, each_term, builder.add(terms.clone())));
    Some((steps, terms))
}

/// Writes the negated terms after the first one as subtractions, recording a substep if any
/// changed.
fn with_subtraction(builder: &Builder, sum: Expr, steps: &mut Vec<Step>) -> Expr {
    let ExprKind::Add(terms) = &sum.kind else {
        return sum;
    };
    if !terms.iter().skip(1).any(|term| matches!(term.kind, ExprKind::Neg { subtraction: false, .. })) {
        return sum;
    }

    let new_terms = terms
        .iter()
        .enumerate()
        .map(|(i, term)| match &term.kind {
            ExprKind::Neg { arg, subtraction: false } if i > 0 => builder.neg(arg.clone(), true),
            _ => term.clone(),
        })
        .collect();
    let new_sum = builder.add(new_terms);
    steps.push(Step::new("adding the negative is the same as subtraction", sum, new_sum.clone()));
    new_sum
}

/// Distributes the first term of a sum that can be distributed, splicing the resulting terms into
/// the sum.
///
/// `3(x + 1) + 4 = 3x + 3 + 4`
/// `3 - (x + 1) = 3 - x - 1`
fn distribute_term(builder: &Builder, sum: &Expr, terms: &[Expr]) -> Option<Step> {
    terms.iter().enumerate().find_map(|(i, term)| {
        let (steps, replacement) = match &term.kind {
            ExprKind::Mul { .. } => expand(builder, term)?,
            ExprKind::Neg { arg, subtraction: true } if arg.factors().iter().any(Expr::is_add) => {
                let mut factors = vec![builder.int(-1)];
                factors.extend(arg.factors());
                let product = builder.mul(factors, false);
                let own = Step::new(
                    "negation is the same as multiplying by negative one",
                    term.clone(),
                    product.clone(),
                );
                let (steps, replacement) = expand(builder, &product)?;
                (std::iter::once(own).chain(steps).collect(), replacement)
            },
            _ => return None,
        };

        let mut steps = steps;
        let mut new_terms = terms[..i].to_vec();
        new_terms.extend(replacement);
        new_terms.extend_from_slice(&terms[i + 1..]);
        let new_sum = with_subtraction(builder, builder.add(new_terms), &mut steps);
        Some(Step::new(DISTRIBUTE, sum.clone(), new_sum).with_substeps(steps))
    })
}

/// `a(b + c) = ab + ac`
///
/// A product that is a term of a sum is distributed from the sum instead, so that the resulting
/// terms join it.
pub fn distribute(builder: &Builder, expr: &Expr, parent: Option<&Expr>) -> Option<Step> {
    match &expr.kind {
        ExprKind::Add(terms) => distribute_term(builder, expr, terms),
        ExprKind::Mul { .. } if !parent.is_some_and(Expr::is_add) => {
            let (mut steps, terms) = expand(builder, expr)?;
            let sum = with_subtraction(builder, builder.add_terms(terms), &mut steps);
            Some(Step::new(DISTRIBUTE, expr.clone(), sum).with_substeps(steps))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parse;
    use super::*;

    fn distributed(source: &str) -> Option<Step> {
        let builder = Builder::new();
        let expr = parse(&builder, source).unwrap();
        distribute(&builder, &expr, None)
    }

    #[test]
    fn product_over_sum() {
        let step = distributed("3(x + 1)").unwrap();
        assert_eq!(step.after.to_string(), "3x + 3");
        assert_eq!(step.substep_messages(), vec!["multiply each term", "multiply monomials"]);
    }

    #[test]
    fn negative_factor() {
        let step = distributed("(-2)(x - 3)").unwrap();
        assert_eq!(step.after.to_string(), "-2x + 6");
        assert_eq!(step.substep_messages(), vec![
            "subtraction is the same as adding the negative",
            "multiply each term",
            "multiplying two negatives is a positive",
        ]);
    }

    #[test]
    fn product_of_variables() {
        let step = distributed("(ab)(xy - yz)").unwrap();
        assert_eq!(step.after.to_string(), "abxy - abyz");
        assert_eq!(step.substep_messages(), vec![
            "subtraction is the same as adding the negative",
            "multiply each term",
            "multiplying a negative by a positive is negative",
            "adding the negative is the same as subtraction",
        ]);
    }

    #[test]
    fn subtracted_sum() {
        let step = distributed("3 - (x + 1)").unwrap();
        assert_eq!(step.after.to_string(), "3 - x - 1");
        assert_eq!(step.substep_messages(), vec![
            "negation is the same as multiplying by negative one",
            "multiply each term",
            "multiplying a negative by a positive is negative",
            "adding the negative is the same as subtraction",
        ]);
    }

    #[test]
    fn term_of_sum() {
        let builder = Builder::new();
        let sum = parse(&builder, "3(x + 1) + 4").unwrap();
        let term = &sum.terms()[0];
        assert_eq!(distribute(&builder, term, Some(&sum)), None);
        assert_eq!(distribute(&builder, &sum, None).unwrap().after.to_string(), "3x + 3 + 4");
    }

    #[test]
    fn nothing_to_distribute() {
        assert_eq!(distributed("3x"), None);
        assert_eq!(distributed("x + 1"), None);
    }
}
