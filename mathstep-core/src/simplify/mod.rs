//! Simplification of a single expression, with an explanation of every rewrite.
//!
//! The [`Simplifier`] walks the expression from the leaves up. At every node that takes part in
//! arithmetic, it applies the first matching rule from [`rules::all`], then tries the whole list
//! again on the result, until no rule matches. Since a rewrite deep in the tree can enable one
//! higher up, such as collecting like terms exposing a further distribution, the walk is repeated
//! until a full pass changes nothing.
//!
//! ```
//! use mathstep_core::{parse, expr::Builder, Simplifier};
//!
//! let builder = Builder::new();
//! let expr = parse(&builder, "(x + 1)(x + 3)").unwrap();
//! let step = Simplifier::new(builder).simplify(&expr).unwrap();
//!
//! assert_eq!(step.message, "simplify expression");
//! assert_eq!(step.after.to_string(), "x^2 + 4x + 3");
//! ```

mod monomial;
pub mod rules;

pub(crate) use monomial::{constant, Monomial};

use crate::{
    expr::{traverse, Builder, Expr, Visitor},
    step::Step,
};

/// The maximum number of rules applied in a row to the same node.
pub const MAX_ITERATIONS: usize = 10;

/// The maximum number of passes over the whole expression.
pub const MAX_PASSES: usize = 10;

/// Simplifies expressions step by step.
#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    builder: Builder,
}

/// One pass over the expression, collecting the steps of every rule applied.
struct Pass<'a> {
    builder: &'a Builder,
    steps: Vec<Step>,
}

impl Visitor for Pass<'_> {
    fn exit(&mut self, node: &Expr, ancestors: &[Expr]) -> Option<Expr> {
        if !node.is_numeric() {
            return None;
        }

        let parent = ancestors.last();
        let mut current = node.clone();
        for _ in 0..MAX_ITERATIONS {
            let Some(step) = rules::all(self.builder, &current, parent) else {
                return (!current.ptr_eq(node)).then_some(current);
            };
            tracing::debug!(target: "simplify", message = step.message, before = %step.before, after = %step.after);
            current = step.after.clone();
            self.steps.push(step);
        }

        tracing::warn!(target: "simplify", node = %node, "too many rewrites of the same node");
        Some(current)
    }
}

impl Simplifier {
    /// Creates a simplifier that builds new nodes with the given builder.
    pub fn new(builder: Builder) -> Self {
        Self { builder }
    }

    /// Returns the builder used for new nodes.
    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Simplifies the expression.
    ///
    /// Returns a step with the message `"simplify expression"` whose substeps are every rule
    /// applied, in order, or [`None`] if no rule applied anywhere.
    pub fn simplify(&self, expr: &Expr) -> Option<Step> {
        let mut pass = Pass { builder: &self.builder, steps: Vec::new() };
        let mut current = expr.clone();
        let mut settled = false;
        for i in 0..MAX_PASSES {
            let next = traverse(&current, &mut pass);
            tracing::debug!(target: "simplify", pass = i, steps = pass.steps.len(), result = %next);
            if next.ptr_eq(&current) {
                settled = true;
                break;
            }
            current = next;
        }
        if !settled {
            tracing::warn!(target: "simplify", expr = %expr, "too many passes");
        }

        if pass.steps.is_empty() {
            return None;
        }
        Some(Step::new("simplify expression", expr.clone(), current).with_substeps(pass.steps))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{expr::apply_steps, parse};
    use super::*;

    fn simplify(source: &str) -> Option<Step> {
        let builder = Builder::new();
        let expr = parse(&builder, source).unwrap();
        Simplifier::new(builder).simplify(&expr)
    }

    /// Simplifies the expression, returning the result and the messages of the substeps.
    fn simplified(source: &str) -> (String, Vec<&'static str>) {
        let step = simplify(source).unwrap();
        assert_eq!(step.message, "simplify expression");
        (step.after.to_string(), step.substep_messages())
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("3x + 4x"), ("7x".to_string(), vec!["collect like terms"]));
        assert_eq!(simplified("x + 3x").0, "4x");
        assert_eq!(simplified("2x - -3x").0, "5x");
        assert_eq!(simplified("4x - 3x - 1").0, "x - 1");
        assert_eq!(simplified("x/2 + x/2").0, "x");
        assert_eq!(simplified("1 - (2x + 3x)").0, "1 - 5x");
    }

    #[test]
    fn signs_before_like_terms() {
        assert_eq!(simplified("2x - (-3)(x)"), (
            "5x".to_string(),
            vec!["simplify multiplication", "collect like terms"],
        ));
        assert_eq!(simplified("3 - 1x - 1"), (
            "2 - x".to_string(),
            vec!["simplify multiplication", "collect like terms"],
        ));
    }

    #[test]
    fn constants() {
        assert_eq!(simplified("x + 1 + 4").0, "x + 5");
        assert_eq!(simplified("(x + 1) + 4"), (
            "x + 5".to_string(),
            vec!["drop parentheses", "collect like terms"],
        ));
        assert_eq!(simplified("(3)(3)"), ("9".to_string(), vec!["evaluate multiplication"]));
    }

    #[test]
    fn distribution() {
        assert_eq!(simplified("3(x + 1) + 4"), (
            "3x + 7".to_string(),
            vec!["distribute", "collect like terms"],
        ));
        assert_eq!(simplified("(-2)(x - 3)").0, "-2x + 6");
        assert_eq!(simplified("(ab)(xy - yz)").0, "abxy - abyz");
        assert_eq!(simplified("(-ab)(xy - yz)").0, "-abxy + abyz");
        assert_eq!(simplified("3(x + 2(x - 1))"), (
            "9x - 6".to_string(),
            vec!["distribute", "collect like terms", "distribute"],
        ));
        assert_eq!(simplified("3(x + 1) + 4(x - 1)"), (
            "7x - 1".to_string(),
            vec!["distribute", "distribute", "collect like terms"],
        ));
    }

    #[test]
    fn distribution_substeps() {
        let step = simplify("3(x + 1)").unwrap();
        assert_eq!(step.after.to_string(), "3x + 3");
        assert_eq!(step.substeps[0].substep_messages(), vec!["multiply each term", "multiply monomials"]);

        let step = simplify("3 - (x + 1)").unwrap();
        assert_eq!(step.after.to_string(), "2 - x");
        assert_eq!(step.substeps[0].after.to_string(), "3 - x - 1");
    }

    #[test]
    fn evaluate_before_distributing() {
        assert_eq!(simplified("(1 + 2)(x + 1)"), (
            "3x + 3".to_string(),
            vec!["evaluate addition", "distribute"],
        ));
        assert_eq!(simplified("(6 * 1/2)(x + 1)"), (
            "3x + 3".to_string(),
            vec!["evaluate multiplication", "distribute"],
        ));
        assert_eq!(simplified("(3)(3)(x) - 6"), (
            "9x - 6".to_string(),
            vec!["evaluate multiplication"],
        ));
    }

    #[test]
    fn powers() {
        assert_eq!(simplified("x(x + 1)"), (
            "x^2 + x".to_string(),
            vec!["distribute", "repeated multiplication can be written as a power"],
        ));
        assert_eq!(simplified("(x + 1)(x + 3)"), (
            "x^2 + 4x + 3".to_string(),
            vec![
                "distribute",
                "distribute",
                "distribute",
                "collect like terms",
                "repeated multiplication can be written as a power",
            ],
        ));
        assert_eq!(simplified("(x)(x)").0, "x^2");
        assert_eq!(simplified("banana").0, "ba^3n^2");
    }

    #[test]
    fn fractions() {
        assert_eq!(simplified("abc / bc").0, "a");
        assert_eq!(simplified("ab / abc").0, "1 / c");
        assert_eq!(simplified("abc / bcd").0, "a / d");
        assert_eq!(simplified("-abc / bcd").0, "-a / d");
        assert_eq!(simplified("abc / -bcd").0, "a / -d");
        assert_eq!(simplified("abc / abc").0, "1");
        assert_eq!(simplified("-a / -1").0, "a");
        assert_eq!(simplified("a / -1").0, "-a");
        assert_eq!(simplified("-ab / ab").0, "-1");
        assert_eq!(simplified("(-a)(b)(c) / b"), (
            "-ac".to_string(),
            vec!["simplify multiplication", "reduce fraction"],
        ));
        assert_eq!(simplified("2x / 2"), ("x".to_string(), vec!["reduce fraction"]));
        assert_eq!(simplified("x/2 + x/3"), (
            "5x / 6".to_string(),
            vec!["collect like terms", "multiply fraction(s)"],
        ));
    }

    #[test]
    fn numeric_fractions() {
        assert_eq!(simplified("4 / 6"), ("2 / 3".to_string(), vec!["evaluate division"]));
        assert_eq!(simplified("-(4/6)").0, "-(2 / 3)");
        assert_eq!(simplify("2 / 3"), None);
    }

    #[test]
    fn multiplication_by_one() {
        assert_eq!(simplified("1x"), ("x".to_string(), vec!["simplify multiplication"]));
        assert_eq!(simplified("-1x"), ("-x".to_string(), vec!["simplify multiplication"]));
        assert_eq!(simplified("a + -b"), (
            "a - b".to_string(),
            vec!["adding the inverse is the same as subtraction"],
        ));
    }

    #[test]
    fn already_simple() {
        assert_eq!(simplify("2x + 1"), None);
        assert_eq!(simplify("x"), None);
    }

    #[test]
    fn both_sides_of_equation() {
        let (result, _) = simplified("2x + 3x = 4 + 1");
        assert_eq!(result, "5x = 5");
    }

    #[test]
    fn simplified_expressions_stay_simplified() {
        for source in ["3(x + 1) + 4", "(x + 1)(x + 3)", "-abc / bcd", "abc / -bcd", "x/2 + x/3", "-(4/6)"] {
            let builder = Builder::new();
            let simplifier = Simplifier::new(builder.clone());
            let expr = parse(&builder, source).unwrap();
            let step = simplifier.simplify(&expr).unwrap();
            assert_eq!(simplifier.simplify(&step.after), None, "{} -> {}", source, step.after);
        }
    }

    #[test]
    fn replay_substeps() {
        for source in ["3(x + 1) + 4", "2x + 3x = 4 + 1", "(x + 1) + 4"] {
            let builder = Builder::new();
            let expr = parse(&builder, source).unwrap();
            let step = Simplifier::new(builder).simplify(&expr).unwrap();
            assert_eq!(apply_steps(&expr, &step.substeps), step.after);
        }
    }
}
