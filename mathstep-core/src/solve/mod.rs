//! Solving linear equations for a variable.
//!
//! The [`Solver`] repeatedly runs a fixed list of [`transforms`]: moving terms to one side,
//! dividing both sides, and multiplying both sides, with both sides simplified before and after
//! each of them. Simplifying in between keeps every step small, so that `2x = 10 - 5` becomes
//! `2x = 5` before anything is divided.

pub mod transforms;

use crate::{
    expr::{Builder, Expr},
    simplify::Simplifier,
    step::Step,
};
use transforms::Transform;

/// The maximum number of rounds of transforms.
pub const MAX_ROUNDS: usize = 10;

const TRANSFORMS: [Transform; 7] = [
    transforms::simplify_both_sides,
    transforms::move_terms_to_one_side,
    transforms::simplify_both_sides,
    transforms::divide_both_sides,
    transforms::simplify_both_sides,
    transforms::multiply_both_sides,
    transforms::simplify_both_sides,
];

/// Solves linear equations step by step.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    simplifier: Simplifier,
}

impl Solver {
    /// Creates a solver that builds new nodes with the given builder.
    pub fn new(builder: Builder) -> Self {
        Self { simplifier: Simplifier::new(builder) }
    }

    /// Returns the builder used for new nodes.
    pub fn builder(&self) -> &Builder {
        self.simplifier.builder()
    }

    /// Returns the simplifier used on each side of the equation.
    pub fn simplifier(&self) -> &Simplifier {
        &self.simplifier
    }

    /// Solves the equation for the given variable.
    ///
    /// Returns a step with the message `"solve for variable"` if the variable ends up alone on
    /// one side of the equation, or [`None`] if the solver does not know how to isolate it.
    ///
    /// # Panics
    ///
    /// Panics if `eq` is not an equation with two sides, or `ident` is not an identifier.
    pub fn solve(&self, eq: &Expr, ident: &Expr) -> Option<Step> {
        assert!(eq.is_equation(), "can only solve an equation with two sides, got `{}`", eq);
        assert!(ident.is_identifier(), "can only solve for a variable, got `{}`", ident);

        let mut steps = Vec::new();
        let mut current = eq.clone();
        let mut settled = false;
        for round in 0..MAX_ROUNDS {
            let applied = steps.len();
            for transform in TRANSFORMS {
                if let Some(step) = transform(self, &current, ident) {
                    current = step.after.clone();
                    steps.push(step);
                }
            }
            tracing::debug!(target: "solve", round, steps = steps.len() - applied, equation = %current);
            if steps.len() == applied {
                settled = true;
                break;
            }
        }
        if !settled {
            tracing::warn!(target: "solve", equation = %eq, "too many rounds");
        }

        if steps.is_empty() {
            return None;
        }
        let (left, right) = current.sides()?;
        (left == ident || right == ident)
            .then(|| Step::new("solve for variable", eq.clone(), current.clone()).with_substeps(steps))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parse;
    use super::*;

    fn solve(source: &str) -> Option<Step> {
        let builder = Builder::new();
        let eq = parse(&builder, source).unwrap();
        let ident = builder.identifier("x");
        Solver::new(builder).solve(&eq, &ident)
    }

    #[test]
    fn constant_on_variable_side() {
        let step = solve("2x + 5 = 10").unwrap();
        assert_eq!(step.message, "solve for variable");
        assert_eq!(step.after.to_string(), "x = 5 / 2");
        assert_eq!(step.substep_messages(), vec![
            "move terms to one side",
            "simplify both sides",
            "divide both sides",
            "simplify both sides",
        ]);
    }

    #[test]
    fn variable_on_both_sides() {
        let step = solve("2x + 3 = x + 7").unwrap();
        assert_eq!(step.after.to_string(), "x = 4");
        assert_eq!(step.substep_messages(), vec!["move terms to one side", "simplify both sides"]);
    }

    #[test]
    fn variable_in_numerator() {
        let step = solve("x / 2 = 3").unwrap();
        assert_eq!(step.after.to_string(), "x = 6");
        assert_eq!(step.substep_messages(), vec!["multiply both sides", "simplify both sides"]);

        assert_eq!(solve("2x / 3 = 4").unwrap().after.to_string(), "x = 6");
    }

    #[test]
    fn signs() {
        assert_eq!(solve("2x - 4 = 6").unwrap().after.to_string(), "x = 5");
        assert_eq!(solve("-x = 5").unwrap().after.to_string(), "x = -5");
        assert_eq!(solve("3 = 2x + 3").unwrap().after.to_string(), "0 = x");
    }

    #[test]
    fn simplify_first() {
        let step = solve("2x = 10 - 5").unwrap();
        assert_eq!(step.substeps[0].message, "simplify both sides");
        assert_eq!(step.substeps[0].after.to_string(), "2x = 5");
        assert_eq!(step.after.to_string(), "x = 5 / 2");
    }

    #[test]
    fn unsolvable() {
        assert_eq!(solve("x = 5"), None);
        assert_eq!(solve("x^2 = 4"), None);
    }

    #[test]
    #[should_panic(expected = "can only solve an equation")]
    fn not_an_equation() {
        solve("2x + 1");
    }
}
