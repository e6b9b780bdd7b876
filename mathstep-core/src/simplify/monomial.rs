use rug::Rational;
use crate::{checker::difference, expr::{Builder, Expr, ExprKind}};

/// A term split into its rational coefficient and its remaining factors.
///
/// - `5` -> `(5, [])`
/// - `-3xy` -> `(-3, [x, y])`
/// - `x / 2` -> `(1/2, [x])`
/// - `(x + 1)y` -> `(1, [x + 1, y])`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Monomial {
    pub coefficient: Rational,
    pub factors: Vec<Expr>,
}

impl Monomial {
    /// The monomial `1`.
    pub fn one() -> Self {
        Self { coefficient: Rational::from(1), factors: Vec::new() }
    }

    /// Splits an expression into a monomial. Anything that is not a number, negation, product
    /// or quotient by a number becomes a single opaque factor.
    pub fn of(expr: &Expr) -> Self {
        match &expr.kind {
            ExprKind::Number(value) => Self { coefficient: value.clone(), factors: Vec::new() },
            ExprKind::Neg { arg, .. } => {
                let mut monomial = Self::of(arg);
                monomial.coefficient = -monomial.coefficient;
                monomial
            },
            ExprKind::Mul { factors, .. } => factors
                .iter()
                .map(Self::of)
                .fold(Self::one(), Self::mul),
            ExprKind::Div(num, den) => match den.as_number() {
                Some(value) if *value != 0 => {
                    let mut monomial = Self::of(num);
                    monomial.coefficient /= value;
                    monomial
                },
                _ => Self { coefficient: Rational::from(1), factors: vec![expr.clone()] },
            },
            _ => Self { coefficient: Rational::from(1), factors: vec![expr.clone()] },
        }
    }

    /// Multiplies two monomials.
    pub fn mul(mut self, other: Self) -> Self {
        self.coefficient *= other.coefficient;
        self.factors.extend(other.factors);
        self
    }

    /// Returns true if both monomials have the same factors, in any order.
    pub fn is_like(&self, other: &Self) -> bool {
        self.factors.len() == other.factors.len()
            && difference(&self.factors, &other.factors).is_some_and(|rest| rest.is_empty())
    }

    /// Builds the monomial as an implicit product with the coefficient in front. A coefficient
    /// of `1` is left out, and a negative coefficient becomes a negation of the whole term.
    pub fn to_expr(&self, builder: &Builder) -> Expr {
        if self.coefficient == 0 {
            return builder.int(0);
        }

        let magnitude = Rational::from(self.coefficient.abs_ref());
        let body = if self.factors.is_empty() {
            constant(builder, &magnitude)
        } else if magnitude == 1 {
            builder.mul_factors(self.factors.clone(), true)
        } else {
            let mut factors = vec![constant(builder, &magnitude)];
            factors.extend(self.factors.iter().cloned());
            builder.mul(factors, true)
        };

        if self.coefficient < 0 {
            builder.neg(body, false)
        } else {
            body
        }
    }
}

/// Builds a rational constant, as a quotient of integers if it is not an integer.
pub(crate) fn constant(builder: &Builder, value: &Rational) -> Expr {
    if *value < 0 {
        return builder.neg(constant(builder, &Rational::from(value.abs_ref())), false);
    }
    if value.is_integer() {
        builder.rational(value.clone())
    } else {
        builder.div(
            builder.rational(Rational::from(value.numer().clone())),
            builder.rational(Rational::from(value.denom().clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parse;
    use super::*;

    #[test]
    fn split_terms() {
        let builder = Builder::new();
        let monomial = Monomial::of(&parse(&builder, "-3xy").unwrap());
        assert_eq!(monomial.coefficient, -3);
        assert_eq!(monomial.factors, vec![builder.identifier("x"), builder.identifier("y")]);

        let monomial = Monomial::of(&parse(&builder, "x / 2").unwrap());
        assert_eq!(monomial.coefficient, Rational::from((1, 2)));
    }

    #[test]
    fn like_terms() {
        let builder = Builder::new();
        let a = Monomial::of(&parse(&builder, "2xy").unwrap());
        let b = Monomial::of(&parse(&builder, "yx").unwrap());
        let c = Monomial::of(&parse(&builder, "xx").unwrap());
        assert!(a.is_like(&b));
        assert!(!a.is_like(&c));
    }

    #[test]
    fn build_terms() {
        let builder = Builder::new();
        let render = |source: &str| Monomial::of(&parse(&builder, source).unwrap()).to_expr(&builder).to_string();
        assert_eq!(render("(-2)(3)(x)"), "-6x");
        assert_eq!(render("1x"), "x");
        assert_eq!(render("x / 2 * 5 / 3"), "(5 / 6)(x)");
        assert_eq!(render("(-1)(-4)"), "4");
    }
}
