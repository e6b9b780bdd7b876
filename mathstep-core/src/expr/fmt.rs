use std::fmt::{self, Display, Formatter};
use super::{Expr, ExprKind};

/// Writes `expr`, wrapped in parentheses if `wrap` is set.
fn write_wrapped(f: &mut Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn is_explicit_mul(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Mul { implicit: false, .. })
}

fn is_implicit_mul(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Mul { implicit: true, .. })
}

fn is_relation(expr: &Expr) -> bool {
    !expr.is_numeric()
}

/// Returns true if the expression can be written as an exponent or power base without
/// parentheses.
fn is_atom(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Number(_) | ExprKind::Identifier { .. } | ExprKind::Ellipsis)
}

fn fmt_implicit_mul(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    // `2(3)` would read as a function call and `23` as a single number, so once a later factor
    // would be ambiguous, every factor gets parentheses
    let wrap_all = factors.iter().skip(1).any(|factor| factor.is_number() || factor.is_neg())
        || factors.iter().any(|factor| factor.is_div() || is_explicit_mul(factor));

    for (i, factor) in factors.iter().enumerate() {
        let wrap = wrap_all
            || factor.is_add()
            || is_implicit_mul(factor)
            || is_relation(factor)
            || (i > 0 && factor.is_neg());
        write_wrapped(f, factor, wrap)?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::Identifier { name, subscript } => {
                write!(f, "{}", name)?;
                if let Some(subscript) = subscript {
                    write!(f, "_")?;
                    write_wrapped(f, subscript, !is_atom(subscript))?;
                }
                Ok(())
            },
            ExprKind::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match &term.kind {
                        ExprKind::Neg { arg, subtraction: true } if i > 0 => {
                            write!(f, " - ")?;
                            write_wrapped(f, arg, arg.is_add() || is_relation(arg))?;
                        },
                        _ => {
                            if i > 0 {
                                write!(f, " + ")?;
                            }
                            write_wrapped(f, term, term.is_add() || is_relation(term))?;
                        },
                    }
                }
                Ok(())
            },
            ExprKind::Mul { factors, implicit: true } => fmt_implicit_mul(f, factors),
            ExprKind::Mul { factors, implicit: false } => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, " * ")?;
                    }
                    write_wrapped(f, factor, factor.is_add() || is_explicit_mul(factor) || is_relation(factor))?;
                }
                Ok(())
            },
            ExprKind::Neg { arg, .. } => {
                write!(f, "-")?;
                write_wrapped(
                    f,
                    arg,
                    arg.is_add() || arg.is_div() || is_explicit_mul(arg) || is_relation(arg),
                )
            },
            ExprKind::Div(num, den) => {
                let wrap = |side: &Expr| side.is_add() || side.is_div() || is_explicit_mul(side) || is_relation(side);
                write_wrapped(f, num, wrap(num))?;
                write!(f, " / ")?;
                write_wrapped(f, den, wrap(den))
            },
            ExprKind::Pow { base, exp } => {
                write_wrapped(f, base, !is_atom(base))?;
                write!(f, "^")?;
                write_wrapped(f, exp, !is_atom(exp))
            },
            ExprKind::Root { radicand, index } => {
                if index.is_number_eq(2) {
                    write!(f, "sqrt({})", radicand)
                } else {
                    write!(f, "root({}, {})", radicand, index)
                }
            },
            ExprKind::Relation { op, args } => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    write_wrapped(f, arg, is_relation(arg))?;
                }
                Ok(())
            },
            ExprKind::Ellipsis => write!(f, "..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{expr::Builder, parse};

    fn print(source: &str) -> String {
        parse(&Builder::new(), source).unwrap().to_string()
    }

    #[test]
    fn sums_and_differences() {
        assert_eq!(print("a+b-c"), "a + b - c");
        assert_eq!(print("1 - (x + y)"), "1 - (x + y)");
        assert_eq!(print("a + -b"), "a + -b");
        assert_eq!(print("2x - -3x"), "2x - -3x");
    }

    #[test]
    fn implicit_products() {
        assert_eq!(print("2xy"), "2xy");
        assert_eq!(print("3(x+1)"), "3(x + 1)");
        assert_eq!(print("(x)(2)(y)"), "(x)(2)(y)");
        assert_eq!(print("(-3)(x)"), "-3x");
        assert_eq!(print("(x + 1)(x + 3)"), "(x + 1)(x + 3)");
    }

    #[test]
    fn explicit_products_and_quotients() {
        assert_eq!(print("a*1/b"), "a * 1 / b");
        assert_eq!(print("24ab / 6a"), "24ab / 6a");
        assert_eq!(print("a / (b/c)"), "a / (b / c)");
        assert_eq!(print("-(4/6)"), "-(4 / 6)");
        assert_eq!(print("-4/6"), "-4 / 6");
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(print("x^2"), "x^2");
        assert_eq!(print("x^-2"), "x^(-2)");
        assert_eq!(print("(x + 1)^2"), "(x + 1)^2");
        assert_eq!(print("sqrt(x)"), "sqrt(x)");
        assert_eq!(print("root(x, 3)"), "root(x, 3)");
    }

    #[test]
    fn relations() {
        assert_eq!(print("2x+5=10"), "2x + 5 = 10");
        assert_eq!(print("a <= b <= c"), "a <= b <= c");
    }

    #[test]
    fn subscripts() {
        assert_eq!(print("x_1 + x_2"), "x_1 + x_2");
    }
}
