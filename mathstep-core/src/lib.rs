//! Step-by-step algebra for math education.
//!
//! This crate answers three questions about expressions written by a student:
//!
//! - Is one expression a valid rewriting of another? The [`StepChecker`] searches for a chain of
//!   named rewrites (commutative property, distribution, evaluation, and so on) connecting them.
//! - What does this expression look like simplified? The [`Simplifier`] applies a fixed pipeline
//!   of rewrites until nothing changes.
//! - What is the value of `x` in this linear equation? The [`Solver`] moves, divides and
//!   multiplies both sides until the variable stands alone.
//!
//! Every answer comes with a tree of [`Step`]s that explains it.
//!
//! ```
//! use mathstep_core::{parse, expr::Builder, Simplifier};
//!
//! let builder = Builder::new();
//! let expr = parse(&builder, "3(x + 1) + 4").unwrap();
//! let step = Simplifier::new(builder).simplify(&expr).unwrap();
//!
//! assert_eq!(step.after.to_string(), "3x + 7");
//! assert_eq!(step.substep_messages(), vec!["distribute", "collect like terms"]);
//! ```

pub mod checker;
pub mod expr;
pub mod primitive;
pub mod simplify;
pub mod solve;
pub mod step;

pub use checker::{CheckResult, Options, StepChecker};
pub use simplify::Simplifier;
pub use solve::Solver;
pub use step::Step;

use expr::{Builder, Expr};
use mathstep_error::Error;
use mathstep_parser::parser::{expr::Expr as AstExpr, Parser};

/// Parses the given source into an expression tree, creating its nodes with `builder`.
pub fn parse(builder: &Builder, source: &str) -> Result<Expr, Error> {
    let ast = Parser::new(source).try_parse_full::<AstExpr>()?;
    Ok(builder.build(&ast))
}
