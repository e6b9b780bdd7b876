//! The commands understood by the REPL, and the state they share.

use mathstep_core::{
    expr::{Builder, Expr},
    parse,
    CheckResult,
    Options,
    Simplifier,
    Solver,
    Step,
    StepChecker,
};
use std::fmt;
use crate::error::Error;

const USAGE: &str = "expected one of `check <a> ; <b>`, `simplify <expr>`, `solve <eq> ; <var>`, \
    `set skip-eval on|off`, `set eval-fractions on|off`";

/// A single line of input, split into its command and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Check(&'a str, &'a str),
    Simplify(&'a str),
    Solve(&'a str, &'a str),
    Set(Setting, bool),
}

/// An option that can be toggled with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    SkipEval,
    EvalFractions,
}

/// Splits `input` into two arguments around the `;` separator.
fn split_pair<'a>(command: &str, input: &'a str) -> Result<(&'a str, &'a str), Error> {
    input
        .split_once(';')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| Error::Usage(format!("`{}` takes two arguments separated by `;`", command)))
}

impl<'a> Command<'a> {
    /// Parses a line of input into a command.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match name {
            "check" => split_pair(name, rest).map(|(a, b)| Self::Check(a, b)),
            "simplify" => Ok(Self::Simplify(rest)),
            "solve" => split_pair(name, rest).map(|(a, b)| Self::Solve(a, b)),
            "set" => {
                let (setting, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let setting = match setting {
                    "skip-eval" => Setting::SkipEval,
                    "eval-fractions" => Setting::EvalFractions,
                    _ => return Err(Error::Usage(format!("unknown setting `{}`", setting))),
                };
                let value = match value.trim() {
                    "on" => true,
                    "off" => false,
                    value => return Err(Error::Usage(format!("expected `on` or `off`, got `{}`", value))),
                };
                Ok(Self::Set(setting, value))
            },
            _ => Err(Error::Usage(USAGE.to_string())),
        }
    }
}

/// Writes a step and its substeps, one per line, indented by depth.
fn write_step(f: &mut fmt::Formatter<'_>, step: &Step, depth: usize) -> fmt::Result {
    writeln!(f, "{:indent$}{}: {} -> {}", "", step.message, step.before, step.after, indent = depth * 2)?;
    for substep in &step.substeps {
        write_step(f, substep, depth + 1)?;
    }
    Ok(())
}

/// The result of a command, printed as the lines shown to the user.
#[derive(Debug)]
pub enum Output {
    Check(CheckResult),
    Simplify(Option<Step>),
    Solve(Option<Step>, Expr),
    Set,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check(result) if result.equivalent => {
                writeln!(f, "equivalent")?;
                for step in &result.steps {
                    write_step(f, step, 1)?;
                }
                Ok(())
            },
            Self::Check(_) => writeln!(f, "not equivalent"),
            Self::Simplify(Some(step)) | Self::Solve(Some(step), _) => write_step(f, step, 0),
            Self::Simplify(None) => writeln!(f, "already simplified"),
            Self::Solve(None, ident) => writeln!(f, "could not solve for {}", ident),
            Self::Set => Ok(()),
        }
    }
}

/// The state kept between lines of input.
#[derive(Debug, Default)]
pub struct Session {
    builder: Builder,
    options: Options,
}

impl Session {
    /// Parses an expression, attaching the source to any error.
    fn parse(&self, source: &str) -> Result<Expr, Error> {
        parse(&self.builder, source).map_err(|err| Error::from((err, source)))
    }

    /// Runs a line of input, returning its result.
    pub fn run(&mut self, line: &str) -> Result<Output, Error> {
        let command = Command::parse(line)?;
        tracing::debug!(?command, "running command");

        match command {
            Command::Check(prev, next) => {
                let (prev, next) = (self.parse(prev)?, self.parse(next)?);
                let checker = StepChecker::new(self.builder.clone(), self.options);
                Ok(Output::Check(checker.check_step(&prev, &next)))
            },
            Command::Simplify(expr) => {
                let expr = self.parse(expr)?;
                Ok(Output::Simplify(Simplifier::new(self.builder.clone()).simplify(&expr)))
            },
            Command::Solve(eq, ident) => {
                let (eq, ident) = (self.parse(eq)?, self.parse(ident)?);
                if !eq.is_equation() {
                    return Err(Error::Usage(format!("`{}` is not an equation with two sides", eq)));
                }
                if !ident.is_identifier() {
                    return Err(Error::Usage(format!("`{}` is not a variable", ident)));
                }
                let step = Solver::new(self.builder.clone()).solve(&eq, &ident);
                Ok(Output::Solve(step, ident))
            },
            Command::Set(setting, value) => {
                self.options = match setting {
                    Setting::SkipEval => self.options.skip_eval_checker(value),
                    Setting::EvalFractions => self.options.eval_fractions(value),
                };
                Ok(Output::Set)
            },
        }
    }

    /// Runs a line of input, returning the text to print.
    pub fn execute(&mut self, line: &str) -> Result<String, Error> {
        self.run(line).map(|output| output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("check 2 + 3 ; 5").unwrap(), Command::Check("2 + 3", "5"));
        assert_eq!(Command::parse("  simplify 3x + 4x ").unwrap(), Command::Simplify("3x + 4x"));
        assert_eq!(Command::parse("solve 2x = 4; x").unwrap(), Command::Solve("2x = 4", "x"));
        assert_eq!(Command::parse("set skip-eval on").unwrap(), Command::Set(Setting::SkipEval, true));
        assert_eq!(
            Command::parse("set eval-fractions off").unwrap(),
            Command::Set(Setting::EvalFractions, false),
        );
    }

    #[test]
    fn bad_commands() {
        assert!(matches!(Command::parse("check 2 + 3"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse("set skip-eval maybe"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse("2 + 3"), Err(Error::Usage(_))));
    }

    #[test]
    fn simplify_prints_steps() {
        let mut session = Session::default();
        assert_eq!(session.execute("simplify 3x + 4x").unwrap(), concat!(
            "simplify expression: 3x + 4x -> 7x\n",
            "  collect like terms: 3x + 4x -> 7x\n",
        ));
        assert_eq!(session.execute("simplify x").unwrap(), "already simplified\n");
    }

    #[test]
    fn check_follows_options() {
        let mut session = Session::default();
        assert_eq!(session.execute("check 2 + 3 ; 5").unwrap(), concat!(
            "equivalent\n",
            "  evaluation of addition: 2 + 3 -> 5\n",
        ));

        session.execute("set skip-eval on").unwrap();
        assert_eq!(session.execute("check 2 + 3 ; 5").unwrap(), "not equivalent\n");
    }

    #[test]
    fn solve_checks_arguments() {
        let mut session = Session::default();
        let out = session.execute("solve 2x + 3 = x + 7 ; x").unwrap();
        assert_eq!(out.lines().next(), Some("solve for variable: 2x + 3 = x + 7 -> x = 4"));

        assert!(matches!(session.execute("solve 2x + 3 ; x"), Err(Error::Usage(_))));
        assert!(matches!(session.execute("solve 2x = 3 ; 2"), Err(Error::Usage(_))));
        assert!(matches!(session.execute("simplify (x"), Err(Error::ParseError(..))));
    }

    #[test]
    fn unsolvable_and_settings() {
        let mut session = Session::default();
        assert_eq!(session.execute("solve x^2 = 4 ; x").unwrap(), "could not solve for x\n");
        assert_eq!(session.execute("set eval-fractions off").unwrap(), "");
        assert!(matches!(session.run("check a ; b").unwrap(), Output::Check(CheckResult { equivalent: false, .. })));
    }
}
