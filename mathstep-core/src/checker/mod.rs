//! Decides whether one expression is a valid rewriting of another, and explains why.
//!
//! [`StepChecker::check_step`] runs a fixed battery of named checks against a `prev` and `next`
//! expression. Each check either fails, or rewrites part of the problem and recursively checks
//! the rest, returning the [`Step`]s it used. Checks are tried in this order, and the first one
//! that succeeds wins:
//!
//! 1. exact structural match;
//! 2. axioms: identity elements, distribution, commutativity, multiplication by zero and the
//!    symmetric property of equality;
//! 3. operand matching for two nodes of the same kind;
//! 4. equation checks for doing the same thing to both sides;
//! 5. evaluation of constant sums and products, and prime factorization;
//! 6. sign rules for integers;
//! 7. fraction rules;
//! 8. equal numbers or identifiers.
//!
//! Many checks are **symmetric**: if they do not apply from `prev` to `next`, they are tried from
//! `next` to `prev` on a [`Context`] marked as reversed, and the steps they find are flipped back
//! into reading order. The search is greedy and depth-first, so the explanation found is a
//! plausible one but not necessarily the shortest.

mod axiom;
mod context;
mod equation;
mod eval;
mod fraction;
mod integer;

pub use context::{Context, Filters, MAX_DEPTH};

use crate::{
    expr::{apply_step, Builder, Expr, ExprKind, Path},
    step::Step,
};

/// Settings of a [`StepChecker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Never accept a step by evaluating arithmetic, so that students have to show it.
    pub skip_eval_checker: bool,

    /// Let evaluation checks compute quotients of constants.
    pub eval_fractions: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            skip_eval_checker: false,
            eval_fractions: true,
        }
    }
}

impl Options {
    /// Sets [`Options::skip_eval_checker`].
    pub fn skip_eval_checker(mut self, skip_eval_checker: bool) -> Self {
        self.skip_eval_checker = skip_eval_checker;
        self
    }

    /// Sets [`Options::eval_fractions`].
    pub fn eval_fractions(mut self, eval_fractions: bool) -> Self {
        self.eval_fractions = eval_fractions;
        self
    }
}

/// The outcome of [`StepChecker::check_step`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Whether `next` is a valid rewriting of `prev`.
    pub equivalent: bool,

    /// The steps leading from `prev` to `next`, empty if they are not equivalent.
    pub steps: Vec<Step>,

    /// The names of the checks that succeeded at some point of the search, including ones on
    /// paths that were later abandoned.
    pub successful_checks: Vec<&'static str>,
}

impl CheckResult {
    /// Returns the messages of the steps, in order.
    pub fn messages(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.message).collect()
    }
}

/// The function implementing a check.
///
/// It receives `prev` and `next` in search order, which is swapped when
/// [`Context::is_reversed`] is set, and returns the steps from one to the other.
pub(crate) type CheckFn = fn(&StepChecker, &Expr, &Expr, &Context) -> Option<Vec<Step>>;

/// A named check.
pub(crate) struct Check {
    /// The name used by [`Filters`] and reported in [`CheckResult::successful_checks`].
    pub name: &'static str,

    /// Whether to also try the check from `next` to `prev`.
    pub symmetric: bool,

    /// Whether to keep the cheaper of the two directions when both succeed, instead of stopping
    /// at the first.
    pub prefer_cheaper: bool,

    /// Whether the check ignores [`Filters`].
    pub unfilterable: bool,

    pub run: CheckFn,
}

impl Check {
    /// Creates a check that only runs forward.
    pub(crate) const fn forward(name: &'static str, run: CheckFn) -> Self {
        Self { name, symmetric: false, prefer_cheaper: false, unfilterable: false, run }
    }

    /// Creates a check that runs in both directions.
    pub(crate) const fn symmetric(name: &'static str, run: CheckFn) -> Self {
        Self { name, symmetric: true, prefer_cheaper: false, unfilterable: false, run }
    }

    /// Keeps the cheaper direction when both succeed.
    pub(crate) const fn prefer_cheaper(self) -> Self {
        Self { prefer_cheaper: true, ..self }
    }

    /// Ignores [`Filters`].
    pub(crate) const fn unfilterable(self) -> Self {
        Self { unfilterable: true, ..self }
    }
}

/// Checks whether one expression is a valid rewriting of another.
#[derive(Debug, Clone, Default)]
pub struct StepChecker {
    builder: Builder,
    options: Options,
}

impl StepChecker {
    /// Creates a checker that builds intermediate expressions with the given builder.
    pub fn new(builder: Builder, options: Options) -> Self {
        Self { builder, options }
    }

    /// Returns the builder used for intermediate expressions.
    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Returns the options of this checker.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Checks whether `next` is a valid rewriting of `prev`.
    pub fn check_step(&self, prev: &Expr, next: &Expr) -> CheckResult {
        let context = Context::new();
        let steps = self.check_step_with(prev, next, &context);
        let successful_checks = context.successful_checks();
        tracing::debug!(target: "checker", %prev, %next, equivalent = steps.is_some(), "checked step");

        match steps {
            Some(steps) => CheckResult { equivalent: true, steps: anchor_steps(prev, steps), successful_checks },
            None => CheckResult { equivalent: false, steps: Vec::new(), successful_checks },
        }
    }

    /// Checks whether `next` is a valid rewriting of `prev` on the search path described by
    /// `context`, returning the steps between them.
    pub fn check_step_with(&self, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
        if context.is_exhausted() {
            tracing::trace!(target: "checker", %prev, %next, "depth limit reached");
            return None;
        }
        let context = &context.nested();

        if prev == next {
            return Some(Vec::new());
        }

        if let Some(steps) = self.run_checks(axiom::CHECKS, prev, next, context) {
            return Some(steps);
        }

        // after the axioms, so that reordered operands are reported as a commutative step first
        if let Some(steps) = self.check_operands(prev, next, context) {
            return Some(steps);
        }

        if let Some(steps) = self.run_checks(equation::CHECKS, prev, next, context) {
            return Some(steps);
        }

        if !self.options.skip_eval_checker {
            if let Some(steps) = self.run_checks(eval::CHECKS, prev, next, context) {
                return Some(steps);
            }
        }

        if let Some(steps) = self.run_checks(integer::CHECKS, prev, next, context) {
            return Some(steps);
        }

        // after evaluation, which handles quotients of constants more directly
        if let Some(steps) = self.run_checks(fraction::CHECKS, prev, next, context) {
            return Some(steps);
        }

        match (&prev.kind, &next.kind) {
            (ExprKind::Number(a), ExprKind::Number(b)) => (a == b).then(Vec::new),
            (
                ExprKind::Identifier { name: a, subscript: sub_a },
                ExprKind::Identifier { name: b, subscript: sub_b },
            ) => (a == b && sub_a == sub_b).then(Vec::new),
            _ => None,
        }
    }

    /// Runs the given checks in order, returning the steps of the first one that succeeds.
    pub(crate) fn run_checks(
        &self,
        checks: &[Check],
        prev: &Expr,
        next: &Expr,
        context: &Context,
    ) -> Option<Vec<Step>> {
        checks.iter().find_map(|check| self.run_check(check, prev, next, context))
    }

    fn run_check(&self, check: &Check, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
        if !context.allows(check) {
            return None;
        }
        tracing::trace!(target: "checker", check = check.name, reversed = context.is_reversed(), %prev, %next);

        let forward = (check.run)(self, prev, next, context);
        let steps = match forward {
            Some(steps) if !check.prefer_cheaper => Some(steps),
            forward if check.symmetric => {
                let backward = (check.run)(self, next, prev, &context.reversed());
                match (forward, backward) {
                    (Some(forward), Some(backward)) if backward.len() < forward.len() => Some(backward),
                    (Some(forward), _) => Some(forward),
                    (None, backward) => backward,
                }
            },
            forward => forward,
        }?;

        tracing::debug!(target: "checker", check = check.name, steps = steps.len(), "check succeeded");
        context.record_success(check.name);
        Some(steps)
    }

    /// Compares two nodes of the same kind operand by operand.
    ///
    /// Sums, products and relations match their operands as a bag: each operand of `prev` is
    /// paired with some not yet paired, equivalent operand of `next`. The pairing is greedy, so
    /// a poor early choice is never undone.
    fn check_operands(&self, prev: &Expr, next: &Expr, context: &Context) -> Option<Vec<Step>> {
        match (&prev.kind, &next.kind) {
            (ExprKind::Add(a), ExprKind::Add(b))
            | (ExprKind::Mul { factors: a, .. }, ExprKind::Mul { factors: b, .. }) => {
                self.match_operands(a, b, context).map(|(steps, _)| steps)
            },
            (ExprKind::Relation { op: op_a, args: a }, ExprKind::Relation { op: op_b, args: b }) if op_a == op_b => {
                self.match_operands(a, b, context).map(|(steps, _)| steps)
            },
            (ExprKind::Div(num_a, den_a), ExprKind::Div(num_b, den_b)) => {
                let mut steps = self.check_step_with(num_a, num_b, context)?;
                steps.extend(self.check_step_with(den_a, den_b, context)?);
                Some(steps)
            },
            (
                ExprKind::Neg { arg: a, subtraction: sub_a },
                ExprKind::Neg { arg: b, subtraction: sub_b },
            ) if sub_a == sub_b => self.check_step_with(a, b, context),
            _ => None,
        }
    }

    /// Pairs every operand in `prev` with an equivalent operand in `next`, returning the steps
    /// for each pair and whether any operand was paired with one at a different position.
    ///
    /// Operands that are structurally equal are paired first; otherwise the first equivalent
    /// operand wins.
    pub(crate) fn match_operands(
        &self,
        prev: &[Expr],
        next: &[Expr],
        context: &Context,
    ) -> Option<(Vec<Step>, bool)> {
        if prev.len() != next.len() {
            return None;
        }

        let mut remaining = next.iter().enumerate().collect::<Vec<_>>();
        let mut steps = Vec::new();
        let mut reordered = false;
        for (i, prev_arg) in prev.iter().enumerate() {
            let (pos, arg_steps) = remaining
                .iter()
                .position(|(_, next_arg)| prev_arg == *next_arg)
                .map(|pos| (pos, Vec::new()))
                .or_else(|| {
                    remaining.iter().enumerate().find_map(|(pos, (_, next_arg))| {
                        self.check_step_with(prev_arg, next_arg, context).map(|steps| (pos, steps))
                    })
                })?;
            let (j, _) = remaining.remove(pos);
            reordered |= i != j;
            steps.extend(arg_steps);
        }

        Some((steps, reordered))
    }
}

/// Points the `before` node of every step at the node it rewrites, so that the steps replay onto
/// `prev` with [`apply_steps`](crate::expr::apply_steps).
///
/// Steps found on a reversed path are built from `next` back towards `prev`. Their `before` node
/// is then a new node, or one of `next`, that is structurally equal to a node of the tree at that
/// point but not part of it.
fn anchor_steps(prev: &Expr, steps: Vec<Step>) -> Vec<Step> {
    let mut current = prev.clone();
    steps
        .into_iter()
        .map(|mut step| {
            if Path::locate(&current, step.before.id).is_none() {
                if let Some(node) = current.post_order_iter().find(|node| **node == step.before) {
                    step.before = node.clone();
                }
            }
            current = apply_step(&current, &step);
            step
        })
        .collect()
}

/// Removes from `from` one structurally equal occurrence of each operand in `remove`. Returns
/// [`None`] if some operand in `remove` does not occur in `from`.
pub(crate) fn difference(from: &[Expr], remove: &[Expr]) -> Option<Vec<Expr>> {
    let mut rest = from.to_vec();
    for operand in remove {
        let pos = rest.iter().position(|candidate| candidate == operand)?;
        rest.remove(pos);
    }
    Some(rest)
}

/// Returns the operands that occur in both lists, counting repeats, in the order of `a`.
pub(crate) fn intersection(a: &[Expr], b: &[Expr]) -> Vec<Expr> {
    let mut pool = b.to_vec();
    let mut common = Vec::new();
    for operand in a {
        if let Some(pos) = pool.iter().position(|candidate| candidate == operand) {
            pool.remove(pos);
            common.push(operand.clone());
        }
    }
    common
}
