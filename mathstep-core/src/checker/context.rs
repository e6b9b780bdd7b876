use std::{cell::RefCell, rc::Rc};
use crate::{expr::Expr, step::Step};
use super::Check;

/// How deep [`StepChecker::check_step_with`](super::StepChecker::check_step_with) may recurse
/// before giving up on a path.
///
/// Checks that could undo each other are stopped by the step history, so this is only a bound on
/// stack use. Each nested call handles a smaller or rewritten expression, and no explanation of a
/// single student step comes close to this many levels.
pub const MAX_DEPTH: usize = 256;

/// Restricts which checks may run while searching below a particular check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filters {
    /// If set, only the named checks may run.
    pub allowed: Option<&'static [&'static str]>,

    /// The named checks may not run.
    pub disallowed: &'static [&'static str],
}

/// The state of one search path of the checker.
///
/// A context is never mutated once created; checks derive a new one when they recurse. The
/// record of successful checks is shared by every context derived from the same root.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Steps already applied along this path.
    steps: Vec<Step>,

    /// Whether `prev` and `next` have been swapped relative to the order the user wrote them.
    reversed: bool,

    filters: Filters,

    depth: usize,

    successful_checks: Rc<RefCell<Vec<&'static str>>>,
}

impl Context {
    /// Creates the context of a new top-level check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `prev` and `next` are swapped on this path.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Returns true if this path may not recurse any deeper.
    pub fn is_exhausted(&self) -> bool {
        self.depth >= MAX_DEPTH
    }

    /// Returns true if a step with one of the given messages was already applied on this path.
    pub fn has_applied(&self, messages: &[&str]) -> bool {
        self.steps.iter().any(|step| messages.contains(&step.message))
    }

    /// Returns true if the filters of this path let the given check run.
    pub(crate) fn allows(&self, check: &Check) -> bool {
        if check.unfilterable {
            return true;
        }
        if self.filters.disallowed.contains(&check.name) {
            return false;
        }
        self.filters
            .allowed
            .map_or(true, |allowed| allowed.contains(&check.name))
    }

    /// Returns a context one level deeper.
    pub(crate) fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Returns a context with `prev` and `next` swapped.
    pub fn reversed(&self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self.clone()
        }
    }

    /// Returns a context in which the given step has been applied.
    pub fn with_step(&self, step: &Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step.clone());
        Self { steps, ..self.clone() }
    }

    /// Returns a context with the given filters.
    pub fn with_filters(&self, filters: Filters) -> Self {
        Self { filters, ..self.clone() }
    }

    /// Records that the named check succeeded.
    pub(crate) fn record_success(&self, name: &'static str) {
        let mut checks = self.successful_checks.borrow_mut();
        if !checks.contains(&name) {
            checks.push(name);
        }
    }

    /// Returns the names of the checks that succeeded anywhere below the root context, in the
    /// order they first succeeded.
    pub fn successful_checks(&self) -> Vec<&'static str> {
        self.successful_checks.borrow().clone()
    }

    /// Builds the step for a rewrite found while searching from `from` to `to`.
    ///
    /// The step reads in the order the user wrote the expressions: on a reversed path the rewrite
    /// was found backwards, so its `before` and `after` are swapped.
    pub fn step(&self, message: &'static str, from: Expr, to: Expr) -> Step {
        self.directed_step(message, message, from, to)
    }

    /// Like [`Context::step`], with a different message depending on the direction of the path.
    pub fn directed_step(
        &self,
        forward: &'static str,
        backward: &'static str,
        from: Expr,
        to: Expr,
    ) -> Step {
        if self.reversed {
            Step::new(backward, to, from)
        } else {
            Step::new(forward, from, to)
        }
    }

    /// Joins groups of steps that a check found in the order of its search.
    ///
    /// On a reversed path the search runs from the user's `next` back to their `prev`, so the
    /// groups are joined last to first.
    pub fn arrange(&self, segments: Vec<Vec<Step>>) -> Vec<Step> {
        if self.reversed {
            segments.into_iter().rev().flatten().collect()
        } else {
            segments.into_iter().flatten().collect()
        }
    }
}
