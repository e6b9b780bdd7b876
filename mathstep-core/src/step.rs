use crate::expr::Expr;

/// A single rewrite of an expression, with a human-readable explanation.
///
/// Steps form a tree: a coarse step such as `"simplify expression"` lists the finer-grained
/// rewrites that produced it in `substeps`. The `before` node of a step is the node that was
/// rewritten, so [`apply_step`](crate::expr::apply_step) can replay it on a larger tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// The explanation shown to the user.
    pub message: &'static str,

    /// The node before the rewrite.
    pub before: Expr,

    /// The node after the rewrite.
    pub after: Expr,

    /// The finer-grained steps making up this one, in order.
    pub substeps: Vec<Step>,
}

impl Step {
    /// Creates a step without substeps.
    pub fn new(message: &'static str, before: Expr, after: Expr) -> Self {
        Self {
            message,
            before,
            after,
            substeps: Vec::new(),
        }
    }

    /// Attaches the given substeps to this step.
    pub fn with_substeps(mut self, substeps: Vec<Step>) -> Self {
        self.substeps = substeps;
        self
    }

    /// Returns the messages of the direct substeps of this step.
    pub fn substep_messages(&self) -> Vec<&'static str> {
        self.substeps.iter().map(|step| step.message).collect()
    }
}
