use super::Expr;

/// Callbacks for [`traverse`].
pub trait Visitor {
    /// Called before the children of `node` are visited. `ancestors` lists the ancestors of
    /// `node`, from the root down to its parent.
    fn enter(&mut self, _node: &Expr, _ancestors: &[Expr]) {}

    /// Called after the children of `node` have been visited, with `node` already rebuilt from
    /// the rewritten children. Returning a node replaces `node` in the tree.
    fn exit(&mut self, _node: &Expr, _ancestors: &[Expr]) -> Option<Expr> {
        None
    }
}

/// Visits every node of `root` depth-first, rewriting the tree from the leaves up with the nodes
/// returned by [`Visitor::exit`].
///
/// A parent whose children changed is rebuilt with its own id. If nothing changed, the returned
/// handle points at `root` itself, which [`Expr::ptr_eq`] can detect.
pub fn traverse(root: &Expr, visitor: &mut impl Visitor) -> Expr {
    fn walk(node: &Expr, ancestors: &mut Vec<Expr>, visitor: &mut impl Visitor) -> Expr {
        visitor.enter(node, ancestors);

        ancestors.push(node.clone());
        let children = node.kind.children();
        let mut changed = false;
        let mut new_children = Vec::with_capacity(children.len());
        for child in children {
            let new_child = walk(child, ancestors, visitor);
            changed |= !new_child.ptr_eq(child);
            new_children.push(new_child);
        }
        ancestors.pop();

        let node = if changed {
            node.with_children(new_children)
        } else {
            node.clone()
        };
        visitor.exit(&node, ancestors).unwrap_or(node)
    }

    walk(root, &mut Vec::new(), visitor)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::expr::{Builder, ExprKind};
    use crate::parse;
    use super::*;

    /// Replaces every `x` with `y`, recording the depth at which each identifier was entered.
    struct Rename {
        builder: Builder,
        depths: Vec<usize>,
    }

    impl Visitor for Rename {
        fn enter(&mut self, node: &Expr, ancestors: &[Expr]) {
            if node.is_identifier() {
                self.depths.push(ancestors.len());
            }
        }

        fn exit(&mut self, node: &Expr, _: &[Expr]) -> Option<Expr> {
            match &node.kind {
                ExprKind::Identifier { name, .. } if name == "x" => Some(self.builder.identifier("y")),
                _ => None,
            }
        }
    }

    #[test]
    fn rewrite_leaves() {
        let builder = Builder::new();
        let expr = parse(&builder, "2x + (x + z)").unwrap();
        let mut visitor = Rename { builder: builder.clone(), depths: Vec::new() };

        let result = traverse(&expr, &mut visitor);
        assert_eq!(result.to_string(), "2y + (y + z)");
        assert_eq!(result.id, expr.id);
        assert_eq!(visitor.depths, vec![2, 2, 2]);
    }

    #[test]
    fn unchanged_tree_is_shared() {
        let builder = Builder::new();
        let expr = parse(&builder, "a + b").unwrap();
        let mut visitor = Rename { builder, depths: Vec::new() };
        assert!(traverse(&expr, &mut visitor).ptr_eq(&expr));
    }
}
