use crate::step::Step;
use super::{Expr, NodeId};

/// The location of a node in a tree, as the list of child indices leading to it from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<usize>);

impl Path {
    /// Returns the child indices from the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Finds the first node with the given id in pre-order.
    pub fn locate(root: &Expr, id: NodeId) -> Option<Self> {
        fn search(node: &Expr, id: NodeId, indices: &mut Vec<usize>) -> bool {
            if node.id == id {
                return true;
            }
            for (i, child) in node.kind.children().into_iter().enumerate() {
                indices.push(i);
                if search(child, id, indices) {
                    return true;
                }
                indices.pop();
            }
            false
        }

        let mut indices = Vec::new();
        search(root, id, &mut indices).then_some(Self(indices))
    }

    /// Returns the node at this path, if the path exists in the tree.
    pub fn get<'a>(&self, root: &'a Expr) -> Option<&'a Expr> {
        self.0.iter().try_fold(root, |node, &i| node.kind.children().get(i).copied())
    }
}

/// Returns a copy of `root` with the node at `path` replaced by `replacement`.
///
/// Only the ancestors of the replaced node are rebuilt, and they keep their ids; every other
/// subtree is shared with `root`. An invalid path leaves the tree unchanged.
pub fn replace_at(root: &Expr, path: &Path, replacement: Expr) -> Expr {
    fn replace(node: &Expr, indices: &[usize], replacement: Expr) -> Expr {
        let Some((&first, rest)) = indices.split_first() else {
            return replacement;
        };
        let children = node.kind.children();
        if first >= children.len() {
            return node.clone();
        }
        let children = children
            .into_iter()
            .enumerate()
            .map(|(i, child)| if i == first {
                replace(child, rest, replacement.clone())
            } else {
                child.clone()
            })
            .collect();
        node.with_children(children)
    }

    replace(root, path.indices(), replacement)
}

/// Applies a step to a tree by replacing the step's `before` node, found by id, with its `after`
/// node. If the node is not in the tree, the tree is returned unchanged.
pub fn apply_step(root: &Expr, step: &Step) -> Expr {
    match Path::locate(root, step.before.id) {
        Some(path) => replace_at(root, &path, step.after.clone()),
        None => root.clone(),
    }
}

/// Applies each step in turn, materialising the state after the last one.
pub fn apply_steps<'a>(root: &Expr, steps: impl IntoIterator<Item = &'a Step>) -> Expr {
    steps.into_iter().fold(root.clone(), |root, step| apply_step(&root, step))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{expr::Builder, parse};
    use super::*;

    #[test]
    fn locate_and_get() {
        let expr = parse(&Builder::new(), "2x + 5 = 10").unwrap();
        let lhs = expr.kind.children()[0].clone();
        let five = lhs.kind.children()[1].clone();

        let path = Path::locate(&expr, five.id).unwrap();
        assert_eq!(path.indices(), &[0, 1]);
        assert!(path.get(&expr).unwrap().ptr_eq(&five));
    }

    #[test]
    fn replace_keeps_ids_and_shares_siblings() {
        let builder = Builder::new();
        let expr = parse(&builder, "2x + 5 = 10").unwrap();
        let rhs = expr.kind.children()[1].clone();
        let lhs = expr.kind.children()[0].clone();
        let five = lhs.kind.children()[1].clone();

        let path = Path::locate(&expr, five.id).unwrap();
        let replaced = replace_at(&expr, &path, builder.int(7));
        assert_eq!(replaced.to_string(), "2x + 7 = 10");
        assert_eq!(replaced.id, expr.id);
        assert!(replaced.kind.children()[1].ptr_eq(&rhs));
        assert_eq!(expr.to_string(), "2x + 5 = 10");
    }

    #[test]
    fn apply_steps_in_order() {
        let builder = Builder::new();
        let expr = parse(&builder, "a + b").unwrap();
        let a = expr.kind.children()[0].clone();
        let b = expr.kind.children()[1].clone();
        let c = builder.identifier("c");

        let steps = [
            Step::new("first", a, builder.int(1)),
            Step::new("second", b, c.clone()),
            Step::new("third", c, builder.int(2)),
        ];
        assert_eq!(apply_steps(&expr, &steps).to_string(), "1 + 2");
    }

    #[test]
    fn missing_node_is_ignored() {
        let builder = Builder::new();
        let expr = parse(&builder, "a + b").unwrap();
        let step = Step::new("unrelated", builder.identifier("z"), builder.int(0));
        assert!(apply_step(&expr, &step).ptr_eq(&expr));
    }
}
