use crate::tree::BhNode;

/// Callbacks for a depth-first walk over a [`BhTree`](crate::tree::BhTree).
///
/// For every node the walk calls `enter_node`, then `visit_body` for each
/// body stored directly in the node, then recurses into the present
/// children in quadrant order, then calls `leave_node`. Returning `false`
/// from `enter_node` skips the node's bodies and its whole subtree, and
/// `leave_node` is not called for it.
pub trait NodeVisitor {
    fn enter_node(&mut self, _node: &BhNode) -> bool {
        true
    }

    fn visit_body(&mut self, _index: usize) {}

    fn leave_node(&mut self, _node: &BhNode) {}
}

/// Adapts a closure over body indices into a [`NodeVisitor`].
pub struct BodyVisitor<F: FnMut(usize)>(pub F);

impl<F: FnMut(usize)> NodeVisitor for BodyVisitor<F> {
    fn visit_body(&mut self, index: usize) {
        (self.0)(index)
    }
}

/// Adapts a closure over nodes into a [`NodeVisitor`]; the closure's return
/// value decides whether the walk descends into the node.
pub struct NodeFn<F: FnMut(&BhNode) -> bool>(pub F);

impl<F: FnMut(&BhNode) -> bool> NodeVisitor for NodeFn<F> {
    fn enter_node(&mut self, node: &BhNode) -> bool {
        (self.0)(node)
    }
}
