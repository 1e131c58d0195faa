//! Generic depth-first minimax tree.
//!
//! A [`Node`] owns its children exclusively (a tree, never a graph), carries
//! an optional numeric `value` and an optional `data` payload, and reduces
//! over its children in post-order: children are traversed first, then the
//! parent takes the minimum or maximum child value — and that child's
//! payload — according to its [`NodeKind`].
//!
//! With pruning enabled, alpha/beta bounds are threaded top-down at
//! child-visit time and the remaining siblings are abandoned once
//! `beta <= alpha` at the current node. Pruning never changes the root's
//! value or payload, only the number of nodes visited.

/// Whether a node takes the minimum or the maximum over its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Min,
    Max,
}

impl NodeKind {
    fn other(self) -> NodeKind {
        match self {
            NodeKind::Min => NodeKind::Max,
            NodeKind::Max => NodeKind::Min,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node<T> {
    pub data: Option<T>,
    pub value: Option<i64>,
    /// Number of evaluations performed in this node's subtree during the
    /// last traversal: one for the node itself plus the totals of every
    /// child actually visited.
    pub evaluations: u64,
    kind: NodeKind,
    pruning: bool,
    children: Vec<Node<T>>,
}

impl<T: Clone> Node<T> {
    pub fn new(kind: NodeKind, pruning: bool) -> Node<T> {
        Node {
            data: None,
            value: None,
            evaluations: 0,
            kind,
            pruning,
            children: Vec::new(),
        }
    }

    pub fn min() -> Node<T> {
        Node::new(NodeKind::Min, false)
    }

    pub fn max() -> Node<T> {
        Node::new(NodeKind::Max, false)
    }

    pub fn min_ab() -> Node<T> {
        Node::new(NodeKind::Min, true)
    }

    pub fn max_ab() -> Node<T> {
        Node::new(NodeKind::Max, true)
    }

    /// A node of the opposite kind with the same pruning setting, for
    /// building alternating levels.
    pub fn child_node(&self) -> Node<T> {
        Node::new(self.kind.other(), self.pruning)
    }

    /// Sets the payload and static value, builder style. Used for leaves.
    pub fn leaf(mut self, data: T, value: i64) -> Node<T> {
        self.data = Some(data);
        self.value = Some(value);
        self
    }

    /// Appends a child, builder style.
    pub fn add(mut self, node: Node<T>) -> Node<T> {
        self.children.push(node);
        self
    }

    pub fn push(&mut self, node: Node<T>) {
        self.children.push(node);
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Depth-first post-order traversal. Afterwards the node's `value` and
    /// `data` hold the min/max-reduced result of its subtree.
    pub fn traverse(&mut self) {
        self.traverse_bounded(i64::MIN, i64::MAX);
    }

    fn traverse_bounded(&mut self, mut alpha: i64, mut beta: i64) {
        self.evaluations = 0;
        for i in 0..self.children.len() {
            let child = &mut self.children[i];
            child.traverse_bounded(alpha, beta);
            self.evaluations += child.evaluations;
            if self.pruning {
                if let Some(v) = child.value {
                    match self.kind {
                        NodeKind::Min => beta = beta.min(v),
                        NodeKind::Max => alpha = alpha.max(v),
                    }
                }
                if beta <= alpha {
                    // Cut-off: the remaining siblings cannot affect the
                    // result at this node.
                    break;
                }
            }
        }
        self.evaluate();
    }

    /// Reduces over the children evaluated so far. A strict comparison
    /// keeps the earliest child on ties. Leaves keep their preset value.
    fn evaluate(&mut self) {
        self.evaluations += 1;
        let mut best: Option<(i64, usize)> = None;
        for (i, child) in self.children.iter().enumerate() {
            let v = match child.value {
                Some(v) => v,
                None => continue,
            };
            let better = match (self.kind, best) {
                (_, None) => true,
                (NodeKind::Min, Some((b, _))) => v < b,
                (NodeKind::Max, Some((b, _))) => v > b,
            };
            if better {
                best = Some((v, i));
            }
        }
        if let Some((v, i)) = best {
            self.value = Some(v);
            self.data = self.children[i].data.clone();
        }
    }
}
