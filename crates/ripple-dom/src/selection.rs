//! Element collections
//!
//! The ordered element collection the utility operations act on. The host
//! produces it from whatever query mechanism it has; here it is a plain
//! owned list of node handles.

use crate::NodeRef;

/// Ordered collection of node handles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeRef>,
}

impl Selection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a single node
    pub fn one(node: NodeRef) -> Self {
        Self { nodes: vec![node] }
    }

    /// Number of nodes in the collection
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the collection holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The sole node, if the collection holds exactly one
    pub fn single(&self) -> Option<NodeRef> {
        match self.nodes.as_slice() {
            [node] => Some(*node),
            _ => None,
        }
    }

    /// Iterate the nodes in order
    pub fn iter(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes.iter().copied()
    }

    /// Append a node
    pub fn push(&mut self, node: NodeRef) {
        self.nodes.push(node);
    }
}

impl From<NodeRef> for Selection {
    fn from(node: NodeRef) -> Self {
        Self::one(node)
    }
}

impl From<Vec<NodeRef>> for Selection {
    fn from(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<NodeRef> for Selection {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        Self { nodes: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = NodeRef;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeRef>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_only_for_exactly_one() {
        let a = NodeRef(1);
        let b = NodeRef(2);

        assert_eq!(Selection::one(a).single(), Some(a));
        assert_eq!(Selection::new().single(), None);
        assert_eq!(Selection::from(vec![a, b]).single(), None);
    }

    #[test]
    fn preserves_order() {
        let sel: Selection = [NodeRef(3), NodeRef(1), NodeRef(2)].into_iter().collect();
        let order: Vec<u64> = sel.iter().map(|n| n.0).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
