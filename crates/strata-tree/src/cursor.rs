use crate::{NodeId, Tree};

/// Pre-order traversal emitting an event when entering and when leaving each node.
pub struct Preorder<'a> {
    tree: &'a Tree,
    start: Option<NodeId>,
    /// Entered nodes with the index of their next child to visit.
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Preorder<'a> {
    pub fn new(tree: &'a Tree, start: NodeId) -> Self {
        Self { tree, start: Some(start), stack: Vec::new() }
    }

    /// Skips the children of the node entered last.
    pub fn skip_subtree(&mut self) {
        if let Some((_, next_child)) = self.stack.last_mut() {
            *next_child = usize::MAX;
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push((start, 0));
            return Some(WalkEvent::Enter(start));
        }

        let (node, next_child) = self.stack.last_mut()?;
        match self.tree.children(*node).get(*next_child) {
            Some(&child) => {
                *next_child += 1;
                self.stack.push((child, 0));
                Some(WalkEvent::Enter(child))
            }
            None => {
                let (node, _) = self.stack.pop()?;
                Some(WalkEvent::Leave(node))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent {
    Enter(NodeId),
    Leave(NodeId),
}

#[cfg(test)]
mod tests {
    use strata_kinds::SyntaxKind::*;
    use text_size::{TextRange, TextSize};

    use super::{Preorder, WalkEvent};
    use crate::Tree;

    #[test]
    fn skip_subtree() {
        let mut tree = Tree::new("(a)b");
        let root = tree.root_id();
        let parens = tree.open_node(root, PARENTHESIS, TextSize::from(0));
        tree.push_leaf(parens, DELIMITER, TextRange::new(0.into(), 1.into()));
        tree.push_leaf(parens, TEXT, TextRange::new(1.into(), 2.into()));
        tree.push_leaf(parens, DELIMITER, TextRange::new(2.into(), 3.into()));
        tree.close_node(parens, TextSize::from(3));
        let b = tree.push_leaf(root, TEXT, TextRange::new(3.into(), 4.into()));

        let mut preorder = Preorder::new(&tree, root);
        let mut events = Vec::new();
        while let Some(event) = preorder.next() {
            if event == WalkEvent::Enter(parens) {
                preorder.skip_subtree();
            }
            events.push(event);
        }

        assert_eq!(
            events,
            [
                WalkEvent::Enter(root),
                WalkEvent::Enter(parens),
                WalkEvent::Leave(parens),
                WalkEvent::Enter(b),
                WalkEvent::Leave(b),
                WalkEvent::Leave(root),
            ]
        );
    }
}
