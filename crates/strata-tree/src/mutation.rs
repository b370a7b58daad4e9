//! Structural edits. Every successful edit bumps the revision of the edited node and of all
//! its ancestors, so a consumer holding a revision can tell whether a subtree changed.

use strata_kinds::SyntaxKind;
use text_size::TextRange;

use crate::tree::NodeData;
use crate::{MutationError, NodeId, Tree};

type Result<T> = std::result::Result<T, MutationError>;

impl Tree {
    fn data(&self, node: NodeId) -> Result<&NodeData> {
        self.nodes.get(node.0).ok_or(MutationError::Stale(node))
    }

    /// Parent of an attached node and the node's index in it.
    fn position(&self, node: NodeId) -> Result<(NodeId, usize)> {
        if node == self.root {
            return Err(MutationError::Root);
        }
        let parent = self.data(node)?.parent.ok_or(MutationError::Detached(node))?;
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&child| child == node)
            .ok_or(MutationError::Detached(node))?;
        Ok((parent, index))
    }

    fn touch(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(node) = current {
            let data = &mut self.nodes[node.0];
            data.revision += 1;
            current = data.parent;
        }
    }

    /// Frees `node` and everything below it.
    fn free(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            if let Some(data) = self.nodes.remove(node.0) {
                stack.extend(data.children);
            }
        }
    }

    /// Creates a detached leaf holding `text`.
    pub fn new_leaf(&mut self, kind: SyntaxKind, text: impl Into<Box<str>>) -> Result<NodeId> {
        if !kind.is_atomic() {
            return Err(MutationError::NotAtomic(kind));
        }
        let leaf = self.alloc(kind, TextRange::default());
        self.nodes[leaf.0].text = Some(text.into());
        Ok(leaf)
    }

    /// Creates a detached, empty container.
    pub fn new_node(&mut self, kind: SyntaxKind) -> Result<NodeId> {
        if kind.is_atomic() {
            return Err(MutationError::Atomic(kind));
        }
        Ok(self.alloc(kind, TextRange::default()))
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        let parent_data = self.data(parent)?;
        if parent_data.kind.is_atomic() {
            return Err(MutationError::Atomic(parent_data.kind));
        }
        let len = parent_data.children.len();
        if index > len {
            return Err(MutationError::OutOfBounds { index, len });
        }

        if child == self.root {
            return Err(MutationError::Root);
        }
        if self.data(child)?.parent.is_some() {
            return Err(MutationError::Attached(child));
        }
        if self.node(parent).ancestors_and_self().any(|node| node.id() == child) {
            return Err(MutationError::Cycle(child));
        }

        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.touch(parent);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = self.data(parent)?.children.len();
        self.insert_child(parent, len, child)
    }

    /// Removes and frees the child at `index` with its whole subtree.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> Result<()> {
        let children = &self.data(parent)?.children;
        let len = children.len();
        let child = *children.get(index).ok_or(MutationError::OutOfBounds { index, len })?;

        self.nodes[parent.0].children.remove(index);
        self.free(child);
        self.touch(parent);
        Ok(())
    }

    /// Removes and frees `node` with its whole subtree.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        let (parent, index) = self.position(node)?;
        self.remove_child(parent, index)
    }

    /// Unlinks `node` from its parent without freeing it, so it can be inserted elsewhere.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        let (parent, index) = self.position(node)?;
        self.nodes[parent.0].children.remove(index);
        self.nodes[node.0].parent = None;
        self.touch(parent);
        Ok(())
    }

    pub fn insert_previous_sibling(&mut self, node: NodeId, sibling: NodeId) -> Result<()> {
        let (parent, index) = self.position(node)?;
        self.insert_child(parent, index, sibling)
    }

    pub fn insert_next_sibling(&mut self, node: NodeId, sibling: NodeId) -> Result<()> {
        let (parent, index) = self.position(node)?;
        self.insert_child(parent, index + 1, sibling)
    }

    /// Puts the detached `new` node where `node` is and frees `node`. With `preserve_children`
    /// the children of `node` move to the end of `new`'s children instead of being freed.
    pub fn replace(&mut self, node: NodeId, new: NodeId, preserve_children: bool) -> Result<()> {
        let (parent, index) = self.position(node)?;
        if new == self.root {
            return Err(MutationError::Root);
        }
        let new_data = self.data(new)?;
        if new_data.parent.is_some() {
            return Err(MutationError::Attached(new));
        }
        if self.node(parent).ancestors_and_self().any(|ancestor| ancestor.id() == new) {
            return Err(MutationError::Cycle(new));
        }
        if preserve_children && new_data.kind.is_atomic() && !self.children(node).is_empty() {
            return Err(MutationError::Atomic(new_data.kind));
        }

        if preserve_children {
            let children = std::mem::take(&mut self.nodes[node.0].children);
            for &child in &children {
                self.nodes[child.0].parent = Some(new);
            }
            let new_data = &mut self.nodes[new.0];
            new_data.children.extend(children);
            new_data.revision += 1;
        }

        self.nodes[parent.0].children[index] = new;
        self.nodes[new.0].parent = Some(parent);
        self.free(node);
        self.touch(parent);
        Ok(())
    }

    /// Replaces `node` and its subtree with one `TEXT` leaf holding `text`, which keeps the
    /// range and lines of `node`. Empty text removes `node`; the new leaf is returned otherwise.
    pub fn replace_with_text(&mut self, node: NodeId, text: &str) -> Result<Option<NodeId>> {
        if text.is_empty() {
            self.remove(node)?;
            return Ok(None);
        }

        self.position(node)?;
        let (range, lines) = (self.range(node), self.lines(node));
        let leaf = self.new_leaf(SyntaxKind::TEXT, text)?;
        let data = &mut self.nodes[leaf.0];
        data.range = range;
        data.lines = lines;

        self.replace(node, leaf, false)?;
        Ok(Some(leaf))
    }
}
