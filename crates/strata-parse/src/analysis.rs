//! Syntax analysis: ordered passes that wrap runs of siblings into higher-level nodes.
//!
//! A pass visits every container once, top-down. At each level it tries its rule at every
//! significant child from left to right; a rule looks at the siblings from that anchor on
//! through a [`Parser`] and reports the run it recognized as a [`Match`]. Passes only ever add
//! parents, so the leaves and their order never change.

use drop_bomb::DropBomb;
use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::SyntaxSet;
use strata_tree::{NodeId, SyntaxNode, Tree};

pub struct Pass {
    pub name: &'static str,
    pub rule: fn(&mut Parser<'_>) -> Option<Match>,
}

/// A run of siblings `start..=end` to wrap into a `kind` node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub kind: SyntaxKind,
    pub start: usize,
    pub end: usize,
}

/// Directives are kept as they were scanned.
const OPAQUE: SyntaxSet = SyntaxSet::new([
    PREPROCESSOR_IF,
    PREPROCESSOR_IFDEF,
    PREPROCESSOR_IFNDEF,
    PREPROCESSOR_ELIF,
    PREPROCESSOR_ELSE,
    PREPROCESSOR_ENDIF,
    PREPROCESSOR_DEFINE,
    PREPROCESSOR_UNDEF,
    PREPROCESSOR_INCLUDE,
    PREPROCESSOR_IMPORT,
    PREPROCESSOR_PRAGMA,
    PREPROCESSOR_WARNING,
    PREPROCESSOR_ERROR,
]);

fn is_significant(kind: SyntaxKind) -> bool {
    !kind.is_trivia() && !kind.is_comment()
}

/// Runs `passes` in order over the whole tree.
pub fn analyze(tree: &mut Tree, passes: &[Pass]) {
    let root = tree.root_id();

    for pass in passes {
        let _span = tracing::debug_span!("pass", name = pass.name).entered();
        let mut wrapped = 0;

        tree.walk(root, |tree, node| {
            let kind = tree.kind(node);
            if kind.is_atomic() || OPAQUE.contains(kind) {
                return None;
            }
            wrapped += run_level(tree, node, pass);
            Some(node)
        });

        tracing::debug!(wrapped, "pass finished");
    }
}

fn run_level(tree: &mut Tree, parent: NodeId, pass: &Pass) -> usize {
    let mut wrapped = 0;
    let mut index = 0;

    while index < tree.children(parent).len() {
        let anchor = tree.children(parent)[index];
        if !is_significant(tree.kind(anchor)) {
            index += 1;
            continue;
        }

        let found = {
            let mut p = Parser::new(tree, parent, index);
            (pass.rule)(&mut p)
        };

        match found.filter(|found| accepts(tree, parent, index, found)) {
            Some(found) => {
                tracing::trace!(kind = ?found.kind, start = found.start, end = found.end, "wrap");
                tree.adopt(parent, found.start..=found.end, found.kind);
                wrapped += 1;
                index = found.start + 1;
            }
            None => index += 1,
        }
    }

    wrapped
}

/// A match may not reach back before its anchor, and may not re-wrap the whole content of a
/// node of the same kind.
fn accepts(tree: &Tree, parent: NodeId, anchor: usize, found: &Match) -> bool {
    let len = tree.children(parent).len();
    if found.start < anchor || found.end < found.start || found.end >= len {
        return false;
    }
    !(found.start == 0 && found.end == len - 1 && tree.kind(parent) == found.kind)
}

/// Cursor over the siblings following an anchor. Trivia and comments are skipped by every
/// lookahead and never end a match.
pub struct Parser<'t> {
    tree: &'t Tree,
    parent: NodeId,
    children: &'t [NodeId],
    anchor: usize,
    pos: usize,
    last: Option<usize>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tree: &'t Tree, parent: NodeId, anchor: usize) -> Self {
        let children = tree.children(parent);
        Self { tree, parent, children, anchor, pos: anchor, last: None }
    }

    fn significant(&self) -> impl Iterator<Item = (usize, NodeId)> + 't {
        let (tree, children, pos) = (self.tree, self.children, self.pos);
        children[pos..]
            .iter()
            .enumerate()
            .map(move |(offset, &id)| (pos + offset, id))
            .filter(move |&(_, id)| is_significant(tree.kind(id)))
    }

    /// Kind of the `n`-th significant sibling ahead.
    pub fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.significant().nth(n).map(|(_, id)| self.tree.kind(id))
    }

    pub fn current(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    pub fn at_any(&self, kinds: SyntaxSet) -> bool {
        self.current().is_some_and(|kind| kinds.contains(kind))
    }

    pub fn node(&self) -> Option<SyntaxNode<'t>> {
        self.significant().next().map(|(_, id)| self.tree.node(id))
    }

    /// Text of the current sibling if it is a leaf.
    pub fn text(&self) -> Option<&'t str> {
        self.significant().next().and_then(|(_, id)| self.tree.leaf_text(id))
    }

    pub fn advance(&mut self) {
        if let Some((index, _)) = self.significant().next() {
            self.last = Some(index);
            self.pos = index + 1;
        }
    }

    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    /// Advances up to and including the next `end` if every sibling before it satisfies
    /// `allowed`. Leaves the position unchanged otherwise.
    pub fn eat_through(&mut self, end: SyntaxKind, allowed: impl Fn(SyntaxKind) -> bool) -> bool {
        let mut n = 0;
        loop {
            match self.nth(n) {
                Some(kind) if kind == end => break,
                Some(kind) if allowed(kind) => n += 1,
                _ => return false,
            }
        }
        for _ in 0..=n {
            self.advance();
        }
        true
    }

    /// Kind of the significant sibling before the anchor.
    pub fn prev_kind(&self) -> Option<SyntaxKind> {
        self.children[..self.anchor]
            .iter()
            .rev()
            .map(|&id| self.tree.kind(id))
            .find(|&kind| is_significant(kind))
    }

    pub fn parent_kind(&self) -> SyntaxKind {
        self.tree.kind(self.parent)
    }

    pub fn start(&mut self) -> Marker {
        let start = self.significant().next().map_or(self.pos, |(index, _)| index);
        Marker::new(start)
    }
}

pub struct Marker {
    start: usize,
    bomb: DropBomb,
}

impl Marker {
    fn new(start: usize) -> Self {
        Self { start, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    /// Ends the run at the last significant sibling consumed.
    pub fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> Match {
        self.bomb.defuse();
        Match { kind, start: self.start, end: p.last.unwrap_or(self.start) }
    }

    pub fn abandon(mut self, _p: &mut Parser<'_>) {
        self.bomb.defuse();
    }

    /// Completes with `kind`, or abandons when it is `None`.
    pub fn finish(self, p: &mut Parser<'_>, kind: Option<SyntaxKind>) -> Option<Match> {
        match kind {
            Some(kind) => Some(self.complete(p, kind)),
            None => {
                self.abandon(p);
                None
            }
        }
    }
}
