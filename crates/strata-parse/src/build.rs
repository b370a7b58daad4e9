//! Nests the flat span stream into a tree by pairing delimiters and markup tags.
//!
//! Pairing never fails: a stray closing marker stays a leaf where it was found, and a
//! container whose closing marker never comes extends to the end of the enclosing range.
//! Every recovery is reported as a warning.

use strata_errors::Diagnostic;
use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::SyntaxSet;
use strata_scanner::{Scanner, Span};
use strata_tree::{NodeId, Tree};
use text_size::{TextRange, TextSize};

use crate::language::{Grammar, Tag, TagForm};

/// Scans `text` and nests the spans. No syntax analysis is done.
pub fn build(text: &str, grammar: &Grammar) -> (Tree, Vec<Diagnostic>) {
    let mut builder = Builder { text, grammar, tree: Tree::new(text), diagnostics: Vec::new() };
    let root = builder.tree.root_id();
    builder.build_range(root, TextRange::up_to(TextSize::of(text)), None);
    (builder.tree, builder.diagnostics)
}

struct Builder<'a> {
    text: &'a str,
    grammar: &'a Grammar,
    tree: Tree,
    diagnostics: Vec<Diagnostic>,
}

/// A container waiting for its closing marker.
enum Frame<'a> {
    Pair { node: NodeId, kind: SyntaxKind, open: TextRange },
    Element { node: NodeId, name: &'a str, open: TextRange },
}

impl Frame<'_> {
    fn node(&self) -> NodeId {
        match *self {
            Frame::Pair { node, .. } | Frame::Element { node, .. } => node,
        }
    }
}

impl<'a> Builder<'a> {
    fn build_range(&mut self, base: NodeId, range: TextRange, restrict: Option<SyntaxSet>) {
        let (text, grammar) = (self.text, self.grammar);
        let mut stack = Vec::new();

        for span in Scanner::with_range(text, range, &grammar.kinds, restrict) {
            let parent = stack.last().map_or(base, Frame::node);

            match span {
                Span::Leaf { kind: TAG, range } if grammar.markup.is_some() => {
                    self.tag(parent, &mut stack, range);
                }
                Span::Leaf { kind, range } => {
                    self.tree.push_leaf(parent, kind, range);
                }
                Span::Open { kind, range } => {
                    let node = self.tree.open_node(parent, kind, range.start());
                    self.tree.push_leaf(node, DELIMITER, range);
                    stack.push(Frame::Pair { node, kind, open: range });
                }
                Span::Close { kind, range } => {
                    let matching = stack.iter().rposition(
                        |frame| matches!(frame, Frame::Pair { kind: open, .. } if *open == kind),
                    );
                    match matching {
                        Some(index) => self.close(&mut stack, index, DELIMITER, range),
                        None => {
                            self.tree.push_leaf(parent, DELIMITER, range);
                            self.warning(format!("unmatched `{}`", &text[range]), range);
                        }
                    }
                }
                Span::Delimited { kind, open, interior, close } => {
                    let node = self.tree.open_node(parent, kind, open.start());
                    self.tree.push_leaf(node, DELIMITER, open);
                    if !interior.is_empty() {
                        let restrict = grammar.kinds.spec(kind).and_then(|spec| spec.interior);
                        self.build_range(node, interior, restrict);
                    }
                    if !close.is_empty() {
                        self.tree.push_leaf(node, DELIMITER, close);
                    }
                    self.tree.close_node(node, close.end());
                }
            }
        }

        self.unwind(&mut stack, 0, range.end());
    }

    fn tag(&mut self, parent: NodeId, stack: &mut Vec<Frame<'a>>, range: TextRange) {
        let Some(markup) = self.grammar.markup else {
            self.tree.push_leaf(parent, TAG, range);
            return;
        };
        let text = self.text;
        let tag = Tag::parse(&text[range]);

        let kind = markup.element_kind(tag.name);
        match tag.form {
            TagForm::Open if !markup.is_void(tag.name) => {
                let node = self.tree.open_node(parent, kind, range.start());
                self.tree.push_leaf(node, TAG, range);
                stack.push(Frame::Element { node, name: tag.name, open: range });
            }
            TagForm::Open | TagForm::Empty => {
                let node = self.tree.open_node(parent, kind, range.start());
                self.tree.push_leaf(node, TAG, range);
                self.tree.close_node(node, range.end());
            }
            TagForm::Close => {
                let matching = stack.iter().rposition(|frame| {
                    matches!(frame, Frame::Element { name, .. } if markup.same_name(name, tag.name))
                });
                match matching {
                    Some(index) => self.close(stack, index, TAG, range),
                    None => {
                        self.tree.push_leaf(parent, TAG, range);
                        let message = format!("`</{}>` does not close any open element", tag.name);
                        self.warning(message, range);
                    }
                }
            }
        }
    }

    /// Closes the frame at `index` with a `marker` leaf, closing everything opened after it.
    fn close(
        &mut self,
        stack: &mut Vec<Frame<'a>>,
        index: usize,
        marker: SyntaxKind,
        range: TextRange,
    ) {
        self.unwind(stack, index + 1, range.start());
        if let Some(frame) = stack.pop() {
            let node = frame.node();
            self.tree.push_leaf(node, marker, range);
            self.tree.close_node(node, range.end());
        }
    }

    /// Closes every frame above `keep` at `end`, innermost first.
    fn unwind(&mut self, stack: &mut Vec<Frame<'a>>, keep: usize, end: TextSize) {
        while stack.len() > keep {
            let Some(frame) = stack.pop() else { break };
            self.tree.close_node(frame.node(), end);

            let (message, open) = match frame {
                Frame::Pair { open, .. } => (format!("unclosed `{}`", &self.text[open]), open),
                Frame::Element { name, open, .. } => (format!("unclosed element `<{name}>`"), open),
            };
            self.warning(message, open);
        }
    }

    fn warning(&mut self, message: String, range: TextRange) {
        tracing::trace!(%message, ?range, "recovered");
        self.diagnostics.push(Diagnostic::warning(message, range));
    }
}

#[cfg(test)]
mod tests {
    use expect_test::{Expect, expect};

    use super::build;
    use crate::Language;

    fn check(language: Language, text: &str, expect: Expect) {
        let (tree, diagnostics) = build(text, language.grammar());
        assert_eq!(tree.text(), text);

        let mut actual = tree.root().debug_dump();
        for diagnostic in &diagnostics {
            actual.push_str(&format!("{:?}: {}\n", diagnostic.range(), diagnostic.message()));
        }
        expect.assert_eq(&actual);
    }

    #[test]
    fn closing_marker_closes_inner_containers() {
        check(
            Language::C,
            "f(a{b)",
            expect![[r#"
                ROOT@0..6
                  TEXT@0..1 "f"
                  PARENTHESIS@1..6
                    DELIMITER@1..2 "("
                    TEXT@2..3 "a"
                    BRACES@3..5
                      DELIMITER@3..4 "{"
                      TEXT@4..5 "b"
                    DELIMITER@5..6 ")"
                3..4: unclosed `{`
            "#]],
        );
    }

    #[test]
    fn stray_closers_stay_leaves() {
        check(
            Language::C,
            "a})",
            expect![[r#"
                ROOT@0..3
                  TEXT@0..1 "a"
                  DELIMITER@1..2 "}"
                  DELIMITER@2..3 ")"
                1..2: unmatched `}`
                2..3: unmatched `)`
            "#]],
        );
    }

    #[test]
    fn unclosed_container_runs_to_end() {
        check(
            Language::C,
            "{[x",
            expect![[r#"
                ROOT@0..3
                  BRACES@0..3
                    DELIMITER@0..1 "{"
                    BRACKETS@1..3
                      DELIMITER@1..2 "["
                      TEXT@2..3 "x"
                1..2: unclosed `[`
                0..1: unclosed `{`
            "#]],
        );
    }

    #[test]
    fn directive_interior_is_rescanned() {
        check(
            Language::C,
            "#define F(x) x\nint",
            expect![[r##"
                ROOT@0..18
                  PREPROCESSOR_DEFINE@0..14
                    DELIMITER@0..7 "#define"
                    WHITESPACE@7..8 " "
                    TEXT@8..9 "F"
                    PARENTHESIS@9..12
                      DELIMITER@9..10 "("
                      TEXT@10..11 "x"
                      DELIMITER@11..12 ")"
                    WHITESPACE@12..13 " "
                    TEXT@13..14 "x"
                  NEWLINE@14..15 "\n"
                  INT_KW@15..18 "int"
            "##]],
        );
    }

    #[test]
    fn tags_pair_by_name() {
        check(
            Language::Html,
            "<ul><li>a<br><li>b</UL>",
            expect![[r#"
                ROOT@0..23
                  ELEMENT@0..23
                    TAG@0..4 "<ul>"
                    ELEMENT@4..18
                      TAG@4..8 "<li>"
                      TEXT@8..9 "a"
                      ELEMENT@9..13
                        TAG@9..13 "<br>"
                      ELEMENT@13..18
                        TAG@13..17 "<li>"
                        TEXT@17..18 "b"
                    TAG@18..23 "</UL>"
                13..17: unclosed element `<li>`
                4..8: unclosed element `<li>`
            "#]],
        );
    }

    #[test]
    fn xml_names_are_case_sensitive() {
        check(
            Language::Rss,
            "<item><title/></Item></item>",
            expect![[r#"
                ROOT@0..28
                  RSS_ITEM@0..28
                    TAG@0..6 "<item>"
                    RSS_TITLE@6..14
                      TAG@6..14 "<title/>"
                    TAG@14..21 "</Item>"
                    TAG@21..28 "</item>"
                14..21: `</Item>` does not close any open element
            "#]],
        );
    }
}
