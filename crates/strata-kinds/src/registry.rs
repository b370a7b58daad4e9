use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{SyntaxKind, SyntaxSet};

/// What a matcher sees: one character of left context and the rest of the buffer.
#[derive(Clone, Copy, Debug)]
pub struct MatchContext<'a> {
    pub previous: char,
    pub rest: &'a str,
    /// Only spaces and tabs lie between the start of the line and this position.
    pub blank_prefix: bool,
}

impl<'a> MatchContext<'a> {
    pub fn new(previous: char, rest: &'a str) -> Self {
        let blank_prefix = matches!(previous, '\0' | '\n' | '\r');
        Self { previous, rest, blank_prefix }
    }

    pub fn with_blank_prefix(previous: char, rest: &'a str, blank_prefix: bool) -> Self {
        Self { previous, rest, blank_prefix }
    }

    pub fn at_word_boundary(&self) -> bool {
        !is_identifier_char(self.previous)
    }

    pub fn at_line_start(&self) -> bool {
        matches!(self.previous, '\0' | '\n' | '\r')
    }
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

pub type MatchFn = fn(MatchContext<'_>) -> Option<usize>;

#[derive(Clone, Copy, Debug)]
pub enum Pattern {
    /// Matches the exact text.
    Literal(&'static str),
    /// Matches the exact text only when it is not glued to identifier characters on either side.
    Keyword(&'static str),
    Custom(MatchFn),
}

impl Pattern {
    /// Returns the matched length in bytes.
    pub fn matches(&self, cx: MatchContext<'_>) -> Option<usize> {
        match *self {
            Pattern::Literal(literal) => cx.rest.starts_with(literal).then_some(literal.len()),
            Pattern::Keyword(word) => {
                if !cx.at_word_boundary() || !cx.rest.starts_with(word) {
                    return None;
                }
                let next = cx.rest[word.len()..].chars().next().unwrap_or('\0');
                (!is_identifier_char(next)).then_some(word.len())
            }
            Pattern::Custom(matcher) => matcher(cx),
        }
    }
}

/// How the scanner and builder treat a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The prefix match is the whole leaf.
    Leaf,
    /// Leaf running from the prefix up to and including the suffix, or to the end of input.
    DelimitedLeaf,
    /// The prefix opens and the suffix closes a container; interiors are scanned in line.
    Paired,
    /// Container whose interior is re-scanned against a restricted kind set.
    DelimitedContainer,
}

/// Capability record of one kind inside a language table.
#[derive(Clone, Copy, Debug)]
pub struct KindSpec {
    pub kind: SyntaxKind,
    pub prefix: Pattern,
    pub suffix: Option<Pattern>,
    /// A suffix never matches right after this character.
    pub escape: Option<char>,
    pub interior: Option<SyntaxSet>,
    /// Kinds this one is tried before at the same position.
    pub patches: SyntaxSet,
}

impl KindSpec {
    pub const fn new(kind: SyntaxKind, prefix: Pattern) -> Self {
        Self { kind, prefix, suffix: None, escape: None, interior: None, patches: SyntaxSet::EMPTY }
    }

    pub const fn literal(kind: SyntaxKind, literal: &'static str) -> Self {
        Self::new(kind, Pattern::Literal(literal))
    }

    pub const fn keyword(kind: SyntaxKind, word: &'static str) -> Self {
        Self::new(kind, Pattern::Keyword(word))
    }

    pub const fn custom(kind: SyntaxKind, matcher: MatchFn) -> Self {
        Self::new(kind, Pattern::Custom(matcher))
    }

    /// Paired delimiters, e.g. `{` and `}`.
    pub const fn pair(kind: SyntaxKind, open: &'static str, close: &'static str) -> Self {
        Self::literal(kind, open).until(Pattern::Literal(close))
    }

    pub const fn until(mut self, suffix: Pattern) -> Self {
        self.suffix = Some(suffix);
        self
    }

    pub const fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    pub const fn interior(mut self, kinds: SyntaxSet) -> Self {
        self.interior = Some(kinds);
        self
    }

    pub const fn patches(mut self, kinds: SyntaxSet) -> Self {
        self.patches = kinds;
        self
    }

    pub fn shape(&self) -> Shape {
        match (self.suffix, self.kind.is_atomic(), self.interior) {
            (None, _, _) => Shape::Leaf,
            (Some(_), true, _) => Shape::DelimitedLeaf,
            (Some(_), false, None) => Shape::Paired,
            (Some(_), false, Some(_)) => Shape::DelimitedContainer,
        }
    }
}

/// Appends `additions` to `base`; a spec for a kind already in `base` replaces it in place.
pub fn compose(base: &[KindSpec], additions: &[KindSpec]) -> Vec<KindSpec> {
    let mut specs = base.to_vec();
    for addition in additions {
        match specs.iter_mut().find(|spec| spec.kind == addition.kind) {
            Some(existing) => *existing = *addition,
            None => specs.push(*addition),
        }
    }
    specs
}

/// Ordered kind catalog of one language with its candidate order precomputed.
#[derive(Debug)]
pub struct KindTable {
    specs: Vec<KindSpec>,
    order: Vec<usize>,
    kinds: SyntaxSet,
}

impl KindTable {
    /// # Panics
    ///
    /// Panics if the patch relation has a cycle or a kind is declared twice.
    pub fn new(specs: Vec<KindSpec>) -> Self {
        let kinds = specs.iter().map(|spec| spec.kind).collect::<SyntaxSet>();
        assert_eq!(
            kinds.iter().count(),
            specs.len(),
            "a kind is declared twice; use `compose` to override"
        );

        let order = candidate_order(&specs);
        tracing::trace!(
            order = ?order.iter().map(|&index| specs[index].kind).collect::<Vec<_>>(),
            "candidate order"
        );

        Self { specs, order, kinds }
    }

    pub fn spec(&self, kind: SyntaxKind) -> Option<&KindSpec> {
        self.specs.iter().find(|spec| spec.kind == kind)
    }

    /// Specs in declaration order.
    pub fn specs(&self) -> &[KindSpec] {
        &self.specs
    }

    /// Specs in the order the scanner tries them.
    pub fn candidates(&self) -> impl Iterator<Item = &KindSpec> + '_ {
        self.order.iter().map(|&index| &self.specs[index])
    }

    pub fn kinds(&self) -> SyntaxSet {
        self.kinds
    }

    pub fn contains(&self, kind: SyntaxKind) -> bool {
        self.kinds.contains(kind)
    }
}

/// Kahn's algorithm over the patch relation, ties broken by declaration order.
fn candidate_order(specs: &[KindSpec]) -> Vec<usize> {
    let mut in_degree = vec![0usize; specs.len()];
    let mut edges = vec![Vec::new(); specs.len()];

    for (from, spec) in specs.iter().enumerate() {
        for (to, other) in specs.iter().enumerate() {
            if from != to && spec.patches.contains(other.kind) {
                edges[from].push(to);
                in_degree[to] += 1;
            }
        }
    }

    let mut ready = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(index, _)| Reverse(index))
        .collect::<BinaryHeap<_>>();

    let mut order = Vec::with_capacity(specs.len());
    while let Some(Reverse(index)) = ready.pop() {
        order.push(index);
        for &next in &edges[index] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    assert_eq!(order.len(), specs.len(), "cycle in the kind patch relation");
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    fn order(table: &KindTable) -> Vec<SyntaxKind> {
        table.candidates().map(|spec| spec.kind).collect()
    }

    #[test]
    fn declaration_order_without_patches() {
        let table = KindTable::new(vec![
            KindSpec::literal(COLON, ":"),
            KindSpec::literal(SEMICOLON, ";"),
            KindSpec::literal(COMMA, ","),
        ]);
        assert_eq!(order(&table), [COLON, SEMICOLON, COMMA]);
    }

    #[test]
    fn patched_kind_moves_ahead() {
        let table = KindTable::new(vec![
            KindSpec::literal(COLON, ":"),
            KindSpec::literal(SEMICOLON, ";"),
            KindSpec::literal(DOUBLE_COLON, "::").patches(SyntaxSet::new([COLON])),
        ]);
        assert_eq!(order(&table), [SEMICOLON, DOUBLE_COLON, COLON]);
    }

    #[test]
    fn chained_patches() {
        let table = KindTable::new(vec![
            KindSpec::literal(POUND, "#"),
            KindSpec::literal(DOT, ".").patches(SyntaxSet::new([POUND])),
            KindSpec::literal(COMMA, ",").patches(SyntaxSet::new([DOT])),
        ]);
        assert_eq!(order(&table), [COMMA, DOT, POUND]);
    }

    #[test]
    #[should_panic(expected = "cycle")]
    fn cycle_is_rejected() {
        KindTable::new(vec![
            KindSpec::literal(COLON, ":").patches(SyntaxSet::new([COMMA])),
            KindSpec::literal(COMMA, ",").patches(SyntaxSet::new([COLON])),
        ]);
    }

    #[test]
    fn compose_overrides_in_place() {
        let base = [KindSpec::literal(COLON, ":"), KindSpec::literal(COMMA, ",")];
        let composed =
            compose(&base, &[KindSpec::literal(COLON, "::"), KindSpec::literal(DOT, ".")]);
        let kinds = composed.iter().map(|spec| spec.kind).collect::<Vec<_>>();
        assert_eq!(kinds, [COLON, COMMA, DOT]);
        assert!(matches!(composed[0].prefix, Pattern::Literal("::")));
    }

    #[test]
    fn keyword_boundaries() {
        let keyword = Pattern::Keyword("int");
        assert_eq!(keyword.matches(MatchContext::new('\0', "int x")), Some(3));
        assert_eq!(keyword.matches(MatchContext::new(' ', "int*")), Some(3));
        assert_eq!(keyword.matches(MatchContext::new(' ', "integer")), None);
        assert_eq!(keyword.matches(MatchContext::new('_', "int")), None);
    }

    #[test]
    fn shapes() {
        assert_eq!(KindSpec::literal(COMMA, ",").shape(), Shape::Leaf);
        assert_eq!(KindSpec::pair(BRACES, "{", "}").shape(), Shape::Paired);
        assert_eq!(
            KindSpec::literal(C_COMMENT, "/*").until(Pattern::Literal("*/")).shape(),
            Shape::DelimitedLeaf
        );
        assert_eq!(
            KindSpec::literal(PREPROCESSOR_DEFINE, "#define")
                .until(Pattern::Literal("\n"))
                .interior(SyntaxSet::TRIVIA)
                .shape(),
            Shape::DelimitedContainer
        );
    }
}
