//! Single-pass scanner turning text into a flat sequence of [`Span`]s.
//!
//! At every position the candidates of a [`KindTable`] are tried in its candidate order and the
//! first match wins. Characters nobody matches are merged into `TEXT` leaves, so the spans
//! always cover the scanned range without gaps or overlaps.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
use strata_kinds::{KindSpec, KindTable, MatchContext, Shape, SyntaxKind, SyntaxSet};
use text_size::{TextRange, TextSize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    Leaf { kind: SyntaxKind, range: TextRange },
    /// Opening marker of a paired kind.
    Open { kind: SyntaxKind, range: TextRange },
    /// Closing marker of a paired kind.
    Close { kind: SyntaxKind, range: TextRange },
    /// A delimited container; `close` is empty when the suffix was zero-length or never found.
    Delimited { kind: SyntaxKind, open: TextRange, interior: TextRange, close: TextRange },
}

impl Span {
    pub fn kind(&self) -> SyntaxKind {
        match *self {
            Span::Leaf { kind, .. }
            | Span::Open { kind, .. }
            | Span::Close { kind, .. }
            | Span::Delimited { kind, .. } => kind,
        }
    }

    pub fn range(&self) -> TextRange {
        match *self {
            Span::Leaf { range, .. } | Span::Open { range, .. } | Span::Close { range, .. } => {
                range
            }
            Span::Delimited { open, close, .. } => open.cover(close),
        }
    }
}

pub struct Scanner<'t> {
    table: &'t KindTable,
    restrict: Option<SyntaxSet>,
    cursor: Cursor<'t>,
    offset: TextSize,
    text_start: Option<TextSize>,
    pending: Option<Span>,
}

impl<'t> Scanner<'t> {
    pub fn new(text: &'t str, table: &'t KindTable) -> Self {
        Self::with_range(text, TextRange::up_to(TextSize::of(text)), table, None)
    }

    /// Scans `range` of `text` only. The character before the range still serves as left
    /// context. With `restrict`, only kinds in the set are candidates.
    pub fn with_range(
        text: &'t str,
        range: TextRange,
        table: &'t KindTable,
        restrict: Option<SyntaxSet>,
    ) -> Self {
        let before = &text[..usize::from(range.start())];
        let previous = before.chars().next_back().unwrap_or(EOF_CHAR);
        let blank_prefix = before
            .trim_end_matches([' ', '\t'])
            .chars()
            .next_back()
            .is_none_or(|c| matches!(c, '\n' | '\r'));
        Self {
            table,
            restrict,
            cursor: Cursor::new(&text[range], previous, blank_prefix),
            offset: range.start(),
            text_start: None,
            pending: None,
        }
    }

    fn current_offset(&self) -> TextSize {
        self.offset + self.cursor.consumed()
    }

    fn context(&self) -> MatchContext<'t> {
        let cursor = &self.cursor;
        MatchContext::with_blank_prefix(cursor.previous(), cursor.rest(), cursor.blank_prefix())
    }

    fn flush_text(&mut self) -> Option<Span> {
        let start = self.text_start.take()?;
        let range = TextRange::new(start, self.current_offset());
        Some(Span::Leaf { kind: SyntaxKind::TEXT, range })
    }

    fn is_candidate(&self, spec: &KindSpec) -> bool {
        self.restrict.is_none_or(|restrict| restrict.contains(spec.kind))
    }

    fn match_span(&mut self) -> Option<Span> {
        let start = self.current_offset();
        let cx = self.context();
        let table = self.table;

        for spec in table.candidates() {
            if !self.is_candidate(spec) {
                continue;
            }

            let shape = spec.shape();

            if let Some(len) = spec.prefix.matches(cx) {
                debug_assert_ne!(len, 0, "{:?} matched an empty prefix", spec.kind);
                if len == 0 {
                    continue;
                }

                self.cursor.bump(len);
                let open = TextRange::new(start, self.current_offset());
                let kind = spec.kind;

                return Some(match shape {
                    Shape::Leaf => Span::Leaf { kind, range: open },
                    Shape::DelimitedLeaf => {
                        let close = self.find_suffix(spec);
                        Span::Leaf { kind, range: open.cover(close) }
                    }
                    Shape::Paired => Span::Open { kind, range: open },
                    Shape::DelimitedContainer => {
                        let close = self.find_suffix(spec);
                        let interior = TextRange::new(open.end(), close.start());
                        Span::Delimited { kind, open, interior, close }
                    }
                });
            }

            if shape == Shape::Paired {
                let matched = spec.suffix.and_then(|suffix| suffix.matches(cx));
                if let Some(len) = matched.filter(|&len| len > 0) {
                    self.cursor.bump(len);
                    let range = TextRange::new(start, self.current_offset());
                    return Some(Span::Close { kind: spec.kind, range });
                }
            }
        }

        None
    }

    /// Consumes up to and including the suffix of `spec`, or to the end of input.
    fn find_suffix(&mut self, spec: &KindSpec) -> TextRange {
        let Some(suffix) = spec.suffix else {
            return TextRange::empty(self.current_offset());
        };

        loop {
            let here = self.current_offset();
            if self.cursor.is_eof() {
                tracing::trace!(kind = ?spec.kind, "unterminated span");
                return TextRange::empty(here);
            }

            let cx = self.context();
            if let Some(len) = suffix.matches(cx) {
                self.cursor.bump(len);
                return TextRange::new(here, self.current_offset());
            }

            let c = self.cursor.advance();
            if Some(c) == spec.escape && !self.cursor.is_eof() {
                self.cursor.advance();
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if let Some(span) = self.pending.take() {
            return Some(span);
        }

        loop {
            if self.cursor.is_eof() {
                return self.flush_text();
            }

            let start = self.current_offset();
            if let Some(span) = self.match_span() {
                return match self.text_start.take() {
                    Some(text_start) => {
                        self.pending = Some(span);
                        let range = TextRange::new(text_start, start);
                        Some(Span::Leaf { kind: SyntaxKind::TEXT, range })
                    }
                    None => Some(span),
                };
            }

            self.text_start.get_or_insert(start);
            self.cursor.advance();
        }
    }
}

/// Scans the whole of `text`.
pub fn scan(text: &str, table: &KindTable) -> Vec<Span> {
    Scanner::new(text, table).collect()
}

#[cfg(test)]
mod tests {
    use strata_kinds::SyntaxKind::*;
    use strata_kinds::{KindSpec, KindTable, MatchContext, Pattern, SyntaxKind, SyntaxSet};
    use text_size::TextRange;

    use super::{Scanner, Span, scan};

    fn whitespace(cx: MatchContext<'_>) -> Option<usize> {
        let len = cx.rest.len() - cx.rest.trim_start_matches([' ', '\t']).len();
        (len > 0).then_some(len)
    }

    fn indenting(cx: MatchContext<'_>) -> Option<usize> {
        if cx.at_line_start() { whitespace(cx) } else { None }
    }

    fn line_end(cx: MatchContext<'_>) -> Option<usize> {
        cx.rest.starts_with('\n').then_some(0)
    }

    fn table() -> KindTable {
        KindTable::new(vec![
            KindSpec::custom(WHITESPACE, whitespace),
            KindSpec::custom(INDENTING, indenting).patches(SyntaxSet::new([WHITESPACE])),
            KindSpec::literal(NEWLINE, "\n"),
            KindSpec::pair(BRACES, "{", "}"),
            KindSpec::pair(PARENTHESIS, "(", ")"),
            KindSpec::literal(SEMICOLON, ";"),
            KindSpec::literal(COLON, ":"),
            KindSpec::literal(DOUBLE_COLON, "::").patches(SyntaxSet::new([COLON])),
            KindSpec::literal(STRING_DOUBLE_QUOTE, "\"")
                .until(Pattern::Literal("\""))
                .escape('\\'),
            KindSpec::literal(C_COMMENT, "/*").until(Pattern::Literal("*/")),
            KindSpec::literal(CPP_COMMENT, "//").until(Pattern::Custom(line_end)),
            KindSpec::keyword(INT_KW, "int"),
            KindSpec::keyword(PREPROCESSOR_DEFINE, "#define")
                .until(Pattern::Custom(line_end))
                .escape('\\')
                .interior(SyntaxSet::new([WHITESPACE, PARENTHESIS, NEWLINE])),
        ])
    }

    fn leaves(text: &str) -> Vec<(SyntaxKind, &str)> {
        scan(text, &table()).iter().map(|span| (span.kind(), &text[span.range()])).collect()
    }

    #[test]
    fn unmatched_characters_merge_into_text() {
        assert_eq!(
            leaves("int foo;"),
            [(INT_KW, "int"), (WHITESPACE, " "), (TEXT, "foo"), (SEMICOLON, ";")]
        );
    }

    #[test]
    fn keywords_respect_word_boundaries() {
        assert_eq!(leaves("integer"), [(TEXT, "integer")]);
        assert_eq!(leaves("xint"), [(TEXT, "xint")]);
    }

    #[test]
    fn patched_kind_wins() {
        assert_eq!(leaves("a::b"), [(TEXT, "a"), (DOUBLE_COLON, "::"), (TEXT, "b")]);
        assert_eq!(
            leaves("  a\n  b"),
            [
                (INDENTING, "  "),
                (TEXT, "a"),
                (NEWLINE, "\n"),
                (INDENTING, "  "),
                (TEXT, "b"),
            ]
        );
        assert_eq!(leaves("a  b"), [(TEXT, "a"), (WHITESPACE, "  "), (TEXT, "b")]);
    }

    #[test]
    fn paired_markers() {
        let text = "{()}";
        let spans = scan(text, &table());
        assert_eq!(
            spans,
            [
                Span::Open { kind: BRACES, range: TextRange::new(0.into(), 1.into()) },
                Span::Open { kind: PARENTHESIS, range: TextRange::new(1.into(), 2.into()) },
                Span::Close { kind: PARENTHESIS, range: TextRange::new(2.into(), 3.into()) },
                Span::Close { kind: BRACES, range: TextRange::new(3.into(), 4.into()) },
            ]
        );
    }

    #[test]
    fn delimited_leaves() {
        assert_eq!(
            leaves(r#""a\"b" /* c */"#),
            [(STRING_DOUBLE_QUOTE, r#""a\"b""#), (WHITESPACE, " "), (C_COMMENT, "/* c */")]
        );
        assert_eq!(
            leaves("// note\nint"),
            [(CPP_COMMENT, "// note"), (NEWLINE, "\n"), (INT_KW, "int")]
        );
    }

    #[test]
    fn unterminated_span_runs_to_end() {
        assert_eq!(
            leaves("x = \"abc"),
            [
                (TEXT, "x"),
                (WHITESPACE, " "),
                (TEXT, "="),
                (WHITESPACE, " "),
                (STRING_DOUBLE_QUOTE, "\"abc"),
            ]
        );
        assert_eq!(leaves("/* open"), [(C_COMMENT, "/* open")]);
    }

    #[test]
    fn delimited_container_stops_before_line_end() {
        let text = "#define A(x) \\\n  x\nint";
        let spans = scan(text, &table());
        let Span::Delimited { kind, open, interior, close } = spans[0] else {
            panic!("expected a delimited span, got {:?}", spans[0]);
        };
        assert_eq!(kind, PREPROCESSOR_DEFINE);
        assert_eq!(&text[open], "#define");
        assert_eq!(&text[interior], " A(x) \\\n  x");
        assert!(close.is_empty());
        assert_eq!(spans[1].kind(), NEWLINE);
        assert_eq!(spans[2].kind(), INT_KW);
    }

    #[test]
    fn restricted_rescan_uses_left_context() {
        let text = "int(int)";
        let table = table();
        let range = TextRange::new(4.into(), 7.into());
        let spans = Scanner::with_range(text, range, &table, Some(SyntaxSet::new([INT_KW])))
            .map(|span| (span.kind(), &text[span.range()]))
            .collect::<Vec<_>>();
        assert_eq!(spans, [(INT_KW, "int")]);

        let restricted = Scanner::with_range(text, range, &table, Some(SyntaxSet::EMPTY))
            .map(|span| span.kind())
            .collect::<Vec<_>>();
        assert_eq!(restricted, [TEXT]);
    }

    #[test]
    fn spans_cover_input() {
        let text = "int main() {\n  return \"x\"; // done\n}\n} )";
        let spans = scan(text, &table());
        let mut offset = 0.into();
        for span in &spans {
            assert_eq!(span.range().start(), offset);
            offset = span.range().end();
        }
        assert_eq!(usize::from(offset), text.len());
    }
}
