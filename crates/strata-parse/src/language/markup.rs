//! Markup languages. They share one kind catalog and differ only in how tags pair up.

use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::{KindSpec, KindTable, MatchContext, Pattern, SyntaxSet};

use super::Grammar;

fn whitespace(cx: MatchContext<'_>) -> Option<usize> {
    let len = cx.rest.len() - cx.rest.trim_start_matches([' ', '\t']).len();
    (len > 0).then_some(len)
}

fn indenting(cx: MatchContext<'_>) -> Option<usize> {
    if cx.at_line_start() { whitespace(cx) } else { None }
}

fn newline(cx: MatchContext<'_>) -> Option<usize> {
    if cx.rest.starts_with("\r\n") {
        Some(2)
    } else {
        cx.rest.starts_with(['\n', '\r']).then_some(1)
    }
}

/// `<name ...>` or `</name>`. Quoted attribute values may contain `>`; an unterminated tag
/// stops in front of the next `<`.
fn tag(cx: MatchContext<'_>) -> Option<usize> {
    let rest = cx.rest.strip_prefix('<')?;
    let name = rest.strip_prefix('/').unwrap_or(rest);
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut quote = None;
    for (index, c) in cx.rest.char_indices().skip(1) {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(index + 1),
                '<' => return Some(index),
                _ => {}
            },
        }
    }
    Some(cx.rest.len())
}

fn doctype(cx: MatchContext<'_>) -> Option<usize> {
    const PREFIX: &str = "<!doctype";
    cx.rest.get(..PREFIX.len()).filter(|prefix| prefix.eq_ignore_ascii_case(PREFIX))?;
    Some(PREFIX.len())
}

fn xml_declaration(cx: MatchContext<'_>) -> Option<usize> {
    let rest = cx.rest.strip_prefix("<?xml")?;
    rest.starts_with(char::is_whitespace).then_some("<?xml".len())
}

/// `&name;`, `&#123;` or `&#x1F;`.
fn entity(cx: MatchContext<'_>) -> Option<usize> {
    let rest = cx.rest.strip_prefix('&')?;
    let len = rest.find(';')?;
    let body = &rest[..len];
    let valid = match body.strip_prefix('#') {
        Some(number) => match number.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
        },
        None => !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()),
    };
    valid.then_some(len + 2)
}

const MARKUP_KINDS: &[KindSpec] = &[
    KindSpec::custom(WHITESPACE, whitespace),
    KindSpec::custom(INDENTING, indenting).patches(SyntaxSet::new([WHITESPACE])),
    KindSpec::custom(NEWLINE, newline),
    KindSpec::custom(TAG, tag),
    KindSpec::literal(MARKUP_COMMENT, "<!--")
        .until(Pattern::Literal("-->"))
        .patches(SyntaxSet::new([TAG])),
    KindSpec::literal(CDATA, "<![CDATA[")
        .until(Pattern::Literal("]]>"))
        .patches(SyntaxSet::new([TAG])),
    KindSpec::custom(DOCTYPE, doctype)
        .until(Pattern::Literal(">"))
        .patches(SyntaxSet::new([TAG])),
    KindSpec::literal(PROCESSING_INSTRUCTION, "<?")
        .until(Pattern::Literal("?>"))
        .patches(SyntaxSet::new([TAG])),
    KindSpec::custom(XML_DECLARATION, xml_declaration)
        .until(Pattern::Literal("?>"))
        .patches(SyntaxSet::new([PROCESSING_INSTRUCTION])),
    KindSpec::custom(ENTITY, entity),
];

pub(super) fn grammar(rules: MarkupRules) -> Grammar {
    Grammar { kinds: KindTable::new(MARKUP_KINDS.to_vec()), passes: &[], markup: Some(rules) }
}

/// How tags of a markup language pair into elements.
#[derive(Clone, Copy, Debug)]
pub struct MarkupRules {
    pub case_sensitive: bool,
    /// Elements that never have content, such as `<br>`.
    pub void_elements: &'static [&'static str],
    /// Element names with a dedicated kind; other elements are `ELEMENT`.
    pub element_kinds: &'static [(&'static str, SyntaxKind)],
}

impl MarkupRules {
    pub fn same_name(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive { a == b } else { a.eq_ignore_ascii_case(b) }
    }

    pub fn is_void(&self, name: &str) -> bool {
        self.void_elements.iter().any(|void| self.same_name(void, name))
    }

    pub fn element_kind(&self, name: &str) -> SyntaxKind {
        self.element_kinds
            .iter()
            .find(|(element, _)| self.same_name(element, name))
            .map_or(ELEMENT, |&(_, kind)| kind)
    }
}

pub(super) const HTML: MarkupRules = MarkupRules {
    case_sensitive: false,
    void_elements: &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ],
    element_kinds: &[],
};

pub(super) const XML: MarkupRules =
    MarkupRules { case_sensitive: true, void_elements: &[], element_kinds: &[] };

pub(super) const RSS: MarkupRules = MarkupRules {
    case_sensitive: true,
    void_elements: &[],
    element_kinds: &[
        ("channel", RSS_CHANNEL),
        ("item", RSS_ITEM),
        ("category", RSS_CATEGORY),
        ("title", RSS_TITLE),
        ("link", RSS_LINK),
        ("description", RSS_DESCRIPTION),
        ("language", RSS_LANGUAGE),
        ("author", RSS_AUTHOR),
        ("enclosure", RSS_ENCLOSURE),
        ("guid", RSS_GUID),
        ("pubDate", RSS_PUBLICATION_DATE),
        ("feed", ATOM_FEED),
        ("entry", ATOM_ENTRY),
        ("subtitle", ATOM_SUBTITLE),
        ("id", ATOM_ID),
        ("summary", ATOM_SUMMARY),
        ("name", ATOM_NAME),
        ("email", ATOM_EMAIL),
        ("updated", ATOM_UPDATED),
    ],
};

pub(super) const PROPERTY_LIST: MarkupRules = MarkupRules {
    case_sensitive: true,
    void_elements: &[],
    element_kinds: &[
        ("plist", PLIST),
        ("dict", PLIST_DICTIONARY),
        ("array", PLIST_ARRAY),
        ("key", PLIST_KEY),
        ("string", PLIST_STRING),
        ("integer", PLIST_INTEGER),
        ("real", PLIST_REAL),
        ("true", PLIST_TRUE),
        ("false", PLIST_FALSE),
        ("date", PLIST_DATE),
        ("data", PLIST_DATA),
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagForm {
    Open,
    Close,
    /// Self-closing, `<name/>`.
    Empty,
}

impl TagForm {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Empty => "empty",
        }
    }
}

/// The parts of a `TAG` leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub form: TagForm,
    attributes: &'a str,
}

impl<'a> Tag<'a> {
    /// Splits the text of a tag, which may lack its closing `>`.
    pub fn parse(text: &'a str) -> Self {
        let inner = text.strip_prefix('<').unwrap_or(text);
        let inner = inner.strip_suffix('>').unwrap_or(inner);

        let (inner, form) = match inner.strip_prefix('/') {
            Some(inner) => (inner, TagForm::Close),
            None => match inner.strip_suffix('/') {
                Some(inner) => (inner, TagForm::Empty),
                None => (inner, TagForm::Open),
            },
        };

        let name_len = inner.find(|c: char| c.is_whitespace() || c == '/').unwrap_or(inner.len());
        let (name, attributes) = inner.split_at(name_len);
        Self { name, form, attributes }
    }

    /// Attribute names and unquoted values in source order. Valueless attributes map to `""`.
    pub fn attributes(&self) -> Vec<(&'a str, &'a str)> {
        let mut attributes = Vec::new();
        let mut rest = self.attributes;

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            let name_len = rest.find(|c: char| c.is_whitespace() || c == '=').unwrap_or(rest.len());
            let (name, after) = rest.split_at(name_len);
            let after = after.trim_start();

            let Some(value) = after.strip_prefix('=') else {
                attributes.push((name, ""));
                rest = after;
                continue;
            };

            let value = value.trim_start();
            let (value, remaining) = match value.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &value[1..];
                    match body.find(quote) {
                        Some(end) => (&body[..end], &body[end + 1..]),
                        None => (body, ""),
                    }
                }
                _ => value.split_at(value.find(char::is_whitespace).unwrap_or(value.len())),
            };

            if !name.is_empty() {
                attributes.push((name, value));
            }
            rest = remaining;
        }

        attributes
    }
}

#[cfg(test)]
mod tests {
    use strata_kinds::KindTable;
    use strata_kinds::SyntaxKind::{self, *};
    use strata_scanner::scan;

    use super::{HTML, MARKUP_KINDS, RSS, Tag, TagForm};

    fn leaves(text: &str) -> Vec<(SyntaxKind, &str)> {
        let table = KindTable::new(MARKUP_KINDS.to_vec());
        scan(text, &table).iter().map(|span| (span.kind(), &text[span.range()])).collect()
    }

    #[test]
    fn markup_leaves() {
        assert_eq!(
            leaves("<?xml version=\"1.0\"?>\r\n<a href='x>y'>&amp;&#38;&x</a>"),
            [
                (XML_DECLARATION, "<?xml version=\"1.0\"?>"),
                (NEWLINE, "\r\n"),
                (TAG, "<a href='x>y'>"),
                (ENTITY, "&amp;"),
                (ENTITY, "&#38;"),
                (TEXT, "&x"),
                (TAG, "</a>"),
            ]
        );
        assert_eq!(
            leaves("<!DOCTYPE html><!-- <b> --><![CDATA[<i>]]>"),
            [
                (DOCTYPE, "<!DOCTYPE html>"),
                (MARKUP_COMMENT, "<!-- <b> -->"),
                (CDATA, "<![CDATA[<i>]]>"),
            ]
        );
        assert_eq!(leaves("a < b <?pi?>"), [
            (TEXT, "a"),
            (WHITESPACE, " "),
            (TEXT, "<"),
            (WHITESPACE, " "),
            (TEXT, "b"),
            (WHITESPACE, " "),
            (PROCESSING_INSTRUCTION, "<?pi?>"),
        ]);
    }

    #[test]
    fn unterminated_tag_stops_at_next_tag() {
        assert_eq!(leaves("<a<b>"), [(TAG, "<a"), (TAG, "<b>")]);
        assert_eq!(leaves("<a title=\"x"), [(TAG, "<a title=\"x")]);
    }

    #[test]
    fn tag_parts() {
        let tag = Tag::parse("<img src=\"a.png\" alt='A b' hidden data-x = y />");
        assert_eq!(tag.name, "img");
        assert_eq!(tag.form, TagForm::Empty);
        assert_eq!(
            tag.attributes(),
            [("src", "a.png"), ("alt", "A b"), ("hidden", ""), ("data-x", "y")]
        );

        let close = Tag::parse("</div>");
        assert_eq!((close.name, close.form), ("div", TagForm::Close));
        assert!(close.attributes().is_empty());

        let open = Tag::parse("<p");
        assert_eq!((open.name, open.form), ("p", TagForm::Open));
    }

    #[test]
    fn element_rules() {
        assert!(HTML.is_void("BR"));
        assert!(HTML.same_name("Div", "div"));
        assert_eq!(HTML.element_kind("title"), ELEMENT);
        assert_eq!(RSS.element_kind("pubDate"), RSS_PUBLICATION_DATE);
        assert_eq!(RSS.element_kind("pubdate"), ELEMENT);
        assert!(!RSS.same_name("Item", "item"));
    }
}
