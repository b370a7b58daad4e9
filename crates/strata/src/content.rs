use std::borrow::Cow;

use strata_kinds::SyntaxKind::{self, *};
use strata_tree::SyntaxNode;

/// The text of a node with literal syntax removed: quotes and escapes of strings, comment
/// markers, CDATA markers and entity references. Tags contribute nothing, so an element
/// yields its text content.
pub fn clean_content(node: SyntaxNode<'_>) -> String {
    node.leaves()
        .map(|leaf| clean_leaf(leaf.kind(), leaf.text().unwrap_or_default()))
        .collect()
}

fn clean_leaf(kind: SyntaxKind, text: &str) -> Cow<'_, str> {
    match kind {
        STRING_DOUBLE_QUOTE => unescape(strip(text, "\"", "\"")),
        STRING_SINGLE_QUOTE => unescape(strip(text, "'", "'")),
        OBJC_STRING => unescape(strip(text, "@\"", "\"")),
        C_COMMENT => Cow::Borrowed(strip(text, "/*", "*/")),
        CPP_COMMENT => Cow::Borrowed(strip(text, "//", "")),
        MARKUP_COMMENT => Cow::Borrowed(strip(text, "<!--", "-->")),
        CDATA => Cow::Borrowed(strip(text, "<![CDATA[", "]]>")),
        ENTITY => decode_entity(text).map_or(Cow::Borrowed(text), |c| Cow::Owned(c.to_string())),
        TAG => Cow::Borrowed(""),
        _ => Cow::Borrowed(text),
    }
}

/// Unterminated literals only lose their opening marker.
fn strip<'a>(text: &'a str, open: &str, close: &str) -> &'a str {
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text)
}

fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let mut value = 0;
                let mut digits = 0;
                while digits < 2 {
                    let Some(digit) = chars.peek().and_then(|c| c.to_digit(16)) else { break };
                    value = value * 16 + digit;
                    digits += 1;
                    chars.next();
                }
                match char::from_u32(value) {
                    Some(decoded) if digits > 0 => out.push(decoded),
                    _ => out.push_str("\\x"),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// `&amp;`, `&#38;` and `&#x26;`. Unknown names are left alone.
fn decode_entity(text: &str) -> Option<char> {
    let name = text.strip_prefix('&')?.strip_suffix(';')?;
    if let Some(number) = name.strip_prefix('#') {
        let value = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse(),
        };
        return value.ok().and_then(char::from_u32);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use strata_kinds::SyntaxKind::{self, *};
    use strata_parse::{Language, ParseOptions};

    use super::{clean_content, clean_leaf};
    use crate::parse_text;

    fn first(text: &str, language: Language, kind: SyntaxKind) -> String {
        let document = parse_text(text, language, ParseOptions::default());
        let node = document.root().descendants().find(|node| node.kind() == kind).unwrap();
        clean_content(node)
    }

    #[test]
    fn strings_lose_quotes_and_escapes() {
        assert_eq!(first(r#"s = "a\tb\"c";"#, Language::C, STRING_DOUBLE_QUOTE), "a\tb\"c");
        assert_eq!(first(r"c = '\x41';", Language::C, STRING_SINGLE_QUOTE), "A");
        assert_eq!(first(r#"s = @"hi\n";"#, Language::ObjC, OBJC_STRING), "hi\n");
        assert_eq!(first("s = \"open", Language::C, STRING_DOUBLE_QUOTE), "open");
    }

    #[test]
    fn comments_lose_markers() {
        assert_eq!(first("/* block */", Language::C, C_COMMENT), " block ");
        assert_eq!(first("// line\n", Language::Cpp, CPP_COMMENT), " line");
        assert_eq!(first("<!-- note -->", Language::Xml, MARKUP_COMMENT), " note ");
    }

    #[test]
    fn elements_yield_their_text() {
        let text = "<p>Fish &amp; <b>chips</b> &#x263A;<![CDATA[<raw>]]></p>";
        assert_eq!(first(text, Language::Html, ELEMENT), "Fish & chips \u{263a}<raw>");
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(clean_leaf(ENTITY, "&bogus;"), "&bogus;");
        assert_eq!(clean_leaf(ENTITY, "&#60;"), "<");
    }
}
