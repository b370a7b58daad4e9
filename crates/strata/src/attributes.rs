use indexmap::IndexMap;
use strata_kinds::SyntaxKind::{self, *};
use strata_parse::Tag;
use strata_tree::SyntaxNode;

const NAMED: [SyntaxKind; 8] = [
    TYPE_STRUCT,
    TYPE_UNION,
    TYPE_ENUM,
    CPP_CLASS,
    CPP_NAMESPACE,
    OBJC_INTERFACE,
    OBJC_IMPLEMENTATION,
    OBJC_PROTOCOL,
];

/// The markup tag of a `TAG` leaf, or the opening tag of an element.
pub fn tag(node: SyntaxNode<'_>) -> Option<Tag<'_>> {
    let leaf = match node.kind() {
        TAG => node,
        kind if kind.is_element() => node.first_child().filter(|child| child.kind() == TAG)?,
        _ => return None,
    };
    leaf.text().map(Tag::parse)
}

/// Properties derived from the text of a node: the attributes of markup tags and elements,
/// and the `name`, `path` or `selector` of C family constructs. Empty for everything else.
pub fn attributes(node: SyntaxNode<'_>) -> IndexMap<String, String> {
    let mut attributes = IndexMap::new();

    if let Some(tag) = tag(node) {
        for (name, value) in tag.attributes() {
            attributes.entry(name.to_owned()).or_insert_with(|| value.to_owned());
        }
        return attributes;
    }

    let derived = match node.kind() {
        PREPROCESSOR_INCLUDE | PREPROCESSOR_IMPORT => {
            include_path(node).map(|path| ("path", path))
        }
        PREPROCESSOR_DEFINE | PREPROCESSOR_UNDEF => significant(node)
            .find(|child| child.kind() == TEXT)
            .map(|name| ("name", name.content().into_owned())),
        FUNCTION_DEFINITION | FUNCTION_PROTOTYPE => function_name(node).map(|name| ("name", name)),
        FUNCTION_CALL => callee(node).map(|name| ("name", name)),
        TYPEDEF => typedef_name(node).map(|name| ("name", name)),
        kind if NAMED.contains(&kind) => declared_name(node).map(|name| ("name", name)),
        OBJC_METHOD_CALL => {
            let brackets = node.find_first_child(BRACKETS);
            brackets.and_then(message_selector).map(|selector| ("selector", selector))
        }
        OBJC_METHOD_DECLARATION | OBJC_METHOD_IMPLEMENTATION => {
            let parts = significant(node).collect::<Vec<_>>();
            selector(&parts).map(|selector| ("selector", selector))
        }
        _ => None,
    };

    if let Some((key, value)) = derived {
        attributes.insert(key.to_owned(), value);
    }
    attributes
}

/// Children that are neither trivia nor comments.
fn significant<'a>(node: SyntaxNode<'a>) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
    node.children().filter(|child| !child.is_trivia() && !child.kind().is_comment())
}

/// `<stdio.h>` and `"local.h"` both yield the bare path.
fn include_path(node: SyntaxNode<'_>) -> Option<String> {
    let mut text = String::new();
    for child in node.children().skip(1) {
        text.push_str(&child.content());
    }
    let text = text.trim();
    let path = text
        .strip_prefix('<')
        .and_then(|path| path.strip_suffix('>'))
        .or_else(|| text.strip_prefix('"').and_then(|path| path.strip_suffix('"')))
        .unwrap_or(text);
    (!path.is_empty()).then(|| path.to_owned())
}

/// The qualified name right before the parameter list: `main`, `Widget::draw`, `~Widget`.
fn function_name(node: SyntaxNode<'_>) -> Option<String> {
    let signature =
        significant(node).take_while(|child| child.kind() != PARENTHESIS).collect::<Vec<_>>();
    let start = signature
        .iter()
        .rposition(|part| !matches!(part.kind(), TEXT | DOUBLE_COLON | TILDE))
        .map_or(0, |index| index + 1);
    join(&signature[start..])
}

/// Everything before the argument list: `run`, `object.method`, `ns::make`.
fn callee(node: SyntaxNode<'_>) -> Option<String> {
    let callee =
        significant(node).take_while(|child| child.kind() != PARENTHESIS).collect::<Vec<_>>();
    join(&callee)
}

/// The last word of a typedef, or for function pointer typedefs the word inside the first
/// parentheses.
fn typedef_name(node: SyntaxNode<'_>) -> Option<String> {
    let direct = significant(node).filter(|child| child.kind() == TEXT).last();
    let name = direct.or_else(|| {
        let parens = node.find_first_child(PARENTHESIS)?;
        significant(parens).filter(|child| child.kind() == TEXT).last()
    })?;
    Some(name.content().into_owned())
}

/// The name after the introducing keyword, which may be qualified. Anonymous declarations
/// have none.
fn declared_name(node: SyntaxNode<'_>) -> Option<String> {
    let mut name = String::new();
    for child in significant(node) {
        match child.kind() {
            TEXT | DOUBLE_COLON => name.push_str(&child.content()),
            _ if !name.is_empty() => break,
            BRACES | COLON | PARENTHESIS | SEMICOLON => break,
            _ => {}
        }
    }
    (!name.is_empty()).then_some(name)
}

fn message_selector(brackets: SyntaxNode<'_>) -> Option<String> {
    let parts = significant(brackets).filter(|part| part.kind() != DELIMITER).collect::<Vec<_>>();

    // Skip the receiver and any member chain after it.
    let mut start = 1;
    while parts.get(start).is_some_and(|part| matches!(part.kind(), DOT | ARROW)) {
        start += 2;
    }
    selector(parts.get(start..)?)
}

/// `name:` for each keyword part, or the first word of a unary selector.
fn selector(parts: &[SyntaxNode<'_>]) -> Option<String> {
    let mut selector = String::new();
    for pair in parts.windows(2) {
        if pair[0].kind() == TEXT && pair[1].kind() == COLON {
            selector.push_str(&pair[0].content());
            selector.push(':');
        }
    }
    if selector.is_empty() {
        let word = parts.iter().find(|part| part.kind() == TEXT)?;
        selector.push_str(&word.content());
    }
    Some(selector)
}

fn join(parts: &[SyntaxNode<'_>]) -> Option<String> {
    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().map(|part| part.content()).collect())
}

#[cfg(test)]
mod tests {
    use expect_test::{Expect, expect};
    use strata_kinds::SyntaxKind;
    use strata_parse::{Language, ParseOptions, TagForm};

    use super::{attributes, tag};
    use crate::parse_text;

    fn check(text: &str, language: Language, kind: SyntaxKind, expect: Expect) {
        let document = parse_text(text, language, ParseOptions::default());
        let actual = document
            .root()
            .descendants()
            .filter(|node| node.kind() == kind)
            .map(|node| format!("{:?}\n", attributes(node)))
            .collect::<String>();
        expect.assert_eq(&actual);
    }

    #[test]
    fn includes_and_defines() {
        let text = "#include <stdio.h>\n#import \"Local.h\"\n#define MAX 10\n";
        check(text, Language::ObjC, SyntaxKind::PREPROCESSOR_INCLUDE, expect![[r#"
            {"path": "stdio.h"}
        "#]]);
        check(text, Language::ObjC, SyntaxKind::PREPROCESSOR_IMPORT, expect![[r#"
            {"path": "Local.h"}
        "#]]);
        check(text, Language::ObjC, SyntaxKind::PREPROCESSOR_DEFINE, expect![[r#"
            {"name": "MAX"}
        "#]]);
    }

    #[test]
    fn functions_and_calls() {
        let text = "int add(int a, int b) { return sum(a, b); }\nvoid Widget::draw() const;\n";
        check(text, Language::Cpp, SyntaxKind::FUNCTION_DEFINITION, expect![[r#"
            {"name": "add"}
        "#]]);
        check(text, Language::Cpp, SyntaxKind::FUNCTION_PROTOTYPE, expect![[r#"
            {"name": "Widget::draw"}
        "#]]);
        check(text, Language::Cpp, SyntaxKind::FUNCTION_CALL, expect![[r#"
            {"name": "sum"}
        "#]]);
    }

    #[test]
    fn declared_types() {
        let text = "struct point { int x; };\ntypedef struct { int y; } Size;\n";
        check(text, Language::C, SyntaxKind::TYPE_STRUCT, expect![[r#"
            {"name": "point"}
            {}
        "#]]);
        check(text, Language::C, SyntaxKind::TYPEDEF, expect![[r#"
            {"name": "Size"}
        "#]]);
    }

    #[test]
    fn message_selectors() {
        let text = "void f() { [greeter greet:name with:other]; [self.view layout]; }\n";
        check(text, Language::ObjC, SyntaxKind::OBJC_METHOD_CALL, expect![[r#"
            {"selector": "greet:with:"}
            {"selector": "layout"}
        "#]]);
    }

    #[test]
    fn tags_keep_their_attributes() {
        let text = "<input type=\"text\" name='q' disabled>";
        let document = parse_text(text, Language::Html, ParseOptions::default());
        let element = document.root().first_child().unwrap();

        let tag = tag(element).unwrap();
        assert_eq!((tag.name, tag.form), ("input", TagForm::Open));
        expect![[r#"{"type": "text", "name": "q", "disabled": ""}"#]]
            .assert_eq(&format!("{:?}", attributes(element)));
    }
}
