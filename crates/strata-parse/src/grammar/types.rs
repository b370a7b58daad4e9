use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::SyntaxSet;

use super::STATEMENT_STOP;
use crate::analysis::{Match, Parser};

/// Between a record keyword and its body: the name and any base list.
const HEADER: SyntaxSet = SyntaxSet::new([
    TEXT,
    COLON,
    COMMA,
    DOUBLE_COLON,
    PUBLIC_KW,
    PROTECTED_KW,
    PRIVATE_KW,
    VIRTUAL_KW,
]);

/// What may follow a record body up to its `;`.
const DECLARATORS: SyntaxSet = SyntaxSet::new([
    TEXT,
    ASTERISK,
    AMPERSAND,
    COMMA,
    BRACKETS,
    PARENTHESIS,
    BRACES,
    EQUAL,
    NUMBER,
    OPERATOR,
    DOT,
    CONST_KW,
    VOLATILE_KW,
    STRING_DOUBLE_QUOTE,
    STRING_SINGLE_QUOTE,
]);

pub(super) fn types(p: &mut Parser<'_>) -> Option<Match> {
    match p.current()? {
        TYPEDEF_KW => typedef(p),
        STRUCT_KW => record(p, TYPE_STRUCT),
        UNION_KW => record(p, TYPE_UNION),
        ENUM_KW => record(p, TYPE_ENUM),
        CLASS_KW => record(p, CPP_CLASS),
        SIZEOF_KW => operator(p, SIZEOF),
        TYPEOF_KW => operator(p, TYPEOF),
        NAMESPACE_KW => namespace(p),
        _ => None,
    }
}

fn typedef(p: &mut Parser<'_>) -> Option<Match> {
    let m = p.start();
    p.advance();
    let complete = p.eat_through(SEMICOLON, |kind| !STATEMENT_STOP.contains(kind));
    m.finish(p, complete.then_some(TYPEDEF))
}

/// `struct name : bases { ... } declarators;`. Inside a typedef the declarators belong to
/// the typedef.
fn record(p: &mut Parser<'_>, kind: SyntaxKind) -> Option<Match> {
    let m = p.start();
    p.advance();

    let named = p.at(TEXT);
    while p.at_any(HEADER) {
        p.advance();
    }
    if !p.eat(BRACES) || (kind == CPP_CLASS && !named) {
        m.abandon(p);
        return None;
    }

    if p.parent_kind() != TYPEDEF {
        p.eat_through(SEMICOLON, |kind| DECLARATORS.contains(kind));
    }
    Some(m.complete(p, kind))
}

/// `sizeof(...)` and `typeof(...)`.
fn operator(p: &mut Parser<'_>, kind: SyntaxKind) -> Option<Match> {
    let m = p.start();
    p.advance();
    let complete = p.eat(PARENTHESIS);
    m.finish(p, complete.then_some(kind))
}

fn namespace(p: &mut Parser<'_>) -> Option<Match> {
    let m = p.start();
    p.advance();
    while p.at(TEXT) || p.at(DOUBLE_COLON) {
        p.advance();
    }
    let complete = p.eat(BRACES);
    m.finish(p, complete.then_some(CPP_NAMESPACE))
}
