use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::SyntaxSet;

use super::calls;
use crate::analysis::{Match, Parser};

const CONTAINERS: SyntaxSet =
    SyntaxSet::new([OBJC_INTERFACE, OBJC_IMPLEMENTATION, OBJC_PROTOCOL]);

/// A `[` after one of these is a subscript, not a message.
const SUBSCRIPTED: SyntaxSet = SyntaxSet::new([
    TEXT,
    BRACKETS,
    PARENTHESIS,
    FUNCTION_CALL,
    OBJC_METHOD_CALL,
    SELF_KW,
    SUPER_KW,
]);

/// `@interface` / `@implementation` / `@protocol` blocks, properties and methods.
pub(super) fn declaration(p: &mut Parser<'_>) -> Option<Match> {
    match p.current()? {
        AT_INTERFACE_KW => container(p, OBJC_INTERFACE),
        AT_IMPLEMENTATION_KW => container(p, OBJC_IMPLEMENTATION),
        AT_PROTOCOL_KW if p.nth(1) == Some(TEXT) => container(p, OBJC_PROTOCOL),
        AT_PROPERTY_KW => through_semicolon(p, OBJC_PROPERTY),
        AT_SYNTHESIZE_KW => through_semicolon(p, OBJC_SYNTHESIZE),
        OPERATOR if CONTAINERS.contains(p.parent_kind()) && matches!(p.text(), Some("-" | "+")) => {
            method(p)
        }
        _ => None,
    }
}

fn container(p: &mut Parser<'_>, kind: SyntaxKind) -> Option<Match> {
    let m = p.start();
    p.advance();
    let closed = p.eat_through(AT_END_KW, |kind| {
        !matches!(kind, AT_INTERFACE_KW | AT_IMPLEMENTATION_KW | AT_PROTOCOL_KW | DELIMITER)
    });
    m.finish(p, closed.then_some(kind))
}

fn through_semicolon(p: &mut Parser<'_>, kind: SyntaxKind) -> Option<Match> {
    let m = p.start();
    p.advance();
    let complete = p.eat_through(SEMICOLON, |kind| !matches!(kind, AT_END_KW | DELIMITER));
    m.finish(p, complete.then_some(kind))
}

/// `- (type)name:(type)arg;` declares, a body after the signature implements.
fn method(p: &mut Parser<'_>) -> Option<Match> {
    let m = p.start();
    p.advance();

    let kind = loop {
        match p.current() {
            Some(SEMICOLON) => {
                p.advance();
                if p.eat(BRACES) {
                    break Some(OBJC_METHOD_IMPLEMENTATION);
                }
                break Some(OBJC_METHOD_DECLARATION);
            }
            Some(BRACES) => {
                p.advance();
                break Some(OBJC_METHOD_IMPLEMENTATION);
            }
            Some(AT_END_KW | DELIMITER) | None => break None,
            Some(_) => p.advance(),
        }
    };

    m.finish(p, kind)
}

/// Message sends and `@selector(...)` / `@encode(...)`, then plain calls.
pub(super) fn call(p: &mut Parser<'_>) -> Option<Match> {
    match p.current()? {
        AT_SELECTOR_KW => literal(p, OBJC_SELECTOR),
        AT_ENCODE_KW => literal(p, OBJC_ENCODE),
        BRACKETS if is_message(p) => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, OBJC_METHOD_CALL))
        }
        _ => calls::call(p),
    }
}

fn literal(p: &mut Parser<'_>, kind: SyntaxKind) -> Option<Match> {
    let m = p.start();
    p.advance();
    let complete = p.eat(PARENTHESIS);
    m.finish(p, complete.then_some(kind))
}

/// `[receiver selector]`, `[receiver selector:arg ...]`. The receiver may be a member chain.
fn is_message(p: &Parser<'_>) -> bool {
    if p.prev_kind().is_some_and(|kind| SUBSCRIPTED.contains(kind)) {
        return false;
    }
    let Some(brackets) = p.node() else {
        return false;
    };

    let mut parts = brackets.children().filter(|child| {
        let kind = child.kind();
        !kind.is_trivia() && !kind.is_comment() && kind != DELIMITER
    });
    if parts.next().is_none() {
        return false;
    }
    let mut next = parts.next();
    while next.is_some_and(|part| matches!(part.kind(), DOT | ARROW)) {
        parts.next();
        next = parts.next();
    }
    next.is_some_and(|part| part.kind() == TEXT)
}
