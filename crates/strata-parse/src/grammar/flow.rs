use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::SyntaxSet;

use super::{STATEMENT_STOP, TYPE_WORDS, at_boundary};
use crate::analysis::{Match, Parser};

/// Type words a `new` expression can name.
const ALLOCATED: SyntaxSet = SyntaxSet::new([TEXT, DOUBLE_COLON, ASTERISK]).union(&TYPE_WORDS);

/// Labels that end the statement group of the previous label.
const GROUP_END: SyntaxSet =
    SyntaxSet::new([CASE_KW, DEFAULT_KW, PUBLIC_KW, PROTECTED_KW, PRIVATE_KW, DELIMITER]);

/// Conditions, loops, jumps and exception handling.
pub(super) fn flow(p: &mut Parser<'_>) -> Option<Match> {
    let kind = match p.current()? {
        IF_KW if p.prev_kind() != Some(ELSE_KW) => CONDITION_IF,
        ELSE_KW if p.nth(1) == Some(IF_KW) => CONDITION_ELSE_IF,
        ELSE_KW => CONDITION_ELSE,
        SWITCH_KW => FLOW_SWITCH,
        FOR_KW => FLOW_FOR,
        // The `while` closing a `do` loop belongs to it.
        WHILE_KW if p.parent_kind() != FLOW_DO_WHILE || p.prev_kind() == Some(DO_KW) => FLOW_WHILE,
        DO_KW => FLOW_DO_WHILE,
        RETURN_KW => FLOW_RETURN,
        GOTO_KW => FLOW_GOTO,
        TRY_KW => CPP_TRY,
        CATCH_KW => CPP_CATCH,
        THROW_KW => CPP_THROW,
        NEW_KW => return allocation(p),
        DELETE_KW if p.prev_kind() != Some(EQUAL) => CPP_DELETE,
        AT_TRY_KW => OBJC_TRY,
        AT_CATCH_KW => OBJC_CATCH,
        AT_FINALLY_KW => OBJC_FINALLY,
        AT_THROW_KW => OBJC_THROW,
        AT_SYNCHRONIZED_KW => OBJC_SYNCHRONIZED,
        _ => return None,
    };

    let m = p.start();
    let complete = statement(p);
    m.finish(p, complete.then_some(kind))
}

/// Consumes one statement. Returns `false` if it is cut short.
fn statement(p: &mut Parser<'_>) -> bool {
    match p.current() {
        None | Some(DELIMITER) => false,
        Some(BRACES) => {
            p.advance();
            true
        }
        Some(IF_KW | FOR_KW | WHILE_KW | SWITCH_KW) => {
            p.advance();
            p.eat(PARENTHESIS) && statement(p)
        }
        Some(ELSE_KW) => {
            p.advance();
            statement(p)
        }
        Some(DO_KW) => {
            p.advance();
            if !statement(p) || !p.eat(WHILE_KW) || !p.eat(PARENTHESIS) {
                return false;
            }
            p.eat(SEMICOLON);
            true
        }
        Some(TRY_KW | AT_TRY_KW | AT_FINALLY_KW) => {
            p.advance();
            p.eat(BRACES)
        }
        Some(CATCH_KW | AT_CATCH_KW | AT_SYNCHRONIZED_KW) => {
            p.advance();
            p.eat(PARENTHESIS) && p.eat(BRACES)
        }
        Some(_) => p.eat_through(SEMICOLON, |kind| !STATEMENT_STOP.contains(kind)),
    }
}

/// `new Type`, `new Type(args)` or `new Type[n]`.
fn allocation(p: &mut Parser<'_>) -> Option<Match> {
    let m = p.start();
    p.advance();
    if !p.at_any(ALLOCATED) {
        m.abandon(p);
        return None;
    }
    while p.at_any(ALLOCATED) {
        p.advance();
    }
    if !p.eat(PARENTHESIS) {
        p.eat(BRACKETS);
    }
    Some(m.complete(p, CPP_NEW))
}

/// Switch labels, access specifiers and goto labels. Only statement blocks and class bodies
/// have them, so only `{ ... }` is looked into.
pub(super) fn labels(p: &mut Parser<'_>) -> Option<Match> {
    if p.parent_kind() != BRACES {
        return None;
    }

    let kind = match p.current()? {
        CASE_KW => FLOW_CASE,
        DEFAULT_KW => FLOW_DEFAULT,
        PUBLIC_KW if p.nth(1) == Some(COLON) => CPP_PUBLIC,
        PROTECTED_KW if p.nth(1) == Some(COLON) => CPP_PROTECTED,
        PRIVATE_KW if p.nth(1) == Some(COLON) => CPP_PRIVATE,
        TEXT if p.nth(1) == Some(COLON) && at_boundary(p.prev_kind()) => return goto_label(p),
        _ => return None,
    };
    group(p, kind)
}

/// A label and the statements after it, up to the next label.
fn group(p: &mut Parser<'_>, kind: SyntaxKind) -> Option<Match> {
    let m = p.start();
    let labelled = p.eat_through(COLON, |kind| !matches!(kind, SEMICOLON | BRACES | DELIMITER));
    if labelled {
        while p.current().is_some_and(|kind| !GROUP_END.contains(kind)) {
            p.advance();
        }
    }
    m.finish(p, labelled.then_some(kind))
}

fn goto_label(p: &mut Parser<'_>) -> Option<Match> {
    let m = p.start();
    p.advance();
    p.advance();
    Some(m.complete(p, FLOW_LABEL))
}
