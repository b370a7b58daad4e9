use strata_kinds::SyntaxKind::*;
use strata_kinds::SyntaxSet;

use super::{DECLARATION_WORDS, at_boundary};
use crate::analysis::{Match, Parser};

/// Between the parameter list and the body or `;`: qualifiers, attributes and initializer
/// lists.
const TRAILER: SyntaxSet =
    SyntaxSet::new([CONST_KW, TEXT, PARENTHESIS, COLON, COMMA, THROW_KW]);

/// `words name(params) { ... }` or `words name(params);`.
///
/// A prototype needs a type before the name, so that `f(x);` stays a statement.
pub(super) fn function(p: &mut Parser<'_>) -> Option<Match> {
    if !p.at_any(DECLARATION_WORDS)
        || !at_boundary(p.prev_kind())
        || matches!(p.parent_kind(), PARENTHESIS | BRACKETS)
    {
        return None;
    }

    let m = p.start();
    let mut words = 0;
    let mut named = false;
    while let Some(kind) = p.current().filter(|&kind| DECLARATION_WORDS.contains(kind)) {
        named = kind == TEXT;
        words += 1;
        p.advance();
    }
    if !named || !p.eat(PARENTHESIS) {
        m.abandon(p);
        return None;
    }

    let kind = loop {
        match p.current() {
            Some(BRACES) => {
                p.advance();
                break Some(FUNCTION_DEFINITION);
            }
            Some(SEMICOLON) if words >= 2 => {
                p.advance();
                break Some(FUNCTION_PROTOTYPE);
            }
            Some(EQUAL) if matches!(p.nth(1), Some(NUMBER | DEFAULT_KW | DELETE_KW)) => {
                p.advance();
                p.advance();
            }
            Some(kind) if TRAILER.contains(kind) => p.advance(),
            _ => break None,
        }
    };

    m.finish(p, kind)
}
