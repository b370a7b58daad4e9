use strata_kinds::SyntaxKind::*;
use strata_kinds::SyntaxSet;

use crate::analysis::{Match, Parser};

const OPENERS: SyntaxSet =
    SyntaxSet::new([PREPROCESSOR_IF, PREPROCESSOR_IFDEF, PREPROCESSOR_IFNDEF]);

/// `#if` / `#ifdef` / `#ifndef` through the `#endif` at the same depth. Without one, the
/// directive is left alone.
pub(super) fn conditional(p: &mut Parser<'_>) -> Option<Match> {
    if !p.at_any(OPENERS) {
        return None;
    }

    let m = p.start();
    let mut depth = 0usize;
    let closed = loop {
        match p.current() {
            Some(kind) if OPENERS.contains(kind) => depth += 1,
            Some(PREPROCESSOR_ENDIF) => depth -= 1,
            Some(_) => {}
            None => break false,
        }
        p.advance();
        if depth == 0 {
            break true;
        }
    };

    m.finish(p, closed.then_some(PREPROCESSOR_CONDITIONAL))
}
