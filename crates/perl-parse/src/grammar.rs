use perl_syntax::SyntaxKind::{self, *};
use perl_syntax::SyntaxSet;

use crate::parser::Parser;

mod statements;
mod structures;

pub(crate) use statements::statement;
pub(crate) use structures::structure;

/// What the statements of a node hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Context {
    /// Top level and `{}` blocks: full statements.
    Block,
    /// Lists, subscripts, constructors and headers: expressions.
    Expression,
}

const CLOSERS: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACKET, RIGHT_BRACE]);

pub(crate) fn document(p: &mut Parser<'_>) {
    let m = p.start_here();
    loop {
        match p.peek_kind() {
            EOF => break,
            kind if CLOSERS.contains(kind) => unmatched_closer(p),
            _ => statement(p, Context::Block),
        }
    }
    p.flush_trivia();
    m.complete(p, DOCUMENT);
}

/// Wraps a closer that has no opener in a recovery statement.
pub(crate) fn unmatched_closer(p: &mut Parser<'_>) {
    let token = p.nth(0).clone();
    p.proxy().unmatched_brace(&token);

    let m = p.start();
    p.advance();
    m.complete(p, STATEMENT_UNMATCHED_BRACE);
}

/// Consumes tokens of the current statement until it ends.
///
/// `structure_kind` classifies an opener by the element before it. With
/// `ends_after_block` the statement is over once a block has been parsed.
pub(crate) fn statement_body(
    p: &mut Parser<'_>,
    mut structure_kind: impl FnMut(&mut Parser<'_>, SyntaxKind) -> SyntaxKind,
    ends_after_block: bool,
) {
    loop {
        match p.peek_kind() {
            EOF => break,
            SEMICOLON => {
                p.advance();
                break;
            }
            kind if CLOSERS.contains(kind) => break,
            kind @ (LEFT_PAREN | LEFT_BRACKET | LEFT_BRACE) => {
                let kind = structure_kind(p, kind);
                structure(p, kind);
                if ends_after_block && kind == STRUCTURE_BLOCK {
                    break;
                }
            }
            _ => p.advance(),
        }
    }
}
