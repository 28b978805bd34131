use perl_syntax::SyntaxKind::{self, *};
use text_size::TextRange;

use super::structures::{
    declaration_structure, expression_structure, given_structure, when_structure,
};
use super::{CLOSERS, Context, statement_body, structure};
use crate::ParseError;
use crate::parser::Parser;

const IF_CONTINUES: &[&str] = &["elsif", "else"];
const LOOP_CONTINUES: &[&str] = &["continue"];
const NO_CONTINUES: &[&str] = &[];
const COMPOUND_KEYWORDS: &[&str] = &["if", "unless", "while", "until", "for", "foreach"];
const DECLARATORS: &[&str] = &["my", "our", "local", "state"];

/// Parses one statement. The caller guarantees the next token neither
/// closes a structure nor ends the input.
pub(crate) fn statement(p: &mut Parser<'_>, context: Context) {
    let kind = classify(p, context);
    p.set_previous(None);

    let m = p.start();
    match kind {
        STATEMENT_NULL => p.advance(),
        STATEMENT_END | STATEMENT_DATA => {
            p.advance();
            if p.at(DATA) {
                p.advance();
            }
        }
        STATEMENT_COMPOUND => compound(p),
        STATEMENT_SUB | STATEMENT_SCHEDULED | STATEMENT_PACKAGE => {
            statement_body(p, declaration_structure, true);
        }
        STATEMENT_GIVEN => statement_body(p, given_structure, true),
        STATEMENT_WHEN => statement_body(p, when_structure, true),
        _ => statement_body(p, expression_structure, false),
    }
    m.complete(p, kind);
}

/// Picks the statement kind from its first significant tokens.
fn classify(p: &mut Parser<'_>, context: Context) -> SyntaxKind {
    match p.peek_kind() {
        SEMICOLON => return STATEMENT_NULL,
        SEPARATOR if p.nth_text(0) == "__DATA__" => return STATEMENT_DATA,
        SEPARATOR => return STATEMENT_END,
        _ => {}
    }

    if context == Context::Expression {
        return if p.at_word(DECLARATORS) { STATEMENT_VARIABLE } else { STATEMENT_EXPRESSION };
    }

    match p.peek_kind() {
        LEFT_BRACE => STATEMENT_COMPOUND,
        LABEL => {
            let labelled_block = match p.nth_kind(1) {
                LEFT_BRACE => true,
                WORD => COMPOUND_KEYWORDS.contains(&p.nth_text(1)),
                _ => false,
            };
            if labelled_block { STATEMENT_COMPOUND } else { STATEMENT }
        }
        WORD => {
            let next = p.nth_kind(1);
            keyword_statement(p.nth_text(0), next)
        }
        _ => STATEMENT,
    }
}

fn keyword_statement(word: &str, next: SyntaxKind) -> SyntaxKind {
    match word {
        "package" => STATEMENT_PACKAGE,
        "sub" if next == WORD => STATEMENT_SUB,
        "BEGIN" | "END" | "INIT" | "CHECK" | "UNITCHECK" if next == LEFT_BRACE => {
            STATEMENT_SCHEDULED
        }
        "use" | "no" | "require" => STATEMENT_INCLUDE,
        "my" | "our" | "local" | "state" => STATEMENT_VARIABLE,
        "if" | "unless" | "while" | "until" | "for" | "foreach" => STATEMENT_COMPOUND,
        "return" | "last" | "next" | "redo" | "goto" => STATEMENT_BREAK,
        "given" => STATEMENT_GIVEN,
        "when" => STATEMENT_WHEN,
        "default" if next == LEFT_BRACE => STATEMENT_WHEN,
        _ => STATEMENT,
    }
}

/// Control flow: a keyword, its header and block, then any `elsif`, `else`
/// or `continue` chained onto it.
fn compound(p: &mut Parser<'_>) {
    if p.at(LABEL) {
        p.advance();
    }

    let mut header = STRUCTURE_LIST;
    let mut continues = LOOP_CONTINUES;
    let mut keyword: Option<(String, TextRange)> = None;
    let mut saw_block = false;

    loop {
        match p.peek_kind() {
            EOF => break,
            SEMICOLON => {
                p.advance();
                break;
            }
            kind if CLOSERS.contains(kind) => break,
            LEFT_BRACE => {
                structure(p, STRUCTURE_BLOCK);
                saw_block = true;
                if !p.at_word(continues) {
                    break;
                }
            }
            LEFT_PAREN => structure(p, header),
            LEFT_BRACKET => {
                let kind = expression_structure(p, LEFT_BRACKET);
                structure(p, kind);
            }
            WORD => {
                if keyword.is_none() {
                    let range = p.nth(0).range;
                    keyword = Some((p.nth_text(0).to_owned(), range));
                }
                (header, continues) = match p.nth_text(0) {
                    "if" | "unless" | "elsif" => (STRUCTURE_CONDITION, IF_CONTINUES),
                    "while" | "until" => (STRUCTURE_CONDITION, LOOP_CONTINUES),
                    "for" | "foreach" => (STRUCTURE_FOR, LOOP_CONTINUES),
                    "else" | "continue" => (STRUCTURE_LIST, NO_CONTINUES),
                    _ => (header, continues),
                };
                p.advance();
            }
            _ => p.advance(),
        }
    }

    if let (false, Some((keyword, range))) = (saw_block, keyword) {
        p.error(ParseError::MissingBlock { keyword, range });
    }
}
