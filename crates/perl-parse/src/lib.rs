//! Assembles the token stream of a Perl source into a `Document`.
//!
//! Parsing never fails: every problem is reported through an `ErrorProxy`
//! and the parser carries on, leaving recovery markers in the tree.

mod grammar;
mod parser;

pub use parser::Parser;
use perl_errors::{Diagnostic, Origin};
use perl_syntax::Document;
use perl_syntax::SyntaxKind::{self, *};
use perl_tokenizer::{Token, TokenizeError, Tokenizer};
use text_size::{TextRange, TextSize};

/// An assembly failure: the tokens are valid but cannot be placed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A statement was completed before anything was added to it.
    #[error("statement completed without children")]
    EmptyStatement { offset: TextSize },
    #[error("`{keyword}` is not followed by a block")]
    MissingBlock { keyword: String, range: TextRange },
}

impl ParseError {
    pub fn range(&self) -> TextRange {
        match self {
            Self::EmptyStatement { offset } => TextRange::empty(*offset),
            Self::MissingBlock { range, .. } => *range,
        }
    }
}

/// Receives the recoverable errors of a parse.
///
/// Every channel defaults to discarding the report.
pub trait ErrorProxy {
    fn tokenizer_error(&mut self, line: u32, column: u32, error: &TokenizeError) {
        _ = (line, column, error);
    }

    fn parser_error(&mut self, error: &ParseError) {
        _ = error;
    }

    /// `token` is either a closer without an opener, or the opener of a
    /// structure that never closed.
    fn unmatched_brace(&mut self, token: &Token) {
        _ = token;
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopErrorProxy;

impl ErrorProxy for NoopErrorProxy {}

impl ErrorProxy for Vec<Diagnostic> {
    fn tokenizer_error(&mut self, _line: u32, _column: u32, error: &TokenizeError) {
        self.push(Diagnostic::new(Origin::Tokenizer, error.to_string(), error.token.range));
    }

    fn parser_error(&mut self, error: &ParseError) {
        self.push(Diagnostic::new(Origin::Parser, error.to_string(), error.range()));
    }

    fn unmatched_brace(&mut self, token: &Token) {
        let (message, note) = match delimiter(token.kind) {
            Some(c) if token.kind.is_opening_delimiter() => {
                (format!("unclosed delimiter `{c}`"), "the structure ends where its parent does")
            }
            Some(c) => (format!("unmatched closing delimiter `{c}`"), "no open structure expects it"),
            None => (format!("unmatched {:?}", token.kind), "not a delimiter"),
        };
        self.push(Diagnostic::new(Origin::Delimiter, message, token.range).with_note(note));
    }
}

fn delimiter(kind: SyntaxKind) -> Option<char> {
    Some(match kind {
        LEFT_PAREN => '(',
        RIGHT_PAREN => ')',
        LEFT_BRACKET => '[',
        RIGHT_BRACKET => ']',
        LEFT_BRACE => '{',
        RIGHT_BRACE => '}',
        _ => return None,
    })
}

/// Parses `text`, discarding all errors.
pub fn parse(text: &str) -> Document {
    Parser::new(Tokenizer::new(text), None).parse()
}

/// Parses `text`, reporting errors to `proxy`.
pub fn parse_with<'a>(text: &'a str, proxy: &'a mut dyn ErrorProxy) -> Document {
    Parser::new(Tokenizer::new(text), Some(proxy)).parse()
}
