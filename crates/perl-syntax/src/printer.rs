//! Indented text dump of a tree, one element per line.

use std::fmt::Write as _;

use crate::SyntaxKind::*;
use crate::visit::{Flow, Visitor};
use crate::{Document, SyntaxNode, SyntaxToken};

/// Which insignificant tokens appear in a dump.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TriviaFilter {
    #[default]
    All,
    Whitespace,
    Comments,
    Pod,
    None,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrinterOptions {
    pub trivia: TriviaFilter,
    /// Print tokens at all, or only the node skeleton.
    pub tokens: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self { trivia: TriviaFilter::All, tokens: true }
    }
}

struct Printer {
    options: PrinterOptions,
    out: String,
}

impl Printer {
    fn shows(&self, token: SyntaxToken<'_>) -> bool {
        if !self.options.tokens {
            return false;
        }
        match (token.kind(), self.options.trivia) {
            (WHITESPACE | COMMENT | POD, TriviaFilter::All) => true,
            (WHITESPACE, filter) => filter == TriviaFilter::Whitespace,
            (COMMENT, filter) => filter == TriviaFilter::Comments,
            (POD, filter) => filter == TriviaFilter::Pod,
            _ => true,
        }
    }
}

impl<'a> Visitor<'a> for Printer {
    fn visit_node(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        let suffix = if node.is_complete() { "" } else { " (incomplete)" };
        _ = writeln!(self.out, "{:indent$}{:?}{suffix}", "", node.kind(), indent = depth * 2);
        Flow::Continue
    }

    fn visit_token(&mut self, token: SyntaxToken<'a>, depth: usize) {
        if self.shows(token) {
            _ = writeln!(
                self.out,
                "{:indent$}{:?} {:?}",
                "",
                token.kind(),
                token.text(),
                indent = depth * 2
            );
        }
    }
}

/// Renders the whole document tree.
pub fn print(document: &Document, options: PrinterOptions) -> String {
    let mut printer = Printer { options, out: String::new() };
    document.walk(&mut printer);
    printer.out
}
