//! Double-dispatch traversal over the full set of element variants.
//!
//! Each handler defaults to the handler of the nearest shared abstraction:
//! `visit_statement_sub` falls back to `visit_statement`, which falls back to
//! `visit_node`. Token handlers fall back to `visit_token`.

use crate::SyntaxKind::*;
use crate::walk::{Preorder, WalkEvent};
use crate::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken};

/// Whether the walk descends into a node's children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    SkipChildren,
}

/// Handlers receive the depth of the element: 0 for the walk's start, and
/// one more for each enclosing node below it.
#[allow(unused_variables)]
pub trait Visitor<'a> {
    fn visit_node(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        Flow::Continue
    }

    /// Called after a node's children, with the same depth it was entered at.
    fn leave_node(&mut self, node: SyntaxNode<'a>, depth: usize) {}

    fn visit_document(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_node(node, depth)
    }

    fn visit_statement(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_node(node, depth)
    }

    fn visit_statement_expression(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_package(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_sub(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    /// `BEGIN`, `END` and friends are special subroutines.
    fn visit_statement_scheduled(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement_sub(node, depth)
    }

    fn visit_statement_compound(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_break(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_include(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    /// Variable declarations are expressions.
    fn visit_statement_variable(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement_expression(node, depth)
    }

    fn visit_statement_data(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_end(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_given(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_when(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_unmatched_brace(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_statement_null(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_statement(node, depth)
    }

    fn visit_structure(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_node(node, depth)
    }

    fn visit_structure_block(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_condition(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_list(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_subscript(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_constructor(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_for(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_given(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_structure_when(&mut self, node: SyntaxNode<'a>, depth: usize) -> Flow {
        self.visit_structure(node, depth)
    }

    fn visit_token(&mut self, token: SyntaxToken<'a>, depth: usize) {}

    fn visit_whitespace(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_comment(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_pod(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_data(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_word(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_label(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_separator(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_prototype(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_symbol(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_magic(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_symbol(token, depth)
    }

    fn visit_array_index(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_cast(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_operator(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    /// Brackets, braces, parentheses and `;`.
    fn visit_delimiter(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_number(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_quote(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_quote_like(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_regexp(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    /// Both the `<<TAG` introducer and the body it refers to.
    fn visit_heredoc(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }

    fn visit_unknown(&mut self, token: SyntaxToken<'a>, depth: usize) {
        self.visit_token(token, depth)
    }
}

/// Walks `start` and its descendants in source order.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(start: SyntaxElement<'a>, visitor: &mut V) {
    let mut depth = 0;
    let mut preorder = Preorder::new(start);

    while let Some(event) = preorder.next() {
        match event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => {
                if dispatch_node(visitor, node, depth) == Flow::SkipChildren {
                    preorder.skip_subtree();
                }
                depth += 1;
            }
            WalkEvent::Enter(NodeOrToken::Token(token)) => dispatch_token(visitor, token, depth),
            WalkEvent::Leave(NodeOrToken::Node(node)) => {
                depth -= 1;
                visitor.leave_node(node, depth);
            }
            WalkEvent::Leave(NodeOrToken::Token(_)) => {}
        }
    }
}

fn dispatch_node<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: SyntaxNode<'a>,
    depth: usize,
) -> Flow {
    match node.kind() {
        DOCUMENT => v.visit_document(node, depth),
        STATEMENT => v.visit_statement(node, depth),
        STATEMENT_EXPRESSION => v.visit_statement_expression(node, depth),
        STATEMENT_PACKAGE => v.visit_statement_package(node, depth),
        STATEMENT_SUB => v.visit_statement_sub(node, depth),
        STATEMENT_SCHEDULED => v.visit_statement_scheduled(node, depth),
        STATEMENT_COMPOUND => v.visit_statement_compound(node, depth),
        STATEMENT_BREAK => v.visit_statement_break(node, depth),
        STATEMENT_INCLUDE => v.visit_statement_include(node, depth),
        STATEMENT_VARIABLE => v.visit_statement_variable(node, depth),
        STATEMENT_DATA => v.visit_statement_data(node, depth),
        STATEMENT_END => v.visit_statement_end(node, depth),
        STATEMENT_GIVEN => v.visit_statement_given(node, depth),
        STATEMENT_WHEN => v.visit_statement_when(node, depth),
        STATEMENT_UNMATCHED_BRACE => v.visit_statement_unmatched_brace(node, depth),
        STATEMENT_NULL => v.visit_statement_null(node, depth),
        STRUCTURE_BLOCK => v.visit_structure_block(node, depth),
        STRUCTURE_CONDITION => v.visit_structure_condition(node, depth),
        STRUCTURE_LIST => v.visit_structure_list(node, depth),
        STRUCTURE_SUBSCRIPT => v.visit_structure_subscript(node, depth),
        STRUCTURE_CONSTRUCTOR => v.visit_structure_constructor(node, depth),
        STRUCTURE_FOR => v.visit_structure_for(node, depth),
        STRUCTURE_GIVEN => v.visit_structure_given(node, depth),
        STRUCTURE_WHEN => v.visit_structure_when(node, depth),
        kind @ (WHITESPACE | COMMENT | POD | HEREDOC_BODY | DATA | WORD | LABEL | SEPARATOR
        | PROTOTYPE | SYMBOL | MAGIC | ARRAY_INDEX | CAST | OPERATOR | LEFT_PAREN
        | RIGHT_PAREN | LEFT_BRACKET | RIGHT_BRACKET | LEFT_BRACE | RIGHT_BRACE | SEMICOLON
        | NUMBER | NUMBER_FLOAT | NUMBER_EXP | NUMBER_HEX | NUMBER_OCTAL | NUMBER_BINARY
        | NUMBER_VERSION | QUOTE_SINGLE | QUOTE_DOUBLE | QUOTE_LITERAL | QUOTE_INTERPOLATE
        | QUOTELIKE_WORDS | QUOTELIKE_REGEXP | QUOTELIKE_COMMAND | QUOTELIKE_BACKTICK
        | QUOTELIKE_READLINE | REGEXP_MATCH | REGEXP_SUBSTITUTE | REGEXP_TRANSLITERATE
        | HEREDOC | UNKNOWN | EOF | DELIMITER | QUOTE | QUOTELIKE | REGEXP | STRUCTURE
        | TOMBSTONE) => unreachable!("{kind:?} is not a node kind"),
    }
}

fn dispatch_token<'a, V: Visitor<'a> + ?Sized>(v: &mut V, token: SyntaxToken<'a>, depth: usize) {
    match token.kind() {
        WHITESPACE => v.visit_whitespace(token, depth),
        COMMENT => v.visit_comment(token, depth),
        POD => v.visit_pod(token, depth),
        DATA => v.visit_data(token, depth),
        WORD => v.visit_word(token, depth),
        LABEL => v.visit_label(token, depth),
        SEPARATOR => v.visit_separator(token, depth),
        PROTOTYPE => v.visit_prototype(token, depth),
        SYMBOL => v.visit_symbol(token, depth),
        MAGIC => v.visit_magic(token, depth),
        ARRAY_INDEX => v.visit_array_index(token, depth),
        CAST => v.visit_cast(token, depth),
        OPERATOR => v.visit_operator(token, depth),
        LEFT_PAREN | RIGHT_PAREN | LEFT_BRACKET | RIGHT_BRACKET | LEFT_BRACE | RIGHT_BRACE
        | SEMICOLON => v.visit_delimiter(token, depth),
        NUMBER | NUMBER_FLOAT | NUMBER_EXP | NUMBER_HEX | NUMBER_OCTAL | NUMBER_BINARY
        | NUMBER_VERSION => v.visit_number(token, depth),
        QUOTE_SINGLE | QUOTE_DOUBLE | QUOTE_LITERAL | QUOTE_INTERPOLATE => {
            v.visit_quote(token, depth)
        }
        QUOTELIKE_WORDS | QUOTELIKE_REGEXP | QUOTELIKE_COMMAND | QUOTELIKE_BACKTICK
        | QUOTELIKE_READLINE => v.visit_quote_like(token, depth),
        REGEXP_MATCH | REGEXP_SUBSTITUTE | REGEXP_TRANSLITERATE => v.visit_regexp(token, depth),
        HEREDOC | HEREDOC_BODY => v.visit_heredoc(token, depth),
        UNKNOWN => v.visit_unknown(token, depth),
        kind @ (EOF | DOCUMENT | STATEMENT | STATEMENT_EXPRESSION | STATEMENT_PACKAGE
        | STATEMENT_SUB | STATEMENT_SCHEDULED | STATEMENT_COMPOUND | STATEMENT_BREAK
        | STATEMENT_INCLUDE | STATEMENT_VARIABLE | STATEMENT_DATA | STATEMENT_END
        | STATEMENT_GIVEN | STATEMENT_WHEN | STATEMENT_UNMATCHED_BRACE | STATEMENT_NULL
        | STRUCTURE_BLOCK | STRUCTURE_CONDITION | STRUCTURE_LIST | STRUCTURE_SUBSCRIPT
        | STRUCTURE_CONSTRUCTOR | STRUCTURE_FOR | STRUCTURE_GIVEN | STRUCTURE_WHEN | DELIMITER
        | QUOTE | QUOTELIKE | REGEXP | STRUCTURE | TOMBSTONE) => {
            unreachable!("{kind:?} never appears as a token in a document")
        }
    }
}
