//! Incremental builder for the document arena.

use la_arena::Arena;
use line_index::LineIndex;
use text_size::{TextLen, TextRange, TextSize};

use crate::document::{Detail, Document, ElementData, ElementId};
use crate::{Sectioned, SyntaxKind};

/// Builds a `Document` from a stream of start/token/finish calls.
///
/// Tokens must be pushed in source order and cover the text without gaps.
pub struct Builder {
    text: Box<str>,
    elements: Arena<ElementData>,
    tokens: Vec<ElementId>,
    opened: Vec<(ElementId, TextSize)>,
    root: Option<ElementId>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 32;

impl Builder {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            elements: Arena::default(),
            tokens: Vec::with_capacity(text.len() / 4),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            root: None,
            text_len: TextSize::new(0),
        }
    }

    fn alloc(&mut self, kind: SyntaxKind, range: TextRange, detail: Detail) -> ElementId {
        let parent = self.opened.last().map(|&(id, _)| id);
        let index = parent.map_or(0, |parent| self.elements[parent].children.len() as u32);
        let id = self.elements.alloc(ElementData {
            kind,
            parent,
            index,
            range,
            children: Vec::new(),
            detail,
        });

        match parent {
            Some(parent) => self.elements[parent].children.push(id),
            None => {
                assert!(self.root.is_none(), "a document has exactly one root");
                self.root = Some(id);
            }
        }

        id
    }

    /// End of the text covered so far.
    pub fn offset(&self) -> TextSize {
        self.text_len
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        let start = self.text_len;
        let id = self.alloc(kind, TextRange::empty(start), Detail::None);
        self.opened.push((id, start));
    }

    /// Appends a token to the current node.
    pub fn token(&mut self, kind: SyntaxKind, range: TextRange, sectioned: Option<Box<Sectioned>>) {
        debug_assert!(kind.is_token(), "{kind:?} is not a token kind");
        debug_assert_eq!(range.start(), self.text_len, "tokens must be contiguous");
        debug_assert!(!self.opened.is_empty(), "tokens need an enclosing node");

        let detail = sectioned.map_or(Detail::None, Detail::Sectioned);
        let id = self.alloc(kind, range, detail);
        self.tokens.push(id);
        self.text_len = range.end();
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let (id, start) = self.opened.pop().expect("no opened nodes?");
        self.elements[id].range = TextRange::new(start, self.text_len);
    }

    /// Finishes a structure that never saw its closing delimiter.
    pub fn finish_incomplete_node(&mut self) {
        if let Some(&(id, _)) = self.opened.last() {
            self.elements[id].detail = Detail::Incomplete;
        }
        self.finish_node();
    }

    pub fn finish(mut self) -> Document {
        assert!(self.opened.is_empty(), "unfinished nodes remain");
        debug_assert_eq!(self.text_len, self.text.text_len(), "text not fully covered");

        let root = self.root.take().expect("the document node was never started");
        let text = std::mem::take(&mut self.text);
        let line_index = LineIndex::new(&text);

        Document {
            text,
            elements: std::mem::take(&mut self.elements),
            root,
            tokens: std::mem::take(&mut self.tokens),
            line_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn builds_parent_links() {
        let text = "foo;";
        let mut builder = Builder::new(text);
        builder.start_node(DOCUMENT);
        builder.start_node(STATEMENT);
        builder.token(WORD, TextRange::new(0.into(), 3.into()), None);
        builder.token(SEMICOLON, TextRange::new(3.into(), 4.into()), None);
        builder.finish_node();
        builder.finish_node();
        let document = builder.finish();

        let root = document.root();
        assert_eq!(root.kind(), DOCUMENT);
        let statement = root.children().next().unwrap();
        assert_eq!(statement.kind(), STATEMENT);
        assert_eq!(statement.text(), "foo;");
        assert_eq!(statement.parent(), Some(root));

        let word = document.tokens().next().unwrap();
        assert_eq!(word.parent(), statement);
        assert_eq!(word.text(), "foo");
    }
}
