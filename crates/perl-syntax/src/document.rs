//! Arena storage for a parsed document.

use std::fmt;

use la_arena::{Arena, Idx};
use line_index::LineIndex;
use text_size::{TextRange, TextSize};

use crate::find::Rule;
use crate::visit::{Visitor, walk};
use crate::{NodeOrToken, Sectioned, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

pub(crate) type ElementId = Idx<ElementData>;

/// Raw element stored in the document arena.
///
/// The parent edge is a plain index: ownership flows strictly from the arena
/// through `children`.
pub(crate) struct ElementData {
    pub(crate) kind: SyntaxKind,
    pub(crate) parent: Option<ElementId>,
    /// Position among the parent's children.
    pub(crate) index: u32,
    pub(crate) range: TextRange,
    pub(crate) children: Vec<ElementId>,
    pub(crate) detail: Detail,
}

pub(crate) enum Detail {
    None,
    /// A structure whose closing delimiter never arrived.
    Incomplete,
    Sectioned(Box<Sectioned>),
}

/// The root of a concrete syntax tree and the owner of every element in it.
///
/// Dropping the document drops the whole tree. Once built it is immutable and
/// may be shared read-only between threads.
pub struct Document {
    pub(crate) text: Box<str>,
    pub(crate) elements: Arena<ElementData>,
    pub(crate) root: ElementId,
    /// Token ids in source order.
    pub(crate) tokens: Vec<ElementId>,
    pub(crate) line_index: LineIndex,
}

impl Document {
    /// Returns the `DOCUMENT` node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self, self.root)
    }

    /// Returns the full source text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates every token in source order.
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'_>> + '_ {
        self.tokens.iter().map(|&id| SyntaxToken::new(self, id))
    }

    /// Collects every descendant of the root matching `rule`, in source order.
    pub fn find<'a>(&'a self, rule: &dyn Rule) -> Vec<SyntaxElement<'a>> {
        self.root().find(rule)
    }

    /// Walks the whole tree with `visitor`.
    pub fn walk<'a>(&'a self, visitor: &mut (impl Visitor<'a> + ?Sized)) {
        walk(NodeOrToken::Node(self.root()), visitor);
    }

    pub(crate) fn data(&self, id: ElementId) -> &ElementData {
        &self.elements[id]
    }

    /// 1-based line and column (in chars) of `offset`.
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let line_col = self.line_index.line_col(offset);
        let line_start = offset - TextSize::new(line_col.col);
        let prefix = &self.text[TextRange::new(line_start, offset)];
        (line_col.line + 1, prefix.chars().count() as u32 + 1)
    }

    /// The token covering `offset`, preferring the one starting there.
    pub(crate) fn token_index_at(&self, offset: TextSize) -> Option<usize> {
        let index = self.tokens.partition_point(|&id| self.elements[id].range.start() <= offset);
        index.checked_sub(1)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("text_len", &self.text.len())
            .field("elements", &self.elements.len())
            .finish_non_exhaustive()
    }
}
