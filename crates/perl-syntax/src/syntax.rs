//! Public tree API: lightweight handles borrowing from a `Document`.

use std::fmt;
use std::hash::{Hash, Hasher};

use text_size::{TextRange, TextSize};

use crate::document::{Detail, Document, ElementData, ElementId};
use crate::find::{Rule, find_in};
use crate::visit::{Visitor, walk};
use crate::{Section, Sectioned, SyntaxKind};

/// Node handle tied to the lifetime of the document.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    doc: &'a Document,
    id: ElementId,
}

/// Token handle tied to the lifetime of the document.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    doc: &'a Document,
    id: ElementId,
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

fn element(doc: &Document, id: ElementId) -> SyntaxElement<'_> {
    if doc.data(id).kind.is_token() {
        NodeOrToken::Token(SyntaxToken { doc, id })
    } else {
        NodeOrToken::Node(SyntaxNode { doc, id })
    }
}

fn sibling(doc: &Document, id: ElementId, forward: bool) -> Option<SyntaxElement<'_>> {
    let data = doc.data(id);
    let siblings = &doc.data(data.parent?).children;
    let index = data.index as usize;
    let index = if forward { index.checked_add(1)? } else { index.checked_sub(1)? };
    siblings.get(index).map(|&id| element(doc, id))
}

/// Reflexive: an element is its own ancestor.
fn is_ancestor(doc: &Document, ancestor: ElementId, mut id: ElementId) -> bool {
    loop {
        if id == ancestor {
            return true;
        }
        match doc.data(id).parent {
            Some(parent) => id = parent,
            None => return false,
        }
    }
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    pub(crate) fn new(doc: &'a Document, id: ElementId) -> Self {
        Self { doc, id }
    }

    #[inline]
    fn data(self) -> &'a ElementData {
        self.doc.data(self.id)
    }

    #[inline]
    pub fn document(self) -> &'a Document {
        self.doc
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the text range covered by this node.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().range
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.doc.text[self.text_range()]
    }

    /// 1-based line and column of the node's first character.
    pub fn line_col(self) -> (u32, u32) {
        self.doc.line_col(self.text_range().start())
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { doc: self.doc, id: self.data().parent? })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// `false` for a structure whose closing delimiter never arrived.
    #[inline]
    pub fn is_complete(self) -> bool {
        !matches!(self.data().detail, Detail::Incomplete)
    }

    /// Iterates direct children, tokens included.
    pub fn children_with_tokens(self) -> impl DoubleEndedIterator<Item = SyntaxElement<'a>> + Clone {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| element(doc, id))
    }

    /// Iterates direct child nodes, skipping tokens.
    pub fn children(self) -> impl DoubleEndedIterator<Item = SyntaxNode<'a>> + Clone {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    /// Iterates direct children that are not whitespace, comments or documentation.
    pub fn significant_children(self) -> impl DoubleEndedIterator<Item = SyntaxElement<'a>> + Clone {
        self.children_with_tokens().filter(|child| child.is_significant())
    }

    /// Returns the `n`th significant child.
    pub fn significant_child(self, n: usize) -> Option<SyntaxElement<'a>> {
        self.significant_children().nth(n)
    }

    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    pub fn first_child(self) -> Option<SyntaxElement<'a>> {
        self.children_with_tokens().next()
    }

    pub fn last_child(self) -> Option<SyntaxElement<'a>> {
        self.children_with_tokens().next_back()
    }

    pub fn next_sibling(self) -> Option<SyntaxElement<'a>> {
        sibling(self.doc, self.id, true)
    }

    pub fn prev_sibling(self) -> Option<SyntaxElement<'a>> {
        sibling(self.doc, self.id, false)
    }

    /// Returns the first token spanned by this node.
    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        match self.first_child()? {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(node) => node.first_token(),
        }
    }

    /// Returns the last token spanned by this node.
    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        match self.last_child()? {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(node) => node.last_token(),
        }
    }

    /// Iterates the tokens spanned by this node in source order.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        let doc = self.doc;
        let range = self.text_range();
        let start = if range.is_empty() {
            doc.tokens.len()
        } else {
            doc.token_index_at(range.start()).unwrap_or(doc.tokens.len())
        };
        doc.tokens[start..]
            .iter()
            .map(move |&id| SyntaxToken { doc, id })
            .take_while(move |token| token.text_range().end() <= range.end())
    }

    /// Returns `true` if this node is `element` or one of its ancestors.
    pub fn is_ancestor_of(self, element: SyntaxElement<'_>) -> bool {
        std::ptr::eq(self.doc, element.document()) && is_ancestor(self.doc, self.id, element.id())
    }

    /// Returns `true` if `node` is this node or one of its ancestors.
    pub fn is_descendant_of(self, node: SyntaxNode<'_>) -> bool {
        node.is_ancestor_of(NodeOrToken::Node(self))
    }

    /// Collects every descendant matching `rule` in source order.
    pub fn find(self, rule: &dyn Rule) -> Vec<SyntaxElement<'a>> {
        let mut found = Vec::new();
        find_in(self, rule, &mut |element| {
            found.push(element);
            true
        });
        found
    }

    /// Returns the first descendant matching `rule`.
    pub fn find_first(self, rule: &dyn Rule) -> Option<SyntaxElement<'a>> {
        let mut found = None;
        find_in(self, rule, &mut |element| {
            found = Some(element);
            false
        });
        found
    }

    /// Walks this node and its descendants with `visitor`.
    pub fn walk(self, visitor: &mut (impl Visitor<'a> + ?Sized)) {
        walk(NodeOrToken::Node(self), visitor);
    }

    /// Returns the token at the given offset, if any.
    pub fn token_at_offset(self, offset: TextSize) -> TokenAtOffset<SyntaxToken<'a>> {
        let range = self.text_range();
        if !range.contains_inclusive(offset) {
            return TokenAtOffset::None;
        }

        let doc = self.doc;
        let Some(index) = doc.token_index_at(offset) else {
            return TokenAtOffset::None;
        };
        let token = SyntaxToken { doc, id: doc.tokens[index] };

        if token.text_range().start() == offset && offset > range.start() && index > 0 {
            let left = SyntaxToken { doc, id: doc.tokens[index - 1] };
            TokenAtOffset::Between(left, token)
        } else if token.text_range().contains_inclusive(offset) {
            TokenAtOffset::Single(token)
        } else {
            TokenAtOffset::None
        }
    }
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    pub(crate) fn new(doc: &'a Document, id: ElementId) -> Self {
        Self { doc, id }
    }

    #[inline]
    fn data(self) -> &'a ElementData {
        self.doc.data(self.id)
    }

    #[inline]
    pub fn document(self) -> &'a Document {
        self.doc
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn is_significant(self) -> bool {
        self.kind().is_significant()
    }

    /// Returns the token text range.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.data().range
    }

    /// Returns the token text.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.doc.text[self.text_range()]
    }

    /// 1-based line and column of the token's first character.
    pub fn line_col(self) -> (u32, u32) {
        self.doc.line_col(self.text_range().start())
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        let parent = self.data().parent.expect("tokens always have a parent");
        SyntaxNode { doc: self.doc, id: parent }
    }

    /// Returns an iterator of parent nodes, starting from the immediate parent.
    #[inline]
    pub fn parent_ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        self.parent().ancestors()
    }

    pub fn next_sibling(self) -> Option<SyntaxElement<'a>> {
        sibling(self.doc, self.id, true)
    }

    pub fn prev_sibling(self) -> Option<SyntaxElement<'a>> {
        sibling(self.doc, self.id, false)
    }

    /// Next sibling that is not whitespace, comments or documentation.
    pub fn next_significant_sibling(self) -> Option<SyntaxElement<'a>> {
        std::iter::successors(self.next_sibling(), |it| it.next_sibling())
            .find(|it| it.is_significant())
    }

    /// Previous sibling that is not whitespace, comments or documentation.
    pub fn prev_significant_sibling(self) -> Option<SyntaxElement<'a>> {
        std::iter::successors(self.prev_sibling(), |it| it.prev_sibling())
            .find(|it| it.is_significant())
    }

    fn ordinal(self) -> usize {
        self.doc.token_index_at(self.text_range().start()).expect("token is indexed")
    }

    /// Returns the previous token in source order.
    pub fn prev_token(self) -> Option<Self> {
        let index = self.ordinal().checked_sub(1)?;
        Some(Self { doc: self.doc, id: self.doc.tokens[index] })
    }

    /// Returns the next token in source order.
    pub fn next_token(self) -> Option<Self> {
        let id = *self.doc.tokens.get(self.ordinal() + 1)?;
        Some(Self { doc: self.doc, id })
    }

    /// Returns `true` only for the token itself; tokens have no descendants.
    pub fn is_ancestor_of(self, element: SyntaxElement<'_>) -> bool {
        std::ptr::eq(self.doc, element.document()) && element.id() == self.id
    }

    /// Returns `true` if `node` is one of this token's ancestors.
    pub fn is_descendant_of(self, node: SyntaxNode<'_>) -> bool {
        node.is_ancestor_of(NodeOrToken::Token(self))
    }

    pub(crate) fn sectioned(self) -> Option<&'a Sectioned> {
        match &self.data().detail {
            Detail::Sectioned(sectioned) => Some(sectioned),
            _ => None,
        }
    }

    /// The delimited sections of a quote-like, regex-like or heredoc token.
    pub fn sections(self) -> &'a [Section] {
        self.sectioned().map_or(&[], |sectioned| &sectioned.sections)
    }
}

impl<'a> SyntaxElement<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    pub fn text(self) -> &'a str {
        match self {
            NodeOrToken::Node(node) => node.text(),
            NodeOrToken::Token(token) => token.text(),
        }
    }

    /// Nodes are always significant; tokens unless whitespace, comments or documentation.
    pub fn is_significant(self) -> bool {
        match self {
            NodeOrToken::Node(_) => true,
            NodeOrToken::Token(token) => token.is_significant(),
        }
    }

    pub fn parent(self) -> Option<SyntaxNode<'a>> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => Some(token.parent()),
        }
    }

    pub fn next_sibling(self) -> Option<Self> {
        sibling(self.document(), self.id(), true)
    }

    pub fn prev_sibling(self) -> Option<Self> {
        sibling(self.document(), self.id(), false)
    }

    pub fn is_ancestor_of(self, element: SyntaxElement<'_>) -> bool {
        match self {
            NodeOrToken::Node(node) => node.is_ancestor_of(element),
            NodeOrToken::Token(token) => token.is_ancestor_of(element),
        }
    }

    pub fn is_descendant_of(self, element: SyntaxElement<'_>) -> bool {
        element.is_ancestor_of(self)
    }

    pub fn document(self) -> &'a Document {
        match self {
            NodeOrToken::Node(node) => node.doc,
            NodeOrToken::Token(token) => token.doc,
        }
    }

    fn id(self) -> ElementId {
        match self {
            NodeOrToken::Node(node) => node.id,
            NodeOrToken::Token(token) => token.id,
        }
    }
}

macro_rules! handle_impls {
    ($ty:ident) => {
        impl PartialEq for $ty<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self.doc, other.doc) && self.id == other.id
            }
        }

        impl Eq for $ty<'_> {}

        impl Hash for $ty<'_> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                std::ptr::hash(self.doc, state);
                self.id.hash(state);
            }
        }

        impl fmt::Debug for $ty<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}@{:?}", self.kind(), self.text_range())
            }
        }

        impl fmt::Display for $ty<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

handle_impls!(SyntaxNode);
handle_impls!(SyntaxToken);

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left token in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, _) => Some(left),
        }
    }
}
