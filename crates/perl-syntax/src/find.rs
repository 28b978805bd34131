//! Rule-based queries over a tree.

use crate::walk::{Preorder, WalkEvent};
use crate::{NodeOrToken, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxSet};

/// Decides which elements a search collects and where it descends.
///
/// The search always descends into elements that do not match. Into a
/// matching node it descends only when `recurse` says so.
pub trait Rule {
    fn matches(&self, element: SyntaxElement<'_>) -> bool;

    fn recurse(&self, _element: SyntaxElement<'_>) -> bool {
        false
    }
}

/// Matches elements of exactly one kind.
#[derive(Clone, Copy, Debug)]
pub struct IsKind(pub SyntaxKind);

impl Rule for IsKind {
    fn matches(&self, element: SyntaxElement<'_>) -> bool {
        element.kind() == self.0
    }
}

/// Matches a kind or any kind whose common base is that kind, so
/// `IsA(QUOTELIKE)` finds every quote-like token.
#[derive(Clone, Copy, Debug)]
pub struct IsA(pub SyntaxKind);

impl Rule for IsA {
    fn matches(&self, element: SyntaxElement<'_>) -> bool {
        let kind = element.kind();
        kind == self.0 || kind.base() == Some(self.0)
    }
}

/// Matches any kind in the set.
#[derive(Clone, Debug)]
pub struct AnyOf(pub SyntaxSet);

impl Rule for AnyOf {
    fn matches(&self, element: SyntaxElement<'_>) -> bool {
        self.0.contains(element.kind())
    }
}

/// Keeps searching inside matches of the wrapped rule.
#[derive(Clone, Copy, Debug)]
pub struct Recursive<R>(pub R);

impl<R: Rule> Rule for Recursive<R> {
    fn matches(&self, element: SyntaxElement<'_>) -> bool {
        self.0.matches(element)
    }

    fn recurse(&self, _element: SyntaxElement<'_>) -> bool {
        true
    }
}

impl<F> Rule for F
where
    F: Fn(SyntaxElement<'_>) -> bool,
{
    fn matches(&self, element: SyntaxElement<'_>) -> bool {
        self(element)
    }
}

/// Feeds matches under `root` to `found` in pre-order until it returns `false`.
pub(crate) fn find_in<'a>(
    root: SyntaxNode<'a>,
    rule: &dyn Rule,
    found: &mut dyn FnMut(SyntaxElement<'a>) -> bool,
) {
    let root = NodeOrToken::Node(root);
    let mut preorder = Preorder::new(root);

    while let Some(event) = preorder.next() {
        let WalkEvent::Enter(element) = event else { continue };
        if element == root || !rule.matches(element) {
            continue;
        }

        if !found(element) {
            return;
        }
        if !rule.recurse(element) {
            preorder.skip_subtree();
        }
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{Builder, Document};

    /// `f([1]);` with the list holding an expression holding a constructor.
    fn nested() -> Document {
        let mut builder = Builder::new("f([1]);");
        let token = |builder: &mut Builder, kind, len: u32| {
            let start = builder.offset();
            builder.token(kind, TextRange::at(start, len.into()), None);
        };
        builder.start_node(DOCUMENT);
        builder.start_node(STATEMENT);
        token(&mut builder, WORD, 1);
        builder.start_node(STRUCTURE_LIST);
        token(&mut builder, LEFT_PAREN, 1);
        builder.start_node(STATEMENT_EXPRESSION);
        builder.start_node(STRUCTURE_CONSTRUCTOR);
        token(&mut builder, LEFT_BRACKET, 1);
        builder.start_node(STATEMENT_EXPRESSION);
        token(&mut builder, NUMBER, 1);
        builder.finish_node();
        token(&mut builder, RIGHT_BRACKET, 1);
        builder.finish_node();
        builder.finish_node();
        token(&mut builder, RIGHT_PAREN, 1);
        builder.finish_node();
        token(&mut builder, SEMICOLON, 1);
        builder.finish_node();
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn exact_kind() {
        let document = nested();
        let found = document.find(&IsKind(WORD));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "f");
    }

    #[test]
    fn subkinds_through_base() {
        let document = nested();
        let structures = document.find(&IsA(STRUCTURE));
        let kinds: Vec<_> = structures.iter().map(|it| it.kind()).collect();
        assert_eq!(kinds, [STRUCTURE_LIST]);

        let structures = document.find(&Recursive(IsA(STRUCTURE)));
        let kinds: Vec<_> = structures.iter().map(|it| it.kind()).collect();
        assert_eq!(kinds, [STRUCTURE_LIST, STRUCTURE_CONSTRUCTOR]);
    }

    #[test]
    fn closures_and_sets() {
        let document = nested();
        let delimiters = document.find(&AnyOf(SyntaxSet::new([LEFT_BRACKET, RIGHT_BRACKET])));
        assert_eq!(delimiters.len(), 2);

        let ones = document.find(&|element: SyntaxElement<'_>| element.text() == "1");
        let kinds: Vec<_> = ones.iter().map(|it| it.kind()).collect();
        assert_eq!(kinds, [STATEMENT_EXPRESSION], "the number is inside the matched expression");

        let first = document.root().find_first(&IsA(DELIMITER)).unwrap();
        assert_eq!(first.kind(), LEFT_PAREN);
    }
}
