use crate::{NodeOrToken, SyntaxElement};

/// Pre-order traversal yielding an `Enter` and a `Leave` event per element.
pub struct Preorder<'a> {
    start: SyntaxElement<'a>,
    next: Option<WalkEvent<'a>>,
    skip_subtree: bool,
}

impl<'a> Preorder<'a> {
    pub fn new(start: SyntaxElement<'a>) -> Self {
        Self { start, next: Some(WalkEvent::Enter(start)), skip_subtree: false }
    }

    /// Skips the children of the element entered last.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_subtree {
            self.next = self.next.take().map(|next| match next {
                WalkEvent::Enter(first_child) => match first_child.parent() {
                    Some(parent) => WalkEvent::Leave(NodeOrToken::Node(parent)),
                    None => WalkEvent::Leave(first_child),
                },
                WalkEvent::Leave(parent) => WalkEvent::Leave(parent),
            });
            self.skip_subtree = false;
        }

        let next = self.next.take();

        self.next = next.and_then(|event| {
            Some(match event {
                WalkEvent::Enter(element) => {
                    match element.as_node().and_then(|node| node.first_child()) {
                        Some(child) => WalkEvent::Enter(child),
                        None => WalkEvent::Leave(element),
                    }
                }
                WalkEvent::Leave(element) => {
                    if element == self.start {
                        return None;
                    }

                    match element.next_sibling() {
                        Some(sibling) => WalkEvent::Enter(sibling),
                        None => WalkEvent::Leave(NodeOrToken::Node(element.parent()?)),
                    }
                }
            })
        });

        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    Enter(SyntaxElement<'a>),
    Leave(SyntaxElement<'a>),
}
