//! Typed views over statement nodes.

use crate::SyntaxKind::*;
use crate::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken};

pub trait Node<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($(#[$attr:meta])* $name:ident => $kind:ident,)*) => {$(
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> Node<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

ast_node! {
    /// `package Foo::Bar;` or `package Foo { ... }`.
    Package => STATEMENT_PACKAGE,
    /// A named subroutine definition or forward declaration.
    SubDefinition => STATEMENT_SUB,
    Scheduled => STATEMENT_SCHEDULED,
    /// `use`, `no` and `require`.
    Include => STATEMENT_INCLUDE,
    Variable => STATEMENT_VARIABLE,
    Compound => STATEMENT_COMPOUND,
}

fn significant_tokens<'a>(node: SyntaxNode<'a>) -> impl Iterator<Item = SyntaxToken<'a>> {
    node.significant_children().filter_map(SyntaxElement::into_token)
}

fn block<'a>(node: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
    node.children().find(|child| child.kind() == STRUCTURE_BLOCK)
}

impl<'a> Package<'a> {
    pub fn namespace(self) -> Option<&'a str> {
        significant_tokens(self.0).nth(1).filter(|it| it.kind() == WORD).map(SyntaxToken::text)
    }

    /// The block of the `package NAME { ... }` form.
    pub fn block(self) -> Option<SyntaxNode<'a>> {
        block(self.0)
    }
}

impl<'a> SubDefinition<'a> {
    pub fn name(self) -> Option<&'a str> {
        significant_tokens(self.0).nth(1).filter(|it| it.kind() == WORD).map(SyntaxToken::text)
    }

    pub fn prototype(self) -> Option<SyntaxToken<'a>> {
        significant_tokens(self.0).find(|it| it.kind() == PROTOTYPE)
    }

    pub fn block(self) -> Option<SyntaxNode<'a>> {
        block(self.0)
    }

    /// `sub foo;` declares without defining.
    pub fn is_forward(self) -> bool {
        self.block().is_none()
    }
}

impl<'a> Scheduled<'a> {
    /// `BEGIN`, `END`, `INIT`, `CHECK` or `UNITCHECK`.
    pub fn name(self) -> Option<&'a str> {
        significant_tokens(self.0).next().map(SyntaxToken::text)
    }

    pub fn block(self) -> Option<SyntaxNode<'a>> {
        block(self.0)
    }
}

impl<'a> Include<'a> {
    pub fn keyword(self) -> Option<&'a str> {
        significant_tokens(self.0).next().map(SyntaxToken::text)
    }

    /// The module name; `None` for version requirements like `use 5.010;`.
    pub fn module(self) -> Option<&'a str> {
        significant_tokens(self.0).nth(1).filter(|it| it.kind() == WORD).map(SyntaxToken::text)
    }

    pub fn version(self) -> Option<SyntaxToken<'a>> {
        significant_tokens(self.0).nth(1).filter(|it| {
            let kind = it.kind();
            kind == NUMBER || kind.base() == Some(NUMBER)
        })
    }
}

impl<'a> Variable<'a> {
    /// `my`, `our`, `local` or `state`.
    pub fn declarator(self) -> Option<&'a str> {
        significant_tokens(self.0).next().map(SyntaxToken::text)
    }

    /// Declared symbols, whether single or in a parenthesised list.
    pub fn symbols(self) -> Vec<SyntaxToken<'a>> {
        let mut symbols = Vec::new();
        for element in self.0.significant_children().skip(1) {
            match element {
                NodeOrToken::Token(token) if token.kind() == SYMBOL => {
                    symbols.push(token);
                    break;
                }
                NodeOrToken::Node(list) if list.kind() == STRUCTURE_LIST => {
                    symbols.extend(list.tokens().filter(|it| it.kind() == SYMBOL));
                    break;
                }
                _ => {}
            }
        }
        symbols
    }
}

impl<'a> Compound<'a> {
    pub fn label(self) -> Option<SyntaxToken<'a>> {
        significant_tokens(self.0).next().filter(|it| it.kind() == LABEL)
    }

    /// The introducing keyword; `None` for a bare block.
    pub fn keyword(self) -> Option<&'a str> {
        let first = self.0.significant_children().find(|it| it.kind() != LABEL)?;
        first.into_token().filter(|it| it.kind() == WORD).map(SyntaxToken::text)
    }
}
