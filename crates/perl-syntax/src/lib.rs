//! Lossless concrete syntax tree for Perl documents.
//!
//! Every element lives in the arena of its `Document`; the handles handed out
//! by the tree API are `Copy` borrows of that arena. Concatenating the token
//! texts of a document reproduces its source exactly.

/// Typed views over statement nodes.
pub mod ast;
mod builder;
mod document;
mod find;
pub mod printer;
mod sections;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod token;
pub mod visit;
mod walk;

/// Incremental builder for constructing a `Document`.
pub use builder::Builder;
pub use document::Document;
/// Element filters for `find` and `find_first`.
pub use find::{AnyOf, IsA, IsKind, Recursive, Rule};
pub use sections::{Section, Sectioned};
/// Primary tree API types.
pub use syntax::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken, TokenAtOffset};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use token::{Number, ValueError};
pub use visit::{Flow, Visitor};
pub use walk::{Preorder, WalkEvent};
