//! Diagnostics produced while building a syntax tree, and their rendering.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// The stage that reported a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Text that could not be split into a well-formed token.
    Tokenizer,
    /// Tokens that could not be placed in the tree.
    Parser,
    /// A bracket without its partner.
    Delimiter,
}

impl Origin {
    /// Placement problems only warn.
    fn level(self) -> Level {
        match self {
            Origin::Tokenizer | Origin::Delimiter => Level::Error,
            Origin::Parser => Level::Warning,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Origin::Tokenizer => "in this token",
            Origin::Parser => "in this statement",
            Origin::Delimiter => "unbalanced",
        }
    }
}

/// A problem found in a source text, located by byte range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    origin: Origin,
    message: String,
    range: TextRange,
    note: Option<String>,
}

impl Diagnostic {
    pub fn new(origin: Origin, message: impl Into<String>, range: TextRange) -> Self {
        Self { origin, message: message.into(), range, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.origin.level();
        let mut message = level.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label(self.origin.label()))
                .fold(true),
        );
        if let Some(note) = &self.note {
            message = message.footer(Level::Note.title(note));
        }
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(diagnostic: &Diagnostic, text: &str) -> String {
        diagnostic.render(&Renderer::plain(), "a.pl", text).to_string()
    }

    #[test]
    fn tokenizer_errors_point_into_the_token() {
        let text = "my $x = 'abc;\n";
        let range = TextRange::new(8.into(), 13.into());
        let diagnostic = Diagnostic::new(Origin::Tokenizer, "missing closing delimiter", range);
        let rendered = render(&diagnostic, text);
        assert!(rendered.contains("error: missing closing delimiter"), "{rendered}");
        assert!(rendered.contains("a.pl:1:9"), "{rendered}");
        assert!(rendered.contains("in this token"), "{rendered}");
        assert!(!rendered.contains("note:"), "{rendered}");
    }

    #[test]
    fn origins_render_differently() {
        let text = "if ($x);\nf(1;\n";

        let range = TextRange::new(0.into(), 2.into());
        let missing = Diagnostic::new(Origin::Parser, "`if` is not followed by a block", range);
        let rendered = render(&missing, text);
        assert!(rendered.contains("warning: `if` is not followed by a block"), "{rendered}");
        assert!(rendered.contains("in this statement"), "{rendered}");

        let range = TextRange::new(10.into(), 11.into());
        let unclosed = Diagnostic::new(Origin::Delimiter, "unclosed delimiter `(`", range)
            .with_note("the structure runs to the end of the input");
        assert_eq!(unclosed.note(), Some("the structure runs to the end of the input"));
        let rendered = render(&unclosed, text);
        assert!(rendered.contains("error: unclosed delimiter `(`"), "{rendered}");
        assert!(rendered.contains("a.pl:2:2"), "{rendered}");
        assert!(rendered.contains("unbalanced"), "{rendered}");
        assert!(rendered.contains("note: the structure runs to the end of the input"), "{rendered}");
    }
}
