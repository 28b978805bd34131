//! Delimiter-bounded content of quote-like and regex-like tokens.
//!
//! Sections record where content lives inside the token text; decoding is
//! deferred to the token accessors.

use text_size::TextRange;

/// One delimited section of a quote-like token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Section {
    /// Absolute range of the content, delimiters excluded.
    pub range: TextRange,
    pub open: char,
    pub close: char,
    /// `false` when input ended before the closing delimiter.
    pub complete: bool,
}

impl Section {
    pub fn is_paired(&self) -> bool {
        self.open != self.close
    }
}

/// The sections of a token plus its trailing modifier letters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sectioned {
    pub sections: Vec<Section>,
    pub modifiers: Option<TextRange>,
}

impl Sectioned {
    pub fn new(sections: Vec<Section>, modifiers: Option<TextRange>) -> Self {
        Self { sections, modifiers }
    }

    pub fn is_complete(&self) -> bool {
        self.sections.iter().all(|section| section.complete)
    }
}
