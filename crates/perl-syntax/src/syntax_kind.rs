//! Every token, statement and structure variant of the tree.

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    WHITESPACE,
    COMMENT,
    POD,
    HEREDOC_BODY,
    DATA,

    WORD,
    LABEL,
    SEPARATOR,
    PROTOTYPE,
    SYMBOL,
    MAGIC,
    ARRAY_INDEX,
    CAST,
    OPERATOR,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    SEMICOLON,

    NUMBER,
    NUMBER_FLOAT,
    NUMBER_EXP,
    NUMBER_HEX,
    NUMBER_OCTAL,
    NUMBER_BINARY,
    NUMBER_VERSION,

    QUOTE_SINGLE,
    QUOTE_DOUBLE,
    QUOTE_LITERAL,
    QUOTE_INTERPOLATE,

    QUOTELIKE_WORDS,
    QUOTELIKE_REGEXP,
    QUOTELIKE_COMMAND,
    QUOTELIKE_BACKTICK,
    QUOTELIKE_READLINE,

    REGEXP_MATCH,
    REGEXP_SUBSTITUTE,
    REGEXP_TRANSLITERATE,

    HEREDOC,
    UNKNOWN,
    EOF,

    DOCUMENT,

    STATEMENT,
    STATEMENT_EXPRESSION,
    STATEMENT_PACKAGE,
    STATEMENT_SUB,
    STATEMENT_SCHEDULED,
    STATEMENT_COMPOUND,
    STATEMENT_BREAK,
    STATEMENT_INCLUDE,
    STATEMENT_VARIABLE,
    STATEMENT_DATA,
    STATEMENT_END,
    STATEMENT_GIVEN,
    STATEMENT_WHEN,
    STATEMENT_UNMATCHED_BRACE,
    STATEMENT_NULL,

    STRUCTURE_BLOCK,
    STRUCTURE_CONDITION,
    STRUCTURE_LIST,
    STRUCTURE_SUBSCRIPT,
    STRUCTURE_CONSTRUCTOR,
    STRUCTURE_FOR,
    STRUCTURE_GIVEN,
    STRUCTURE_WHEN,

    // Abstract bases. Never attached to an element, only used in queries.
    DELIMITER,
    QUOTE,
    QUOTELIKE,
    REGEXP,
    STRUCTURE,

    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Whitespace, comments, documentation and heredoc bodies: tokens the parser
    /// places between statements rather than inside them.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | COMMENT | POD | HEREDOC_BODY)
    }

    /// Tokens that carry program meaning.
    #[inline]
    pub fn is_significant(self) -> bool {
        !matches!(self, WHITESPACE | COMMENT | POD | DATA)
    }

    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) <= (EOF as u16)
    }

    #[inline]
    pub fn is_statement(self) -> bool {
        (STATEMENT as u16..=STATEMENT_NULL as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_structure(self) -> bool {
        (STRUCTURE_BLOCK as u16..=STRUCTURE_WHEN as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self == DOCUMENT || self.is_statement() || self.is_structure()
    }

    #[inline]
    pub fn is_opening_delimiter(self) -> bool {
        matches!(self, LEFT_PAREN | LEFT_BRACKET | LEFT_BRACE)
    }

    #[inline]
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, RIGHT_PAREN | RIGHT_BRACKET | RIGHT_BRACE)
    }

    /// The closing delimiter matching an opening one.
    pub fn closing_pair(self) -> Option<Self> {
        match self {
            LEFT_PAREN => Some(RIGHT_PAREN),
            LEFT_BRACKET => Some(RIGHT_BRACKET),
            LEFT_BRACE => Some(RIGHT_BRACE),
            _ => None,
        }
    }

    /// The named common base one level above this kind, if any.
    ///
    /// Statements and structures share `STATEMENT` and `STRUCTURE`, numbers
    /// share `NUMBER`, and each quote family shares its own abstract base.
    pub fn base(self) -> Option<Self> {
        let base = match self {
            LEFT_PAREN | RIGHT_PAREN | LEFT_BRACKET | RIGHT_BRACKET | LEFT_BRACE | RIGHT_BRACE
            | SEMICOLON => DELIMITER,
            NUMBER_FLOAT | NUMBER_EXP | NUMBER_HEX | NUMBER_OCTAL | NUMBER_BINARY
            | NUMBER_VERSION => NUMBER,
            QUOTE_SINGLE | QUOTE_DOUBLE | QUOTE_LITERAL | QUOTE_INTERPOLATE => QUOTE,
            QUOTELIKE_WORDS | QUOTELIKE_REGEXP | QUOTELIKE_COMMAND | QUOTELIKE_BACKTICK
            | QUOTELIKE_READLINE => QUOTELIKE,
            REGEXP_MATCH | REGEXP_SUBSTITUTE | REGEXP_TRANSLITERATE => REGEXP,
            STATEMENT_EXPRESSION | STATEMENT_PACKAGE | STATEMENT_SUB | STATEMENT_SCHEDULED
            | STATEMENT_COMPOUND | STATEMENT_BREAK | STATEMENT_INCLUDE | STATEMENT_VARIABLE
            | STATEMENT_DATA | STATEMENT_END | STATEMENT_GIVEN | STATEMENT_WHEN
            | STATEMENT_UNMATCHED_BRACE | STATEMENT_NULL => STATEMENT,
            STRUCTURE_BLOCK | STRUCTURE_CONDITION | STRUCTURE_LIST | STRUCTURE_SUBSCRIPT
            | STRUCTURE_CONSTRUCTOR | STRUCTURE_FOR | STRUCTURE_GIVEN | STRUCTURE_WHEN => {
                STRUCTURE
            }
            _ => return None,
        };
        Some(base)
    }

    /// Tokens whose content is delimited into sections.
    #[inline]
    pub fn is_sectioned(self) -> bool {
        matches!(
            self,
            QUOTE_SINGLE
                | QUOTE_DOUBLE
                | QUOTE_LITERAL
                | QUOTE_INTERPOLATE
                | QUOTELIKE_WORDS
                | QUOTELIKE_REGEXP
                | QUOTELIKE_COMMAND
                | QUOTELIKE_BACKTICK
                | QUOTELIKE_READLINE
                | REGEXP_MATCH
                | REGEXP_SUBSTITUTE
                | REGEXP_TRANSLITERATE
                | HEREDOC
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_do_not_overlap() {
        for kind in [WORD, SEMICOLON, NUMBER_HEX, HEREDOC, EOF] {
            assert!(kind.is_token() && !kind.is_node(), "{kind:?}");
        }
        for kind in [STATEMENT, STATEMENT_NULL, STATEMENT_SUB] {
            assert!(kind.is_statement() && !kind.is_structure() && !kind.is_token(), "{kind:?}");
        }
        for kind in [STRUCTURE_BLOCK, STRUCTURE_WHEN] {
            assert!(kind.is_structure() && !kind.is_statement(), "{kind:?}");
        }
        assert!(DOCUMENT.is_node());
        assert!(!STRUCTURE.is_node());
    }

    #[test]
    fn bases_are_one_level_up() {
        assert_eq!(NUMBER_HEX.base(), Some(NUMBER));
        assert_eq!(NUMBER.base(), None);
        assert_eq!(QUOTELIKE_WORDS.base(), Some(QUOTELIKE));
        assert_eq!(STATEMENT_SUB.base(), Some(STATEMENT));
        assert_eq!(STATEMENT.base(), None);
        assert_eq!(STRUCTURE_LIST.base(), Some(STRUCTURE));
        assert_eq!(WORD.base(), None);
    }

    #[test]
    fn insignificant_tokens() {
        assert!(!WHITESPACE.is_significant());
        assert!(!POD.is_significant());
        assert!(!DATA.is_significant());
        assert!(WORD.is_significant());
        assert!(HEREDOC_BODY.is_trivia());
        assert!(!DATA.is_trivia());
    }
}
