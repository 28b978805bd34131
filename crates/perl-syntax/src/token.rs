//! Values derived on demand from a token's raw text.
//!
//! Nothing here is cached: the raw text never changes after parsing, so each
//! call decodes it again.

use std::borrow::Cow;

use crate::SyntaxKind::{self, *};
use crate::{NodeOrToken, SyntaxToken};

/// Failure of a derived-value computation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The operation is not defined for tokens of this kind.
    #[error("operation not supported for {0:?} tokens")]
    Unsupported(SyntaxKind),
    #[error("numeric literal `{0}` is out of range")]
    Overflow(String),
    #[error("malformed literal `{0}`")]
    Malformed(String),
}

/// A decoded numeric literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(u64),
    Float(f64),
}

impl<'a> SyntaxToken<'a> {
    fn unsupported<T>(self) -> Result<T, ValueError> {
        Err(ValueError::Unsupported(self.kind()))
    }

    /// Decodes a numeric literal.
    ///
    /// Version literals (`v5.36.0`, `1.2.3`) stringify to code points in
    /// Perl rather than having a numeric value, so they are `Unsupported`.
    pub fn number(self) -> Result<Number, ValueError> {
        let text = self.text();
        let digits: String = text.chars().filter(|&c| c != '_').collect();
        let malformed = || ValueError::Malformed(text.to_owned());

        match self.kind() {
            NUMBER => match digits.parse::<u64>() {
                Ok(value) => Ok(Number::Integer(value)),
                Err(_) => digits.parse::<f64>().ok().map(Number::Float).ok_or_else(malformed),
            },
            NUMBER_FLOAT | NUMBER_EXP => {
                digits.parse::<f64>().ok().map(Number::Float).ok_or_else(malformed)
            }
            NUMBER_HEX => radix(text, &digits[2..], 16),
            NUMBER_BINARY => radix(text, &digits[2..], 2),
            NUMBER_OCTAL => {
                let digits = match digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
                    Some(rest) => rest,
                    None => &digits[1..],
                };
                radix(text, digits, 8)
            }
            _ => self.unsupported(),
        }
    }

    /// The raw content between the delimiters of a quote or quote-like token.
    pub fn string(self) -> Result<&'a str, ValueError> {
        match self.kind() {
            QUOTE_SINGLE | QUOTE_DOUBLE | QUOTE_LITERAL | QUOTE_INTERPOLATE | QUOTELIKE_WORDS
            | QUOTELIKE_COMMAND | QUOTELIKE_BACKTICK | QUOTELIKE_READLINE => {
                let section = self.sections().first().ok_or_else(|| self.malformed())?;
                Ok(&self.document().text()[section.range])
            }
            _ => self.unsupported(),
        }
    }

    /// The value of a non-interpolating string literal.
    ///
    /// Interpolating literals have no static value and are `Unsupported`.
    pub fn literal(self) -> Result<Cow<'a, str>, ValueError> {
        match self.kind() {
            QUOTE_SINGLE | QUOTE_LITERAL => {
                let section = self.sections().first().ok_or_else(|| self.malformed())?;
                let raw = &self.document().text()[section.range];
                Ok(unescape(raw, section.open, section.close))
            }
            _ => self.unsupported(),
        }
    }

    /// The words of a `qw` list.
    pub fn words(self) -> Result<Vec<&'a str>, ValueError> {
        match self.kind() {
            QUOTELIKE_WORDS => Ok(self.string()?.split_whitespace().collect()),
            _ => self.unsupported(),
        }
    }

    /// The modifier letters trailing a regex-like token; empty when there are none.
    pub fn modifiers(self) -> Result<Vec<char>, ValueError> {
        match self.kind() {
            REGEXP_MATCH | REGEXP_SUBSTITUTE | REGEXP_TRANSLITERATE | QUOTELIKE_REGEXP => {
                let modifiers = self.sectioned().and_then(|sectioned| sectioned.modifiers);
                Ok(modifiers.map_or_else(Vec::new, |range| {
                    self.document().text()[range].chars().collect()
                }))
            }
            _ => self.unsupported(),
        }
    }

    /// The terminator a heredoc introducer waits for.
    pub fn heredoc_terminator(self) -> Result<&'a str, ValueError> {
        match self.kind() {
            HEREDOC => {
                let section = self.sections().first().ok_or_else(|| self.malformed())?;
                Ok(&self.document().text()[section.range])
            }
            _ => self.unsupported(),
        }
    }

    /// Whether a bare word is used as a hash key: either auto-quoted by a
    /// following `=>`, or the only thing inside a `{}` subscript.
    pub fn is_hash_key(self) -> bool {
        if self.kind() != WORD {
            return false;
        }

        if let Some(NodeOrToken::Token(next)) = self.next_significant_sibling() {
            if next.kind() == OPERATOR && next.text() == "=>" {
                return true;
            }
        }

        let statement = self.parent();
        let Some(structure) = statement.parent() else { return false };
        structure.kind() == STRUCTURE_SUBSCRIPT
            && structure.first_token().is_some_and(|bra| bra.kind() == LEFT_BRACE)
            && statement.significant_children().count() == 1
    }

    fn malformed(self) -> ValueError {
        ValueError::Malformed(self.text().to_owned())
    }
}

fn radix(text: &str, digits: &str, radix: u32) -> Result<Number, ValueError> {
    match u64::from_str_radix(digits, radix) {
        Ok(value) => Ok(Number::Integer(value)),
        Err(error) if matches!(error.kind(), std::num::IntErrorKind::PosOverflow) => {
            Err(ValueError::Overflow(text.to_owned()))
        }
        Err(_) => Err(ValueError::Malformed(text.to_owned())),
    }
}

/// Single-quote rules: only `\\` and an escaped delimiter are special.
fn unescape(raw: &str, open: char, close: char) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if next == '\\' || next == open || next == close => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_single_quotes() {
        assert_eq!(unescape(r"it\'s", '\'', '\''), "it's");
        assert_eq!(unescape(r"a\\b\n", '\'', '\''), r"a\b\n");
        assert_eq!(unescape(r"\{x\}", '{', '}'), "{x}");
        assert!(matches!(unescape("plain", '\'', '\''), Cow::Borrowed("plain")));
    }

    #[test]
    fn radix_overflow_is_distinct() {
        assert_eq!(radix("0xff", "ff", 16), Ok(Number::Integer(255)));
        assert_eq!(
            radix("0x1ffffffffffffffff", "1ffffffffffffffff", 16),
            Err(ValueError::Overflow("0x1ffffffffffffffff".to_owned()))
        );
        assert_eq!(radix("0b", "", 2), Err(ValueError::Malformed("0b".to_owned())));
    }
}
