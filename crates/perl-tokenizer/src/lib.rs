//! Context-sensitive tokenizer for Perl source.
//!
//! Perl cannot be split into tokens without knowing what the previous token
//! was: `/` divides after a value and opens a regex where an operand is due,
//! `%foo` is a hash or a modulus, `<FH>` reads a line or compares. The
//! tokenizer keeps just enough state to make those calls and emits every
//! character of the input, whitespace and documentation included.

mod cursor;

use std::fmt;

use cursor::Cursor;
pub use perl_syntax::SyntaxKind;
use perl_syntax::SyntaxKind::*;
use perl_syntax::{Section, Sectioned};
use text_size::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// Delimited content of quote-like, regex-like and heredoc tokens.
    pub sectioned: Option<Box<Sectioned>>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenizeErrorKind {
    /// No token shape matches at this position.
    Unexpected,
    /// Input ended inside a delimited construct.
    Incomplete,
}

impl fmt::Display for TokenizeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unexpected => "unexpected input",
            Self::Incomplete => "incomplete token",
        })
    }
}

/// A recoverable tokenizing failure.
///
/// The tokenizer still produces a token for the offending input, so the
/// caller can keep the tree lossless and carry on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub token: Token,
}

/// A positionally monotonic stream of tokens over a source text.
pub trait TokenSource {
    fn text(&self) -> &str;

    /// Returns `EOF` tokens forever once the input is exhausted.
    fn next_token(&mut self) -> Result<Token, TokenizeError>;
}

/// What may legally come next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Expect {
    Operand,
    Operator,
}

struct PendingHeredoc {
    terminator: String,
    indented: bool,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    expect: Expect,
    /// Kind and text of the last two significant tokens, most recent first.
    previous: [(SyntaxKind, &'a str); 2],
    /// Whether each open `{` is a subscript, so the matching `}` ends a value.
    braces: Vec<bool>,
    heredocs: Vec<PendingHeredoc>,
    in_data: bool,
    error: Option<(TokenizeErrorKind, String)>,
}

impl<'a> TokenSource for Tokenizer<'a> {
    fn text(&self) -> &str {
        self.text
    }

    fn next_token(&mut self) -> Result<Token, TokenizeError> {
        Tokenizer::next_token(self)
    }
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: Cursor::new(text),
            expect: Expect::Operand,
            previous: [(EOF, ""); 2],
            braces: Vec::new(),
            heredocs: Vec::new(),
            in_data: false,
            error: None,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, TokenizeError> {
        let start = self.cursor.offset();
        let (line, column) = (self.cursor.line(), self.cursor.column());

        let (kind, sectioned) = self.lex();
        let range = TextRange::new(start, self.cursor.offset());
        debug_assert!(kind == EOF || !range.is_empty(), "{kind:?} token is empty");

        if kind.is_significant() && !kind.is_trivia() && kind != EOF {
            let text = self.text;
            self.record(kind, &text[range]);
        }

        let token = Token { kind, range, sectioned: sectioned.map(Box::new) };
        match self.error.take() {
            None => Ok(token),
            Some((kind, message)) => Err(TokenizeError { kind, message, line, column, token }),
        }
    }

    fn fail(&mut self, kind: TokenizeErrorKind, message: impl Into<String>) {
        self.error = Some((kind, message.into()));
    }

    fn lex(&mut self) -> (SyntaxKind, Option<Sectioned>) {
        if self.in_data {
            if self.cursor.is_eof() {
                return (EOF, None);
            }
            self.cursor.advance_bytes(self.cursor.rest().len());
            return (DATA, None);
        }

        if self.cursor.is_eof() {
            if let Some(heredoc) = self.heredocs.first() {
                let message = format!("missing heredoc terminator `{}`", heredoc.terminator);
                self.heredocs.clear();
                self.fail(TokenizeErrorKind::Incomplete, message);
            }
            return (EOF, None);
        }

        if self.cursor.at_line_start() {
            if !self.heredocs.is_empty() {
                return (self.heredoc_body(), None);
            }
            if self.cursor.peek() == '=' && self.cursor.second().is_ascii_alphabetic() {
                self.pod();
                return (POD, None);
            }
        }

        let c = self.cursor.peek();
        if c.is_whitespace() {
            self.whitespace();
            return (WHITESPACE, None);
        }
        if c == '#' {
            self.cursor.advance_while(|c| c != '\n');
            return (COMMENT, None);
        }

        self.significant()
    }

    fn whitespace(&mut self) {
        let stop_at_newline = !self.heredocs.is_empty();
        while self.cursor.peek().is_whitespace() && !self.cursor.is_eof() {
            if self.cursor.advance() == '\n' && stop_at_newline {
                break;
            }
        }
    }

    /// Everything up to and including the `=cut` line. A lone `=cut` is a
    /// block of its own.
    fn pod(&mut self) {
        let mut cut = self.at_cut();
        self.cursor.advance_line();
        while !cut && !self.cursor.is_eof() {
            cut = self.at_cut();
            self.cursor.advance_line();
        }
    }

    fn at_cut(&self) -> bool {
        self.cursor.starts_with("=cut") && !self.cursor.nth(4).is_ascii_alphanumeric()
    }

    fn heredoc_body(&mut self) -> SyntaxKind {
        let heredoc = self.heredocs.remove(0);
        loop {
            if self.cursor.is_eof() {
                let message = format!("missing heredoc terminator `{}`", heredoc.terminator);
                self.fail(TokenizeErrorKind::Incomplete, message);
                break;
            }

            let rest = self.cursor.rest();
            let line = rest.find('\n').map_or(rest, |end| &rest[..end]);
            let line = line.strip_suffix('\r').unwrap_or(line);
            let line = if heredoc.indented { line.trim_start() } else { line };
            let done = line == heredoc.terminator;
            self.cursor.advance_line();
            if done {
                break;
            }
        }
        HEREDOC_BODY
    }

    /// Remembers a significant token and what it leaves the tokenizer expecting.
    fn record(&mut self, kind: SyntaxKind, text: &'a str) {
        let (prev_kind, prev_text) = self.previous[0];

        self.expect = match kind {
            SYMBOL | MAGIC | ARRAY_INDEX | RIGHT_PAREN | RIGHT_BRACKET | HEREDOC => {
                Expect::Operator
            }
            RIGHT_BRACE => match self.braces.pop() {
                Some(true) => Expect::Operator,
                _ => Expect::Operand,
            },
            LEFT_BRACE => {
                let subscript = matches!(prev_kind, SYMBOL | MAGIC | CAST | RIGHT_BRACKET)
                    || prev_text == "->"
                    || (prev_kind == RIGHT_BRACE && self.expect == Expect::Operator);
                self.braces.push(subscript);
                Expect::Operand
            }
            OPERATOR if matches!(text, "++" | "--") => self.expect,
            // Method names.
            WORD if prev_text == "->" => Expect::Operator,
            WORD => {
                if OPERAND_AFTER.contains(&text) {
                    Expect::Operand
                } else {
                    Expect::Operator
                }
            }
            kind if kind == NUMBER || kind.base() == Some(NUMBER) => Expect::Operator,
            kind if kind.base().is_some_and(|base| matches!(base, QUOTE | QUOTELIKE | REGEXP)) => {
                Expect::Operator
            }
            _ => Expect::Operand,
        };

        self.previous = [(kind, text), self.previous[0]];
    }

    /// `foo %h`, `foo *FH` and `foo <<EOT` after a word that is not known to
    /// take arguments: a sigil or heredoc glued to what follows it but
    /// separated from the word is an argument.
    fn operand_after_word(&self) -> bool {
        if self.previous[0].0 != WORD
            || self.previous[1].1 == "->"
            || !self.cursor.after_whitespace()
        {
            return false;
        }
        let next = self.cursor.second();
        match self.cursor.peek() {
            '%' | '&' | '*' => is_ident_start(next) || matches!(next, '{' | '$' | ':'),
            '<' if next == '<' => {
                let next = self.cursor.nth(2);
                is_ident_start(next) || matches!(next, '"' | '\'' | '~')
            }
            _ => false,
        }
    }

    fn statement_start(&self) -> bool {
        matches!(self.previous[0].0, EOF | SEMICOLON | LEFT_BRACE | RIGHT_BRACE)
    }

    fn significant(&mut self) -> (SyntaxKind, Option<Sectioned>) {
        let operand = self.expect == Expect::Operand || self.operand_after_word();
        let c = self.cursor.peek();

        let kind = match c {
            '(' if self.at_prototype() => {
                self.cursor.advance();
                self.cursor.advance_while(|c| c != ')');
                if !self.cursor.eat(')') {
                    self.fail(TokenizeErrorKind::Incomplete, "unterminated prototype");
                }
                PROTOTYPE
            }
            '(' | ')' | '[' | ']' | '{' | '}' | ';' => {
                self.cursor.advance();
                match c {
                    '(' => LEFT_PAREN,
                    ')' => RIGHT_PAREN,
                    '[' => LEFT_BRACKET,
                    ']' => RIGHT_BRACKET,
                    '{' => LEFT_BRACE,
                    '}' => RIGHT_BRACE,
                    _ => SEMICOLON,
                }
            }
            '\'' | '"' | '`' => {
                self.cursor.advance();
                let section = self.section(c);
                let kind = match c {
                    '\'' => QUOTE_SINGLE,
                    '"' => QUOTE_DOUBLE,
                    _ => QUOTELIKE_BACKTICK,
                };
                return (kind, Some(Sectioned::new(vec![section], None)));
            }
            '0'..='9' => self.number(),
            '.' if operand && self.cursor.second().is_ascii_digit() => self.number(),
            'A'..='Z' | 'a'..='z' | '_' => return self.word(),
            '$' => self.scalar(),
            '@' => self.sigil(),
            '%' | '&' | '*' if operand => self.sigil(),
            '/' if operand => {
                self.cursor.advance();
                return self.quote_like(REGEXP_MATCH, '/');
            }
            '<' if operand && self.cursor.second() == '<' => match self.heredoc() {
                Some(sectioned) => return (HEREDOC, Some(sectioned)),
                None => self.operator(),
            },
            '<' if operand => match self.readline() {
                Some(sectioned) => return (QUOTELIKE_READLINE, Some(sectioned)),
                None => self.operator(),
            },
            '-' if operand && self.at_file_test() => {
                self.cursor.advance();
                self.cursor.advance();
                OPERATOR
            }
            _ if OPERATORS.iter().any(|op| self.cursor.starts_with(op)) => self.operator(),
            _ => {
                self.cursor.advance();
                self.fail(TokenizeErrorKind::Unexpected, format!("unexpected character {c:?}"));
                UNKNOWN
            }
        };

        (kind, None)
    }

    fn operator(&mut self) -> SyntaxKind {
        match OPERATORS.iter().find(|op| self.cursor.starts_with(op)) {
            Some(op) => {
                self.cursor.advance_bytes(op.len());
            }
            None => {
                self.cursor.advance();
            }
        }
        OPERATOR
    }

    /// `sub NAME (...)` or `sub (...)`.
    fn at_prototype(&self) -> bool {
        let [(kind, text), (_, before)] = self.previous;
        kind == WORD && ((text == "sub" && before != "->") || before == "sub")
    }

    fn at_file_test(&self) -> bool {
        const FILE_TESTS: &str = "rwxoRWXOezsfdlpSbcugktTBAMC";
        let test = self.cursor.second();
        FILE_TESTS.contains(test) && !is_ident_continue(self.cursor.nth(2))
    }

    fn number(&mut self) -> SyntaxKind {
        let first = self.cursor.advance();

        if first == '0' {
            match self.cursor.peek() {
                'x' | 'X' => {
                    self.cursor.advance();
                    self.cursor.advance_while(|c| c.is_ascii_hexdigit() || c == '_');
                    return NUMBER_HEX;
                }
                'b' | 'B' => {
                    self.cursor.advance();
                    self.cursor.advance_while(|c| matches!(c, '0' | '1' | '_'));
                    return NUMBER_BINARY;
                }
                'o' | 'O' => {
                    self.cursor.advance();
                    self.digits();
                    return NUMBER_OCTAL;
                }
                '0'..='9' | '_' => {
                    self.digits();
                    return NUMBER_OCTAL;
                }
                _ => {}
            }
        }

        let mut kind = if first == '.' { NUMBER_FLOAT } else { NUMBER };
        self.digits();

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            if kind == NUMBER_FLOAT {
                kind = NUMBER_VERSION;
            } else {
                kind = NUMBER_FLOAT;
            }
            self.cursor.advance();
            self.digits();

            while self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
                kind = NUMBER_VERSION;
                self.cursor.advance();
                self.digits();
            }
        }

        if kind != NUMBER_VERSION && matches!(self.cursor.peek(), 'e' | 'E') {
            let sign = matches!(self.cursor.second(), '+' | '-');
            let digit = self.cursor.nth(if sign { 2 } else { 1 });
            if digit.is_ascii_digit() {
                self.cursor.advance();
                if sign {
                    self.cursor.advance();
                }
                self.digits();
                kind = NUMBER_EXP;
            }
        }

        kind
    }

    fn digits(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
    }

    fn ident(&mut self) {
        loop {
            self.cursor.advance_while(is_ident_continue);
            if self.cursor.starts_with("::") {
                self.cursor.advance_bytes(2);
            } else {
                break;
            }
        }
    }

    fn word(&mut self) -> (SyntaxKind, Option<Sectioned>) {
        let start = self.cursor.offset();
        let operator = self.expect == Expect::Operator;

        if operator && self.cursor.peek() == 'x' {
            let next = self.cursor.second();
            if next == '=' && !matches!(self.cursor.nth(2), '=' | '~' | '>') {
                self.cursor.advance_bytes(2);
                return (OPERATOR, None);
            }
            if !is_ident_continue(next) || next.is_ascii_digit() {
                self.cursor.advance();
                return (OPERATOR, None);
            }
        }

        self.ident();
        let word = &self.text[TextRange::new(start, self.cursor.offset())];
        let after_arrow = self.previous[0].1 == "->";

        if matches!(word, "__END__" | "__DATA__") {
            self.in_data = true;
            return (SEPARATOR, None);
        }

        if word.starts_with('v')
            && word[1..].bytes().all(|b| b.is_ascii_digit())
            && word.len() > 1
            && self.cursor.matches('.')
            && self.cursor.second().is_ascii_digit()
        {
            while self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
                self.cursor.advance();
                self.digits();
            }
            return (NUMBER_VERSION, None);
        }

        if after_arrow || self.fat_comma_follows() {
            return (WORD, None);
        }

        if self.statement_start() && self.eat_label_colon() {
            return (LABEL, None);
        }

        if WORD_OPERATORS.contains(&word) {
            return (OPERATOR, None);
        }

        let quote = match word {
            "q" => Some(QUOTE_LITERAL),
            "qq" => Some(QUOTE_INTERPOLATE),
            "qw" => Some(QUOTELIKE_WORDS),
            "qr" => Some(QUOTELIKE_REGEXP),
            "qx" => Some(QUOTELIKE_COMMAND),
            "m" => Some(REGEXP_MATCH),
            "s" => Some(REGEXP_SUBSTITUTE),
            "tr" | "y" => Some(REGEXP_TRANSLITERATE),
            _ => None,
        };
        if let Some(kind) = quote.filter(|_| self.previous[0].1 != "sub") {
            if let Some(open) = self.quote_delimiter() {
                return self.quote_like(kind, open);
            }
        }

        (WORD, None)
    }

    /// Whether `=>` follows, possibly after whitespace.
    fn fat_comma_follows(&self) -> bool {
        self.cursor.rest().trim_start().starts_with("=>")
    }

    /// Consumes `\s*:` when it is a label colon rather than `::` or `?:`.
    fn eat_label_colon(&mut self) -> bool {
        let rest = self.cursor.rest();
        let spaces = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let after = &rest[spaces..];
        if after.starts_with(':') && !after.starts_with("::") {
            self.cursor.advance_bytes(spaces + 1);
            true
        } else {
            false
        }
    }

    /// Finds and consumes the opening delimiter of a quote-like operator.
    ///
    /// Returns `None`, consuming nothing, when the word is used as a plain
    /// identifier, e.g. `$h{s}`, `y => 1` or `q;`.
    fn quote_delimiter(&mut self) -> Option<char> {
        let rest = self.cursor.rest();
        let trimmed = rest.trim_start();
        let skipped = rest.len() - trimmed.len();
        let open = trimmed.chars().next()?;

        let plain = matches!(open, ',' | ';' | ')' | '}')
            || is_ident_continue(open)
            || (skipped > 0 && open == '#')
            || (open == '=' && trimmed.starts_with("=>"));
        if plain {
            return None;
        }

        self.cursor.advance_bytes(skipped);
        self.cursor.advance();
        Some(open)
    }

    /// Scans the sections of a quote-like after its first opening delimiter.
    fn quote_like(&mut self, kind: SyntaxKind, open: char) -> (SyntaxKind, Option<Sectioned>) {
        let first = self.section(open);
        let mut sections = vec![first];

        if first.complete && matches!(kind, REGEXP_SUBSTITUTE | REGEXP_TRANSLITERATE) {
            let second = if first.is_paired() {
                self.cursor.advance_while(char::is_whitespace);
                if self.cursor.is_eof() {
                    let offset = self.cursor.offset();
                    self.fail(TokenizeErrorKind::Incomplete, "missing replacement section");
                    Section { range: TextRange::empty(offset), open, close: open, complete: false }
                } else {
                    let open = self.cursor.advance();
                    self.section(open)
                }
            } else {
                self.section_until(first.close, first.close)
            };
            sections.push(second);
        }

        let takes_modifiers = matches!(
            kind,
            REGEXP_MATCH | REGEXP_SUBSTITUTE | REGEXP_TRANSLITERATE | QUOTELIKE_REGEXP
        );
        let modifiers = if takes_modifiers && sections.iter().all(|it| it.complete) {
            let start = self.cursor.offset();
            self.cursor.advance_while(|c| c.is_ascii_alphabetic());
            let range = TextRange::new(start, self.cursor.offset());
            (!range.is_empty()).then_some(range)
        } else {
            None
        };

        (kind, Some(Sectioned::new(sections, modifiers)))
    }

    /// Scans delimited content after `open` has been consumed.
    fn section(&mut self, open: char) -> Section {
        self.section_until(open, closing_delimiter(open))
    }

    fn section_until(&mut self, open: char, close: char) -> Section {
        let start = self.cursor.offset();
        let paired = open != close;
        let mut depth = 0usize;

        loop {
            if self.cursor.is_eof() {
                let range = TextRange::new(start, self.cursor.offset());
                self.fail(TokenizeErrorKind::Incomplete, format!("missing closing delimiter {close:?}"));
                return Section { range, open, close, complete: false };
            }

            let c = self.cursor.peek();
            if c == close && depth == 0 {
                let range = TextRange::new(start, self.cursor.offset());
                self.cursor.advance();
                return Section { range, open, close, complete: true };
            }

            self.cursor.advance();
            match c {
                '\\' => {
                    self.cursor.advance();
                }
                c if paired && c == open => depth += 1,
                c if paired && c == close => depth -= 1,
                _ => {}
            }
        }
    }

    /// `<<"END"`, `<<'END'`, `<<END` and the indented `<<~` forms.
    fn heredoc(&mut self) -> Option<Sectioned> {
        let rest = self.cursor.rest();
        let indented = rest[2..].starts_with('~');
        let marker = if indented { 3 } else { 2 };
        let quote = rest[marker..].chars().next()?;

        if !matches!(quote, '"' | '\'' | '`') && !is_ident_start(quote) {
            return None;
        }

        self.cursor.advance_bytes(marker);
        let section = if is_ident_start(quote) {
            let start = self.cursor.offset();
            self.cursor.advance_while(is_ident_continue);
            let range = TextRange::new(start, self.cursor.offset());
            Section { range, open: '"', close: '"', complete: true }
        } else {
            self.cursor.advance();
            let start = self.cursor.offset();
            self.cursor.advance_while(|c| c != quote && c != '\n');
            let range = TextRange::new(start, self.cursor.offset());
            let complete = self.cursor.eat(quote);
            if !complete {
                self.fail(TokenizeErrorKind::Incomplete, "unterminated heredoc terminator");
            }
            Section { range, open: quote, close: quote, complete }
        };

        if section.complete {
            let terminator = self.text[section.range].to_owned();
            self.heredocs.push(PendingHeredoc { terminator, indented });
        }
        Some(Sectioned::new(vec![section], None))
    }

    /// `<STDIN>`, `<$fh>`, `<*.txt>`: no whitespace, on one line.
    fn readline(&mut self) -> Option<Sectioned> {
        let rest = &self.cursor.rest()[1..];
        let end = rest.find(|c: char| c == '>' || c == '<' || c.is_whitespace())?;
        if !rest[end..].starts_with('>') {
            return None;
        }

        self.cursor.advance();
        let start = self.cursor.offset();
        self.cursor.advance_bytes(end);
        let range = TextRange::new(start, self.cursor.offset());
        self.cursor.advance();
        Some(Sectioned::new(vec![Section { range, open: '<', close: '>', complete: true }], None))
    }

    fn scalar(&mut self) -> SyntaxKind {
        self.cursor.advance();
        let c = self.cursor.peek();

        match c {
            '#' => {
                let next = self.cursor.second();
                if next == '{' || next == '$' {
                    self.cursor.advance();
                    CAST
                } else if is_ident_start(next) {
                    self.cursor.advance();
                    self.ident();
                    ARRAY_INDEX
                } else {
                    self.cursor.advance();
                    MAGIC
                }
            }
            '{' => CAST,
            '$' => {
                let next = self.cursor.second();
                if is_ident_start(next) || matches!(next, '$' | '{' | ':') {
                    CAST
                } else {
                    self.cursor.advance();
                    MAGIC
                }
            }
            ':' if self.cursor.second() == ':' => {
                self.ident();
                SYMBOL
            }
            c if is_ident_start(c) => {
                self.ident();
                SYMBOL
            }
            '0'..='9' => {
                self.cursor.advance_while(|c| c.is_ascii_digit());
                MAGIC
            }
            '^' if self.cursor.second().is_ascii_uppercase() => {
                self.cursor.advance();
                self.cursor.advance();
                MAGIC
            }
            c if MAGIC_PUNCTUATION.contains(c) && !self.cursor.is_eof() => {
                self.cursor.advance();
                MAGIC
            }
            _ => CAST,
        }
    }

    /// `@`, or `%`, `&` and `*` where an operand is expected.
    fn sigil(&mut self) -> SyntaxKind {
        let sigil = self.cursor.peek();
        let next = self.cursor.second();
        let named = is_ident_start(next) || (next == ':' && self.cursor.nth(2) == ':');
        let magic = match sigil {
            '@' => matches!(next, '-' | '+'),
            '%' => matches!(next, '-' | '+' | '!'),
            _ => false,
        };

        if named {
            self.cursor.advance();
            self.ident();
            SYMBOL
        } else if matches!(next, '{' | '$') {
            self.cursor.advance();
            CAST
        } else if magic {
            self.cursor.advance_bytes(2);
            MAGIC
        } else if sigil == '%' && next == '^' && self.cursor.nth(2) == 'H' {
            self.cursor.advance_bytes(3);
            MAGIC
        } else if sigil == '@' {
            self.cursor.advance();
            CAST
        } else {
            // Not a sigil after all: `**`, `&&` and friends.
            self.operator()
        }
    }
}

fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        c => c,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Longest first, so the first prefix match is the longest one.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "**=", "||=", "&&=", "//=", "<=>", "...", "=>", "->", "++", "--", "**", "=~",
    "!~", "==", "!=", "<=", ">=", "&&", "||", "//", "..", "::", "<<", ">>", "+=", "-=", "*=",
    "/=", ".=", "%=", "&=", "|=", "^=", "~~", "+", "-", "*", "/", ".", "%", "<", ">", "=", "!",
    "~", "\\", "?", ":", ",", "&", "|", "^",
];

const WORD_OPERATORS: &[&str] =
    &["lt", "gt", "le", "ge", "eq", "ne", "cmp", "and", "or", "not", "xor"];

/// Words after which an operand, not an operator, is due.
const OPERAND_AFTER: &[&str] = &[
    "if", "unless", "while", "until", "elsif", "return", "split", "grep", "map", "join", "push",
    "unshift", "print", "printf", "say", "die", "warn", "when", "defined", "ref", "scalar",
    "sort", "reverse", "keys", "values", "each", "delete", "exists", "lc", "uc", "length",
    "chomp", "eval", "do", "open", "close", "unlink", "wantarray", "my", "our", "local", "state",
    "bless", "sprintf", "exit", "croak", "confess", "lock", "undef", "chop", "tie",
];

const MAGIC_PUNCTUATION: &str = "&`'+!@/\\,;.<>]^:?-~=|\"";

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<(SyntaxKind, &str)> {
        let mut tokenizer = Tokenizer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = match tokenizer.next_token() {
                Ok(token) => token,
                Err(error) => error.token,
            };
            if token.kind == EOF {
                break;
            }
            tokens.push((token.kind, token.text(text)));
        }
        tokens
    }

    fn significant(text: &str) -> Vec<(SyntaxKind, &str)> {
        tokens(text).into_iter().filter(|(kind, _)| kind.is_significant()).collect()
    }

    fn errors(text: &str) -> Vec<TokenizeError> {
        let mut tokenizer = Tokenizer::new(text);
        let mut errors = Vec::new();
        loop {
            match tokenizer.next_token() {
                Ok(token) if token.kind == EOF => break,
                Ok(_) => {}
                Err(error) => {
                    let eof = error.token.kind == EOF;
                    errors.push(error);
                    if eof {
                        break;
                    }
                }
            }
        }
        errors
    }

    #[test]
    fn test_lossless() {
        let inputs = [
            "my $x = 1;\n",
            "print <<EOT . 'x';\nbody\nEOT\n$y = s{a}\n{b}gx;",
            "=pod\n\ntext\n\n=cut\nfoo();\n",
            "__END__\nanything $ goes",
            "q{unterminated",
            "$h{x} / 2 / 3; /re/",
        ];
        for input in inputs {
            let joined: String = tokens(input).into_iter().map(|(_, text)| text).collect();
            assert_eq!(joined, input);
        }
    }

    #[test]
    fn test_number_literals() {
        let inputs = [
            ("123", NUMBER),
            ("1_000", NUMBER),
            ("0", NUMBER),
            ("1.5", NUMBER_FLOAT),
            (".5", NUMBER_FLOAT),
            ("1e10", NUMBER_EXP),
            ("1.5E-3", NUMBER_EXP),
            ("0x1f", NUMBER_HEX),
            ("0b1010", NUMBER_BINARY),
            ("0755", NUMBER_OCTAL),
            ("0o755", NUMBER_OCTAL),
            ("1.2.3", NUMBER_VERSION),
            ("v5.36.0", NUMBER_VERSION),
        ];

        for (input, expected) in inputs {
            assert_eq!(tokens(input), [(expected, input)], "input: {input:?}");
        }
    }

    #[test]
    fn test_range_is_not_float() {
        assert_eq!(significant("1..5"), [(NUMBER, "1"), (OPERATOR, ".."), (NUMBER, "5")]);
    }

    #[test]
    fn test_slash_is_context_sensitive() {
        assert_eq!(
            significant("$x / 2"),
            [(SYMBOL, "$x"), (OPERATOR, "/"), (NUMBER, "2")]
        );
        assert_eq!(
            significant("split /,/, $s"),
            [(WORD, "split"), (REGEXP_MATCH, "/,/"), (OPERATOR, ","), (SYMBOL, "$s")]
        );
        assert_eq!(
            significant("$h{a} / 2"),
            [
                (SYMBOL, "$h"),
                (LEFT_BRACE, "{"),
                (WORD, "a"),
                (RIGHT_BRACE, "}"),
                (OPERATOR, "/"),
                (NUMBER, "2"),
            ]
        );
        assert_eq!(significant("} /x/i"), [(RIGHT_BRACE, "}"), (REGEXP_MATCH, "/x/i")]);
    }

    #[test]
    fn test_sigils() {
        assert_eq!(
            significant("%h = %$r; &f; *G; @a; @$r; $#a; $#{$r}"),
            [
                (SYMBOL, "%h"),
                (OPERATOR, "="),
                (CAST, "%"),
                (SYMBOL, "$r"),
                (SEMICOLON, ";"),
                (SYMBOL, "&f"),
                (SEMICOLON, ";"),
                (SYMBOL, "*G"),
                (SEMICOLON, ";"),
                (SYMBOL, "@a"),
                (SEMICOLON, ";"),
                (CAST, "@"),
                (SYMBOL, "$r"),
                (SEMICOLON, ";"),
                (ARRAY_INDEX, "$#a"),
                (SEMICOLON, ";"),
                (CAST, "$#"),
                (LEFT_BRACE, "{"),
                (SYMBOL, "$r"),
                (RIGHT_BRACE, "}"),
            ]
        );
        assert_eq!(
            significant("$x % 2 * 3 & 1"),
            [
                (SYMBOL, "$x"),
                (OPERATOR, "%"),
                (NUMBER, "2"),
                (OPERATOR, "*"),
                (NUMBER, "3"),
                (OPERATOR, "&"),
                (NUMBER, "1"),
            ]
        );
    }

    #[test]
    fn test_sigils_after_words() {
        assert_eq!(
            significant("my %h = (foo => bar);")[..3],
            [(WORD, "my"), (SYMBOL, "%h"), (OPERATOR, "=")]
        );
        assert_eq!(
            significant("local *FH;"),
            [(WORD, "local"), (SYMBOL, "*FH"), (SEMICOLON, ";")]
        );
        assert_eq!(significant("our @ISA"), [(WORD, "our"), (SYMBOL, "@ISA")]);
        assert_eq!(
            significant("frobnicate %$r, &f"),
            [(WORD, "frobnicate"), (CAST, "%"), (SYMBOL, "$r"), (OPERATOR, ","), (SYMBOL, "&f")]
        );
        assert_eq!(
            significant("time % 2"),
            [(WORD, "time"), (OPERATOR, "%"), (NUMBER, "2")]
        );
        assert_eq!(
            significant("$o->size %h"),
            [(SYMBOL, "$o"), (OPERATOR, "->"), (WORD, "size"), (OPERATOR, "%"), (WORD, "h")]
        );
        assert_eq!(
            tokens("foo <<EOT;\nx y\nEOT\n"),
            [
                (WORD, "foo"),
                (WHITESPACE, " "),
                (HEREDOC, "<<EOT"),
                (SEMICOLON, ";"),
                (WHITESPACE, "\n"),
                (HEREDOC_BODY, "x y\nEOT\n"),
            ]
        );
    }

    #[test]
    fn test_magic_variables() {
        for input in ["$_", "$Foo::bar", "$::x"] {
            assert_eq!(tokens(input), [(SYMBOL, input)], "input: {input:?}");
        }
        for input in ["$1", "$0", "$@", "$!", "$/", "$]", "$^W", "$$", "$;"] {
            assert_eq!(tokens(input), [(MAGIC, input)], "input: {input:?}");
        }
        assert_eq!(tokens("$$x"), [(CAST, "$"), (SYMBOL, "$x")]);
        assert_eq!(tokens("${x}"), [(CAST, "$"), (LEFT_BRACE, "{"), (WORD, "x"), (RIGHT_BRACE, "}")]);
    }

    #[test]
    fn test_quotes() {
        assert_eq!(tokens(r#""a\"b""#), [(QUOTE_DOUBLE, r#""a\"b""#)]);
        assert_eq!(tokens(r"'it\'s'"), [(QUOTE_SINGLE, r"'it\'s'")]);
        assert_eq!(tokens("`ls`"), [(QUOTELIKE_BACKTICK, "`ls`")]);
        assert_eq!(tokens("q{a{b}c}"), [(QUOTE_LITERAL, "q{a{b}c}")]);
        assert_eq!(tokens("qq|x|"), [(QUOTE_INTERPOLATE, "qq|x|")]);
        assert_eq!(tokens("qw( a b )"), [(QUOTELIKE_WORDS, "qw( a b )")]);
        assert_eq!(tokens("qr/x/i"), [(QUOTELIKE_REGEXP, "qr/x/i")]);
        assert_eq!(tokens("qx{ls}"), [(QUOTELIKE_COMMAND, "qx{ls}")]);
        assert_eq!(tokens("q (x)"), [(QUOTE_LITERAL, "q (x)")]);
    }

    #[test]
    fn test_regexps() {
        assert_eq!(tokens("m{a}x"), [(REGEXP_MATCH, "m{a}x")]);
        assert_eq!(tokens("s/a/b/g"), [(REGEXP_SUBSTITUTE, "s/a/b/g")]);
        assert_eq!(tokens("s{a} {b}e"), [(REGEXP_SUBSTITUTE, "s{a} {b}e")]);
        assert_eq!(tokens("tr/a-z/A-Z/"), [(REGEXP_TRANSLITERATE, "tr/a-z/A-Z/")]);
        assert_eq!(tokens("y/a/b/"), [(REGEXP_TRANSLITERATE, "y/a/b/")]);
    }

    #[test]
    fn test_sections() {
        let text = "s{a{b}}<c>gi";
        let token = Tokenizer::new(text).next_token().unwrap();
        let sectioned = token.sectioned.unwrap();
        let [first, second] = sectioned.sections.as_slice() else { panic!("two sections") };
        assert_eq!(&text[first.range], "a{b}");
        assert_eq!((first.open, first.close), ('{', '}'));
        assert_eq!(&text[second.range], "c");
        assert_eq!((second.open, second.close), ('<', '>'));
        assert_eq!(&text[sectioned.modifiers.unwrap()], "gi");
        assert!(sectioned.is_complete());
    }

    #[test]
    fn test_quote_words_used_as_identifiers() {
        assert_eq!(
            significant("$h{s} = { y => 1, q => 2 }; $o->s(1)"),
            [
                (SYMBOL, "$h"),
                (LEFT_BRACE, "{"),
                (WORD, "s"),
                (RIGHT_BRACE, "}"),
                (OPERATOR, "="),
                (LEFT_BRACE, "{"),
                (WORD, "y"),
                (OPERATOR, "=>"),
                (NUMBER, "1"),
                (OPERATOR, ","),
                (WORD, "q"),
                (OPERATOR, "=>"),
                (NUMBER, "2"),
                (RIGHT_BRACE, "}"),
                (SEMICOLON, ";"),
                (SYMBOL, "$o"),
                (OPERATOR, "->"),
                (WORD, "s"),
                (LEFT_PAREN, "("),
                (NUMBER, "1"),
                (RIGHT_PAREN, ")"),
            ]
        );
    }

    #[test]
    fn test_word_operators() {
        assert_eq!(
            significant("$a x 3 eq $b"),
            [
                (SYMBOL, "$a"),
                (OPERATOR, "x"),
                (NUMBER, "3"),
                (OPERATOR, "eq"),
                (SYMBOL, "$b"),
            ]
        );
        assert_eq!(significant("x => 1"), [(WORD, "x"), (OPERATOR, "=>"), (NUMBER, "1")]);
        assert_eq!(significant("-e $f"), [(OPERATOR, "-e"), (SYMBOL, "$f")]);
    }

    #[test]
    fn test_labels_and_prototypes() {
        assert_eq!(
            significant("OUTER: for (1) { next OUTER; }"),
            [
                (LABEL, "OUTER:"),
                (WORD, "for"),
                (LEFT_PAREN, "("),
                (NUMBER, "1"),
                (RIGHT_PAREN, ")"),
                (LEFT_BRACE, "{"),
                (WORD, "next"),
                (WORD, "OUTER"),
                (SEMICOLON, ";"),
                (RIGHT_BRACE, "}"),
            ]
        );
        assert_eq!(
            significant("sub max($$) { }"),
            [
                (WORD, "sub"),
                (WORD, "max"),
                (PROTOTYPE, "($$)"),
                (LEFT_BRACE, "{"),
                (RIGHT_BRACE, "}"),
            ]
        );
        assert_eq!(
            significant("Foo::Bar::baz()"),
            [(WORD, "Foo::Bar::baz"), (LEFT_PAREN, "("), (RIGHT_PAREN, ")")]
        );
    }

    #[test]
    fn test_readline_and_heredoc() {
        assert_eq!(
            significant("while (<STDIN>) {}"),
            [
                (WORD, "while"),
                (LEFT_PAREN, "("),
                (QUOTELIKE_READLINE, "<STDIN>"),
                (RIGHT_PAREN, ")"),
                (LEFT_BRACE, "{"),
                (RIGHT_BRACE, "}"),
            ]
        );
        assert_eq!(
            significant("$a < $b"),
            [(SYMBOL, "$a"), (OPERATOR, "<"), (SYMBOL, "$b")]
        );

        let text = "print <<~EOT, <<'B';\n  hi\n  EOT\nraw\nB\nx;";
        assert_eq!(
            tokens(text),
            [
                (WORD, "print"),
                (WHITESPACE, " "),
                (HEREDOC, "<<~EOT"),
                (OPERATOR, ","),
                (WHITESPACE, " "),
                (HEREDOC, "<<'B'"),
                (SEMICOLON, ";"),
                (WHITESPACE, "\n"),
                (HEREDOC_BODY, "  hi\n  EOT\n"),
                (HEREDOC_BODY, "raw\nB\n"),
                (WORD, "x"),
                (SEMICOLON, ";"),
            ]
        );
    }

    #[test]
    fn test_trivia() {
        assert_eq!(
            tokens("#!/usr/bin/perl\n=head1 NAME\n\nx\n\n=cut\n1;"),
            [
                (COMMENT, "#!/usr/bin/perl"),
                (WHITESPACE, "\n"),
                (POD, "=head1 NAME\n\nx\n\n=cut\n"),
                (NUMBER, "1"),
                (SEMICOLON, ";"),
            ]
        );
        assert_eq!(
            tokens("=cut\n1;\n=cut\n"),
            [(POD, "=cut\n"), (NUMBER, "1"), (SEMICOLON, ";"), (WHITESPACE, "\n"), (POD, "=cut\n")]
        );
        assert_eq!(
            tokens("1;\n__DATA__\nfoo\nbar\n"),
            [
                (NUMBER, "1"),
                (SEMICOLON, ";"),
                (WHITESPACE, "\n"),
                (SEPARATOR, "__DATA__"),
                (DATA, "\nfoo\nbar\n"),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let text = "$x = 'abc";
        let errors = errors(text);
        assert_eq!(errors.len(), 1);
        let error = &errors[0];
        assert_eq!(error.kind, TokenizeErrorKind::Incomplete);
        assert_eq!((error.line, error.column), (1, 6));
        assert_eq!(error.token.kind, QUOTE_SINGLE);
        assert_eq!(error.token.text(text), "'abc");
        let section = error.token.sectioned.as_ref().unwrap().sections[0];
        assert!(!section.complete);
        assert_eq!(&text[section.range], "abc");
    }

    #[test]
    fn test_missing_heredoc_terminator() {
        let errors = errors("print <<END;\nline\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, TokenizeErrorKind::Incomplete);
        assert_eq!(errors[0].token.kind, HEREDOC_BODY);
    }

    #[test]
    fn test_unknown_character() {
        let text = "1 \u{2603} 2";
        let errors = errors(text);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, TokenizeErrorKind::Unexpected);
        assert_eq!(errors[0].token.kind, UNKNOWN);
        assert_eq!(errors[0].token.text(text), "\u{2603}");
        assert_eq!((errors[0].line, errors[0].column), (1, 3));
    }

    #[test]
    fn test_eof_repeats() {
        let mut tokenizer = Tokenizer::new("");
        assert_eq!(tokenizer.next_token().unwrap().kind, EOF);
        assert_eq!(tokenizer.next_token().unwrap().kind, EOF);
    }
}
