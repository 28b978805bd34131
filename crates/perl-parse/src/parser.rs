use std::collections::VecDeque;

use drop_bomb::DropBomb;
use perl_syntax::SyntaxKind::{self, *};
use perl_syntax::{Builder, Document};
use perl_tokenizer::{Token, TokenSource};
use text_size::TextRange;

use crate::{ErrorProxy, NoopErrorProxy, ParseError, grammar};

/// A single parse over one token source.
pub struct Parser<'a> {
    source: Box<dyn TokenSource + 'a>,
    proxy: Option<&'a mut dyn ErrorProxy>,
    noop: NoopErrorProxy,
    /// Pulled but not yet consumed, trivia included. Ends at `EOF` once seen.
    lookahead: VecDeque<Token>,
    events: Vec<Event>,
    /// Closers expected by the structures currently open, innermost last.
    pub(crate) open: Vec<SyntaxKind>,
    /// The last significant element consumed in the current statement.
    previous: Option<(SyntaxKind, TextRange)>,
}

impl<'a> Parser<'a> {
    /// Without a proxy every report is discarded.
    pub fn new(source: impl TokenSource + 'a, proxy: Option<&'a mut dyn ErrorProxy>) -> Self {
        Self {
            source: Box::new(source),
            proxy,
            noop: NoopErrorProxy,
            lookahead: VecDeque::new(),
            events: Vec::new(),
            open: Vec::new(),
            previous: None,
        }
    }

    pub fn parse(mut self) -> Document {
        grammar::document(&mut self);
        self.build_tree()
    }

    pub(crate) fn proxy(&mut self) -> &mut (dyn ErrorProxy + 'a) {
        match &mut self.proxy {
            Some(proxy) => &mut **proxy,
            None => &mut self.noop,
        }
    }

    fn pull(&mut self) {
        let token = match self.source.next_token() {
            Ok(token) => token,
            Err(error) => {
                self.proxy().tokenizer_error(error.line, error.column, &error);
                error.token
            }
        };
        self.lookahead.push_back(token);
    }

    /// Index into the lookahead of the `n`th significant token, or of `EOF`.
    fn nth_index(&mut self, n: usize) -> usize {
        let mut seen = 0;
        let mut index = 0;
        loop {
            if index == self.lookahead.len() {
                self.pull();
            }
            let kind = self.lookahead[index].kind;
            if kind == EOF {
                return index;
            }
            if !kind.is_trivia() {
                if seen == n {
                    return index;
                }
                seen += 1;
            }
            index += 1;
        }
    }

    pub(crate) fn nth(&mut self, n: usize) -> &Token {
        let index = self.nth_index(n);
        &self.lookahead[index]
    }

    pub(crate) fn nth_kind(&mut self, n: usize) -> SyntaxKind {
        self.nth(n).kind
    }

    pub(crate) fn nth_text(&mut self, n: usize) -> &str {
        let range = self.nth(n).range;
        &self.source.text()[range]
    }

    pub(crate) fn peek_kind(&mut self) -> SyntaxKind {
        self.nth_kind(0)
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_word(&mut self, words: &[&str]) -> bool {
        if !self.at(WORD) {
            return false;
        }
        let text = self.nth_text(0);
        words.iter().any(|&word| word == text)
    }

    pub(crate) fn previous(&self) -> Option<SyntaxKind> {
        self.previous.map(|(kind, _)| kind)
    }

    pub(crate) fn previous_text(&self) -> &str {
        self.previous.map_or("", |(_, range)| &self.source.text()[range])
    }

    pub(crate) fn set_previous(&mut self, previous: Option<(SyntaxKind, TextRange)>) {
        self.previous = previous;
    }

    /// Moves pending trivia into the node currently open.
    pub(crate) fn flush_trivia(&mut self) {
        let index = self.nth_index(0);
        for _ in 0..index {
            if let Some(token) = self.lookahead.pop_front() {
                self.events.push(Event::Token(token));
            }
        }
    }

    /// Consumes the next significant token with the trivia before it.
    pub(crate) fn advance(&mut self) {
        if self.at(EOF) {
            return;
        }
        self.flush_trivia();
        if let Some(token) = self.lookahead.pop_front() {
            self.previous = Some((token.kind, token.range));
            self.events.push(Event::Token(token));
        }
    }

    /// Opens a node after the pending trivia, so the trivia stays outside.
    pub(crate) fn start(&mut self) -> Marker {
        self.flush_trivia();
        self.start_here()
    }

    /// Opens a node that will take the pending trivia as its first children.
    pub(crate) fn start_here(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn error(&mut self, error: ParseError) {
        self.proxy().parser_error(&error);
    }

    fn build_tree(self) -> Document {
        let Parser { source, events, .. } = self;
        let mut builder = Builder::new(source.text());

        for event in events {
            match event {
                Event::Start { kind: TOMBSTONE } => {}
                Event::Start { kind } => builder.start_node(kind),
                Event::Token(Token { kind, range, sectioned }) => {
                    builder.token(kind, range, sectioned);
                }
                Event::Finish => builder.finish_node(),
                Event::FinishIncomplete => builder.finish_incomplete_node(),
            }
        }

        builder.finish()
    }
}

enum Event {
    Start { kind: SyntaxKind },
    Token(Token),
    Finish,
    FinishIncomplete,
}

impl Event {
    const TOMBSTONE: Self = Self::Start { kind: TOMBSTONE };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Self {
        Self { position: pos, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    fn is_empty(&self, p: &Parser<'_>) -> bool {
        self.position as usize + 1 == p.events.len()
    }

    pub(crate) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) {
        self.finish(p, kind, Event::Finish);
    }

    /// Completes a structure whose closing delimiter never came.
    pub(crate) fn complete_incomplete(self, p: &mut Parser<'_>, kind: SyntaxKind) {
        self.finish(p, kind, Event::FinishIncomplete);
    }

    fn finish(mut self, p: &mut Parser<'_>, kind: SyntaxKind, finish: Event) {
        let empty = kind.is_statement() && self.is_empty(p);
        debug_assert!(!empty, "{kind:?} completed without children");
        if empty {
            let offset = p.nth(0).range.start();
            p.error(ParseError::EmptyStatement { offset });
            self.abandon(p);
            return;
        }

        self.bomb.defuse();
        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot } => *slot = kind,
            _ => unreachable!(),
        }
        p.events.push(finish);
    }

    /// Drops the node; anything added since it started goes to its parent.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();
        if self.is_empty(p) {
            match p.events.pop() {
                Some(Event::Start { kind: TOMBSTONE }) => {}
                _ => unreachable!(),
            }
        }
    }
}
