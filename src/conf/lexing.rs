//! Lexer
//!
//!     The Tokenizer walks an immutable input with a cursor that only moves forward,
//!     except through `reset`. Each token is classified by the logos lexer in
//!     [token](super::token); the Tokenizer adds lookahead and one saved position on top.
//!
//! Lookahead
//!
//!     `peek` is pure and can be repeated. The grammar never needs more than one token
//!     past the current one, so the Tokenizer keeps exactly one mark slot: `mark` saves
//!     the cursor and `reset` returns to it (or to the start if nothing was marked).

use crate::conf::token::{RawToken, Token, TokenKind};
use logos::Logos;

/// Splits a string into [Token]s, one maximal run at a time.
#[derive(Debug, Clone)]
pub struct Tokenizer<'src> {
    source: &'src str,
    cursor: usize,
    mark: usize,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: 0,
            mark: 0,
        }
    }

    /// The input being tokenized.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// True once the cursor is at or past the end of the input.
    pub fn at_end(&self) -> bool {
        self.cursor >= self.source.len()
    }

    /// Returns the next token without advancing. At the end of input this is the
    /// empty `None` token.
    pub fn peek(&self) -> Token<'src> {
        if self.at_end() {
            return Token::end(self.source.len());
        }
        let rest = &self.source[self.cursor..];
        let mut lexer = RawToken::lexer(rest);
        let kind = match lexer.next() {
            Some(Ok(raw)) => TokenKind::from(raw),
            // Unclassifiable input falls back to a single punctuation character.
            _ => TokenKind::Punct,
        };
        let len = match kind {
            TokenKind::Punct => rest.chars().next().map_or(0, char::len_utf8),
            _ => lexer.span().end,
        };
        Token {
            text: &rest[..len],
            kind,
            offset: self.cursor,
        }
    }

    /// Returns what [peek](Self::peek) would, then moves the cursor past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token<'src> {
        let token = self.peek();
        self.cursor += token.text.len();
        token
    }

    /// Remember the current position. A later call overwrites it.
    pub fn mark(&mut self) {
        self.mark = self.cursor;
    }

    /// Return to the last marked position, or the start if `mark` was never called.
    pub fn reset(&mut self) {
        self.cursor = self.mark;
    }
}

/// Tokenize the whole input, without the trailing `None` token.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    while !tokenizer.at_end() {
        tokens.push(tokenizer.next());
    }
    tokens
}

/// 1-based line number of a byte offset.
pub(crate) fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
