//! Token definitions for the conf format
//!
//! Tokens are maximal runs of one character class. The classes are mutually exclusive and
//! cover every character, so any input splits into tokens without gaps. Which punctuation
//! assigns, quotes or opens a section is decided by the parser, never here.

use logos::Logos;
use std::fmt;

/// The class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    None,
    /// A run of Unicode letters and decimal digits.
    AlphaNum,
    /// A run of `\r` and `\n` in any order.
    Newline,
    /// A run of spaces and tabs.
    WhiteSpace,
    /// Exactly one character of anything else.
    Punct,
}

impl TokenKind {
    pub fn is_alphanum(self) -> bool {
        matches!(self, TokenKind::AlphaNum)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::None => "None",
            TokenKind::AlphaNum => "AlphaNum",
            TokenKind::Newline => "Newline",
            TokenKind::WhiteSpace => "WhiteSpace",
            TokenKind::Punct => "Punct",
        };
        f.write_str(name)
    }
}

/// Raw character classes recognized by logos.
///
/// Punct is the complement of the other three classes and matches one character only,
/// so punctuation never merges into runs.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
    #[regex(r"[\p{L}\p{Nd}]+")]
    AlphaNum,

    #[regex(r"[\r\n]+")]
    Newline,

    #[regex(r"[ \t]+")]
    WhiteSpace,

    #[regex(r"[^ \t\r\n\p{L}\p{Nd}]")]
    Punct,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::AlphaNum => TokenKind::AlphaNum,
            RawToken::Newline => TokenKind::Newline,
            RawToken::WhiteSpace => TokenKind::WhiteSpace,
            RawToken::Punct => TokenKind::Punct,
        }
    }
}

/// A token borrowed from the input, with the byte offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub text: &'src str,
    pub kind: TokenKind,
    pub offset: usize,
}

impl<'src> Token<'src> {
    /// The end-of-input token at the given offset.
    pub fn end(offset: usize) -> Self {
        Token {
            text: "",
            kind: TokenKind::None,
            offset,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::None
    }

    /// The single character of a Punct token.
    pub fn punct(&self) -> Option<char> {
        if self.kind == TokenKind::Punct {
            self.text.chars().next()
        } else {
            None
        }
    }
}

/// Classify a single character the way the tokenizer would.
pub fn classify(c: char) -> TokenKind {
    let mut buf = [0u8; 4];
    let mut lexer = RawToken::lexer(c.encode_utf8(&mut buf));
    match lexer.next() {
        Some(Ok(raw)) => raw.into(),
        _ => TokenKind::Punct,
    }
}
