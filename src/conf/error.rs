//! Error types for parsing and configuration

use crate::conf::parsing::ParserState;
use crate::conf::token::TokenKind;
use std::io;
use thiserror::Error;

/// Errors that stop a parse. Parsing halts at the first one and no document is returned.
///
/// Every variant records the byte offset and 1-based line where the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input ended inside a construct that needs a terminator.
    #[error("line {line}: unexpected end of input while parsing {state}")]
    UnterminatedConstruct {
        state: ParserState,
        offset: usize,
        line: usize,
    },

    /// A token appeared where the grammar does not allow it.
    #[error("line {line}: unexpected {kind} token {text:?}")]
    UnexpectedToken {
        text: String,
        kind: TokenKind,
        offset: usize,
        line: usize,
    },

    /// A quoted value never found its closing quote.
    #[error("line {line}: unterminated {quote} quote in value of key {key:?}")]
    UnterminatedQuote {
        key: String,
        quote: char,
        offset: usize,
        line: usize,
    },

    /// A key ran into the end of its line without an assignment rune.
    #[error("line {line}: key {key:?} is missing an assignment")]
    MissingAssignment {
        key: String,
        offset: usize,
        line: usize,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedConstruct { offset, .. }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnterminatedQuote { offset, .. }
            | ParseError::MissingAssignment { offset, .. } => *offset,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::UnterminatedConstruct { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnterminatedQuote { line, .. }
            | ParseError::MissingAssignment { line, .. } => *line,
        }
    }
}

/// Rejected rune configurations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("at least one assignment rune is required")]
    NoAssignRunes,

    #[error("rune {rune:?} is tokenized as {kind}, not punctuation")]
    NotPunctuation { rune: char, kind: TokenKind },

    #[error("rune {rune:?} is both a {first} rune and a {second} rune")]
    Overlap {
        rune: char,
        first: &'static str,
        second: &'static str,
    },
}

/// Crate-level error. Reading the input and parsing it fail separately.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid parser options: {0}")]
    Options(#[from] OptionsError),

    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),
}
