//! # conf
//!
//! A parser for a small INI-like configuration format.
//!
//! File Layout
//!
//! The library lives under src/conf and is layered strictly bottom-up:
//! src/conf
//!   ├── token      Token classes and the logos classifier
//!   ├── lexing     The cursor based Tokenizer (peek, next, mark, reset)
//!   ├── options    Rune configuration for a parser instance
//!   ├── error      Parse, option and I/O errors
//!   ├── document   The parsed document model
//!   ├── parsing    The parser state machine
//!   ├── loader     Layered settings files for rune configuration
//!   ├── formats    Serializers for the flattened document
//!   └── testing    Fluent assertions over parsed documents
//!
//! For the format itself and the repetition rules, see the [conf module](conf).

pub mod conf;

pub use conf::document::{Flattened, Parsed, Section, SectionBlock, Value};
pub use conf::error::{Error, OptionsError, ParseError};
pub use conf::options::ParserOptions;
pub use conf::parsing::{parse, parse_file, parse_reader, Parser, ParserState};
