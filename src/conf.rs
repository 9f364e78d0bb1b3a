//! Main module for conf library functionality
//!
//! The Format
//!
//!     Lines beginning with punctuation are comments. Key/value pairs are written as
//!     `key = value` and land in the global (unnamed) section until the first section
//!     header, `[ name ]`, is seen. From then on they land in the most recently opened
//!     section.
//!
//!         # A comment
//!         ; also a comment
//!         key with spaces = value with spaces!
//!
//!         [ section ]
//!         keys.can.have.punctuation.too = neat!
//!         quoted = "kept   verbatim,
//!         even across lines"
//!
//!     Names may contain spaces and punctuation, as long as what follows is more name
//!     content or the expected terminator. Unquoted values run to the end of the line with
//!     trailing whitespace dropped. Quoted values keep everything up to the matching quote.
//!
//! Repetition
//!
//!     Both keys and sections become lists by repeating them. Assigning the same key twice
//!     in one section keeps both values in the key's history. Opening the same section
//!     name twice creates a second, independent instance of that section:
//!
//!         fruits = apples
//!         fruits = oranges
//!
//!         [ color ]
//!         name = red
//!
//!         [ color ]
//!         name = blue
//!
//! Pipeline
//!
//!     text -> [lexing](lexing) tokens -> [parsing](parsing) state machine -> [Parsed](document::Parsed)

pub mod document;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod options;
pub mod parsing;
pub mod testing;
pub mod token;
