//! Parser
//!
//!     The parser drives a small state machine over the token stream produced by the
//!     [Tokenizer]. Each state buffers the construct it is reading (a section name, a key
//!     name or a value) and hands completed pieces to the document under construction.
//!
//! States
//!
//!     None     Idle. An AlphaNum starts a key, the open rune starts a section header and
//!              any other punctuation starts a comment. Whitespace and newlines are skipped.
//!     Comment  Runs up to the next newline.
//!     Section  Reads a section name up to the close rune.
//!     Key      Reads a key name up to an assignment rune.
//!     Value    Reads a value up to the end of the line, or up to the matching quote rune
//!              when the value opens with one.
//!
//!     Parsing succeeds only if the machine is idle (or in a comment, or in an unquoted
//!     value) when the input ends.
//!
//! Names
//!
//!     Section and key names may contain whitespace and punctuation, but only where the
//!     next token makes the name unambiguous: whitespace must be followed by more name or
//!     by the terminator (trailing whitespace is dropped), and punctuation must be followed
//!     by more name. Anything else is reported at the token where the ambiguity occurs.

use crate::conf::document::{Parsed, Section};
use crate::conf::error::{Error, ParseError};
use crate::conf::lexing::{line_of, Tokenizer};
use crate::conf::options::ParserOptions;
use crate::conf::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    None,
    Comment,
    Section,
    Key,
    Value,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserState::None => "None",
            ParserState::Comment => "Comment",
            ParserState::Section => "Section",
            ParserState::Key => "Key",
            ParserState::Value => "Value",
        };
        f.write_str(name)
    }
}

/// A configured parser. Options are fixed at construction; one parser can run any
/// number of independent parses, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a complete input. Either the whole document is returned or the first error.
    pub fn parse(&self, source: &str) -> Result<Parsed, ParseError> {
        let document = Machine::new(&self.options, source).run()?;
        tracing::debug!(
            sections = document.len(),
            bytes = source.len(),
            "parsed document"
        );
        Ok(document)
    }

    /// Read the reader to its end, then parse. Read failures (including invalid UTF-8)
    /// are reported as [Error::Io], never as parse errors.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Parsed, Error> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(self.parse(&source)?)
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Parsed, Error> {
        let source = fs::read_to_string(path.as_ref())?;
        Ok(self.parse(&source)?)
    }
}

static DEFAULT_PARSER: Lazy<Parser> = Lazy::new(Parser::default);

/// Parse with the default runes.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    DEFAULT_PARSER.parse(source)
}

/// Read and parse with the default runes.
pub fn parse_reader<R: Read>(reader: R) -> Result<Parsed, Error> {
    DEFAULT_PARSER.parse_reader(reader)
}

/// Read a file and parse it with the default runes.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Parsed, Error> {
    DEFAULT_PARSER.parse_file(path)
}

/// What the name accumulator made of a token.
enum NameStep {
    Continue,
    Terminated,
}

/// Transient state of one parse.
struct Machine<'p, 'src> {
    options: &'p ParserOptions,
    tokens: Tokenizer<'src>,
    state: ParserState,
    /// Section or key name being read.
    name: String,
    /// Key the value being read belongs to.
    key: String,
    value: String,
    /// Whitespace held back until it turns out to be interior.
    pending: &'src str,
    quote: Option<char>,
    /// Where the open quote of the value being read sits.
    quote_offset: usize,
    /// Section receiving key/value pairs, and its name.
    current: Section,
    current_name: String,
    document: Option<Parsed>,
}

impl<'p, 'src> Machine<'p, 'src> {
    fn new(options: &'p ParserOptions, source: &'src str) -> Self {
        Self {
            options,
            tokens: Tokenizer::new(source),
            state: ParserState::None,
            name: String::new(),
            key: String::new(),
            value: String::new(),
            pending: "",
            quote: None,
            quote_offset: 0,
            current: Section::default(),
            current_name: String::new(),
            document: None,
        }
    }

    fn run(mut self) -> Result<Parsed, ParseError> {
        loop {
            let token = self.tokens.next();
            if token.is_end() {
                break;
            }
            match self.state {
                ParserState::None => self.idle(token),
                ParserState::Comment => {
                    if token.kind == TokenKind::Newline {
                        self.state = ParserState::None;
                    }
                }
                ParserState::Section => self.section(token)?,
                ParserState::Key => self.key(token)?,
                ParserState::Value => self.value(token),
            }
        }
        self.finish()
    }

    fn idle(&mut self, token: Token<'src>) {
        match token.kind {
            TokenKind::AlphaNum => {
                self.name.clear();
                self.name.push_str(token.text);
                self.pending = "";
                self.state = ParserState::Key;
            }
            TokenKind::Punct => {
                if self.is(token, ParserOptions::is_section_open) {
                    self.name.clear();
                    self.pending = "";
                    self.state = ParserState::Section;
                } else {
                    self.state = ParserState::Comment;
                }
            }
            TokenKind::WhiteSpace | TokenKind::Newline | TokenKind::None => {}
        }
    }

    fn section(&mut self, token: Token<'src>) -> Result<(), ParseError> {
        if token.kind == TokenKind::Newline {
            return Err(self.unexpected(token));
        }
        match self.name_token(token, ParserOptions::is_section_close)? {
            NameStep::Continue => Ok(()),
            NameStep::Terminated => {
                if self.name.is_empty() {
                    // The unnamed section is the global one and cannot be reopened.
                    return Err(self.unexpected(token));
                }
                self.open_section();
                self.state = ParserState::None;
                Ok(())
            }
        }
    }

    fn key(&mut self, token: Token<'src>) -> Result<(), ParseError> {
        if token.kind == TokenKind::Newline {
            return Err(self.missing_assignment(token.offset));
        }
        match self.name_token(token, ParserOptions::is_assign)? {
            NameStep::Continue => Ok(()),
            NameStep::Terminated => {
                std::mem::swap(&mut self.key, &mut self.name);
                self.name.clear();
                self.value.clear();
                self.quote = None;
                self.state = ParserState::Value;
                Ok(())
            }
        }
    }

    /// Shared accumulation rule for section and key names.
    fn name_token(
        &mut self,
        token: Token<'src>,
        is_terminator: fn(&ParserOptions, char) -> bool,
    ) -> Result<NameStep, ParseError> {
        match token.kind {
            TokenKind::AlphaNum => {
                self.name.push_str(self.pending);
                self.pending = "";
                self.name.push_str(token.text);
            }
            TokenKind::WhiteSpace => {
                if !self.name.is_empty() {
                    self.pending = token.text;
                }
                let next = self.tokens.peek();
                if !next.kind.is_alphanum() && !self.is(next, is_terminator) {
                    return Err(self.broken_name(next));
                }
            }
            TokenKind::Punct if self.is(token, is_terminator) => {
                self.pending = "";
                return Ok(NameStep::Terminated);
            }
            TokenKind::Punct => {
                let next = self.tokens.peek();
                if !next.kind.is_alphanum() {
                    return Err(self.broken_name(next));
                }
                self.name.push_str(token.text);
            }
            TokenKind::Newline | TokenKind::None => return Err(self.unexpected(token)),
        }
        Ok(NameStep::Continue)
    }

    fn value(&mut self, token: Token<'src>) {
        match (token.kind, self.quote) {
            (TokenKind::Punct, _) if self.is(token, ParserOptions::is_quote) => {
                let rune = token.punct();
                if self.quote.is_none() && self.value.is_empty() {
                    self.quote = rune;
                    self.quote_offset = token.offset;
                } else if self.quote.is_some() && self.quote == rune {
                    self.quote = None;
                    self.complete_value();
                } else {
                    self.push_value(token.text);
                }
            }
            (TokenKind::WhiteSpace | TokenKind::Newline, Some(_)) => {
                self.value.push_str(token.text);
            }
            (TokenKind::WhiteSpace, None) => {
                if !self.value.is_empty() {
                    self.pending = token.text;
                }
            }
            (TokenKind::Newline, None) => self.complete_value(),
            (TokenKind::AlphaNum | TokenKind::Punct, _) => self.push_value(token.text),
            (TokenKind::None, _) => {}
        }
    }

    fn push_value(&mut self, text: &str) {
        self.value.push_str(self.pending);
        self.pending = "";
        self.value.push_str(text);
    }

    fn complete_value(&mut self) {
        let value = std::mem::take(&mut self.value);
        tracing::trace!(section = %self.current_name, key = %self.key, value = %value, "value");
        self.current.record(&self.key, value);
        self.pending = "";
        self.state = ParserState::None;
    }

    /// Close the section receiving values and start a new instance named by the
    /// buffered name.
    fn open_section(&mut self) {
        let name = std::mem::take(&mut self.name);
        tracing::debug!(section = %name, "opening section");
        let previous = std::mem::take(&mut self.current);
        let previous_name = std::mem::replace(&mut self.current_name, name);
        self.store(previous_name, previous);
    }

    fn store(&mut self, name: String, section: Section) {
        match self.document.as_mut() {
            Some(document) => document.push_section(name, section),
            // The first section stored is always the global one.
            None => self.document = Some(Parsed::new(section)),
        }
    }

    fn finish(mut self) -> Result<Parsed, ParseError> {
        let offset = self.tokens.source().len();
        match self.state {
            ParserState::None | ParserState::Comment => {}
            ParserState::Section => return Err(self.error_at_end(ParserState::Section)),
            ParserState::Key => return Err(self.missing_assignment(offset)),
            ParserState::Value => match self.quote {
                Some(quote) => {
                    return Err(ParseError::UnterminatedQuote {
                        key: std::mem::take(&mut self.key),
                        quote,
                        offset: self.quote_offset,
                        line: self.line(self.quote_offset),
                    })
                }
                None => self.complete_value(),
            },
        }
        let name = std::mem::take(&mut self.current_name);
        let section = std::mem::take(&mut self.current);
        self.store(name, section);
        match self.document {
            Some(document) => Ok(document),
            None => unreachable!("store always leaves a document"),
        }
    }

    fn is(&self, token: Token<'_>, rule: fn(&ParserOptions, char) -> bool) -> bool {
        token.punct().map_or(false, |c| rule(self.options, c))
    }

    fn line(&self, offset: usize) -> usize {
        line_of(self.tokens.source(), offset)
    }

    fn unexpected(&self, token: Token<'_>) -> ParseError {
        ParseError::UnexpectedToken {
            text: token.text.to_string(),
            kind: token.kind,
            offset: token.offset,
            line: self.line(token.offset),
        }
    }

    fn missing_assignment(&mut self, offset: usize) -> ParseError {
        ParseError::MissingAssignment {
            key: std::mem::take(&mut self.name),
            offset,
            line: self.line(offset),
        }
    }

    /// Error for a name whose lookahead found neither more name nor its terminator.
    /// Running into the end of the line or input reports the same error as it would
    /// without trailing whitespace or punctuation.
    fn broken_name(&mut self, next: Token<'src>) -> ParseError {
        match (self.state, next.kind) {
            (ParserState::Key, TokenKind::Newline | TokenKind::None) => {
                self.missing_assignment(next.offset)
            }
            (ParserState::Section, TokenKind::None) => self.error_at_end(ParserState::Section),
            _ => self.unexpected(next),
        }
    }

    fn error_at_end(&self, state: ParserState) -> ParseError {
        let offset = self.tokens.source().len();
        ParseError::UnterminatedConstruct {
            state,
            offset,
            line: self.line(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value() {
        let doc = parse("key = value\n").unwrap();
        let value = doc.global().get("key").unwrap();
        assert_eq!(value.last(), "value");
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn test_empty_input_has_global_section() {
        let doc = parse("").unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.global().is_empty());
    }

    #[test]
    fn test_value_at_end_of_input() {
        let doc = parse("key = value   ").unwrap();
        assert_eq!(doc.global().last("key"), Some("value"));
    }

    #[test]
    fn test_empty_values() {
        let doc = parse("a =\nb = \"\"\nc =").unwrap();
        assert_eq!(doc.global().last("a"), Some(""));
        assert_eq!(doc.global().last("b"), Some(""));
        assert_eq!(doc.global().last("c"), Some(""));
    }

    #[test]
    fn test_value_keeps_interior_whitespace() {
        let doc = parse("k =   a  b\t c  \n").unwrap();
        assert_eq!(doc.global().last("k"), Some("a  b\t c"));
    }

    #[test]
    fn test_leading_whitespace_and_names() {
        let doc = parse("   my key   = v\n  [  sec  name ]\n").unwrap();
        assert!(doc.global().contains_key("my key"));
        assert!(doc.section("sec  name").is_some());
    }

    #[test]
    fn test_quote_inside_unquoted_value() {
        let doc = parse("k = it's \"fine\"\n").unwrap();
        assert_eq!(doc.global().last("k"), Some("it's \"fine\""));
    }

    #[test]
    fn test_other_quotes_inside_quoted_value() {
        let doc = parse("k = 'say \"hi\" `now`'\n").unwrap();
        assert_eq!(doc.global().last("k"), Some("say \"hi\" `now`"));
    }

    #[test]
    fn test_text_after_closing_quote_starts_a_new_line_item() {
        let doc = parse("a = \"x\" # trailing comment\nb = y\n").unwrap();
        assert_eq!(doc.global().last("a"), Some("x"));
        assert_eq!(doc.global().last("b"), Some("y"));
    }

    #[test]
    fn test_comments_are_skipped() {
        let doc = parse("# a = b\n; [x]\n=oops\nk = v # not a comment\n").unwrap();
        assert_eq!(doc.global().len(), 1);
        assert_eq!(doc.global().last("k"), Some("v # not a comment"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_global_section_closes_at_first_header() {
        let doc = parse("a = 1\n[s]\nb = 2\n").unwrap();
        assert!(doc.global().contains_key("a"));
        assert!(!doc.global().contains_key("b"));
        assert_eq!(doc.section("s").unwrap().last().last("b"), Some("2"));
    }

    #[test]
    fn test_newline_in_key_is_missing_assignment() {
        let err = parse("key\nvalue = 1\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingAssignment { ref key, offset: 3, line: 1 } if key == "key"
        ));
    }

    #[test]
    fn test_key_at_end_of_input() {
        let err = parse("a = 1\nsome key").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingAssignment { ref key, line: 2, .. } if key == "some key"
        ));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse("k = \"open\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnterminatedQuote { ref key, quote: '"', offset: 4, line: 1 } if key == "k"
        ));
    }

    #[test]
    fn test_trailing_whitespace_after_key() {
        for source in ["key ", "key \n", "key.\n"] {
            let err = parse(source).unwrap_err();
            assert!(
                matches!(err, ParseError::MissingAssignment { ref key, .. } if key == "key"),
                "{source:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_section_name_is_rejected() {
        for source in ["[]", "[ ]\n"] {
            let err = parse(source).unwrap_err();
            assert!(
                matches!(err, ParseError::UnexpectedToken { ref text, .. } if text == "]"),
                "{source:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_newline_in_section_header() {
        let err = parse("[a\n]").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::Newline,
                offset: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_punctuation_in_name() {
        let err = parse("key. = v").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref text, kind: TokenKind::WhiteSpace, .. } if text == " "
        ));
    }

    #[test]
    fn test_configured_runes() {
        let options = ParserOptions::builder()
            .assign([':'])
            .quote(['|'])
            .sections('<', '>')
            .build()
            .unwrap();
        let parser = Parser::new(options);
        let doc = parser
            .parse("a: 1\n[ignored]\n<s>\nb: c = |x: y|\nq: |x: \"y\"|\n")
            .unwrap();
        assert_eq!(doc.global().last("a"), Some("1"));
        assert_eq!(doc.len(), 2);
        let section = doc.section("s").unwrap().last();
        assert_eq!(section.last("b"), Some("c = |x: y|"));
        assert_eq!(section.last("q"), Some("x: \"y\""));
        let err = parser.parse("<s>\nb = c: 1\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_parse_reader_reports_io_separately() {
        let bytes: &[u8] = &[0x6b, 0x20, 0x3d, 0x20, 0xff, 0xfe];
        let err = parse_reader(bytes).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let err = parse_reader("[ hello".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ParserState::Section.to_string(), "Section");
        assert_eq!(ParserState::None.to_string(), "None");
    }
}
