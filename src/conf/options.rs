//! Rune configuration for a parser instance.
//!
//! Which punctuation assigns a value, quotes a value, or opens and closes a section is
//! configurable. The sets are validated once, when the options are built, and are
//! read-only afterwards.

use crate::conf::error::OptionsError;
use crate::conf::token::{classify, TokenKind};
use std::collections::HashSet;

pub const DEFAULT_ASSIGN: [char; 1] = ['='];
pub const DEFAULT_QUOTE: [char; 3] = ['\'', '"', '`'];
pub const DEFAULT_SECTION_OPEN: char = '[';
pub const DEFAULT_SECTION_CLOSE: char = ']';

/// The runes a [Parser](crate::conf::parsing::Parser) treats as syntax.
///
/// Every rune must be punctuation (anything the tokenizer emits as a single `Punct`
/// token), and the assignment, quote and section runes must not overlap. The open and
/// close runes may be the same character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    assign: HashSet<char>,
    quote: HashSet<char>,
    section_open: char,
    section_close: char,
}

impl ParserOptions {
    pub fn new<A, Q>(
        assign: A,
        quote: Q,
        section_open: char,
        section_close: char,
    ) -> Result<Self, OptionsError>
    where
        A: IntoIterator<Item = char>,
        Q: IntoIterator<Item = char>,
    {
        let options = Self {
            assign: assign.into_iter().collect(),
            quote: quote.into_iter().collect(),
            section_open,
            section_close,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::default()
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.assign.is_empty() {
            return Err(OptionsError::NoAssignRunes);
        }
        let section = [self.section_open, self.section_close];
        for rune in self
            .assign
            .iter()
            .chain(self.quote.iter())
            .chain(section.iter())
            .copied()
        {
            let kind = classify(rune);
            if kind != TokenKind::Punct {
                return Err(OptionsError::NotPunctuation { rune, kind });
            }
        }
        if let Some(&rune) = self.assign.intersection(&self.quote).next() {
            return Err(OptionsError::Overlap {
                rune,
                first: "assignment",
                second: "quote",
            });
        }
        for rune in section {
            if self.assign.contains(&rune) {
                return Err(OptionsError::Overlap {
                    rune,
                    first: "assignment",
                    second: "section",
                });
            }
            if self.quote.contains(&rune) {
                return Err(OptionsError::Overlap {
                    rune,
                    first: "quote",
                    second: "section",
                });
            }
        }
        Ok(())
    }

    pub fn is_assign(&self, rune: char) -> bool {
        self.assign.contains(&rune)
    }

    pub fn is_quote(&self, rune: char) -> bool {
        self.quote.contains(&rune)
    }

    pub fn is_section_open(&self, rune: char) -> bool {
        self.section_open == rune
    }

    pub fn is_section_close(&self, rune: char) -> bool {
        self.section_close == rune
    }

    /// Assignment runes, sorted.
    pub fn assign_runes(&self) -> Vec<char> {
        sorted(&self.assign)
    }

    /// Quote runes, sorted.
    pub fn quote_runes(&self) -> Vec<char> {
        sorted(&self.quote)
    }

    pub fn section_runes(&self) -> (char, char) {
        (self.section_open, self.section_close)
    }
}

fn sorted(set: &HashSet<char>) -> Vec<char> {
    let mut runes: Vec<char> = set.iter().copied().collect();
    runes.sort_unstable();
    runes
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            assign: DEFAULT_ASSIGN.into_iter().collect(),
            quote: DEFAULT_QUOTE.into_iter().collect(),
            section_open: DEFAULT_SECTION_OPEN,
            section_close: DEFAULT_SECTION_CLOSE,
        }
    }
}

/// Builds [ParserOptions] starting from the defaults. Each setter replaces the
/// corresponding default.
#[derive(Debug, Clone)]
pub struct ParserOptionsBuilder {
    assign: Vec<char>,
    quote: Vec<char>,
    section_open: char,
    section_close: char,
}

impl Default for ParserOptionsBuilder {
    fn default() -> Self {
        Self {
            assign: DEFAULT_ASSIGN.to_vec(),
            quote: DEFAULT_QUOTE.to_vec(),
            section_open: DEFAULT_SECTION_OPEN,
            section_close: DEFAULT_SECTION_CLOSE,
        }
    }
}

impl ParserOptionsBuilder {
    pub fn assign(mut self, runes: impl IntoIterator<Item = char>) -> Self {
        self.assign = runes.into_iter().collect();
        self
    }

    pub fn quote(mut self, runes: impl IntoIterator<Item = char>) -> Self {
        self.quote = runes.into_iter().collect();
        self
    }

    pub fn sections(mut self, open: char, close: char) -> Self {
        self.section_open = open;
        self.section_close = close;
        self
    }

    pub fn build(self) -> Result<ParserOptions, OptionsError> {
        ParserOptions::new(
            self.assign,
            self.quote,
            self.section_open,
            self.section_close,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.assign_runes(), vec!['=']);
        assert_eq!(options.quote_runes(), vec!['"', '\'', '`']);
        assert_eq!(options.section_runes(), ('[', ']'));
        assert_eq!(ParserOptions::builder().build().unwrap(), options);
    }

    #[test]
    fn test_builder_overrides() {
        let options = ParserOptions::builder()
            .assign([':', '='])
            .quote(['|'])
            .sections('<', '>')
            .build()
            .unwrap();
        assert!(options.is_assign(':'));
        assert!(options.is_assign('='));
        assert!(options.is_quote('|'));
        assert!(!options.is_quote('"'));
        assert!(options.is_section_open('<'));
        assert!(options.is_section_close('>'));
    }

    #[test]
    fn test_rejects_empty_assign() {
        let err = ParserOptions::builder().assign(Vec::new()).build().unwrap_err();
        assert_eq!(err, OptionsError::NoAssignRunes);
    }

    #[test]
    fn test_rejects_non_punctuation() {
        let err = ParserOptions::builder().assign(['a']).build().unwrap_err();
        assert_eq!(
            err,
            OptionsError::NotPunctuation {
                rune: 'a',
                kind: TokenKind::AlphaNum
            }
        );
        let err = ParserOptions::builder().quote([' ']).build().unwrap_err();
        assert!(matches!(err, OptionsError::NotPunctuation { rune: ' ', .. }));
    }

    #[test]
    fn test_rejects_overlap() {
        let err = ParserOptions::builder()
            .assign(['=', '"'])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            OptionsError::Overlap {
                rune: '"',
                first: "assignment",
                second: "quote"
            }
        );
        let err = ParserOptions::builder()
            .sections('=', ']')
            .build()
            .unwrap_err();
        assert!(matches!(err, OptionsError::Overlap { rune: '=', .. }));
        let err = ParserOptions::builder()
            .sections('[', '\'')
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            OptionsError::Overlap {
                rune: '\'',
                first: "quote",
                ..
            }
        ));
    }

    #[test]
    fn test_same_open_and_close() {
        let options = ParserOptions::builder().sections('|', '|').build().unwrap();
        assert!(options.is_section_open('|'));
        assert!(options.is_section_close('|'));
    }
}
