//! Testing utilities for document assertions
//!
//!     Fluent assertions over a [Parsed] document. Each assertion panics with a message
//!     that names where in the document it was looking, and returns the assertion so
//!     checks can be chained:
//!
//!         assert_parsed(&doc)
//!             .section_count(2)
//!             .section("color", |block| {
//!                 block.instance_count(2).instance(1, |section| {
//!                     section.value("name", "blue");
//!                 });
//!             });

use crate::conf::document::{Parsed, Section, SectionBlock, GLOBAL};

pub fn assert_parsed(doc: &Parsed) -> ParsedAssertion<'_> {
    ParsedAssertion { doc }
}

pub struct ParsedAssertion<'a> {
    doc: &'a Parsed,
}

impl<'a> ParsedAssertion<'a> {
    /// Assert the number of distinct section names, the global section included
    pub fn section_count(self, expected: usize) -> Self {
        let names = self.doc.section_names();
        assert_eq!(
            names.len(),
            expected,
            "Expected {} section names, found {}: {:?}",
            expected,
            names.len(),
            names
        );
        self
    }

    /// Assert on the block of a named section
    pub fn section<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let block = self.doc.section(name).unwrap_or_else(|| {
            panic!(
                "Section {:?} not found; sections are {:?}",
                name,
                self.doc.section_names()
            )
        });
        assertion(BlockAssertion {
            block,
            context: format!("[{}]", name),
        });
        self
    }

    /// Assert that no header with this name was seen
    pub fn no_section(self, name: &str) -> Self {
        assert!(
            self.doc.section(name).is_none(),
            "Expected no section {:?}",
            name
        );
        self
    }

    /// Assert on the global section
    pub fn global<F>(self, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assertion(SectionAssertion {
            section: self.doc.global(),
            context: format!("[{}]", GLOBAL),
        });
        self
    }
}

pub struct BlockAssertion<'a> {
    block: &'a SectionBlock,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn instance_count(self, expected: usize) -> Self {
        assert_eq!(
            self.block.len(),
            expected,
            "{}: expected {} instances, found {}",
            self.context,
            expected,
            self.block.len()
        );
        self
    }

    pub fn instance<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        let section = self.block.get(index).unwrap_or_else(|| {
            panic!(
                "{}: instance {} out of bounds ({} instances)",
                self.context,
                index,
                self.block.len()
            )
        });
        assertion(SectionAssertion {
            section,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Assert on the most recent instance
    pub fn last<F>(self, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assertion(SectionAssertion {
            section: self.block.last(),
            context: format!("{}.last", self.context),
        });
        self
    }
}

pub struct SectionAssertion<'a> {
    section: &'a Section,
    context: String,
}

impl<'a> SectionAssertion<'a> {
    pub fn key_count(self, expected: usize) -> Self {
        assert_eq!(
            self.section.len(),
            expected,
            "{}: expected {} keys, found {:?}",
            self.context,
            expected,
            self.section.keys()
        );
        self
    }

    /// Assert the last value of a key
    pub fn value(self, key: &str, expected: &str) -> Self {
        let actual = self.section.last(key);
        assert_eq!(
            actual,
            Some(expected),
            "{}: value of {:?}",
            self.context,
            key
        );
        self
    }

    /// Assert the full history of a key
    pub fn history(self, key: &str, expected: &[&str]) -> Self {
        let actual = self.section.get(key).map(|v| v.history());
        assert!(
            actual.is_some(),
            "{}: key {:?} not found; keys are {:?}",
            self.context,
            key,
            self.section.keys()
        );
        assert_eq!(
            actual.unwrap_or_default(),
            expected,
            "{}: history of {:?}",
            self.context,
            key
        );
        self
    }

    pub fn no_key(self, key: &str) -> Self {
        assert!(
            !self.section.contains_key(key),
            "{}: expected no key {:?}",
            self.context,
            key
        );
        self
    }
}
