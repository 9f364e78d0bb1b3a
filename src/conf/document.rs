//! The parsed document
//!
//!     A [Parsed] document maps section names to [SectionBlock]s. A block holds every
//!     instance of one section name in the order the headers were seen; each instance is
//!     a [Section] mapping keys to [Value]s; each value keeps every string assigned to
//!     its key, in order.
//!
//!     The unnamed section `""` is the global section. It is always present and always
//!     has exactly one instance.
//!
//!     Documents are built by the parser and handed out read-only. The [flatten] family
//!     projects them into plain ordered maps for serialization and binding.
//!
//! [flatten]: Parsed::flatten

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Name of the global section.
pub const GLOBAL: &str = "";

/// Plain-data projection of a document: section name to instances, each instance a
/// map from key to its history.
pub type Flattened = BTreeMap<String, Vec<BTreeMap<String, Vec<String>>>>;

/// Every value assigned to one key within one section instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    history: Vec<String>,
}

impl Value {
    pub(crate) fn new(first: String) -> Self {
        Self {
            history: vec![first],
        }
    }

    pub(crate) fn push(&mut self, value: String) {
        self.history.push(value);
    }

    /// The most recent assignment.
    pub fn last(&self) -> &str {
        // history is never empty: a Value is created with its first assignment
        self.history.last().map_or("", String::as_str)
    }

    /// Every assignment in encounter order; the last element equals [last](Self::last).
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// One instance of a section: keys and their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    values: HashMap<String, Value>,
}

impl Section {
    pub(crate) fn record(&mut self, key: &str, value: String) {
        match self.values.get_mut(key) {
            Some(existing) => existing.push(value),
            None => {
                self.values.insert(key.to_string(), Value::new(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Shorthand for the last value of a key.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.get(key).map(Value::last)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn flatten(&self) -> BTreeMap<String, Vec<String>> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.history.clone()))
            .collect()
    }
}

/// All instances of one section name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    instances: Vec<Section>,
}

impl SectionBlock {
    pub(crate) fn new(first: Section) -> Self {
        Self {
            instances: vec![first],
        }
    }

    pub(crate) fn push(&mut self, section: Section) {
        self.instances.push(section);
    }

    /// The most recently opened instance.
    pub fn last(&self) -> &Section {
        // instances is never empty: a block is created with its first instance
        &self.instances[self.instances.len() - 1]
    }

    /// Every instance in encounter order; the last element is [last](Self::last).
    pub fn instances(&self) -> &[Section] {
        &self.instances
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.instances.get(index)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn flatten(&self) -> Vec<BTreeMap<String, Vec<String>>> {
        self.instances.iter().map(Section::flatten).collect()
    }
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    sections: HashMap<String, SectionBlock>,
}

impl Parsed {
    pub(crate) fn new(global: Section) -> Self {
        let mut sections = HashMap::new();
        sections.insert(GLOBAL.to_string(), SectionBlock::new(global));
        Self { sections }
    }

    /// Append a closed section instance under its name.
    pub(crate) fn push_section(&mut self, name: String, section: Section) {
        match self.sections.get_mut(&name) {
            Some(block) => block.push(section),
            None => {
                self.sections.insert(name, SectionBlock::new(section));
            }
        }
    }

    /// Names of every section seen, including `""` for the global section.
    pub fn section_names(&self) -> BTreeSet<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// The block for a section name, if a header with that name was seen.
    pub fn section(&self, name: &str) -> Option<&SectionBlock> {
        self.sections.get(name)
    }

    /// The global section.
    pub fn global(&self) -> &Section {
        match self.sections.get(GLOBAL) {
            Some(block) => block.last(),
            None => unreachable!("the global section is inserted on construction"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionBlock)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct section names, the global section included.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn flatten(&self) -> Flattened {
        self.sections
            .iter()
            .map(|(name, block)| (name.clone(), block.flatten()))
            .collect()
    }
}
