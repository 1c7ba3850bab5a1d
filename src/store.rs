use thiserror::Error;

use crate::QualifiedKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no such section: {0}")]
    SectionNotFound(String),
}

/// One key/value pair within a section.
///
/// `value` is `None` for a key declared without an assigned value, which is
/// distinct from `Some("")` for a key assigned an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Option<String>,
}

/// A named group of entries. Entries keep insertion order; keys are unique
/// within a section (re-declaring a key overwrites its value in place).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entries: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        let needle = key.to_lowercase();
        self.entries.iter().find(|e| e.key == needle)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Last write wins; an overwritten key keeps its original position.
    pub(crate) fn insert(&mut self, key: String, value: Option<String>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            existing.value = value;
            return;
        }
        self.entries.push(Entry { key, value });
    }
}

/// The in-memory result of parsing one INI document.
///
/// Sections keep first-seen order; section names are unique (a repeated
/// `[header]` re-opens the existing section). All names are lowercased at
/// parse time and every lookup lowercases its input the same way.
///
/// A `Store` has no mutating methods after parsing, so one instance may be
/// read by any number of concurrent callers without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    sections: Vec<Section>,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self { sections: vec![] }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        let needle = name.trim().to_lowercase();
        self.sections.iter().find(|s| s.name == needle)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in first-seen order. CLI: -s.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Keys of one section in insertion order. CLI: -k.
    pub fn keys_in(
        &self,
        section: &str,
    ) -> Result<impl Iterator<Item = &str>, StoreError> {
        self.section(section)
            .map(Section::keys)
            .ok_or_else(|| StoreError::SectionNotFound(section.trim().to_lowercase()))
    }

    /// Every key of every section, in (section-order, key-order). Keys are
    /// bare, so a key present in two sections appears twice. CLI: -a.
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().flat_map(Section::keys)
    }

    /// Resolve a qualified key to its entry. A qualified key without a key
    /// half names a section, never an entry.
    pub fn find_entry(&self, key: &QualifiedKey) -> Option<&Entry> {
        let section = self.section(key.section())?;
        section.get(key.key()?)
    }

    /// Returns the index of `name`, opening a new section if unseen.
    pub(crate) fn open_section(&mut self, name: String) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return idx;
        }
        self.sections.push(Section::new(name));
        self.sections.len() - 1
    }

    pub(crate) fn insert(&mut self, section: usize, key: String, value: Option<String>) {
        debug_assert!(section < self.sections.len());
        self.sections[section].insert(key, value);
    }
}
