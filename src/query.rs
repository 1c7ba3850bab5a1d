use std::borrow::Cow;

use regex::{Regex, RegexBuilder};

use crate::store::{Entry, Section};
use crate::{QualifiedKey, Store};

/// POSIX regex dialect selector. Extended adds unescaped `+ ? | ( ) { }` as
/// metacharacters; in the basic dialect those are literals and their
/// backslashed forms are the operators. CLI: -g/-v (basic), -G/-V (extended).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexDialect {
    Basic,
    Extended,
}

/// Outcome of a value lookup. `NoValue` (the key exists but was declared
/// without an assigned value) is distinct from `NotFound`, which maps to
/// exit code 2 at the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLookup<'a> {
    Found(&'a str),
    NoValue,
    NotFound,
}

/// Whether the qualified key resolves. The value may still be absent;
/// existence of the name is what is tested. CLI: -e.
pub fn exists(store: &Store, key: &QualifiedKey) -> bool {
    match key.key() {
        Some(_) => store.find_entry(key).is_some(),
        None => store.section(key.section()).is_some(),
    }
}

/// Look up the value at a qualified key. CLI: -p.
pub fn get_value<'a>(store: &'a Store, key: &QualifiedKey) -> ValueLookup<'a> {
    if key.key().is_none() {
        // a colon-free qualified key names a section, which has no value
        return if store.section(key.section()).is_some() {
            ValueLookup::NoValue
        } else {
            ValueLookup::NotFound
        };
    }
    match store.find_entry(key) {
        Some(Entry {
            value: Some(value), ..
        }) => ValueLookup::Found(value),
        Some(_) => ValueLookup::NoValue,
        None => ValueLookup::NotFound,
    }
}

/// Compile a pattern as a case-insensitive regex in the given dialect.
/// Capture groups are syntactically legal but never inspected.
pub fn compile_pattern(pattern: &str, dialect: RegexDialect) -> Result<Regex, regex::Error> {
    let pattern = match dialect {
        RegexDialect::Basic => Cow::Owned(rewrite_basic(pattern)),
        RegexDialect::Extended => Cow::Borrowed(pattern),
    };
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Keys whose name matches the pattern, yielded lazily in (section-order,
/// key-order). A key present in two sections is yielded twice. A malformed
/// pattern fails the whole query before any iteration. CLI: -g/-G.
pub fn grep_keys<'a>(
    store: &'a Store,
    pattern: &str,
    dialect: RegexDialect,
) -> Result<GrepMatches<'a>, regex::Error> {
    Ok(GrepMatches::new(
        store,
        compile_pattern(pattern, dialect)?,
        GrepTarget::Keys,
    ))
}

/// Keys whose value matches the pattern; same traversal as [`grep_keys`],
/// but entries with an absent value are skipped. Yields the key name, not
/// the value. CLI: -v/-V.
pub fn grep_values<'a>(
    store: &'a Store,
    pattern: &str,
    dialect: RegexDialect,
) -> Result<GrepMatches<'a>, regex::Error> {
    Ok(GrepMatches::new(
        store,
        compile_pattern(pattern, dialect)?,
        GrepTarget::Values,
    ))
}

#[derive(Debug, Clone, Copy)]
enum GrepTarget {
    Keys,
    Values,
}

/// Lazy, single-pass iterator over grep matches.
#[derive(Debug)]
pub struct GrepMatches<'a> {
    regex: Regex,
    target: GrepTarget,
    sections: std::slice::Iter<'a, Section>,
    entries: std::slice::Iter<'a, Entry>,
}

impl<'a> GrepMatches<'a> {
    fn new(store: &'a Store, regex: Regex, target: GrepTarget) -> Self {
        Self {
            regex,
            target,
            sections: store.sections().iter(),
            entries: Default::default(),
        }
    }

    fn matches(&self, entry: &Entry) -> bool {
        match self.target {
            GrepTarget::Keys => self.regex.is_match(&entry.key),
            GrepTarget::Values => match entry.value {
                Some(ref value) => self.regex.is_match(value),
                None => false,
            },
        }
    }
}

impl<'a> Iterator for GrepMatches<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(entry) = self.entries.next() {
                if self.matches(entry) {
                    return Some(&entry.key);
                }
                continue;
            }
            self.entries = self.sections.next()?.entries().iter();
        }
    }
}

/// Rewrite a POSIX basic pattern so the extended-only metacharacters become
/// literals before handing it to the engine. Backslashed forms turn back
/// into operators, GNU style. A trailing lone backslash stays literal.
fn rewrite_basic(pattern: &str) -> String {
    const EXTENDED_ONLY: [char; 7] = ['+', '?', '|', '(', ')', '{', '}'];

    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(m) if EXTENDED_ONLY.contains(&m) => out.push(m),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push_str("\\\\"),
            },
            _ if EXTENDED_ONLY.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
