use std::path::Path;

use thiserror::Error;

use crate::{Error, Store};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed line: {content}")]
    MalformedLine { line: usize, content: String },
}

/// Parsing strictness. The default is lenient, matching the classic tool:
/// lines that are neither a header, an entry nor a comment are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict: bool,
}

/// Parse INI text into an immutable [`Store`].
///
/// Recognized line forms (after trimming):
/// - `[name]` opens (or re-opens) a section, name lowercased and trimmed
/// - `key = value` or `key: value` adds an entry to the current section;
///   whichever separator appears first in the line wins
/// - a bare word declares a key with no assigned value
/// - blank lines and lines starting with `;` or `#` are comments
///
/// Keys appearing before any `[section]` header go to a reserved section
/// with the empty name. Anything unrecognized is skipped in lenient mode
/// and is a [`ParseError::MalformedLine`] in strict mode.
pub fn parse_ini(text: &str, options: &ParseOptions) -> Result<Store, ParseError> {
    let mut store = Store::new();
    let mut current: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            current = Some(store.open_section(name.trim().to_lowercase()));
            continue;
        }

        let line_no = idx + 1;

        if let Some(pos) = line.find(['=', ':']) {
            // keys keep internal whitespace; only the ends are trimmed
            let key = line[..pos].trim();
            if key.is_empty() {
                malformed(options, line_no, line)?;
                continue;
            }
            // separator chars are ASCII, so pos + 1 stays on a char boundary
            let value = line[pos + 1..].trim().to_string();
            let section = open_current(&mut store, &mut current);
            store.insert(section, key.to_lowercase(), Some(value));
            continue;
        }

        if line.starts_with('[') || line.contains(char::is_whitespace) {
            malformed(options, line_no, line)?;
            continue;
        }

        // bare word: a key declared without an assigned value
        if options.strict {
            return Err(ParseError::MalformedLine {
                line: line_no,
                content: line.to_string(),
            });
        }
        let section = open_current(&mut store, &mut current);
        store.insert(section, line.to_lowercase(), None);
    }

    Ok(store)
}

/// Read and parse one INI file. The file handle is released before parsing
/// starts, on success and failure alike. CLI: the trailing INI-FILE argument.
pub fn load_ini(path: &Path, options: &ParseOptions) -> Result<Store, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_ini(&text, options)?)
}

fn open_current(store: &mut Store, current: &mut Option<usize>) -> usize {
    match *current {
        Some(idx) => idx,
        None => {
            let idx = store.open_section(String::new());
            *current = Some(idx);
            idx
        }
    }
}

fn malformed(options: &ParseOptions, line: usize, content: &str) -> Result<(), ParseError> {
    if options.strict {
        return Err(ParseError::MalformedLine {
            line,
            content: content.to_string(),
        });
    }
    Ok(())
}
