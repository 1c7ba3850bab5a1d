/// The `section:key` addressing form used on the command line.
///
/// The raw string is split on its first unescaped colon; `\:` escapes a
/// literal colon inside either half. Both halves are lowercased, matching
/// the normalization the parser applies to names. A raw string with no
/// unescaped colon names a section on its own (`key()` is `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedKey {
    section: String,
    key: Option<String>,
}

impl QualifiedKey {
    pub fn parse(raw: &str) -> Self {
        let mut section = String::new();
        let mut key: Option<String> = None;
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            // decide the separator case before borrowing a half mutably
            if c == ':' && key.is_none() {
                key = Some(String::new());
                continue;
            }
            let half = key.as_mut().unwrap_or(&mut section);
            match c {
                '\\' => match chars.next() {
                    Some(':') => half.push(':'),
                    Some(other) => {
                        half.push('\\');
                        half.push(other);
                    }
                    None => half.push('\\'),
                },
                _ => half.push(c),
            }
        }

        Self {
            section: section.trim().to_lowercase(),
            key: key.map(|k| k.trim().to_lowercase()),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_colon() {
        let qk = QualifiedKey::parse("db:host");
        assert_eq!(qk.section(), "db");
        assert_eq!(qk.key(), Some("host"));
    }

    #[test]
    fn test_parse_lowercases_both_halves() {
        let qk = QualifiedKey::parse("DB:Host");
        assert_eq!(qk.section(), "db");
        assert_eq!(qk.key(), Some("host"));
    }

    #[test]
    fn test_parse_without_colon_names_a_section() {
        let qk = QualifiedKey::parse("db");
        assert_eq!(qk.section(), "db");
        assert_eq!(qk.key(), None);
    }

    #[test]
    fn test_escaped_colon_is_literal() {
        let qk = QualifiedKey::parse("a\\:b:key");
        assert_eq!(qk.section(), "a:b");
        assert_eq!(qk.key(), Some("key"));

        let qk = QualifiedKey::parse("sec:k\\:v");
        assert_eq!(qk.section(), "sec");
        assert_eq!(qk.key(), Some("k:v"));
    }

    #[test]
    fn test_escapes_on_both_sides_of_the_separator() {
        let qk = QualifiedKey::parse("a\\:b\\:c:k\\:1:2");
        assert_eq!(qk.section(), "a:b:c");
        assert_eq!(qk.key(), Some("k:1:2"));
    }

    #[test]
    fn test_later_colons_stay_in_key() {
        // only the first unescaped colon separates
        let qk = QualifiedKey::parse("sec:a:b");
        assert_eq!(qk.section(), "sec");
        assert_eq!(qk.key(), Some("a:b"));
    }

    #[test]
    fn test_backslash_before_other_chars_is_kept() {
        let qk = QualifiedKey::parse("a\\b:c");
        assert_eq!(qk.section(), "a\\b");
        assert_eq!(qk.key(), Some("c"));
    }

    #[test]
    fn test_trailing_backslash_is_kept() {
        let qk = QualifiedKey::parse("sec\\");
        assert_eq!(qk.section(), "sec\\");
    }

    #[test]
    fn test_empty_halves() {
        let qk = QualifiedKey::parse(":key");
        assert_eq!(qk.section(), "");
        assert_eq!(qk.key(), Some("key"));

        let qk = QualifiedKey::parse("sec:");
        assert_eq!(qk.section(), "sec");
        assert_eq!(qk.key(), Some(""));
    }
}
