//! Line classification.
//!
//! Grammar, one line at a time:
//!
//! ```text
//! [name]              section header, name = one or more word characters
//! ; anything          comment
//! <blank>             ignored
//! key = value ; note  entry, value stops at ';' and may be empty
//! ```
//!
//! Word characters are ASCII (`[A-Za-z0-9_]`).  Keys start and end with a word
//! character and may contain spaces in between, so surrounding whitespace is
//! never part of a key.  Values are captured untrimmed: `k = v ; c` stores
//! `"v "`.

use std::sync::LazyLock;

use regex::Regex;

/// Whole-line section header: `[name]` with nothing around it.
static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[((?-u:\w)+)\]$").expect("section pattern is a valid regex")
});

/// Entry prefix.  Anything after a `;` is an inline comment and left unmatched.
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?-u:\w)(?:(?-u:[\w\s])*(?-u:\w))?)(?-u:\s)*=(?-u:\s)*([^;\n]+)?")
        .expect("entry pattern is a valid regex")
});

/// One key/value pair as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Key, compared exactly (case-sensitive) on lookup.
    pub key: String,
    /// Raw value, not trimmed.  Empty when nothing followed `=`.
    pub value: String,
}

impl Entry {
    /// Creates an entry from its key and raw value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// What a single line of INI text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A `[name]` header; carries the name without brackets.
    Section(&'a str),
    /// A `;` comment or a whitespace-only line.
    Ignored,
    /// A `key = value` line.
    Entry {
        key: &'a str,
        value: &'a str,
    },
    /// Anything else, including bracket lines that are not a valid header.
    Malformed,
}

/// Classifies one line (without its line terminator).
///
/// # Examples
///
/// ```rust
/// use kini::parser::{classify, LineKind};
///
/// assert_eq!(classify("[server]"), LineKind::Section("server"));
/// assert_eq!(classify("; note"), LineKind::Ignored);
/// assert_eq!(classify("port = 80"), LineKind::Entry { key: "port", value: "80" });
/// assert_eq!(classify("[bad name]"), LineKind::Malformed);
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with('[') {
        return match SECTION_PATTERN.captures(line).and_then(|caps| caps.get(1)) {
            Some(name) => LineKind::Section(name.as_str()),
            None => LineKind::Malformed,
        };
    }

    if line.starts_with(';') || line.trim().is_empty() {
        return LineKind::Ignored;
    }

    match ENTRY_PATTERN.captures(line) {
        Some(caps) => match caps.get(1) {
            Some(key) => LineKind::Entry {
                key: key.as_str(),
                value: caps.get(2).map_or("", |m| m.as_str()),
            },
            None => LineKind::Malformed,
        },
        None => LineKind::Malformed,
    }
}
