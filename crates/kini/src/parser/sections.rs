//! Single-pass folding of classified lines into sections.
//!
//! The builder keeps the name of the current section and the entries seen
//! since its header.  A new header commits those entries under the current
//! name and starts afresh; the end of input commits whatever is pending.
//!
//! Committing *replaces* any earlier block with the same name, so
//!
//! ```text
//! [a]
//! x=1
//! [a]
//! y=2
//! ```
//!
//! leaves section `a` holding only `y=2`.

use std::collections::HashMap;
use std::convert::Infallible;

use tracing::trace;

use crate::parser::line::{classify, Entry, LineKind};
use crate::source::split_chunk;

/// Name of the implicit section holding entries that precede any header.
pub const DEFAULT_SECTION: &str = "";

/// Result of one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSections {
    /// Entries per section, in source order within each section.
    pub sections: HashMap<String, Vec<Entry>>,
    /// Number of lines read.
    pub lines_read: usize,
    /// Number of lines skipped as malformed.
    pub lines_dropped: usize,
}

impl ParsedSections {
    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }
}

/// Parses a sequence of lines, stopping at the first error the iterator yields.
///
/// Lines must not include their terminators.  The default section is always
/// committed at the end, so the result contains [`DEFAULT_SECTION`] even when
/// the input is empty or every entry sits under a header.
///
/// # Errors
///
/// Returns the first `Err` produced by `lines`; content never causes an error.
pub fn parse_lines<I, S, E>(lines: I) -> Result<ParsedSections, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    let mut parsed = ParsedSections::default();
    let mut current = DEFAULT_SECTION.to_string();
    let mut pending: Vec<Entry> = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line?;
        parsed.lines_read += 1;

        match classify(line.as_ref()) {
            LineKind::Section(name) => {
                let finished = std::mem::replace(&mut current, name.to_string());
                parsed.sections.insert(finished, std::mem::take(&mut pending));
            }
            LineKind::Entry { key, value } => pending.push(Entry::new(key, value)),
            LineKind::Ignored => {}
            LineKind::Malformed => {
                parsed.lines_dropped += 1;
                trace!(line = index + 1, "skipping malformed line");
            }
        }
    }

    parsed.sections.insert(current, pending);
    Ok(parsed)
}

/// Parses in-memory text.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`, the same terminators
/// [`crate::source::decoded_lines`] recognises for files and readers.
///
/// # Examples
///
/// ```rust
/// use kini::parser::parse_str;
///
/// let parsed = parse_str("top = 1\n[a]\nx = 2\n");
/// assert_eq!(parsed.sections[""][0].value, "1");
/// assert_eq!(parsed.sections["a"][0].key, "x");
/// ```
pub fn parse_str(text: &str) -> ParsedSections {
    match parse_lines(
        text.split_inclusive('\n')
            .flat_map(split_chunk)
            .map(Ok::<_, Infallible>),
    ) {
        Ok(parsed) => parsed,
        Err(never) => match never {},
    }
}
