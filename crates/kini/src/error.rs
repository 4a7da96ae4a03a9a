//! Error type shared by loading and list conversion.
//!
//! Most problems in INI text never become errors: malformed lines are skipped
//! during the parse and failed scalar conversions fall back to the caller's
//! default.  What remains is I/O from the line source and integer lists,
//! where a single bad element fails the whole lookup.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors surfaced by [`crate::IniConfig`].
#[derive(Debug, Error)]
pub enum IniError {
    /// The line source could not be opened or a read failed mid-pass.
    #[error("I/O error reading {origin}: {source}")]
    Io {
        /// Human-readable description of the source (file path or `"reader"`).
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// A reader-backed source was already drained and closed by an earlier load.
    #[error("line source already consumed: a reader can only be loaded once")]
    SourceConsumed,

    /// An element of an integer list could not be parsed.
    #[error("invalid integer {item:?} in list [{section}] {key}: {source}")]
    InvalidListItem {
        /// Section the key was looked up in (empty for the default section).
        section: String,
        /// Key whose value held the list.
        key: String,
        /// The offending element after trimming.
        item: String,
        #[source]
        source: ParseIntError,
    },
}
